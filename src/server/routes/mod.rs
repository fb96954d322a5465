pub mod activities;
pub mod campers;
pub(crate) mod fields;
pub(crate) mod id;
pub mod signups;
