//! Database module: models, validation and schema for persistent storage.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows
//! - `patch.rs`: create/patch payloads accepted by the actor
//! - `validate.rs`: field rules run before every write
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `actor.rs`: the actor owning the pool, plus its cloneable handle

pub mod actor;
pub mod models;
pub mod patch;
pub mod schema;
pub mod validate;

pub use models::{DbActivity, DbCamper, DbSignup};
pub use patch::{ActivityCreate, CamperCreate, CamperPatch, SignupCreate};
pub use schema::SQLITE_INIT;

pub use actor::{DbActorHandle, spawn};
