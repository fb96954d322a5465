//! Field rules checked by every create/update entry point before a write.

use std::ops::RangeInclusive;

use super::patch::{CamperCreate, SignupCreate};
use crate::error::ValidationError;

pub const CAMPER_AGE_RANGE: RangeInclusive<i64> = 8..=18;
pub const MAX_SIGNUP_HOUR: i64 = 23;

pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::InvalidName);
    }
    Ok(())
}

pub fn validate_age(age: i64) -> Result<(), ValidationError> {
    if CAMPER_AGE_RANGE.contains(&age) {
        Ok(())
    } else {
        Err(ValidationError::InvalidAge)
    }
}

/// Hour-of-day slot; only the upper bound is enforced.
pub fn validate_time(time: i64) -> Result<(), ValidationError> {
    if time <= MAX_SIGNUP_HOUR {
        Ok(())
    } else {
        Err(ValidationError::InvalidTime)
    }
}

impl CamperCreate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_name(&self.name)?;
        validate_age(self.age)
    }
}

impl SignupCreate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_time(self.time)
    }
}
