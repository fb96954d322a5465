use serde::{Deserialize, Serialize};

use super::models::DbCamper;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CamperCreate {
    pub name: String,
    pub age: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityCreate {
    pub name: String,
    pub difficulty: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignupCreate {
    pub time: i64,
    pub camper_id: i64,
    pub activity_id: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CamperPatch {
    /// `None` => do not change; `Some(v)` => update
    pub name: Option<String>,
    /// `None` => do not change; `Some(v)` => update
    pub age: Option<i64>,
}

impl CamperPatch {
    /// Full record that results from applying this patch to `current`.
    ///
    /// The merged record goes through the same validation as a create.
    pub fn merge_into(self, current: &DbCamper) -> CamperCreate {
        CamperCreate {
            name: self.name.unwrap_or_else(|| current.name.clone()),
            age: self.age.unwrap_or(current.age),
        }
    }
}
