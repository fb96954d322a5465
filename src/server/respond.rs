//! JSON views returned by the HTTP layer.
//!
//! Views are flat. The only nesting is signup -> activity; activity views never
//! point back at their signups, which keeps every response acyclic.

use crate::db::{DbActivity, DbCamper, DbSignup};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CamperView {
    pub id: i64,
    pub name: String,
    pub age: i64,
}

impl From<DbCamper> for CamperView {
    fn from(c: DbCamper) -> Self {
        Self {
            id: c.id,
            name: c.name,
            age: c.age,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityView {
    pub id: i64,
    pub name: String,
    pub difficulty: i64,
}

impl From<DbActivity> for ActivityView {
    fn from(a: DbActivity) -> Self {
        Self {
            id: a.id,
            name: a.name,
            difficulty: a.difficulty,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignupView {
    pub id: i64,
    pub time: i64,
    pub camper_id: i64,
    pub activity_id: i64,
}

impl From<DbSignup> for SignupView {
    fn from(s: DbSignup) -> Self {
        Self {
            id: s.id,
            time: s.time,
            camper_id: s.camper_id,
            activity_id: s.activity_id,
        }
    }
}

/// Body of `POST /signups`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignupCreatedView {
    pub activity: ActivityView,
}

pub fn views<T, V>(rows: Vec<T>) -> Vec<V>
where
    V: From<T>,
{
    rows.into_iter().map(V::from).collect()
}
