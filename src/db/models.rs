use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct DbCamper {
    pub id: i64,
    pub name: String,
    pub age: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct DbActivity {
    pub id: i64,
    pub name: String,
    pub difficulty: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Join row. Relationships are plain foreign keys; derived collections are
/// loaded with explicit join queries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct DbSignup {
    pub id: i64,
    /// Hour-of-day slot, at most 23.
    pub time: i64,
    pub camper_id: i64,
    pub activity_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
