use serde::{Deserialize, Serialize};

use crate::db::{ActivityCreate, DbActorHandle};
use crate::error::CampError;
use tracing::info;

/// Fixture data loaded into an empty database at startup.
///
/// ```toml
/// [[seed.activities]]
/// name = "Archery"
/// difficulty = 3
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SeedConfig {
    #[serde(default)]
    pub activities: Vec<SeedActivity>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SeedActivity {
    pub name: String,
    pub difficulty: i64,
}

impl SeedConfig {
    pub fn activity_creates(&self) -> Vec<ActivityCreate> {
        self.activities
            .iter()
            .map(|a| ActivityCreate {
                name: a.name.clone(),
                difficulty: a.difficulty,
            })
            .collect()
    }

    /// Insert the configured activities if the database has none yet.
    pub async fn apply(&self, db: &DbActorHandle) -> Result<usize, CampError> {
        if self.activities.is_empty() {
            return Ok(0);
        }
        let inserted = db.seed_activities(self.activity_creates()).await?;
        info!(
            configured = self.activities.len(),
            inserted, "seed activities applied"
        );
        Ok(inserted)
    }
}
