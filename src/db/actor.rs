use crate::db::models::{DbActivity, DbCamper, DbSignup};
use crate::db::patch::{ActivityCreate, CamperCreate, CamperPatch, SignupCreate};
use crate::db::schema::SQLITE_INIT;
use crate::error::{CampError, Entity};
use chrono::Utc;
use ractor::{Actor, ActorProcessingErr, ActorRef, RpcReplyPort};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::{Sqlite, SqlitePool, Transaction};
use std::{str::FromStr, time::Duration};
use tracing::{debug, info};

const CAMPER_COLUMNS: &str = "id, name, age, created_at, updated_at";
const ACTIVITY_COLUMNS: &str = "id, name, difficulty, created_at, updated_at";
const SIGNUP_COLUMNS: &str = "id, time, camper_id, activity_id, created_at, updated_at";

#[derive(Debug)]
pub enum DbActorMessage {
    /// Validate and insert a camper.
    CreateCamper(CamperCreate, RpcReplyPort<Result<DbCamper, CampError>>),

    /// List all campers in insertion order.
    ListCampers(RpcReplyPort<Result<Vec<DbCamper>, CampError>>),

    /// Get camper by id.
    GetCamper(i64, RpcReplyPort<Result<DbCamper, CampError>>),

    /// Merge a patch into a camper, re-validating the whole record.
    UpdateCamper(i64, CamperPatch, RpcReplyPort<Result<DbCamper, CampError>>),

    /// Activities a camper is signed up for.
    ListCamperActivities(i64, RpcReplyPort<Result<Vec<DbActivity>, CampError>>),

    /// Insert an activity.
    CreateActivity(ActivityCreate, RpcReplyPort<Result<DbActivity, CampError>>),

    /// List all activities in insertion order.
    ListActivities(RpcReplyPort<Result<Vec<DbActivity>, CampError>>),

    /// Delete an activity together with its signups.
    DeleteActivity(i64, RpcReplyPort<Result<(), CampError>>),

    /// Campers signed up for an activity.
    ListActivityCampers(i64, RpcReplyPort<Result<Vec<DbCamper>, CampError>>),

    /// Insert activities only when the table is empty; returns the number inserted.
    SeedActivities(Vec<ActivityCreate>, RpcReplyPort<Result<usize, CampError>>),

    /// Validate references and insert a signup; replies with the signup and the
    /// activity row read in the same transaction.
    CreateSignup(
        SignupCreate,
        RpcReplyPort<Result<(DbSignup, DbActivity), CampError>>,
    ),

    /// List all signups in insertion order.
    ListSignups(RpcReplyPort<Result<Vec<DbSignup>, CampError>>),
}

/// Cloneable storage handle passed to every request handler.
#[derive(Clone)]
pub struct DbActorHandle {
    actor: ActorRef<DbActorMessage>,
}

impl DbActorHandle {
    pub async fn create_camper(&self, create: CamperCreate) -> Result<DbCamper, CampError> {
        ractor::call!(self.actor, DbActorMessage::CreateCamper, create)
            .map_err(|e| CampError::RactorError(format!("DbActor CreateCamper RPC failed: {e}")))?
    }

    pub async fn list_campers(&self) -> Result<Vec<DbCamper>, CampError> {
        ractor::call!(self.actor, DbActorMessage::ListCampers)
            .map_err(|e| CampError::RactorError(format!("DbActor ListCampers RPC failed: {e}")))?
    }

    pub async fn get_camper(&self, id: i64) -> Result<DbCamper, CampError> {
        ractor::call!(self.actor, DbActorMessage::GetCamper, id)
            .map_err(|e| CampError::RactorError(format!("DbActor GetCamper RPC failed: {e}")))?
    }

    pub async fn update_camper(&self, id: i64, patch: CamperPatch) -> Result<DbCamper, CampError> {
        ractor::call!(self.actor, DbActorMessage::UpdateCamper, id, patch)
            .map_err(|e| CampError::RactorError(format!("DbActor UpdateCamper RPC failed: {e}")))?
    }

    pub async fn list_camper_activities(&self, id: i64) -> Result<Vec<DbActivity>, CampError> {
        ractor::call!(self.actor, DbActorMessage::ListCamperActivities, id).map_err(|e| {
            CampError::RactorError(format!("DbActor ListCamperActivities RPC failed: {e}"))
        })?
    }

    pub async fn create_activity(&self, create: ActivityCreate) -> Result<DbActivity, CampError> {
        ractor::call!(self.actor, DbActorMessage::CreateActivity, create).map_err(|e| {
            CampError::RactorError(format!("DbActor CreateActivity RPC failed: {e}"))
        })?
    }

    pub async fn list_activities(&self) -> Result<Vec<DbActivity>, CampError> {
        ractor::call!(self.actor, DbActorMessage::ListActivities).map_err(|e| {
            CampError::RactorError(format!("DbActor ListActivities RPC failed: {e}"))
        })?
    }

    pub async fn delete_activity(&self, id: i64) -> Result<(), CampError> {
        ractor::call!(self.actor, DbActorMessage::DeleteActivity, id).map_err(|e| {
            CampError::RactorError(format!("DbActor DeleteActivity RPC failed: {e}"))
        })?
    }

    pub async fn list_activity_campers(&self, id: i64) -> Result<Vec<DbCamper>, CampError> {
        ractor::call!(self.actor, DbActorMessage::ListActivityCampers, id).map_err(|e| {
            CampError::RactorError(format!("DbActor ListActivityCampers RPC failed: {e}"))
        })?
    }

    pub async fn seed_activities(&self, seeds: Vec<ActivityCreate>) -> Result<usize, CampError> {
        ractor::call!(self.actor, DbActorMessage::SeedActivities, seeds).map_err(|e| {
            CampError::RactorError(format!("DbActor SeedActivities RPC failed: {e}"))
        })?
    }

    pub async fn create_signup(
        &self,
        create: SignupCreate,
    ) -> Result<(DbSignup, DbActivity), CampError> {
        ractor::call!(self.actor, DbActorMessage::CreateSignup, create)
            .map_err(|e| CampError::RactorError(format!("DbActor CreateSignup RPC failed: {e}")))?
    }

    pub async fn list_signups(&self) -> Result<Vec<DbSignup>, CampError> {
        ractor::call!(self.actor, DbActorMessage::ListSignups)
            .map_err(|e| CampError::RactorError(format!("DbActor ListSignups RPC failed: {e}")))?
    }
}

struct DbActorState {
    pool: SqlitePool,
}

struct DbActor;

#[ractor::async_trait]
impl Actor for DbActor {
    type Msg = DbActorMessage;
    type State = DbActorState;
    type Arguments = String;

    async fn pre_start(
        &self,
        _myself: ActorRef<Self::Msg>,
        database_url: Self::Arguments,
    ) -> Result<Self::State, ActorProcessingErr> {
        let connect_opts = SqliteConnectOptions::from_str(database_url.as_str())
            .map_err(|e| ActorProcessingErr::from(format!("invalid database url: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5))
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .connect_with(connect_opts)
            .await
            .map_err(|e| ActorProcessingErr::from(format!("db connect failed: {e}")))?;

        apply_schema(&pool)
            .await
            .map_err(|e| ActorProcessingErr::from(format!("db schema init failed: {e}")))?;

        info!("DbActor initialized");
        Ok(DbActorState { pool })
    }

    async fn handle(
        &self,
        _myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        let pool = &state.pool;
        match message {
            DbActorMessage::CreateCamper(create, reply) => {
                let _ = reply.send(self.create_camper(pool, create).await);
            }
            DbActorMessage::ListCampers(reply) => {
                let _ = reply.send(self.list_campers(pool).await);
            }
            DbActorMessage::GetCamper(id, reply) => {
                let _ = reply.send(self.get_camper(pool, id).await);
            }
            DbActorMessage::UpdateCamper(id, patch, reply) => {
                let _ = reply.send(self.update_camper(pool, id, patch).await);
            }
            DbActorMessage::ListCamperActivities(id, reply) => {
                let _ = reply.send(self.list_camper_activities(pool, id).await);
            }
            DbActorMessage::CreateActivity(create, reply) => {
                let _ = reply.send(self.create_activity(pool, create).await);
            }
            DbActorMessage::ListActivities(reply) => {
                let _ = reply.send(self.list_activities(pool).await);
            }
            DbActorMessage::DeleteActivity(id, reply) => {
                let _ = reply.send(self.delete_activity(pool, id).await);
            }
            DbActorMessage::ListActivityCampers(id, reply) => {
                let _ = reply.send(self.list_activity_campers(pool, id).await);
            }
            DbActorMessage::SeedActivities(seeds, reply) => {
                let _ = reply.send(self.seed_activities(pool, seeds).await);
            }
            DbActorMessage::CreateSignup(create, reply) => {
                let _ = reply.send(self.create_signup(pool, create).await);
            }
            DbActorMessage::ListSignups(reply) => {
                let _ = reply.send(self.list_signups(pool).await);
            }
        }
        Ok(())
    }
}

impl DbActor {
    async fn create_camper(
        &self,
        pool: &SqlitePool,
        create: CamperCreate,
    ) -> Result<DbCamper, CampError> {
        create.validate()?;

        let now = Utc::now();
        let mut tx = pool.begin().await?;
        let camper = sqlx::query_as::<_, DbCamper>(&format!(
            "INSERT INTO campers (name, age, created_at, updated_at) VALUES (?, ?, ?, ?) RETURNING {CAMPER_COLUMNS}"
        ))
        .bind(create.name)
        .bind(create.age)
        .bind(now)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;

        debug!(id = camper.id, age = camper.age, "camper created");
        Ok(camper)
    }

    async fn list_campers(&self, pool: &SqlitePool) -> Result<Vec<DbCamper>, CampError> {
        let rows = sqlx::query_as::<_, DbCamper>(&format!(
            "SELECT {CAMPER_COLUMNS} FROM campers ORDER BY id"
        ))
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }

    async fn get_camper(&self, pool: &SqlitePool, id: i64) -> Result<DbCamper, CampError> {
        sqlx::query_as::<_, DbCamper>(&format!(
            "SELECT {CAMPER_COLUMNS} FROM campers WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(CampError::NotFound {
            entity: Entity::Camper,
            id,
        })
    }

    async fn update_camper(
        &self,
        pool: &SqlitePool,
        id: i64,
        patch: CamperPatch,
    ) -> Result<DbCamper, CampError> {
        let mut tx = pool.begin().await?;
        let current = sqlx::query_as::<_, DbCamper>(&format!(
            "SELECT {CAMPER_COLUMNS} FROM campers WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(CampError::NotFound {
            entity: Entity::Camper,
            id,
        })?;

        let merged = patch.merge_into(&current);
        merged.validate()?;

        let updated_at = Utc::now();
        let camper = sqlx::query_as::<_, DbCamper>(&format!(
            "UPDATE campers SET name = ?, age = ?, updated_at = ? WHERE id = ? RETURNING {CAMPER_COLUMNS}"
        ))
        .bind(merged.name)
        .bind(merged.age)
        .bind(updated_at)
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;

        debug!(id, updated_at = %updated_at, "camper updated");
        Ok(camper)
    }

    async fn list_camper_activities(
        &self,
        pool: &SqlitePool,
        camper_id: i64,
    ) -> Result<Vec<DbActivity>, CampError> {
        let mut tx = pool.begin().await?;
        if !record_exists(&mut tx, Entity::Camper, camper_id).await? {
            return Err(CampError::NotFound {
                entity: Entity::Camper,
                id: camper_id,
            });
        }

        let rows = sqlx::query_as::<_, DbActivity>(
            r#"
        SELECT DISTINCT a.id, a.name, a.difficulty, a.created_at, a.updated_at
        FROM activities a
        JOIN signups s ON s.activity_id = a.id
        WHERE s.camper_id = ?
        ORDER BY a.id
        "#,
        )
        .bind(camper_id)
        .fetch_all(&mut *tx)
        .await?;
        tx.commit().await?;

        Ok(rows)
    }

    async fn create_activity(
        &self,
        pool: &SqlitePool,
        create: ActivityCreate,
    ) -> Result<DbActivity, CampError> {
        let mut tx = pool.begin().await?;
        let activity = insert_activity(&mut tx, create).await?;
        tx.commit().await?;

        debug!(id = activity.id, "activity created");
        Ok(activity)
    }

    async fn list_activities(&self, pool: &SqlitePool) -> Result<Vec<DbActivity>, CampError> {
        let rows = sqlx::query_as::<_, DbActivity>(&format!(
            "SELECT {ACTIVITY_COLUMNS} FROM activities ORDER BY id"
        ))
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }

    async fn delete_activity(&self, pool: &SqlitePool, id: i64) -> Result<(), CampError> {
        let mut tx = pool.begin().await?;
        if !record_exists(&mut tx, Entity::Activity, id).await? {
            return Err(CampError::NotFound {
                entity: Entity::Activity,
                id,
            });
        }

        // Signups go first so the cascade never depends on the FK pragma.
        let signups_removed = sqlx::query("DELETE FROM signups WHERE activity_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        sqlx::query("DELETE FROM activities WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        debug!(id, signups_removed, "activity deleted");
        Ok(())
    }

    async fn list_activity_campers(
        &self,
        pool: &SqlitePool,
        activity_id: i64,
    ) -> Result<Vec<DbCamper>, CampError> {
        let mut tx = pool.begin().await?;
        if !record_exists(&mut tx, Entity::Activity, activity_id).await? {
            return Err(CampError::NotFound {
                entity: Entity::Activity,
                id: activity_id,
            });
        }

        let rows = sqlx::query_as::<_, DbCamper>(
            r#"
        SELECT DISTINCT c.id, c.name, c.age, c.created_at, c.updated_at
        FROM campers c
        JOIN signups s ON s.camper_id = c.id
        WHERE s.activity_id = ?
        ORDER BY c.id
        "#,
        )
        .bind(activity_id)
        .fetch_all(&mut *tx)
        .await?;
        tx.commit().await?;

        Ok(rows)
    }

    async fn seed_activities(
        &self,
        pool: &SqlitePool,
        seeds: Vec<ActivityCreate>,
    ) -> Result<usize, CampError> {
        let mut tx = pool.begin().await?;
        let existing: i64 = sqlx::query_scalar("SELECT COUNT(1) FROM activities")
            .fetch_one(&mut *tx)
            .await?;
        if existing > 0 {
            debug!(existing, "activities already present, skipping seed");
            return Ok(0);
        }

        let mut inserted = 0usize;
        for seed in seeds {
            insert_activity(&mut tx, seed).await?;
            inserted += 1;
        }
        tx.commit().await?;

        Ok(inserted)
    }

    async fn create_signup(
        &self,
        pool: &SqlitePool,
        create: SignupCreate,
    ) -> Result<(DbSignup, DbActivity), CampError> {
        create.validate()?;

        let mut tx = pool.begin().await?;
        if !record_exists(&mut tx, Entity::Camper, create.camper_id).await? {
            return Err(CampError::Referential {
                entity: Entity::Camper,
                id: create.camper_id,
            });
        }
        let activity = sqlx::query_as::<_, DbActivity>(&format!(
            "SELECT {ACTIVITY_COLUMNS} FROM activities WHERE id = ?"
        ))
        .bind(create.activity_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(CampError::Referential {
            entity: Entity::Activity,
            id: create.activity_id,
        })?;

        let now = Utc::now();
        let signup = sqlx::query_as::<_, DbSignup>(&format!(
            "INSERT INTO signups (time, camper_id, activity_id, created_at, updated_at) VALUES (?, ?, ?, ?, ?) RETURNING {SIGNUP_COLUMNS}"
        ))
        .bind(create.time)
        .bind(create.camper_id)
        .bind(create.activity_id)
        .bind(now)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;

        debug!(
            id = signup.id,
            camper_id = signup.camper_id,
            activity_id = signup.activity_id,
            time = signup.time,
            "signup created"
        );
        Ok((signup, activity))
    }

    async fn list_signups(&self, pool: &SqlitePool) -> Result<Vec<DbSignup>, CampError> {
        let rows = sqlx::query_as::<_, DbSignup>(&format!(
            "SELECT {SIGNUP_COLUMNS} FROM signups ORDER BY id"
        ))
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }
}

async fn insert_activity(
    tx: &mut Transaction<'_, Sqlite>,
    create: ActivityCreate,
) -> Result<DbActivity, CampError> {
    let now = Utc::now();
    let activity = sqlx::query_as::<_, DbActivity>(&format!(
        "INSERT INTO activities (name, difficulty, created_at, updated_at) VALUES (?, ?, ?, ?) RETURNING {ACTIVITY_COLUMNS}"
    ))
    .bind(create.name)
    .bind(create.difficulty)
    .bind(now)
    .bind(now)
    .fetch_one(&mut **tx)
    .await?;

    Ok(activity)
}

async fn record_exists(
    tx: &mut Transaction<'_, Sqlite>,
    entity: Entity,
    id: i64,
) -> Result<bool, CampError> {
    let sql = match entity {
        Entity::Camper => "SELECT COUNT(1) FROM campers WHERE id = ?",
        Entity::Activity => "SELECT COUNT(1) FROM activities WHERE id = ?",
    };
    let count: i64 = sqlx::query_scalar(sql).bind(id).fetch_one(&mut **tx).await?;
    Ok(count > 0)
}

/// Spawn the database actor and return a cloneable handle.
pub async fn spawn(database_url: &str) -> DbActorHandle {
    let (actor, _jh) = ractor::Actor::spawn(None, DbActor, database_url.to_string())
        .await
        .expect("failed to spawn DbActor");

    DbActorHandle { actor }
}

async fn apply_schema(pool: &SqlitePool) -> Result<(), CampError> {
    for stmt in SQLITE_INIT.split(';') {
        let s = stmt.trim();
        if s.is_empty() {
            continue;
        }
        sqlx::query(s).execute(pool).await?;
    }
    Ok(())
}
