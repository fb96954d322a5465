//! SQL DDL for initializing the database schema.
//! SQLite-first design; can be adapted for other RDBMS.

/// SQLite schema includes:
/// - `campers` table (one camper per row)
/// - `activities` table (one activity per row)
/// - `signups` table (join rows between campers and activities)
pub const SQLITE_INIT: &str = r#"
-- ---------------------------------------------------------------------------
-- Campers
-- ---------------------------------------------------------------------------
CREATE TABLE IF NOT EXISTS campers (
    id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
    name TEXT NOT NULL CHECK (length(name) > 0),
    age INTEGER NOT NULL CHECK (age BETWEEN 8 AND 18),
    created_at TEXT NOT NULL, -- RFC3339
    updated_at TEXT NOT NULL -- RFC3339
);

-- ---------------------------------------------------------------------------
-- Activities
-- ---------------------------------------------------------------------------
CREATE TABLE IF NOT EXISTS activities (
    id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
    name TEXT NOT NULL,
    difficulty INTEGER NOT NULL,
    created_at TEXT NOT NULL, -- RFC3339
    updated_at TEXT NOT NULL -- RFC3339
);

-- ---------------------------------------------------------------------------
-- Signups (no uniqueness over camper/activity/time)
-- ---------------------------------------------------------------------------
CREATE TABLE IF NOT EXISTS signups (
    id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
    time INTEGER NOT NULL CHECK (time <= 23),
    camper_id INTEGER NOT NULL REFERENCES campers(id),
    activity_id INTEGER NOT NULL REFERENCES activities(id) ON DELETE CASCADE,
    created_at TEXT NOT NULL, -- RFC3339
    updated_at TEXT NOT NULL -- RFC3339
);

CREATE INDEX IF NOT EXISTS idx_signups_camper_id ON signups(camper_id);
CREATE INDEX IF NOT EXISTS idx_signups_activity_id ON signups(activity_id);
"#;
