//! SQLite database schema for cardmatch

use rusqlite::{Connection, Result};

pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// Result of schema creation
#[derive(Debug, PartialEq, Eq)]
pub enum SchemaCreateResult {
    /// Fresh database, schema created
    Created,
    /// Existing database at the current version
    Current,
    /// Database written by a newer cardmatch
    TooNew(i32),
}

const SCHEMA_SQL: &str = r#"
-- Technology catalog (global, not owner-scoped)
CREATE TABLE IF NOT EXISTS technologies (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    kind TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS projects (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    owner_id TEXT NOT NULL,
    name TEXT NOT NULL,
    description TEXT,
    status TEXT NOT NULL DEFAULT 'E' CHECK (status IN ('E', 'P', 'F')),
    collaboration INTEGER NOT NULL CHECK (collaboration BETWEEN 1 AND 10),
    organization INTEGER NOT NULL CHECK (organization BETWEEN 1 AND 10),
    delivery_speed INTEGER NOT NULL CHECK (delivery_speed BETWEEN 1 AND 10),
    starts_on TEXT,
    ends_on TEXT,
    created_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_projects_owner ON projects(owner_id);

CREATE TABLE IF NOT EXISTS project_levels (
    project_id INTEGER NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
    tech_id INTEGER NOT NULL REFERENCES technologies(id),
    required_level INTEGER NOT NULL CHECK (required_level BETWEEN 1 AND 10),
    PRIMARY KEY (project_id, tech_id)
);

-- One assignment per project at most
CREATE TABLE IF NOT EXISTS assignments (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    project_id INTEGER NOT NULL UNIQUE REFERENCES projects(id),
    percentage REAL NOT NULL,
    created_at TEXT NOT NULL
);

-- assignment_id is the card's single active assignment reference
CREATE TABLE IF NOT EXISTS cards (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    owner_id TEXT NOT NULL,
    name TEXT NOT NULL,
    document_id TEXT NOT NULL,
    card_type TEXT NOT NULL,
    social INTEGER NOT NULL CHECK (social BETWEEN 1 AND 10),
    wisdom INTEGER NOT NULL CHECK (wisdom BETWEEN 1 AND 10),
    speed INTEGER NOT NULL CHECK (speed BETWEEN 1 AND 10),
    assignment_id INTEGER REFERENCES assignments(id),
    created_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_cards_owner ON cards(owner_id);
CREATE INDEX IF NOT EXISTS idx_cards_assignment ON cards(assignment_id);

CREATE TABLE IF NOT EXISTS card_levels (
    card_id INTEGER NOT NULL REFERENCES cards(id) ON DELETE CASCADE,
    tech_id INTEGER NOT NULL REFERENCES technologies(id),
    level INTEGER NOT NULL CHECK (level BETWEEN 1 AND 10),
    PRIMARY KEY (card_id, tech_id)
);

CREATE TABLE IF NOT EXISTS store_meta (
    key TEXT PRIMARY KEY,
    value TEXT
);
"#;

pub fn create_schema(conn: &Connection) -> Result<SchemaCreateResult> {
    let has_meta: bool = conn.query_row(
        "SELECT EXISTS (SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'store_meta')",
        [],
        |r| r.get(0),
    )?;

    let current_version: Option<i32> = if has_meta {
        conn.query_row(
            "SELECT value FROM store_meta WHERE key = 'schema_version'",
            [],
            |r| r.get::<_, String>(0).map(|s| s.parse().unwrap_or(0)),
        )
        .ok()
    } else {
        None
    };

    let result = match current_version {
        None => {
            conn.execute_batch(SCHEMA_SQL)?;
            conn.execute(
                "INSERT OR REPLACE INTO store_meta (key, value) VALUES ('schema_version', ?1)",
                [&CURRENT_SCHEMA_VERSION.to_string()],
            )?;
            tracing::info!(version = CURRENT_SCHEMA_VERSION, "Created database schema");
            SchemaCreateResult::Created
        }
        Some(v) if v > CURRENT_SCHEMA_VERSION => SchemaCreateResult::TooNew(v),
        Some(_) => {
            // Idempotent; picks up indexes added without a version bump
            conn.execute_batch(SCHEMA_SQL)?;
            SchemaCreateResult::Current
        }
    };

    Ok(result)
}
