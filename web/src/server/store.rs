//! SQLite persistence for profiles, species, and sessions.
//!
//! Connections are opened per call with a busy timeout; the schema is
//! created once at startup by [`ensure_schema`]. The two capability traits
//! ([`SpeciesStore`], [`SessionStore`]) are what the rest of the app sees,
//! so tests run against an in-memory fake instead of a database file.

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OptionalExtension};

use taxa_common::{AuthorProfile, Kingdom, SpeciesRecord, ValidatedSpecies};

/// Errors surfaced by a store implementation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("{0}")]
    Backend(String),
}

// ─── Capability traits ───────────────────────────────────────────────────────

/// Read/update access to the species catalog.
pub trait SpeciesStore: Send + Sync {
    /// All species, ordered by scientific name.
    fn list_species(&self) -> Result<Vec<SpeciesRecord>, StoreError>;

    /// Point lookup by unique scientific name.
    fn species_by_name(&self, scientific_name: &str) -> Result<Option<SpeciesRecord>, StoreError>;

    /// Ownership probe: the row matching both the scientific name and the
    /// author id, if any.
    fn species_owned_by(
        &self,
        scientific_name: &str,
        author: &str,
    ) -> Result<Option<SpeciesRecord>, StoreError>;

    /// Profile behind a record's `author` id.
    fn author_profile(&self, id: &str) -> Result<Option<AuthorProfile>, StoreError>;

    /// Rewrite the row matching `scientific_name` with the validated values,
    /// reassigning the author. Returns false when no row matched.
    fn update_species(
        &self,
        scientific_name: &str,
        values: &ValidatedSpecies,
        author: &str,
    ) -> Result<bool, StoreError>;
}

/// Session and credential storage backing identity resolution.
pub trait SessionStore: Send + Sync {
    /// Profile id and password hash for a sign-in attempt.
    fn credentials_by_email(&self, email: &str) -> Result<Option<(String, String)>, StoreError>;

    /// Create a session row and return its token.
    fn create_session(&self, profile_id: &str) -> Result<String, StoreError>;

    /// Profile id behind a session token, if the session is live.
    fn session_profile(&self, token: &str) -> Result<Option<String>, StoreError>;

    fn delete_session(&self, token: &str) -> Result<(), StoreError>;
}

// ─── SQLite implementation ───────────────────────────────────────────────────

/// File-backed store; cheap to clone per request since it only holds a path.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    db_path: PathBuf,
}

impl SqliteStore {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        SqliteStore { db_path: db_path.into() }
    }

    fn open(&self) -> Result<Connection, StoreError> {
        let conn = Connection::open(&self.db_path)?;
        conn.execute_batch("PRAGMA busy_timeout=3000; PRAGMA foreign_keys=ON;")?;
        Ok(conn)
    }

    /// Insert a profile row. Catalog identities are provisioned out of band
    /// (seeding, ops tooling); the web app itself never registers accounts.
    pub fn insert_profile(
        &self,
        profile: &AuthorProfile,
        password_hash: &str,
    ) -> Result<(), StoreError> {
        self.open()?.execute(
            "INSERT INTO profiles (id, email, display_name, password_hash) \
             VALUES (?1, ?2, ?3, ?4)",
            params![profile.id, profile.email, profile.display_name, password_hash],
        )?;
        Ok(())
    }

    /// Insert a species row. Entries are created out of band as well; the
    /// component only reads and updates them.
    pub fn insert_species(&self, record: &SpeciesRecord) -> Result<(), StoreError> {
        self.open()?.execute(
            "INSERT INTO species \
             (scientific_name, common_name, description, kingdom, total_population, image, author) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                record.scientific_name,
                record.common_name,
                record.description,
                record.kingdom.as_str(),
                record.total_population.map(|p| p as i64),
                record.image,
                record.author,
            ],
        )?;
        Ok(())
    }
}

const SPECIES_COLUMNS: &str =
    "scientific_name, common_name, description, kingdom, total_population, image, author";

fn record_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<SpeciesRecord> {
    let kingdom: String = row.get(3)?;
    let kingdom = kingdom.parse::<Kingdom>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(e))
    })?;
    Ok(SpeciesRecord {
        scientific_name: row.get(0)?,
        common_name: row.get(1)?,
        description: row.get(2)?,
        kingdom,
        total_population: row.get::<_, Option<i64>>(4)?.map(|p| p as u64),
        image: row.get(5)?,
        author: row.get(6)?,
    })
}

impl SpeciesStore for SqliteStore {
    fn list_species(&self) -> Result<Vec<SpeciesRecord>, StoreError> {
        let conn = self.open()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {SPECIES_COLUMNS} FROM species ORDER BY scientific_name"
        ))?;
        let rows = stmt.query_map([], record_from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    fn species_by_name(&self, scientific_name: &str) -> Result<Option<SpeciesRecord>, StoreError> {
        let conn = self.open()?;
        let record = conn
            .query_row(
                &format!("SELECT {SPECIES_COLUMNS} FROM species WHERE scientific_name = ?1"),
                params![scientific_name],
                record_from_row,
            )
            .optional()?;
        Ok(record)
    }

    fn species_owned_by(
        &self,
        scientific_name: &str,
        author: &str,
    ) -> Result<Option<SpeciesRecord>, StoreError> {
        let conn = self.open()?;
        let record = conn
            .query_row(
                &format!(
                    "SELECT {SPECIES_COLUMNS} FROM species \
                     WHERE scientific_name = ?1 AND author = ?2"
                ),
                params![scientific_name, author],
                record_from_row,
            )
            .optional()?;
        Ok(record)
    }

    fn author_profile(&self, id: &str) -> Result<Option<AuthorProfile>, StoreError> {
        let conn = self.open()?;
        let profile = conn
            .query_row(
                "SELECT id, display_name, email FROM profiles WHERE id = ?1",
                params![id],
                |row| {
                    Ok(AuthorProfile {
                        id: row.get(0)?,
                        display_name: row.get(1)?,
                        email: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(profile)
    }

    fn update_species(
        &self,
        scientific_name: &str,
        values: &ValidatedSpecies,
        author: &str,
    ) -> Result<bool, StoreError> {
        let changed = self.open()?.execute(
            "UPDATE species SET \
             common_name = ?1, description = ?2, kingdom = ?3, \
             total_population = ?4, image = ?5, author = ?6 \
             WHERE scientific_name = ?7",
            params![
                values.common_name,
                values.description,
                values.kingdom.as_str(),
                values.total_population.map(|p| p as i64),
                values.image,
                author,
                scientific_name,
            ],
        )?;
        Ok(changed > 0)
    }
}

impl SessionStore for SqliteStore {
    fn credentials_by_email(&self, email: &str) -> Result<Option<(String, String)>, StoreError> {
        let conn = self.open()?;
        let creds = conn
            .query_row(
                "SELECT id, password_hash FROM profiles WHERE email = ?1",
                params![email],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;
        Ok(creds)
    }

    fn create_session(&self, profile_id: &str) -> Result<String, StoreError> {
        let token = uuid::Uuid::new_v4().to_string();
        self.open()?.execute(
            "INSERT INTO sessions (token, profile_id) VALUES (?1, ?2)",
            params![token, profile_id],
        )?;
        Ok(token)
    }

    fn session_profile(&self, token: &str) -> Result<Option<String>, StoreError> {
        let conn = self.open()?;
        let profile_id = conn
            .query_row(
                "SELECT profile_id FROM sessions WHERE token = ?1",
                params![token],
                |row| row.get(0),
            )
            .optional()?;
        Ok(profile_id)
    }

    fn delete_session(&self, token: &str) -> Result<(), StoreError> {
        self.open()?
            .execute("DELETE FROM sessions WHERE token = ?1", params![token])?;
        Ok(())
    }
}

// ─── Schema bootstrap & seeding ──────────────────────────────────────────────

/// Create the database file and tables when missing.
pub fn ensure_schema(db_path: &Path) -> Result<(), StoreError> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| StoreError::Backend(format!("cannot create DB dir: {e}")))?;
    }

    let conn = Connection::open(db_path)?;
    conn.execute_batch(
        "PRAGMA journal_mode=WAL;
         CREATE TABLE IF NOT EXISTS profiles (
            id            TEXT PRIMARY KEY,
            email         TEXT NOT NULL UNIQUE,
            display_name  TEXT NOT NULL,
            password_hash TEXT NOT NULL
         );
         CREATE TABLE IF NOT EXISTS species (
            scientific_name  TEXT PRIMARY KEY,
            common_name      TEXT,
            description      TEXT,
            kingdom          TEXT NOT NULL,
            total_population INTEGER,
            image            TEXT,
            author           TEXT NOT NULL REFERENCES profiles(id)
         );
         CREATE TABLE IF NOT EXISTS sessions (
            token       TEXT PRIMARY KEY,
            profile_id  TEXT NOT NULL REFERENCES profiles(id),
            created_at  TEXT NOT NULL DEFAULT (datetime('now'))
         );",
    )?;
    Ok(())
}

/// Seed demo profiles and entries on an empty catalog so a fresh install
/// has something to render. Records are otherwise created out of band.
pub fn seed_demo(db_path: &Path) -> Result<(), StoreError> {
    let store = SqliteStore::new(db_path);
    let count: i64 =
        store
            .open()?
            .query_row("SELECT COUNT(*) FROM species", [], |row| row.get(0))?;
    if count > 0 {
        return Ok(());
    }

    let demo_accounts = [
        ("linnaeus", "Carl Linnaeus", "carl@taxa.example", "systema"),
        ("humboldt", "Alexander von Humboldt", "alexander@taxa.example", "kosmos"),
    ];
    for (id, display_name, email, password) in demo_accounts {
        let hash = super::auth::hash_password(password)
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        store.insert_profile(
            &AuthorProfile {
                id: id.into(),
                display_name: display_name.into(),
                email: email.into(),
            },
            &hash,
        )?;
        tracing::info!("Seeded demo account {email} (password: {password})");
    }

    let entries = [
        SpeciesRecord {
            scientific_name: "Panthera uncia".into(),
            common_name: Some("Snow leopard".into()),
            description: Some(
                "A large felid native to the mountain ranges of Central and South Asia, \
                 living above the tree line at 3000-4500 m. Its thick smoky-grey coat and \
                 long tail suit the cold, rocky terrain it ambushes prey across."
                    .into(),
            ),
            kingdom: Kingdom::Animalia,
            total_population: Some(4000),
            image: None,
            author: "linnaeus".into(),
        },
        SpeciesRecord {
            scientific_name: "Sequoia sempervirens".into(),
            common_name: Some("Coast redwood".into()),
            description: Some("The tallest tree species on Earth, endemic to the fog belt of coastal California and Oregon.".into()),
            kingdom: Kingdom::Plantae,
            total_population: None,
            image: None,
            author: "humboldt".into(),
        },
        SpeciesRecord {
            scientific_name: "Amanita muscaria".into(),
            common_name: Some("Fly agaric".into()),
            description: Some("Iconic red-capped, white-spotted mushroom found beneath birch and pine across the temperate Northern Hemisphere.".into()),
            kingdom: Kingdom::Fungi,
            total_population: None,
            image: None,
            author: "linnaeus".into(),
        },
    ];
    for record in &entries {
        store.insert_species(record)?;
    }
    tracing::info!("Seeded {} demo species", entries.len());
    Ok(())
}

// ─── tests ───────────────────────────────────────────────────────────────────
