//! SQLite persistence for commission configuration.
//!
//! RULE: Only store.rs talks to the database.
//! Calculators never read from or write to the store; callers load a
//! config here and pass it in.

use crate::{
    config::CommissionConfig,
    error::{CommissionError, EngineResult},
};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Metadata for one saved version of the config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigRevision {
    pub version: u32,
    pub revision_id: String,
    pub saved_at: DateTime<Utc>,
}

/// Where the hosting application keeps its commission config.
pub trait ConfigRepository {
    /// The most recently saved config, if any.
    fn current(&self) -> EngineResult<Option<CommissionConfig>>;

    /// Validate and persist `config` as a new version.
    fn save(&self, config: &CommissionConfig) -> EngineResult<ConfigRevision>;
}

pub struct ConfigStore {
    conn: Connection,
}

impl ConfigStore {
    /// Open (or create) the config database at `path`.
    pub fn open(path: &str) -> EngineResult<Self> {
        let conn = Connection::open(path)?;
        // WAL mode only matters for real files; in-memory ignores it.
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> EngineResult<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> EngineResult<()> {
        self.conn
            .execute_batch(include_str!("../../migrations/001_commission_config.sql"))?;
        Ok(())
    }

    /// A specific saved version. Rows are re-validated on read.
    pub fn load_version(&self, version: u32) -> EngineResult<CommissionConfig> {
        let json: Option<String> = self
            .conn
            .query_row(
                "SELECT config_json FROM commission_config WHERE version = ?1",
                params![version],
                |row| row.get(0),
            )
            .optional()?;
        match json {
            Some(json) => CommissionConfig::from_json_str(&json),
            None => Err(CommissionError::VersionNotFound { version }),
        }
    }

    /// Saved revisions, newest first.
    pub fn history(&self, limit: usize) -> EngineResult<Vec<ConfigRevision>> {
        let mut stmt = self.conn.prepare(
            "SELECT version, revision_id, saved_at FROM commission_config
             ORDER BY version DESC LIMIT ?1",
        )?;
        let rows = stmt
            .query_map(params![limit as i64], |row| {
                Ok((
                    row.get::<_, u32>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(version, revision_id, saved_at)| -> EngineResult<ConfigRevision> {
                let saved_at = DateTime::parse_from_rfc3339(&saved_at)
                    .map_err(|e| anyhow::anyhow!("bad saved_at '{saved_at}' for version {version}: {e}"))?
                    .with_timezone(&Utc);
                Ok(ConfigRevision { version, revision_id, saved_at })
            })
            .collect()
    }
}

impl ConfigRepository for ConfigStore {
    fn current(&self) -> EngineResult<Option<CommissionConfig>> {
        let json: Option<String> = self
            .conn
            .query_row(
                "SELECT config_json FROM commission_config ORDER BY version DESC LIMIT 1",
                [],
                |row| row.get(0),
            )
            .optional()?;
        json.map(|j| CommissionConfig::from_json_str(&j))
            .transpose()
    }

    fn save(&self, config: &CommissionConfig) -> EngineResult<ConfigRevision> {
        config.validate()?;

        let tx = self.conn.unchecked_transaction()?;
        let latest: u32 = tx.query_row(
            "SELECT COALESCE(MAX(version), 0) FROM commission_config",
            [],
            |row| row.get(0),
        )?;

        let revision = ConfigRevision {
            version: latest + 1,
            revision_id: Uuid::new_v4().to_string(),
            saved_at: Utc::now(),
        };
        let mut stored = config.clone();
        stored.version = revision.version;

        tx.execute(
            "INSERT INTO commission_config (version, revision_id, saved_at, config_json)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                revision.version,
                revision.revision_id,
                revision.saved_at.to_rfc3339(),
                serde_json::to_string(&stored)?,
            ],
        )?;
        tx.commit()?;

        log::info!(
            "store: saved commission config version {} ({})",
            revision.version,
            revision.revision_id
        );
        Ok(revision)
    }
}
