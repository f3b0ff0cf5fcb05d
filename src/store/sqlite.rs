//! SQLite Store
//!
//! Connection management and queries backing the [`CredentialStore`]
//! contract. The calls are synchronous underneath; the async surface exists
//! so the detail screen never blocks on the store.

use std::path::{Path, PathBuf};

use chrono::Utc;
use rusqlite::{Connection, OpenFlags, Row, params};

use super::models::{CredentialRecord, RecordId, UsageMetadata};
use super::schema::init_schema;
use super::{CredentialStore, StoreError, StoreResult};

/// Store configuration
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Path to the database file
    pub path: PathBuf,
    /// Enable WAL mode for file-backed databases
    pub wal_mode: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            wal_mode: true,
        }
    }
}

impl StoreConfig {
    /// Config for an in-memory database (testing)
    pub fn in_memory() -> Self {
        Self {
            path: PathBuf::from(":memory:"),
            wal_mode: false,
        }
    }

    /// Config for a specific path
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    fn is_in_memory(&self) -> bool {
        self.path.to_str() == Some(":memory:")
    }
}

/// Default database path (~/.local/share/vaultview/logins.db or similar)
fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("vaultview")
        .join("logins.db")
}

/// SQLite-backed credential store
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open or create a store with the given config
    pub fn open(config: StoreConfig) -> StoreResult<Self> {
        if !config.is_in_memory() {
            if let Some(parent) = config.path.parent() {
                if !parent.exists() {
                    std::fs::create_dir_all(parent)
                        .map_err(|e| StoreError::Io(e.to_string()))?;
                }
            }
        }

        let conn = if config.is_in_memory() {
            Connection::open_in_memory()?
        } else {
            let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX;
            Connection::open_with_flags(&config.path, flags)?
        };

        if config.wal_mode && !config.is_in_memory() {
            conn.execute_batch("PRAGMA journal_mode = WAL;")?;
        }
        conn.busy_timeout(std::time::Duration::from_secs(5))?;

        init_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Open a store at a path with default settings
    pub fn open_path(path: impl AsRef<Path>) -> StoreResult<Self> {
        Self::open(StoreConfig::with_path(path.as_ref()))
    }

    /// Open an in-memory store (testing)
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::open(StoreConfig::in_memory())
    }

    /// Insert a new record
    pub fn insert_record(&self, record: &CredentialRecord) -> StoreResult<()> {
        let now = Utc::now().timestamp();
        self.conn.execute(
            r#"
            INSERT INTO logins (id, hostname, username, password, created_at, password_changed_at, last_used_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, NULL)
            "#,
            params![
                record.id.as_str(),
                record.hostname,
                record.username,
                record.password,
                now,
                now,
            ],
        )?;
        Ok(())
    }

    /// Delete a record by id
    pub fn delete_record(&self, id: &RecordId) -> StoreResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM logins WHERE id = ?1", [id.as_str()])?;
        if changed == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }

    /// Mark a record as used now
    pub fn touch(&self, id: &RecordId) -> StoreResult<()> {
        self.conn.execute(
            "UPDATE logins SET last_used_at = ?1 WHERE id = ?2",
            params![Utc::now().timestamp(), id.as_str()],
        )?;
        Ok(())
    }

    /// Look a record up by hostname, most recently used first
    pub fn find_by_hostname(&self, hostname: &str) -> StoreResult<Option<CredentialRecord>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, hostname, username, password
            FROM logins
            WHERE hostname = ?1
            ORDER BY last_used_at DESC
            LIMIT 1
            "#,
        )?;

        let mut rows = stmt.query_map([hostname], row_to_record)?;
        Ok(rows.next().transpose()?)
    }

    /// Read a record by id, synchronously
    pub fn get_by_id(&self, id: &RecordId) -> StoreResult<Option<CredentialRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, hostname, username, password FROM logins WHERE id = ?1",
        )?;
        let mut rows = stmt.query_map([id.as_str()], row_to_record)?;
        Ok(rows.next().transpose()?)
    }

    fn read_usage(&self, id: &RecordId) -> StoreResult<Option<UsageMetadata>> {
        let mut stmt = self.conn.prepare(
            "SELECT password_changed_at, last_used_at FROM logins WHERE id = ?1",
        )?;
        let mut rows = stmt.query_map([id.as_str()], |row| {
            Ok(UsageMetadata {
                password_last_changed_at: row.get(0)?,
                last_used_at: row.get(1)?,
            })
        })?;
        Ok(rows.next().transpose()?)
    }

    fn write_record(
        &self,
        id: &RecordId,
        updated: &CredentialRecord,
        significant: bool,
    ) -> StoreResult<()> {
        let changed = if significant {
            self.conn.execute(
                r#"
                UPDATE logins
                SET hostname = ?1, username = ?2, password = ?3, password_changed_at = ?4
                WHERE id = ?5
                "#,
                params![
                    updated.hostname,
                    updated.username,
                    updated.password,
                    Utc::now().timestamp(),
                    id.as_str(),
                ],
            )?
        } else {
            self.conn.execute(
                "UPDATE logins SET hostname = ?1, username = ?2, password = ?3 WHERE id = ?4",
                params![updated.hostname, updated.username, updated.password, id.as_str()],
            )?
        };

        if changed == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }
}

impl CredentialStore for SqliteStore {
    async fn get_usage_data(&self, id: &RecordId) -> Option<UsageMetadata> {
        // "No data" and internal errors both degrade to None
        self.read_usage(id).ok().flatten()
    }

    async fn get_record(&self, id: &RecordId) -> Option<CredentialRecord> {
        self.get_by_id(id).ok().flatten()
    }

    async fn update_record(
        &self,
        id: &RecordId,
        updated: &CredentialRecord,
        significant: bool,
    ) -> StoreResult<()> {
        self.write_record(id, updated, significant)
    }
}

fn row_to_record(row: &Row) -> rusqlite::Result<CredentialRecord> {
    Ok(CredentialRecord {
        id: RecordId::from(row.get::<_, String>(0)?),
        hostname: row.get(1)?,
        username: row.get(2)?,
        password: row.get(3)?,
    })
}
