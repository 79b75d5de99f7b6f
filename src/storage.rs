//! Durable key-value storage for the session token and consent record.

use std::collections::HashMap;
use std::path::Path;
use std::sync::RwLock;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{OptionalExtension, params};

use crate::error::Result;

/// Storage keys
pub mod keys {
    /// Bearer token attached to API requests
    pub const AUTH_TOKEN: &str = "authToken";
    /// Cookie-consent record
    pub const COOKIES_CONSENT: &str = "cookies-consent";
}

/// Storage adapter trait for custom storage implementations
pub trait StorageAdapter: Send + Sync {
    /// Get a value by key
    fn get(&self, key: &str) -> Option<String>;

    /// Set a value by key
    fn set(&self, key: &str, value: &str);

    /// Remove a value by key
    fn remove(&self, key: &str);
}

/// In-memory storage adapter
///
/// Useful for testing or ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    store: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageAdapter for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.store.read().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut store) = self.store.write() {
            store.insert(key.to_string(), value.to_string());
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut store) = self.store.write() {
            store.remove(key);
        }
    }
}

/// SQLite-backed storage adapter.
///
/// Keeps every entry in a single `kv` table. Write failures are logged and
/// dropped, the same way a full browser storage quota is.
pub struct SqliteStorage {
    pool: Pool<SqliteConnectionManager>,
}

impl SqliteStorage {
    /// Open (or create) the store at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_manager(SqliteConnectionManager::file(path))
    }

    /// Store that lives only as long as the process.
    pub fn in_memory() -> Result<Self> {
        // A single connection so every caller sees the same in-memory database.
        let pool = Pool::builder()
            .max_size(1)
            .build(SqliteConnectionManager::memory())?;
        Self::init(pool)
    }

    fn from_manager(manager: SqliteConnectionManager) -> Result<Self> {
        let pool = Pool::builder().max_size(4).build(manager)?;
        Self::init(pool)
    }

    fn init(pool: Pool<SqliteConnectionManager>) -> Result<Self> {
        let conn = pool.get()?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY NOT NULL,
                value TEXT NOT NULL,
                updated_at INTEGER NOT NULL
            );",
        )?;
        drop(conn);
        Ok(Self { pool })
    }

    fn try_get(&self, key: &str) -> Result<Option<String>> {
        let conn = self.pool.get()?;
        let value = conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn try_set(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.pool.get()?;
        conn.execute(
            "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, chrono::Utc::now().timestamp()],
        )?;
        Ok(())
    }

    fn try_remove(&self, key: &str) -> Result<()> {
        let conn = self.pool.get()?;
        conn.execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }
}

impl StorageAdapter for SqliteStorage {
    fn get(&self, key: &str) -> Option<String> {
        match self.try_get(key) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, "Failed to read from storage: {}", e);
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) {
        if let Err(e) = self.try_set(key, value) {
            tracing::warn!(key, "Failed to write to storage: {}", e);
        }
    }

    fn remove(&self, key: &str) {
        if let Err(e) = self.try_remove(key) {
            tracing::warn!(key, "Failed to remove from storage: {}", e);
        }
    }
}

impl std::fmt::Debug for SqliteStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteStorage")
            .field("connections", &self.pool.state().connections)
            .finish()
    }
}
