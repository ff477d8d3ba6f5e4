//! Database connection handling and schema bootstrap using rusqlite.

use std::path::Path;

use rusqlite::{Connection, Result as SqliteResult};
use thiserror::Error;

use crate::storage::schema::{CURRENT_VERSION, SCHEMA, SCHEMA_VERSION_TABLE};

/// Database wrapper for SQLite operations.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create a database at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DatabaseError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| DatabaseError::IoError(e.to_string()))?;
            }
        }

        let conn =
            Connection::open(path).map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

        let db = Self { conn };
        db.initialize()?;

        Ok(db)
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self, DatabaseError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

        let db = Self { conn };
        db.initialize()?;

        Ok(db)
    }

    /// Initialize pragmas and the database schema.
    fn initialize(&self) -> Result<(), DatabaseError> {
        self.conn
            .execute_batch("PRAGMA foreign_keys = ON;")
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;

        self.conn
            .execute_batch(SCHEMA_VERSION_TABLE)
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;

        let current_version = self.schema_version()?;
        if current_version < CURRENT_VERSION {
            self.migrate(current_version)?;
        }

        Ok(())
    }

    /// Get the current schema version.
    fn schema_version(&self) -> Result<i32, DatabaseError> {
        let result: SqliteResult<i32> = self.conn.query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_version",
            [],
            |row| row.get(0),
        );

        match result {
            Ok(version) => Ok(version),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
            Err(e) => Err(DatabaseError::QueryFailed(e.to_string())),
        }
    }

    /// Run schema migrations.
    fn migrate(&self, from_version: i32) -> Result<(), DatabaseError> {
        if from_version < 1 {
            self.conn
                .execute_batch(SCHEMA)
                .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;

            self.conn
                .execute(
                    "INSERT INTO schema_version (version, applied_at) VALUES (?, datetime('now'))",
                    [CURRENT_VERSION],
                )
                .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;

            tracing::info!("Database migrated to version {}", CURRENT_VERSION);
        }

        // Future migrations would go here:
        // if from_version < 2 { ... }

        Ok(())
    }

    /// Get a reference to the underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Begin a transaction. Commit explicitly; dropping rolls back.
    pub fn transaction(&mut self) -> Result<rusqlite::Transaction<'_>, DatabaseError> {
        self.conn
            .transaction()
            .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))
    }

    /// Lightweight connectivity check used by the health endpoint.
    pub fn ping(&self) -> Result<(), DatabaseError> {
        self.conn
            .query_row("SELECT 1", [], |_| Ok(()))
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))
    }
}

/// Commit a transaction, mapping the failure into [`DatabaseError`].
pub fn commit(tx: rusqlite::Transaction<'_>) -> Result<(), DatabaseError> {
    tx.commit()
        .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))
}

/// Database errors.
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_in_memory_database() {
        let db = Database::open_in_memory().expect("Failed to create database");
        let version = db.schema_version().expect("Failed to get version");
        assert_eq!(version, CURRENT_VERSION);
    }

    #[test]
    fn test_tables_created() {
        let db = Database::open_in_memory().expect("Failed to create database");

        let tables: Vec<String> = db
            .conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .filter_map(|r| r.ok())
            .collect();

        assert!(tables.contains(&"users".to_string()));
        assert!(tables.contains(&"profiles".to_string()));
        assert!(tables.contains(&"locations".to_string()));
        assert!(tables.contains(&"conversations".to_string()));
        assert!(tables.contains(&"conversation_participants".to_string()));
        assert!(tables.contains(&"messages".to_string()));
        assert!(tables.contains(&"rides".to_string()));
    }

    #[test]
    fn test_open_on_disk() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("data").join("bikeconnect.db");

        let db = Database::open(&path).expect("Failed to open database");
        db.ping().expect("Failed to ping database");
        assert!(path.exists());
    }

    #[test]
    fn test_reopen_keeps_schema_version() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("bikeconnect.db");

        drop(Database::open(&path).expect("Failed to open database"));
        let db = Database::open(&path).expect("Failed to reopen database");
        assert_eq!(db.schema_version().unwrap(), CURRENT_VERSION);
    }

    #[test]
    fn test_ping() {
        let db = Database::open_in_memory().expect("Failed to create database");
        db.ping().expect("Failed to ping database");
    }

    #[test]
    fn test_transaction_rolls_back_on_drop() {
        let mut db = Database::open_in_memory().expect("Failed to create database");

        {
            let tx = db.transaction().expect("Failed to begin transaction");
            tx.execute(
                "INSERT INTO conversations (id, created_at) VALUES (?1, ?2)",
                rusqlite::params!["c-1", "2026-01-01T00:00:00+00:00"],
            )
            .unwrap();
            // Dropped without commit.
        }

        let count: i64 = db
            .connection()
            .query_row("SELECT COUNT(*) FROM conversations", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_transaction_commit_persists() {
        let mut db = Database::open_in_memory().expect("Failed to create database");

        let tx = db.transaction().expect("Failed to begin transaction");
        tx.execute(
            "INSERT INTO conversations (id, created_at) VALUES (?1, ?2)",
            rusqlite::params!["c-1", "2026-01-01T00:00:00+00:00"],
        )
        .unwrap();
        commit(tx).expect("Failed to commit");

        let count: i64 = db
            .connection()
            .query_row("SELECT COUNT(*) FROM conversations", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }
}
