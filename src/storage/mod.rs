// Storage module - persists contact requests received by the backend
//
// SQLite behind an r2d2 pool. The server hands blocking calls to
// `spawn_blocking`; the `contacts` subcommand reads through the same store.
//
// Schema:
//   contact_requests(id, name, email, message, created_at)

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{params, Connection};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::contact::ValidContact;

/// A stored contact request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactRecord {
    pub id: i64,
    pub name: Option<String>,
    pub email: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Pooled handle to the contact database
#[derive(Clone)]
pub struct ContactStore {
    pool: Pool<SqliteConnectionManager>,
    path: PathBuf,
}

impl ContactStore {
    /// Open (or create) the database and apply the schema
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self> {
        let path = db_path.as_ref().to_path_buf();

        // Ensure parent directory exists
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let manager = SqliteConnectionManager::file(&path);
        let pool = Pool::builder()
            .max_size(4)
            .build(manager)
            .context("Failed to open contact database")?;

        Self::init_schema(&*pool.get()?)?;
        tracing::debug!(path = %path.display(), "contact store ready");

        Ok(Self { pool, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn init_schema(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            r#"
            PRAGMA journal_mode=WAL;
            PRAGMA synchronous=NORMAL;
            PRAGMA busy_timeout=5000;

            CREATE TABLE IF NOT EXISTS contact_requests (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                name        TEXT,
                email       TEXT NOT NULL,
                message     TEXT NOT NULL,
                created_at  TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_contact_requests_created
                ON contact_requests(created_at);
            "#,
        )
        .context("Failed to initialize contact schema")?;
        Ok(())
    }

    fn conn(&self) -> Result<PooledConnection<SqliteConnectionManager>> {
        Ok(self.pool.get()?)
    }

    /// Store a validated request, returning the new row
    pub fn insert(&self, contact: &ValidContact) -> Result<ContactRecord> {
        let created_at = Utc::now();
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO contact_requests (name, email, message, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                contact.name,
                contact.email,
                contact.message,
                created_at.to_rfc3339()
            ],
        )
        .context("Failed to insert contact request")?;

        Ok(ContactRecord {
            id: conn.last_insert_rowid(),
            name: contact.name.clone(),
            email: contact.email.clone(),
            message: contact.message.clone(),
            created_at,
        })
    }

    /// Most recent requests first
    pub fn recent(&self, limit: usize) -> Result<Vec<ContactRecord>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, name, email, message, created_at
             FROM contact_requests
             ORDER BY id DESC
             LIMIT ?1",
        )?;

        let rows = stmt.query_map(params![limit as i64], |row| {
            let created: String = row.get(4)?;
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, Option<String>>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                created,
            ))
        })?;

        let mut records = Vec::new();
        for row in rows {
            let (id, name, email, message, created) = row?;
            let created_at = DateTime::parse_from_rfc3339(&created)
                .map(|dt| dt.with_timezone(&Utc))
                .with_context(|| format!("Bad created_at on contact request {}", id))?;
            records.push(ContactRecord {
                id,
                name,
                email,
                message,
                created_at,
            });
        }
        Ok(records)
    }

    pub fn count(&self) -> Result<u64> {
        let count: i64 =
            self.conn()?
                .query_row("SELECT COUNT(*) FROM contact_requests", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(name: Option<&str>, email: &str) -> ValidContact {
        ValidContact {
            name: name.map(str::to_string),
            email: email.to_string(),
            message: "We would like to learn more.".to_string(),
        }
    }

    #[test]
    fn insert_and_list_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let store = ContactStore::open(dir.path().join("contacts.db")).unwrap();

        let first = store.insert(&contact(Some("Ada"), "ada@example.com")).unwrap();
        let second = store.insert(&contact(None, "bob@example.com")).unwrap();
        assert!(second.id > first.id);

        let recent = store.recent(10).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].email, "bob@example.com");
        assert_eq!(recent[0].name, None);
        assert_eq!(recent[1].name.as_deref(), Some("Ada"));
        assert_eq!(store.count().unwrap(), 2);

        assert_eq!(store.recent(1).unwrap().len(), 1);
    }

    #[test]
    fn reopening_keeps_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("contacts.db");

        {
            let store = ContactStore::open(&path).unwrap();
            store.insert(&contact(Some("Ada"), "ada@example.com")).unwrap();
        }

        let store = ContactStore::open(&path).unwrap();
        assert_eq!(store.count().unwrap(), 1);
        assert_eq!(store.path(), path.as_path());
    }
}
