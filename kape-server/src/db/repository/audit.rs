//! Audit Log Repository
//!
//! Append-only: no update or delete paths exist on this collection.

use super::{BaseRepository, RepoError, RepoResult};
use crate::audit::types::AuditEntry;
use serde::Deserialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "audit_log";

#[derive(Debug, Deserialize)]
struct CountRow {
    count: i64,
}

#[derive(Clone)]
pub struct AuditRepository {
    base: BaseRepository,
}

impl AuditRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Append one entry to the log
    pub async fn append(&self, entry: AuditEntry) -> RepoResult<AuditEntry> {
        let created: Option<AuditEntry> = self.base.db().create(TABLE).content(entry).await?;
        created.ok_or_else(|| RepoError::Database("failed to append audit entry".to_string()))
    }

    /// Newest entry, if any (chain head on startup)
    pub async fn last(&self) -> RepoResult<Option<AuditEntry>> {
        let entries: Vec<AuditEntry> = self
            .base
            .db()
            .query("SELECT * FROM audit_log ORDER BY created_at DESC LIMIT 1")
            .await?
            .take(0)?;
        Ok(entries.into_iter().next())
    }

    /// Paged listing, newest first (1-based page)
    pub async fn list(&self, page: usize, page_size: usize) -> RepoResult<Vec<AuditEntry>> {
        let start = page.saturating_sub(1) * page_size;
        let entries: Vec<AuditEntry> = self
            .base
            .db()
            .query("SELECT * FROM audit_log ORDER BY created_at DESC LIMIT $limit START $start")
            .bind(("limit", page_size as i64))
            .bind(("start", start as i64))
            .await?
            .take(0)?;
        Ok(entries)
    }

    pub async fn count(&self) -> RepoResult<usize> {
        let rows: Vec<CountRow> = self
            .base
            .db()
            .query("SELECT count() AS count FROM audit_log GROUP ALL")
            .await?
            .take(0)?;
        Ok(rows.first().map(|r| r.count as usize).unwrap_or(0))
    }
}
