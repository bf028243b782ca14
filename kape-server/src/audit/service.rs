//! Audit recording service
//!
//! 业务操作成功后调用 [`AuditService::record`]。审计写入失败只记日志，
//! 绝不让业务操作因此失败。

use super::types::{AuditAction, AuditEntry};
use crate::auth::CurrentUser;
use crate::db::repository::AuditRepository;
use shared::util::now_millis;
use std::sync::Arc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tokio::sync::Mutex;

/// Hash-chain head value before any entry exists
const GENESIS: &str = "GENESIS";

#[derive(Clone)]
pub struct AuditService {
    repo: AuditRepository,
    /// 链头哈希；Mutex 串行化追加，保证链不分叉
    chain_head: Arc<Mutex<String>>,
}

impl AuditService {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            repo: AuditRepository::new(db),
            chain_head: Arc::new(Mutex::new(GENESIS.to_string())),
        }
    }

    /// Load the chain head from the newest stored entry
    pub async fn init(&self) -> Result<(), crate::db::repository::RepoError> {
        if let Some(last) = self.repo.last().await? {
            *self.chain_head.lock().await = last.curr_hash;
        }
        Ok(())
    }

    /// Record an action. Failures are logged and swallowed.
    pub async fn record(
        &self,
        action: AuditAction,
        resource: &str,
        resource_id: &str,
        operator: Option<&CurrentUser>,
        details: serde_json::Value,
    ) {
        let mut head = self.chain_head.lock().await;
        let created_at = now_millis();
        let curr_hash =
            AuditEntry::compute_hash(&head, action, resource_id, created_at, &details);

        let entry = AuditEntry {
            id: None,
            action,
            resource: resource.to_string(),
            resource_id: resource_id.to_string(),
            operator_id: operator.map(|u| u.id.clone()),
            operator_name: operator.map(|u| u.display_name.clone()),
            details,
            prev_hash: head.clone(),
            curr_hash: curr_hash.clone(),
            created_at,
        };

        match self.repo.append(entry).await {
            Ok(_) => {
                *head = curr_hash;
            }
            Err(e) => {
                tracing::error!(error = %e, %action, resource_id, "failed to append audit entry");
            }
        }
    }

    pub fn repository(&self) -> &AuditRepository {
        &self.repo
    }
}
