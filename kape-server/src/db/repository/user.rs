//! User Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{UserCreate, UserDoc, UserRole};
use serde::Deserialize;
use shared::util::now_millis;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "users";

#[derive(Debug, Deserialize)]
struct CountRow {
    count: i64,
}

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    fn parse_id(id: &str) -> RepoResult<RecordId> {
        if id.contains(':') {
            id.parse::<RecordId>()
                .map_err(|_| RepoError::Validation(format!("invalid record id: {id}")))
        } else {
            Ok(RecordId::from_table_key(TABLE, id))
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<UserDoc>> {
        let users: Vec<UserDoc> = self
            .base
            .db()
            .query("SELECT * FROM users ORDER BY created_at ASC")
            .await?
            .take(0)?;
        Ok(users)
    }

    pub async fn find_by_role(&self, role: UserRole) -> RepoResult<Vec<UserDoc>> {
        let users: Vec<UserDoc> = self
            .base
            .db()
            .query("SELECT * FROM users WHERE role = $role ORDER BY created_at ASC")
            .bind(("role", role))
            .await?
            .take(0)?;
        Ok(users)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<UserDoc>> {
        let rid = Self::parse_id(id)?;
        let user: Option<UserDoc> = self.base.db().select(rid).await?;
        Ok(user)
    }

    pub async fn find_by_username(&self, username: &str) -> RepoResult<Option<UserDoc>> {
        let users: Vec<UserDoc> = self
            .base
            .db()
            .query("SELECT * FROM users WHERE username = $username LIMIT 1")
            .bind(("username", username.to_string()))
            .await?
            .take(0)?;
        Ok(users.into_iter().next())
    }

    /// Number of accounts that can operate the store (admin + staff)
    pub async fn count_staff(&self) -> RepoResult<usize> {
        let rows: Vec<CountRow> = self
            .base
            .db()
            .query("SELECT count() AS count FROM users WHERE role IN ['admin', 'staff'] GROUP ALL")
            .await?
            .take(0)?;
        Ok(rows.first().map(|r| r.count as usize).unwrap_or(0))
    }

    pub async fn create(&self, data: UserCreate) -> RepoResult<UserDoc> {
        if self.find_by_username(&data.username).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "username '{}' is taken",
                data.username
            )));
        }

        let now = now_millis();
        let user = UserDoc {
            id: None,
            username: data.username,
            display_name: data.display_name,
            role: data.role,
            password_hash: data.password_hash,
            email: data.email,
            created_at: Some(now),
            updated_at: Some(now),
        };

        let created: Option<UserDoc> = self.base.db().create(TABLE).content(user).await?;
        created.ok_or_else(|| RepoError::Database("failed to create user".to_string()))
    }
}
