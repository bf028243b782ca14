//! User Model
//!
//! `users` 集合同时承载员工账号和线上顾客档案，按 `role` 区分。

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use surrealdb::RecordId;
use validator::Validate;

/// Account role
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Staff,
    Customer,
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            UserRole::Admin => "admin",
            UserRole::Staff => "staff",
            UserRole::Customer => "customer",
        };
        f.write_str(s)
    }
}

impl FromStr for UserRole {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(UserRole::Admin),
            "staff" => Ok(UserRole::Staff),
            "customer" => Ok(UserRole::Customer),
            _ => Err(()),
        }
    }
}

/// User entity (store shape; carries the password hash)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDoc {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    pub username: String,
    pub display_name: String,
    pub role: UserRole,
    /// Argon2id PHC string; `None` for customer profiles without login
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub created_at: Option<i64>,
    pub updated_at: Option<i64>,
}

impl UserDoc {
    /// Record id as a plain string (`users:…`)
    pub fn id_string(&self) -> String {
        self.id
            .as_ref()
            .map(|id| id.to_string())
            .unwrap_or_default()
    }
}

/// Create payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UserCreate {
    #[validate(length(min = 2, max = 60))]
    pub username: String,
    #[validate(length(min = 1, max = 120))]
    pub display_name: String,
    pub role: UserRole,
    /// Already hashed by the caller; never a plaintext password
    pub password_hash: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
}

/// Public view of a user; never exposes the password hash
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserView {
    pub id: String,
    pub username: String,
    pub display_name: String,
    pub role: UserRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub created_at: Option<i64>,
}

impl From<UserDoc> for UserView {
    fn from(doc: UserDoc) -> Self {
        Self {
            id: doc.id_string(),
            username: doc.username,
            display_name: doc.display_name,
            role: doc.role,
            email: doc.email,
            created_at: doc.created_at,
        }
    }
}
