//! 认证模块 - JWT 会话与密码哈希
//!
//! 会话不再依赖浏览器环境的隐式全局存储：登录成功后签发 JWT，
//! 每个受保护请求通过 [`CurrentUser`] 提取器重建显式会话对象，
//! 登出即丢弃令牌（并记入审计日志）。

pub mod extractor;
pub mod jwt;
pub mod password;

pub use jwt::{Claims, JwtConfig, JwtError, JwtService};
pub use password::{hash_password, verify_password};

use crate::db::models::UserRole;
use crate::utils::AppError;
use serde::{Deserialize, Serialize};

/// 当前请求的会话对象 - 由 JWT claims 重建
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// 用户记录 ID
    pub id: String,
    pub username: String,
    pub display_name: String,
    pub role: UserRole,
}

impl CurrentUser {
    /// 是否店员 (管理员同样具备店员权限)
    pub fn is_staff(&self) -> bool {
        matches!(self.role, UserRole::Admin | UserRole::Staff)
    }

    /// 校验店员权限
    pub fn require_staff(&self) -> Result<(), AppError> {
        if self.is_staff() {
            Ok(())
        } else {
            Err(AppError::forbidden("staff access required"))
        }
    }

    /// 校验管理员权限
    pub fn require_admin(&self) -> Result<(), AppError> {
        if matches!(self.role, UserRole::Admin) {
            Ok(())
        } else {
            Err(AppError::forbidden("admin access required"))
        }
    }
}

impl TryFrom<Claims> for CurrentUser {
    type Error = String;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        let role = claims
            .role
            .parse::<UserRole>()
            .map_err(|_| format!("unknown role '{}'", claims.role))?;
        Ok(Self {
            id: claims.sub,
            username: claims.username,
            display_name: claims.display_name,
            role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: UserRole) -> CurrentUser {
        CurrentUser {
            id: "users:1".into(),
            username: "ana".into(),
            display_name: "Ana".into(),
            role,
        }
    }

    #[test]
    fn admin_passes_both_checks() {
        let u = user(UserRole::Admin);
        assert!(u.require_staff().is_ok());
        assert!(u.require_admin().is_ok());
    }

    #[test]
    fn staff_is_not_admin() {
        let u = user(UserRole::Staff);
        assert!(u.require_staff().is_ok());
        assert!(u.require_admin().is_err());
    }

    #[test]
    fn customer_has_no_staff_access() {
        let u = user(UserRole::Customer);
        assert!(u.require_staff().is_err());
    }
}
