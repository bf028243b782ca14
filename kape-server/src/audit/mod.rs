//! 审计日志 - 不可变、哈希链防篡改的操作记录

pub mod service;
pub mod types;

pub use service::AuditService;
pub use types::{AuditAction, AuditEntry};
