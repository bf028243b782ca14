//! Kape Server - 咖啡店点单与后台管理服务
//!
//! # 架构概述
//!
//! 本模块是服务端主入口，提供以下核心功能：
//!
//! - **订单流程** (`orders`): POS 结账与线上订单生命周期
//! - **数据库** (`db`): 嵌入式 SurrealDB 文档存储
//! - **认证** (`auth`): JWT + Argon2 认证体系
//! - **审计** (`audit`): 哈希链审计日志
//! - **HTTP API** (`api`): RESTful API 接口
//! - **同步** (`sync`): 资源变更实时推送 (SSE)
//!
//! # 模块结构
//!
//! ```text
//! kape-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── auth/          # JWT 认证、会话
//! ├── api/           # HTTP 路由和处理器
//! ├── orders/        # 订单流程服务
//! ├── analytics/     # 后台聚合统计
//! ├── audit/         # 审计日志
//! ├── sync/          # 变更广播
//! ├── db/            # 数据库层
//! └── utils/         # 工具函数
//! ```

pub mod analytics;
pub mod api;
pub mod audit;
pub mod auth;
pub mod core;
pub mod db;
pub mod orders;
pub mod sync;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService};
pub use crate::core::{Config, Server, ServerState};
pub use orders::OrderService;
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::init_logger;

pub fn print_banner() {
    println!(
        r#"
    __ __
   / //_/___ _____  ___
  / ,<  / __ `/ __ \/ _ \
 / /| |/ /_/ / /_/ /  __/
/_/ |_|\__,_/ .___/\___/
           /_/
    "#
    );
}
