use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::audit::AuditService;
use crate::auth::{self, JwtService};
use crate::core::{Config, Result, ServerError};
use crate::db::DbService;
use crate::db::models::{UserCreate, UserRole};
use crate::db::repository::{SettingsRepository, UserRepository};
use crate::sync::SyncBus;

/// 服务器状态 - 持有所有服务的单例引用
///
/// ServerState 是服务端的核心数据结构，使用 Arc 实现浅拷贝，
/// 所有 handler 通过它访问数据库、认证和广播设施。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | Surreal<Db> | 嵌入式文档数据库 |
/// | jwt_service | Arc<JwtService> | JWT 认证服务 |
/// | sync | Arc<SyncBus> | 资源变更广播总线 |
/// | audit | AuditService | 审计日志服务 |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式文档数据库 (SurrealDB)
    pub db: Surreal<Db>,
    /// JWT 认证服务 (Arc 共享所有权)
    pub jwt_service: Arc<JwtService>,
    /// 变更广播总线 (实现 subscribe(collection, callback) 协作者)
    pub sync: Arc<SyncBus>,
    /// 审计日志服务
    pub audit: AuditService,
}

impl std::fmt::Debug for ServerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerState")
            .field("config", &self.config.environment)
            .field("db", &"<Surreal<Db>>")
            .finish()
    }
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构
    /// 2. 数据库 (work_dir/database/kape.db)
    /// 3. 各服务 (JWT, SyncBus, Audit)
    /// 4. 引导数据 (店铺设置单例、默认管理员)
    pub async fn initialize(config: &Config) -> Result<Self> {
        config
            .ensure_work_dir_structure()
            .map_err(|e| ServerError::Config(format!("failed to create work dir: {e}")))?;

        let db_path = config.database_dir().join("kape.db");
        let db_service = DbService::new(&db_path.to_string_lossy())
            .await
            .map_err(|e| ServerError::Database(e.to_string()))?;

        Self::with_db(config.clone(), db_service.db).await
    }

    /// 使用内存数据库初始化 (测试用)
    pub async fn initialize_in_memory(config: &Config) -> Result<Self> {
        let db_service = DbService::memory()
            .await
            .map_err(|e| ServerError::Database(e.to_string()))?;
        Self::with_db(config.clone(), db_service.db).await
    }

    async fn with_db(config: Config, db: Surreal<Db>) -> Result<Self> {
        let jwt_service = Arc::new(JwtService::new(config.jwt.clone()));
        let sync = Arc::new(SyncBus::new());

        let audit = AuditService::new(db.clone());
        audit
            .init()
            .await
            .map_err(|e| ServerError::Database(format!("audit chain init failed: {e}")))?;

        let state = Self {
            config,
            db,
            jwt_service,
            sync,
            audit,
        };

        state.bootstrap().await?;

        Ok(state)
    }

    /// 引导初始数据：店铺设置单例和默认管理员账号
    async fn bootstrap(&self) -> Result<()> {
        let settings_repo = SettingsRepository::new(self.db.clone());
        settings_repo
            .get_or_create()
            .await
            .map_err(|e| ServerError::Database(format!("settings bootstrap failed: {e}")))?;

        let user_repo = UserRepository::new(self.db.clone());
        let staff_count = user_repo
            .count_staff()
            .await
            .map_err(|e| ServerError::Database(format!("user count failed: {e}")))?;

        if staff_count == 0 {
            let password = match (&self.config.admin_password, self.config.is_production()) {
                (Some(p), _) => p.clone(),
                (None, false) => "admin123".to_string(),
                (None, true) => {
                    // 生产环境必须显式提供初始密码，跳过引导并告警
                    tracing::warn!(
                        "no staff accounts exist and ADMIN_PASSWORD is not set; \
                         skipping admin bootstrap"
                    );
                    return Ok(());
                }
            };
            let password_hash = auth::hash_password(&password)
                .map_err(|e| ServerError::Config(format!("password hash failed: {e}")))?;
            user_repo
                .create(UserCreate {
                    username: self.config.admin_username.clone(),
                    display_name: "Administrator".to_string(),
                    role: UserRole::Admin,
                    password_hash: Some(password_hash),
                    email: None,
                })
                .await
                .map_err(|e| ServerError::Database(format!("admin bootstrap failed: {e}")))?;
            tracing::info!(
                username = %self.config.admin_username,
                "bootstrapped default admin account"
            );
        }

        Ok(())
    }

    /// 获取数据库实例
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    /// 获取 JWT 服务
    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    /// 广播同步消息
    ///
    /// 向所有订阅者广播资源变更通知，版本号自动递增。
    ///
    /// # 参数
    /// - `collection`: 集合名 (如 "orders", "inventory")
    /// - `action`: 变更类型 ("created", "updated", "deleted")
    /// - `id`: 记录 ID
    /// - `data`: 记录数据 (deleted 时为 None)
    pub fn broadcast_sync<T: serde::Serialize>(
        &self,
        collection: &str,
        action: &str,
        id: &str,
        data: Option<&T>,
    ) {
        self.sync.publish(collection, action, id, data);
    }
}
