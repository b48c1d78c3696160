//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod courses;
mod turnitin_submissions;
mod users;

#[cfg(test)]
mod tests;

use crate::config::DatabaseConfig;
use crate::errors::{BridgeError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async(config: &DatabaseConfig) -> Result<Self> {
        let db_url = Self::build_database_url(&config.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| BridgeError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| BridgeError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.pool_size.max(1))
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| BridgeError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.timeout))
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| BridgeError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(BridgeError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
use crate::models::{
    courses::entities::CourseKey,
    turnitin::entities::{NewSubmissionMapping, SubmissionMapping},
    users::entities::User,
};
use crate::storage::{CourseDirectory, Storage, UserDirectory};
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    async fn create_submission_mapping(
        &self,
        mapping: NewSubmissionMapping,
    ) -> Result<SubmissionMapping> {
        self.create_submission_mapping_impl(mapping).await
    }

    async fn list_submission_mappings(
        &self,
        ora_submission_id: &str,
    ) -> Result<Vec<SubmissionMapping>> {
        self.list_submission_mappings_impl(ora_submission_id).await
    }

    async fn attach_report_artifact(&self, mapping_id: i64, artifact_id: &str) -> Result<bool> {
        self.attach_report_artifact_impl(mapping_id, artifact_id)
            .await
    }
}

#[async_trait]
impl UserDirectory for SeaOrmStorage {
    async fn user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn user_by_anonymous_id(&self, anonymous_user_id: &str) -> Result<Option<User>> {
        self.get_user_by_anonymous_id_impl(anonymous_user_id).await
    }
}

#[async_trait]
impl CourseDirectory for SeaOrmStorage {
    async fn course_exists(&self, course_key: &CourseKey) -> Result<bool> {
        self.course_exists_impl(course_key).await
    }

    async fn course_settings(&self, course_key: &CourseKey) -> Result<Option<serde_json::Value>> {
        self.course_settings_impl(course_key).await
    }

    async fn has_staff_access(&self, user_id: i64, course_key: &CourseKey) -> Result<bool> {
        self.has_staff_access_impl(user_id, course_key).await
    }
}
