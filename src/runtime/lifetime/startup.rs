use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::errors::Result;
use crate::services::turnitin::{
    CompletionPoller, HttpFileFetcher, ReportQueries, SubmissionLifecycle, TokioSleeper,
};
use crate::services::{EnablementPolicy, SubmissionFilter, TaskRunner};
use crate::storage::{CourseDirectory, SeaOrmStorage, UserDirectory};
use crate::turnitin::{HttpTurnitinTransport, TurnitinGateway};

/// 服务器启动所需的共享组件
pub struct StartupContext {
    pub storage: Arc<SeaOrmStorage>,
    pub lifecycle: Arc<SubmissionLifecycle>,
    pub queries: Arc<ReportQueries>,
    pub filter: Arc<dyn SubmissionFilter>,
    pub runner: Arc<TaskRunner>,
}

impl StartupContext {
    pub fn users(&self) -> Arc<dyn UserDirectory> {
        self.storage.clone()
    }

    pub fn courses(&self) -> Arc<dyn CourseDirectory> {
        self.storage.clone()
    }
}

/// 按配置组装 Turnitin 相关组件
pub fn build_components(config: &AppConfig, storage: Arc<SeaOrmStorage>) -> Result<StartupContext> {
    let transport = Arc::new(HttpTurnitinTransport::new(&config.turnitin)?);
    let gateway = TurnitinGateway::new(transport, &config.turnitin);

    let poller = CompletionPoller::new(
        gateway.clone(),
        Arc::new(TokioSleeper),
        &config.polling,
    );
    let fetcher = Arc::new(HttpFileFetcher::new(&config.platform)?);

    let lifecycle = SubmissionLifecycle::new(
        gateway.clone(),
        storage.clone(),
        storage.clone(),
        fetcher,
        poller,
        config.turnitin.allowed_file_extensions.clone(),
    );
    let queries = ReportQueries::new(gateway, storage.clone(), &config.turnitin.viewer_locale);
    let filter: Arc<dyn SubmissionFilter> =
        Arc::new(EnablementPolicy::new(&config.platform, storage.clone()));

    debug!(
        "Polling every {}s for at most {} attempts",
        config.polling.interval_seconds, config.polling.max_attempts
    );

    Ok(StartupContext {
        storage,
        lifecycle: Arc::new(lifecycle),
        queries: Arc::new(queries),
        filter,
        runner: Arc::new(TaskRunner::new(config.worker.max_concurrent_tasks)),
    })
}

/// 准备服务器启动的上下文
/// 包括存储、Turnitin 客户端和后台任务执行器
pub async fn prepare_server_startup() -> StartupContext {
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let config = AppConfig::get();

    let storage = crate::storage::create_storage(&config.database)
        .await
        .expect("Failed to create storage backend");
    warn!("Storage backend initialized and migrations completed");

    if config.platform.enable_turnitin_submission {
        warn!("Turnitin submission is enabled globally, course overrides are ignored");
    }

    let context = build_components(config, storage).expect("Failed to initialize Turnitin client");
    warn!(
        "Turnitin client initialized, background tasks limited to {}",
        config.worker.max_concurrent_tasks
    );

    context
}
