use serde::{Deserialize, Serialize};

/// 应用配置结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub database: DatabaseConfig,
    pub cors: CorsConfig,
    #[serde(default)]
    pub turnitin: TurnitinConfig,
    #[serde(default)]
    pub polling: PollingConfig,
    #[serde(default)]
    pub platform: PlatformConfig,
    #[serde(default)]
    pub worker: WorkerConfig,
}

/// 应用设置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub system_name: String,
    pub environment: String,
    pub log_level: String,
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub unix_socket_path: String,
    pub workers: usize,
    pub max_workers: usize,
    pub timeouts: TimeoutConfig,
    pub limits: LimitConfig,
}

/// 超时配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutConfig {
    pub client_request: u64,
    pub client_disconnect: u64,
    pub keep_alive: u64,
}

/// 限制配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitConfig {
    pub max_payload_size: usize,
}

/// JWT 配置
///
/// 令牌由宿主平台签发，这里只负责校验。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    pub secret: String,
}

/// 数据库配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,    // 数据库连接 URL（从 scheme 自动推断类型）
    pub pool_size: u32, // 连接池大小
    pub timeout: u64,   // 连接超时 (秒)
}

/// CORS 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    pub max_age: usize,
}

/// Turnitin 远程服务配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TurnitinConfig {
    pub api_url: String,
    pub integration_family: String,
    pub integration_version: String,
    #[serde(skip_serializing)]
    pub api_key: String,
    pub request_timeout: u64, // 单次请求超时 (秒)
    pub eula_version: String,
    pub eula_language: String,
    pub viewer_locale: String,
    pub allowed_file_extensions: Vec<String>,
    pub similarity_report_payload: serde_json::Value,
}

impl Default for TurnitinConfig {
    fn default() -> Self {
        Self {
            api_url: String::new(),
            integration_family: String::new(),
            integration_version: String::new(),
            api_key: String::new(),
            request_timeout: 5,
            eula_version: "v1beta".to_string(),
            eula_language: "en-US".to_string(),
            viewer_locale: "en-EN".to_string(),
            allowed_file_extensions: ["doc", "docx", "pdf", "txt"]
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            similarity_report_payload: default_similarity_report_payload(),
        }
    }
}

/// 相似度报告生成请求的默认负载
pub fn default_similarity_report_payload() -> serde_json::Value {
    serde_json::json!({
        "indexing_settings": { "add_to_index": true },
        "generation_settings": {
            "search_repositories": [
                "INTERNET",
                "SUBMITTED_WORK",
                "PUBLICATION",
                "CROSSREF",
                "CROSSREF_POSTED_CONTENT"
            ],
            "submission_auto_excludes": [
                "b84b77d1-da0f-4f45-b002-8aec4f4796d6",
                "b86de142-bc44-4f95-8467-84af12b89217"
            ],
            "auto_exclude_self_matching_scope": "ALL",
            "priority": "HIGH"
        },
        "view_settings": {
            "exclude_quotes": true,
            "exclude_bibliography": true,
            "exclude_citations": false,
            "exclude_abstract": false,
            "exclude_methods": false,
            "exclude_custom_sections": false,
            "exclude_preprints": false,
            "exclude_small_matches": 8,
            "exclude_internet": false,
            "exclude_publications": false,
            "exclude_crossref": false,
            "exclude_crossref_posted_content": false,
            "exclude_submitted_works": false
        }
    })
}

/// 处理完成轮询配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PollingConfig {
    pub max_attempts: u32,
    pub interval_seconds: u64,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            max_attempts: 25,
            interval_seconds: 5,
        }
    }
}

/// 宿主平台相关配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformConfig {
    pub lms_root_url: String,   // 相对下载地址的基准 URL
    pub download_timeout: u64,  // 附件下载超时 (秒)
    pub enable_turnitin_submission: bool,
    pub course_override_key: String,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            lms_root_url: String::new(),
            download_timeout: 5,
            enable_turnitin_submission: false,
            course_override_key: "ENABLE_TURNITIN_SUBMISSION".to_string(),
        }
    }
}

/// 后台任务配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkerConfig {
    pub max_concurrent_tasks: usize,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            max_concurrent_tasks: 4,
        }
    }
}
