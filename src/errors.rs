//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_bridge_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum BridgeError {
            $($variant(String),)*
        }

        impl BridgeError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(BridgeError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(BridgeError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(BridgeError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl BridgeError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        BridgeError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_bridge_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    Configuration("E004", "Configuration Error"),
    Validation("E005", "Validation Error"),
    NotFound("E006", "Resource Not Found"),
    Serialization("E007", "Serialization Error"),
    Authentication("E008", "Authentication Error"),
    Authorization("E009", "Authorization Error"),
    RemoteTransport("E010", "Remote Transport Error"),
    RemoteApi("E011", "Remote API Error"),
    EulaNotAccepted("E012", "EULA Not Accepted"),
    FileDownload("E013", "File Download Error"),
    UploadFailed("E014", "Upload Failed"),
}

impl BridgeError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 是否为远程调用相关错误（传输层或远程状态码）
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            BridgeError::RemoteTransport(_)
                | BridgeError::RemoteApi(_)
                | BridgeError::EulaNotAccepted(_)
        )
    }
}

impl fmt::Display for BridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for BridgeError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for BridgeError {
    fn from(err: sea_orm::DbErr) -> Self {
        BridgeError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for BridgeError {
    fn from(err: std::io::Error) -> Self {
        BridgeError::RemoteTransport(err.to_string())
    }
}

impl From<serde_json::Error> for BridgeError {
    fn from(err: serde_json::Error) -> Self {
        BridgeError::Serialization(err.to_string())
    }
}

impl From<reqwest::Error> for BridgeError {
    fn from(err: reqwest::Error) -> Self {
        BridgeError::RemoteTransport(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, BridgeError>;
