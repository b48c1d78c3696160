use serde::{Deserialize, Serialize};

// EULA 页面
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EulaPageResponse {
    pub html: String,
    pub status: u16,
}

// 查看器链接及其来源文件
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ViewerUrlResponse {
    pub viewer_url: Option<String>,
    pub file_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_response: Option<serde_json::Value>,
}

// 事件受理结果
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventAcceptedResponse {
    pub submission_id: String,
    pub enabled: bool,
}
