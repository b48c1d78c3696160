//! Turnitin 远程 API 网关
//!
//! - `TurnitinTransport`: 发送单个请求，原样返回状态码与响应体，不做重试
//! - `HttpTurnitinTransport`: 基于 reqwest 的实现
//! - `TurnitinGateway`: 固定的操作集合，负责路径与请求体

mod gateway;
mod http;

#[cfg(test)]
pub(crate) mod testing;

pub use gateway::TurnitinGateway;
pub use http::HttpTurnitinTransport;

use crate::errors::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl ApiMethod {
    /// POST/PUT/PATCH 携带 JSON 请求体，其余方法以查询参数发送
    pub fn has_json_body(&self) -> bool {
        matches!(self, ApiMethod::Post | ApiMethod::Put | ApiMethod::Patch)
    }
}

impl std::fmt::Display for ApiMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiMethod::Get => write!(f, "GET"),
            ApiMethod::Post => write!(f, "POST"),
            ApiMethod::Put => write!(f, "PUT"),
            ApiMethod::Patch => write!(f, "PATCH"),
            ApiMethod::Delete => write!(f, "DELETE"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(serde_json::Value),
    // 上传模式：强制 PUT，原始字节作为请求体
    Upload { file_name: String, bytes: Vec<u8> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: ApiMethod,
    pub path: String,
    pub body: RequestBody,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: ApiMethod::Get,
            path: path.into(),
            body: RequestBody::Empty,
        }
    }

    pub fn get_with_query(path: impl Into<String>, query: serde_json::Value) -> Self {
        Self {
            method: ApiMethod::Get,
            path: path.into(),
            body: RequestBody::Json(query),
        }
    }

    pub fn post(path: impl Into<String>, payload: Option<serde_json::Value>) -> Self {
        Self {
            method: ApiMethod::Post,
            path: path.into(),
            body: payload.map_or(RequestBody::Empty, RequestBody::Json),
        }
    }

    pub fn put(path: impl Into<String>, payload: Option<serde_json::Value>) -> Self {
        Self {
            method: ApiMethod::Put,
            path: path.into(),
            body: payload.map_or(RequestBody::Empty, RequestBody::Json),
        }
    }

    pub fn upload(path: impl Into<String>, file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            method: ApiMethod::Put,
            path: path.into(),
            body: RequestBody::Upload {
                file_name: file_name.into(),
                bytes,
            },
        }
    }

    pub fn is_upload(&self) -> bool {
        matches!(self.body, RequestBody::Upload { .. })
    }
}

/// 远程响应：状态码与原始响应体
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RemoteResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn json_body(status: u16, body: &serde_json::Value) -> Self {
        Self::new(status, body.to_string())
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_created(&self) -> bool {
        self.status == 201
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// 解析为 JSON；空响应体为 null，非 JSON 文本包装为字符串
    pub fn json(&self) -> serde_json::Value {
        if self.body.is_empty() {
            return serde_json::Value::Null;
        }
        serde_json::from_slice(&self.body).unwrap_or_else(|_| serde_json::Value::String(self.text()))
    }

    /// 读取 JSON 顶层字符串字段
    pub fn str_field(&self, field: &str) -> Option<String> {
        self.json()
            .get(field)
            .and_then(|value| value.as_str())
            .map(str::to_string)
    }
}

#[async_trait::async_trait]
pub trait TurnitinTransport: Send + Sync {
    async fn call(&self, request: ApiRequest) -> Result<RemoteResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_status_helpers() {
        assert!(RemoteResponse::new(200, "").is_success());
        assert!(RemoteResponse::new(201, "").is_created());
        assert!(!RemoteResponse::new(200, "").is_created());
        assert!(!RemoteResponse::new(404, "").is_success());
    }

    #[test]
    fn test_response_json_fallbacks() {
        assert_eq!(RemoteResponse::new(204, "").json(), serde_json::Value::Null);
        assert_eq!(
            RemoteResponse::new(502, "Bad Gateway").json(),
            serde_json::Value::String("Bad Gateway".to_string())
        );
        let response = RemoteResponse::json_body(201, &serde_json::json!({"id": "abc"}));
        assert_eq!(response.str_field("id").as_deref(), Some("abc"));
        assert_eq!(response.str_field("missing"), None);
    }

    #[test]
    fn test_upload_request_is_put() {
        let request = ApiRequest::upload("submissions/abc/original", "essay.pdf", vec![1, 2]);
        assert_eq!(request.method, ApiMethod::Put);
        assert!(request.is_upload());
        assert!(!ApiRequest::get("submissions/abc").is_upload());
    }
}
