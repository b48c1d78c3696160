use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_DISPOSITION, CONTENT_TYPE, HeaderMap, HeaderValue};
use tracing::debug;

use super::{ApiMethod, ApiRequest, RemoteResponse, RequestBody, TurnitinTransport};
use crate::config::TurnitinConfig;
use crate::errors::{BridgeError, Result};

const INTEGRATION_NAME_HEADER: &str = "x-turnitin-integration-name";
const INTEGRATION_VERSION_HEADER: &str = "x-turnitin-integration-version";
const UPLOAD_CONTENT_TYPE: &str = "binary/octet-stream";

/// 基于 reqwest 的 Turnitin 传输层
pub struct HttpTurnitinTransport {
    client: reqwest::Client,
    base_url: String,
    headers: HeaderMap,
}

impl HttpTurnitinTransport {
    pub fn new(config: &TurnitinConfig) -> Result<Self> {
        if config.api_url.trim().is_empty() {
            return Err(BridgeError::configuration("turnitin.api_url 未配置"));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout.max(1)))
            .build()
            .map_err(|e| BridgeError::configuration(format!("HTTP 客户端创建失败: {e}")))?;

        Ok(Self {
            client,
            base_url: format!("{}/api/v1", config.api_url.trim_end_matches('/')),
            headers: Self::integration_headers(config)?,
        })
    }

    fn integration_headers(config: &TurnitinConfig) -> Result<HeaderMap> {
        let header = |value: &str| {
            HeaderValue::from_str(value)
                .map_err(|e| BridgeError::configuration(format!("无效的请求头值: {e}")))
        };

        let mut headers = HeaderMap::new();
        headers.insert(INTEGRATION_NAME_HEADER, header(&config.integration_family)?);
        headers.insert(
            INTEGRATION_VERSION_HEADER,
            header(&config.integration_version)?,
        );
        let mut bearer = header(&format!("Bearer {}", config.api_key))?;
        bearer.set_sensitive(true);
        headers.insert(AUTHORIZATION, bearer);
        Ok(headers)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub(crate) fn build_request(&self, request: &ApiRequest) -> Result<reqwest::Request> {
        let url = self.url(&request.path);

        let builder = match &request.body {
            RequestBody::Upload { file_name, bytes } => self
                .client
                .put(url)
                .headers(self.headers.clone())
                .header(CONTENT_TYPE, UPLOAD_CONTENT_TYPE)
                .header(
                    CONTENT_DISPOSITION,
                    format!("inline; filename=\"{}\"", sanitize_file_name(file_name)),
                )
                .body(bytes.clone()),
            body => {
                let builder = self
                    .client
                    .request(to_reqwest_method(request.method), url)
                    .headers(self.headers.clone());

                match (request.method.has_json_body(), body) {
                    (true, RequestBody::Json(payload)) => builder.json(payload),
                    (true, _) => builder.header(CONTENT_TYPE, "application/json"),
                    (false, RequestBody::Json(payload)) => builder.query(&query_pairs(payload)),
                    (false, _) => builder,
                }
            }
        };

        builder
            .build()
            .map_err(|e| BridgeError::remote_transport(format!("请求构建失败: {e}")))
    }
}

#[async_trait::async_trait]
impl TurnitinTransport for HttpTurnitinTransport {
    async fn call(&self, request: ApiRequest) -> Result<RemoteResponse> {
        let http_request = self.build_request(&request)?;
        debug!("Turnitin 请求: {} {}", request.method, request.path);

        let response = self.client.execute(http_request).await.map_err(|e| {
            BridgeError::remote_transport(format!(
                "{} {} 请求失败: {e}",
                request.method, request.path
            ))
        })?;

        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();
        debug!("Turnitin 响应: {} {} -> {}", request.method, request.path, status);

        Ok(RemoteResponse { status, body })
    }
}

fn to_reqwest_method(method: ApiMethod) -> reqwest::Method {
    match method {
        ApiMethod::Get => reqwest::Method::GET,
        ApiMethod::Post => reqwest::Method::POST,
        ApiMethod::Put => reqwest::Method::PUT,
        ApiMethod::Patch => reqwest::Method::PATCH,
        ApiMethod::Delete => reqwest::Method::DELETE,
    }
}

// 只展开顶层标量，嵌套结构按 JSON 文本发送
fn query_pairs(payload: &serde_json::Value) -> Vec<(String, String)> {
    let Some(object) = payload.as_object() else {
        return Vec::new();
    };
    object
        .iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(key, value)| {
            let value = match value {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (key.clone(), value)
        })
        .collect()
}

/// 生成可放入 Content-Disposition 的 ASCII 文件名
pub(crate) fn sanitize_file_name(file_name: &str) -> String {
    let sanitized: String = file_name
        .chars()
        .map(|c| {
            if (c.is_ascii_graphic() || c == ' ') && c != '"' && c != '\\' {
                c
            } else {
                '_'
            }
        })
        .collect();

    let trimmed = sanitized.trim();
    if trimmed.is_empty() {
        "file".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> TurnitinConfig {
        TurnitinConfig {
            api_url: "https://tii.example.com/".to_string(),
            integration_family: "open-edx".to_string(),
            integration_version: "1.0.0".to_string(),
            api_key: "secret-key".to_string(),
            ..Default::default()
        }
    }

    fn header<'a>(request: &'a reqwest::Request, name: &str) -> Option<&'a str> {
        request.headers().get(name).and_then(|v| v.to_str().ok())
    }

    #[test]
    fn test_missing_api_url_is_configuration_error() {
        let result = HttpTurnitinTransport::new(&TurnitinConfig::default());
        assert!(matches!(result, Err(BridgeError::Configuration(_))));
    }

    #[test]
    fn test_json_request_headers_and_body() {
        let transport = HttpTurnitinTransport::new(&config()).unwrap();
        let request = transport
            .build_request(&ApiRequest::post(
                "submissions",
                Some(serde_json::json!({"owner": 7})),
            ))
            .unwrap();

        assert_eq!(*request.method(), reqwest::Method::POST);
        assert_eq!(
            request.url().as_str(),
            "https://tii.example.com/api/v1/submissions"
        );
        assert_eq!(header(&request, "x-turnitin-integration-name"), Some("open-edx"));
        assert_eq!(header(&request, "x-turnitin-integration-version"), Some("1.0.0"));
        assert_eq!(header(&request, "authorization"), Some("Bearer secret-key"));
        assert_eq!(header(&request, "content-type"), Some("application/json"));

        let body = request.body().and_then(|b| b.as_bytes()).unwrap();
        let json: serde_json::Value = serde_json::from_slice(body).unwrap();
        assert_eq!(json["owner"], 7);
    }

    #[test]
    fn test_get_payload_goes_to_query() {
        let transport = HttpTurnitinTransport::new(&config()).unwrap();
        let request = transport
            .build_request(&ApiRequest::get_with_query(
                "eula/v1beta/view",
                serde_json::json!({"lang": "en-US"}),
            ))
            .unwrap();

        assert_eq!(*request.method(), reqwest::Method::GET);
        assert_eq!(request.url().query(), Some("lang=en-US"));
        assert!(request.body().is_none());
        assert!(header(&request, "content-type").is_none());
    }

    #[test]
    fn test_upload_request_sends_raw_bytes() {
        let transport = HttpTurnitinTransport::new(&config()).unwrap();
        let request = transport
            .build_request(&ApiRequest::upload(
                "submissions/abc/original",
                "essay.pdf",
                b"%PDF-1.7".to_vec(),
            ))
            .unwrap();

        assert_eq!(*request.method(), reqwest::Method::PUT);
        assert_eq!(header(&request, "content-type"), Some("binary/octet-stream"));
        assert_eq!(
            header(&request, "content-disposition"),
            Some("inline; filename=\"essay.pdf\"")
        );
        assert_eq!(
            request.body().and_then(|b| b.as_bytes()),
            Some(&b"%PDF-1.7"[..])
        );
    }

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("essay.pdf"), "essay.pdf");
        assert_eq!(sanitize_file_name("Student's Text Response Part 1"), "Student's Text Response Part 1");
        assert_eq!(sanitize_file_name("résumé \"final\".docx"), "r_sum_ _final_.docx");
        assert_eq!(sanitize_file_name("论文.pdf"), "__.pdf");
        assert_eq!(sanitize_file_name("  "), "file");
    }
}
