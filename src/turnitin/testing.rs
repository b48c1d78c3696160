//! 测试用的 Turnitin 模拟传输层

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use super::{ApiMethod, ApiRequest, RemoteResponse, TurnitinTransport};
use crate::errors::Result;

/// 跨多个模拟组件共享的调用记录
pub(crate) type CallLog = Arc<Mutex<Vec<String>>>;

type Override = Box<dyn Fn(&ApiRequest) -> Option<Result<RemoteResponse>> + Send + Sync>;

pub(crate) struct ScriptedTransport {
    requests: Mutex<Vec<ApiRequest>>,
    created: AtomicUsize,
    // 已收到内容的远程提交
    uploaded: Mutex<HashSet<String>>,
    log: Option<CallLog>,
    override_fn: Option<Override>,
}

impl ScriptedTransport {
    /// 所有调用都成功的模拟服务
    pub(crate) fn turnitin() -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            created: AtomicUsize::new(0),
            uploaded: Mutex::new(HashSet::new()),
            log: None,
            override_fn: None,
        }
    }

    pub(crate) fn with_log(mut self, log: CallLog) -> Self {
        self.log = Some(log);
        self
    }

    /// 返回 Some 时替换默认响应
    pub(crate) fn with_override(
        mut self,
        f: impl Fn(&ApiRequest) -> Option<Result<RemoteResponse>> + Send + Sync + 'static,
    ) -> Self {
        self.override_fn = Some(Box::new(f));
        self
    }

    pub(crate) fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn count(&self, method: ApiMethod, suffix: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method == method && r.path.ends_with(suffix))
            .count()
    }

    fn default_response(&self, request: &ApiRequest) -> RemoteResponse {
        let segments: Vec<&str> = request.path.split('/').collect();
        let json = RemoteResponse::json_body;

        match (request.method, segments.as_slice()) {
            (ApiMethod::Post, ["eula", _, "accept"]) => json(200, &serde_json::json!({})),
            (ApiMethod::Get, ["eula", _, "view"]) => {
                RemoteResponse::new(200, "<html>EULA</html>")
            }
            (ApiMethod::Post, ["submissions"]) => {
                let n = self.created.fetch_add(1, Ordering::SeqCst) + 1;
                json(
                    201,
                    &serde_json::json!({ "id": format!("tii-{n}"), "status": "CREATED" }),
                )
            }
            (ApiMethod::Put, ["submissions", id, "original"]) => {
                self.uploaded.lock().unwrap().insert(id.to_string());
                json(
                    202,
                    &serde_json::json!({ "message": format!("Successfully uploaded file for Submission ID: {id}") }),
                )
            }
            // 内容未送达的提交停留在 CREATED
            (ApiMethod::Get, ["submissions", id]) => {
                let status = if self.uploaded.lock().unwrap().contains(*id) {
                    "COMPLETE"
                } else {
                    "CREATED"
                };
                json(200, &serde_json::json!({ "id": id, "status": status }))
            }
            (ApiMethod::Put, ["submissions", id, "similarity"]) => json(
                202,
                &serde_json::json!({ "message": format!("Similarity report requested for {id}") }),
            ),
            (ApiMethod::Get, ["submissions", id, "similarity"]) => json(
                200,
                &serde_json::json!({
                    "submission_id": id,
                    "status": "COMPLETE",
                    "overall_match_percentage": 12
                }),
            ),
            (ApiMethod::Post, ["submissions", id, "viewer-url"]) => json(
                200,
                &serde_json::json!({ "viewer_url": format!("https://viewer.example.com/{id}") }),
            ),
            (ApiMethod::Post, ["submissions", id, "similarity", "pdf"]) => {
                json(202, &serde_json::json!({ "id": format!("pdf-{id}") }))
            }
            (ApiMethod::Get, ["submissions", _, "similarity", "pdf", _, "status"]) => {
                json(200, &serde_json::json!({ "status": "SUCCESS" }))
            }
            _ => RemoteResponse::new(404, "not found"),
        }
    }
}

#[async_trait::async_trait]
impl TurnitinTransport for ScriptedTransport {
    async fn call(&self, request: ApiRequest) -> Result<RemoteResponse> {
        if let Some(log) = &self.log {
            log.lock()
                .unwrap()
                .push(format!("{} {}", request.method, request.path));
        }
        self.requests.lock().unwrap().push(request.clone());

        if let Some(response) = self.override_fn.as_ref().and_then(|f| f(&request)) {
            return response;
        }
        Ok(self.default_response(&request))
    }
}
