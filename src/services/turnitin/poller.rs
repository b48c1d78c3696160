use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::config::PollingConfig;
use crate::models::turnitin::entities::RemoteSubmissionStatus;
use crate::turnitin::TurnitinGateway;

#[async_trait::async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

pub struct TokioSleeper;

#[async_trait::async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// 轮询给定的远程提交直到全部处理结束
///
/// 固定间隔，不做指数退避。总等待时间上限为 `max_attempts × interval`。
/// 只轮询调用方传入的提交，内容未送达的远程提交不会进入终态。
pub struct CompletionPoller {
    gateway: TurnitinGateway,
    sleeper: Arc<dyn Sleeper>,
    max_attempts: u32,
    interval: Duration,
}

impl CompletionPoller {
    pub fn new(
        gateway: TurnitinGateway,
        sleeper: Arc<dyn Sleeper>,
        config: &PollingConfig,
    ) -> Self {
        Self {
            gateway,
            sleeper,
            max_attempts: config.max_attempts.max(1),
            interval: Duration::from_secs(config.interval_seconds),
        }
    }

    /// 全部结束返回 true；次数耗尽返回 false，不视为错误
    pub async fn poll_until_complete(
        &self,
        ora_submission_id: &str,
        submission_ids: &[String],
    ) -> bool {
        for attempt in 1..=self.max_attempts {
            if self.all_terminal(submission_ids).await {
                debug!(
                    ora_submission_id,
                    attempt, "Turnitin submissions finished processing"
                );
                return true;
            }
            if attempt < self.max_attempts {
                self.sleeper.sleep(self.interval).await;
            }
        }

        warn!(
            ora_submission_id,
            attempts = self.max_attempts,
            "Turnitin submissions still processing, giving up polling"
        );
        false
    }

    async fn all_terminal(&self, submission_ids: &[String]) -> bool {
        for submission_id in submission_ids {
            let submission_id = submission_id.as_str();
            // 远程调用失败只算作本轮未完成
            let response = match self.gateway.submission_info(submission_id).await {
                Ok(response) if response.is_success() => response,
                Ok(response) => {
                    debug!(
                        turnitin_submission_id = submission_id,
                        status = response.status,
                        "submission info request rejected"
                    );
                    return false;
                }
                Err(e) => {
                    debug!(
                        turnitin_submission_id = submission_id,
                        "submission info request failed: {e}"
                    );
                    return false;
                }
            };

            let status = response
                .str_field("status")
                .and_then(|s| s.parse::<RemoteSubmissionStatus>().ok());
            match status {
                Some(status) if status.is_terminal() => {}
                other => {
                    debug!(
                        turnitin_submission_id = submission_id,
                        status = ?other,
                        "submission not finished"
                    );
                    return false;
                }
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::config::TurnitinConfig;
    use crate::turnitin::testing::ScriptedTransport;
    use crate::turnitin::{ApiMethod, RemoteResponse};

    const ORA_ID: &str = "0a966646-83f9-4ce6-aa47-71e07baf4e30";

    #[derive(Default)]
    struct RecordingSleeper {
        sleeps: Mutex<Vec<Duration>>,
    }

    #[async_trait::async_trait]
    impl Sleeper for RecordingSleeper {
        async fn sleep(&self, duration: Duration) {
            self.sleeps.lock().unwrap().push(duration);
        }
    }

    fn scripted_statuses(statuses: &'static [&'static str]) -> ScriptedTransport {
        let attempt = AtomicUsize::new(0);
        ScriptedTransport::turnitin().with_override(move |request| {
            if request.method != ApiMethod::Get || !request.path.starts_with("submissions/") {
                return None;
            }
            let index = attempt.fetch_add(1, Ordering::SeqCst);
            let status = statuses[index.min(statuses.len() - 1)];
            Some(Ok(RemoteResponse::json_body(
                200,
                &serde_json::json!({ "status": status }),
            )))
        })
    }

    fn ids(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|id| id.to_string()).collect()
    }

    fn poller(transport: Arc<ScriptedTransport>, sleeper: Arc<RecordingSleeper>) -> CompletionPoller {
        let gateway = TurnitinGateway::new(transport, &TurnitinConfig::default());
        CompletionPoller::new(
            gateway,
            sleeper,
            &PollingConfig {
                max_attempts: 3,
                interval_seconds: 5,
            },
        )
    }

    #[tokio::test]
    async fn test_completes_on_third_attempt() {
        let transport = Arc::new(scripted_statuses(&["PROCESSING", "PROCESSING", "COMPLETE"]));
        let sleeper = Arc::new(RecordingSleeper::default());
        let poller = poller(transport.clone(), sleeper.clone());

        assert!(poller.poll_until_complete(ORA_ID, &ids(&["tii-1"])).await);
        assert_eq!(transport.count(ApiMethod::Get, "tii-1"), 3);
        assert_eq!(
            *sleeper.sleeps.lock().unwrap(),
            vec![Duration::from_secs(5); 2]
        );
    }

    #[tokio::test]
    async fn test_gives_up_without_error() {
        let transport = Arc::new(scripted_statuses(&["PROCESSING"]));
        let sleeper = Arc::new(RecordingSleeper::default());
        let poller = poller(transport.clone(), sleeper.clone());

        assert!(!poller.poll_until_complete(ORA_ID, &ids(&["tii-1"])).await);
        assert_eq!(transport.count(ApiMethod::Get, "tii-1"), 3);
        assert_eq!(sleeper.sleeps.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_error_status_counts_as_finished() {
        let transport = Arc::new(scripted_statuses(&["ERROR"]));
        let sleeper = Arc::new(RecordingSleeper::default());
        let poller = poller(transport, sleeper.clone());

        assert!(poller.poll_until_complete(ORA_ID, &ids(&["tii-1"])).await);
        assert!(sleeper.sleeps.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_remote_failure_is_retried() {
        let attempt = AtomicUsize::new(0);
        let transport = Arc::new(ScriptedTransport::turnitin().with_override(move |request| {
            if request.method != ApiMethod::Get {
                return None;
            }
            match attempt.fetch_add(1, Ordering::SeqCst) {
                0 => Some(Ok(RemoteResponse::new(401, "unauthorized"))),
                1 => Some(Err(crate::errors::BridgeError::remote_transport("timeout"))),
                _ => None,
            }
        }));
        let sleeper = Arc::new(RecordingSleeper::default());
        let poller = poller(transport.clone(), sleeper.clone());

        assert!(poller.poll_until_complete(ORA_ID, &ids(&["tii-1"])).await);
        assert_eq!(transport.count(ApiMethod::Get, "tii-1"), 3);
        assert_eq!(sleeper.sleeps.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_only_given_submissions_are_polled() {
        // tii-2 内容未送达，远程保持 CREATED
        let transport = Arc::new(ScriptedTransport::turnitin().with_override(|request| {
            (request.method == ApiMethod::Get && request.path == "submissions/tii-2").then(|| {
                Ok(RemoteResponse::json_body(
                    200,
                    &serde_json::json!({ "status": "CREATED" }),
                ))
            })
        }));
        let sleeper = Arc::new(RecordingSleeper::default());
        let poller = poller(transport.clone(), sleeper.clone());

        assert!(
            poller
                .poll_until_complete(ORA_ID, &ids(&["tii-1", "tii-3"]))
                .await
        );
        assert_eq!(transport.count(ApiMethod::Get, "tii-2"), 0);
        assert!(!poller.poll_until_complete(ORA_ID, &ids(&["tii-1", "tii-2"])).await);
    }

    #[tokio::test]
    async fn test_nothing_to_poll_is_complete() {
        let transport = Arc::new(ScriptedTransport::turnitin());
        let poller = poller(transport.clone(), Arc::new(RecordingSleeper::default()));

        assert!(poller.poll_until_complete(ORA_ID, &[]).await);
        assert!(transport.requests().is_empty());
    }
}
