//! 后台任务执行
//!
//! 每个事件一个 tokio 任务，并发数由信号量限制。任务失败只记录日志。

use std::future::Future;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::errors::Result;

#[derive(Clone)]
pub struct TaskRunner {
    permits: Arc<Semaphore>,
}

impl TaskRunner {
    pub fn new(max_concurrent_tasks: usize) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(max_concurrent_tasks.max(1))),
        }
    }

    pub fn spawn<F>(&self, task_id: String, task: F) -> JoinHandle<()>
    where
        F: Future<Output = Result<()>> + Send + 'static,
    {
        let permits = self.permits.clone();
        tokio::spawn(async move {
            let Ok(_permit) = permits.acquire_owned().await else {
                error!(task_id, "task runner closed, dropping task");
                return;
            };

            match task.await {
                Ok(()) => info!(task_id, "background task finished"),
                Err(e) => error!(
                    task_id,
                    error_code = e.code(),
                    "background task failed: {}",
                    e.message()
                ),
            }
        })
    }
}
