//! Turnitin 提交开关
//!
//! 全局开关为 true 时直接放行，不查询课程设置；
//! 否则读取课程高级设置中的覆盖项，缺省为 false。

use std::sync::Arc;

use tracing::debug;

use crate::config::PlatformConfig;
use crate::errors::{BridgeError, Result};
use crate::models::courses::entities::CourseKey;
use crate::storage::CourseDirectory;

/// 判断所需的上下文：课程 ID 或内容位置二选一
#[derive(Debug, Clone, Default)]
pub struct EnablementContext {
    pub course_id: Option<String>,
    pub item_location: Option<String>,
}

impl EnablementContext {
    pub fn course_key(&self) -> Result<CourseKey> {
        if let Some(course_id) = &self.course_id {
            return course_id.parse().map_err(BridgeError::validation);
        }
        if let Some(location) = &self.item_location {
            return CourseKey::from_usage_key(location).map_err(BridgeError::validation);
        }
        Err(BridgeError::validation(
            "Either course_id or item_location must be provided",
        ))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnablementDecision {
    pub enabled: bool,
}

/// 事件处理前的过滤步骤
#[async_trait::async_trait]
pub trait SubmissionFilter: Send + Sync {
    async fn run(&self, context: &EnablementContext) -> Result<EnablementDecision>;
}

pub struct EnablementPolicy {
    global_enabled: bool,
    override_key: String,
    courses: Arc<dyn CourseDirectory>,
}

impl EnablementPolicy {
    pub fn new(config: &PlatformConfig, courses: Arc<dyn CourseDirectory>) -> Self {
        Self {
            global_enabled: config.enable_turnitin_submission,
            override_key: config.course_override_key.clone(),
            courses,
        }
    }
}

#[async_trait::async_trait]
impl SubmissionFilter for EnablementPolicy {
    async fn run(&self, context: &EnablementContext) -> Result<EnablementDecision> {
        if self.global_enabled {
            return Ok(EnablementDecision { enabled: true });
        }

        let course_key = context.course_key()?;
        let settings = self
            .courses
            .course_settings(&course_key)
            .await?
            .ok_or_else(|| BridgeError::not_found(format!("Course {course_key} not found")))?;

        let enabled = settings
            .get(&self.override_key)
            .and_then(|value| value.as_bool())
            .unwrap_or(false);
        debug!(course_id = %course_key, enabled, "course Turnitin override evaluated");

        Ok(EnablementDecision { enabled })
    }
}
