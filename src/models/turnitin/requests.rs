use serde::{Deserialize, Serialize};

use crate::models::FieldErrors;

// ORA 提交中的一段文本回答
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TextPart {
    #[serde(default)]
    pub text: String,
}

// 附件下载信息
#[derive(Debug, Clone, PartialEq)]
pub struct FileDownload {
    pub name: String,
    pub download_url: String,
}

// 宿主平台发出的 "ORA 提交已创建" 事件
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OraSubmissionCreatedEvent {
    pub submission_id: String,
    pub anonymous_user_id: String,
    #[serde(default)]
    pub course_id: Option<String>,
    #[serde(default)]
    pub item_location: Option<String>,
    #[serde(default)]
    pub text_parts: Vec<TextPart>,
    #[serde(default)]
    pub file_names: Vec<String>,
    #[serde(default)]
    pub file_urls: Vec<String>,
}

impl OraSubmissionCreatedEvent {
    /// 校验事件字段，返回所有字段错误
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();

        if uuid::Uuid::parse_str(&self.submission_id).is_err() {
            errors.add(
                "submission_id",
                format!("The supplied submission_id='{}' is not valid.", self.submission_id),
            );
        }
        if self.anonymous_user_id.trim().is_empty() {
            errors.add("anonymous_user_id", "This field may not be blank.");
        }
        if self.course_id.is_none() && self.item_location.is_none() {
            errors.add(
                "course_id",
                "Either course_id or item_location must be provided.",
            );
        }
        if self.file_names.len() != self.file_urls.len() {
            errors.add(
                "file_urls",
                format!(
                    "file_names and file_urls must have the same length ({} != {}).",
                    self.file_names.len(),
                    self.file_urls.len()
                ),
            );
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// 将并行数组合并为 (文件名, 下载地址) 列表
    pub fn file_downloads(&self) -> Vec<FileDownload> {
        self.file_names
            .iter()
            .zip(self.file_urls.iter())
            .map(|(name, url)| FileDownload {
                name: name.clone(),
                download_url: url.clone(),
            })
            .collect()
    }
}
