use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ORA 提交与 Turnitin 提交的映射
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubmissionMapping {
    pub id: i64,
    pub user_id: i64,
    pub ora_submission_id: Option<String>,
    pub turnitin_submission_id: String,
    pub turnitin_submission_pdf_id: Option<String>,
    pub file_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

// 新建映射所需字段
#[derive(Debug, Clone)]
pub struct NewSubmissionMapping {
    pub user_id: i64,
    pub ora_submission_id: Option<String>,
    pub turnitin_submission_id: String,
    pub file_name: Option<String>,
}

// Turnitin 远程提交状态
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RemoteSubmissionStatus {
    Created,
    Processing,
    Complete,
    Error,
}

impl RemoteSubmissionStatus {
    /// COMPLETE 与 ERROR 都视为处理结束
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RemoteSubmissionStatus::Complete | RemoteSubmissionStatus::Error
        )
    }
}

impl<'de> Deserialize<'de> for RemoteSubmissionStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<RemoteSubmissionStatus>()
            .map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for RemoteSubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RemoteSubmissionStatus::Created => write!(f, "CREATED"),
            RemoteSubmissionStatus::Processing => write!(f, "PROCESSING"),
            RemoteSubmissionStatus::Complete => write!(f, "COMPLETE"),
            RemoteSubmissionStatus::Error => write!(f, "ERROR"),
        }
    }
}

impl std::str::FromStr for RemoteSubmissionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CREATED" => Ok(RemoteSubmissionStatus::Created),
            "PROCESSING" => Ok(RemoteSubmissionStatus::Processing),
            "COMPLETE" => Ok(RemoteSubmissionStatus::Complete),
            "ERROR" => Ok(RemoteSubmissionStatus::Error),
            _ => Err(format!("Invalid remote submission status: {s}")),
        }
    }
}

// 待上传的内容单元（一段文本或一个附件）
#[derive(Debug, Clone, PartialEq)]
pub struct ContentUnit {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ContentUnit {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// 第 N 段文本回答（从 1 开始）
    pub fn text_part(index: usize, text: &str) -> Self {
        Self::new(
            format!("Student's Text Response Part {index}"),
            text.as_bytes().to_vec(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_statuses() {
        assert!(RemoteSubmissionStatus::Complete.is_terminal());
        assert!(RemoteSubmissionStatus::Error.is_terminal());
        assert!(!RemoteSubmissionStatus::Processing.is_terminal());
        assert!(!RemoteSubmissionStatus::Created.is_terminal());
    }

    #[test]
    fn test_status_deserialize() {
        let status: RemoteSubmissionStatus = serde_json::from_str("\"PROCESSING\"").unwrap();
        assert_eq!(status, RemoteSubmissionStatus::Processing);
        assert!(serde_json::from_str::<RemoteSubmissionStatus>("\"DONE\"").is_err());
    }

    #[test]
    fn test_text_part_naming() {
        let unit = ContentUnit::text_part(2, "héllo");
        assert_eq!(unit.file_name, "Student's Text Response Part 2");
        assert_eq!(unit.bytes, "héllo".as_bytes());
    }
}
