//! 发送给 Turnitin 的请求体

use serde::Serialize;

use crate::models::users::entities::User;

pub const OWNER_PERMISSION_SET: &str = "LEARNER";
pub const SUBMITTER_PERMISSION_SET: &str = "INSTRUCTOR";
pub const VIEWER_PERMISSION_SET: &str = "INSTRUCTOR";

// 接受 EULA
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EulaAcceptance {
    pub user_id: String,
    pub accepted_timestamp: String,
    pub language: String,
}

impl EulaAcceptance {
    pub fn new(user: &User, accepted_timestamp: String, language: &str) -> Self {
        Self {
            user_id: user.id.to_string(),
            accepted_timestamp,
            language: language.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SubmissionPerson {
    pub id: i64,
    pub given_name: String,
    pub family_name: String,
    pub email: String,
}

impl From<&User> for SubmissionPerson {
    fn from(user: &User) -> Self {
        let (given_name, family_name) = user.name_parts();
        Self {
            id: user.id,
            given_name,
            family_name,
            email: user.email.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SubmissionMetadata {
    pub owners: Vec<SubmissionPerson>,
    pub submitter: SubmissionPerson,
    pub original_submitted_time: String,
}

// 创建远程提交
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CreateSubmission {
    pub owner: i64,
    pub title: String,
    pub submitter: i64,
    pub owner_default_permission_set: &'static str,
    pub submitter_default_permission_set: &'static str,
    pub extract_text_only: bool,
    pub metadata: SubmissionMetadata,
}

impl CreateSubmission {
    /// 提交者与所有者均为当前用户
    pub fn for_user(user: &User, file_name: &str, submitted_at: String) -> Self {
        let person = SubmissionPerson::from(user);
        Self {
            owner: user.id,
            title: format!("{}-{}", file_name, user.username),
            submitter: user.id,
            owner_default_permission_set: OWNER_PERMISSION_SET,
            submitter_default_permission_set: SUBMITTER_PERMISSION_SET,
            extract_text_only: false,
            metadata: SubmissionMetadata {
                owners: vec![person.clone()],
                submitter: person,
                original_submitted_time: submitted_at,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ViewerPermissions {
    pub may_view_submission_full_source: bool,
    pub may_view_match_submission_info: bool,
    pub may_view_document_details_panel: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AuthorMetadataOverride {
    pub family_name: String,
    pub given_name: String,
}

// 创建相似度报告查看器链接
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ViewerLaunch {
    pub viewer_user_id: i64,
    pub locale: String,
    pub viewer_default_permission_set: &'static str,
    pub viewer_permissions: ViewerPermissions,
    pub similarity: serde_json::Value,
    pub author_metadata_override: AuthorMetadataOverride,
    pub sidebar: serde_json::Value,
}

impl ViewerLaunch {
    pub fn for_viewer(viewer: &User, locale: &str) -> Self {
        let (given_name, family_name) = viewer.name_parts();
        Self {
            viewer_user_id: viewer.id,
            locale: locale.to_string(),
            viewer_default_permission_set: VIEWER_PERMISSION_SET,
            viewer_permissions: ViewerPermissions {
                may_view_submission_full_source: false,
                may_view_match_submission_info: false,
                may_view_document_details_panel: false,
            },
            similarity: serde_json::json!({
                "default_mode": "match_overview",
                "modes": { "match_overview": true, "all_sources": true },
                "view_settings": { "save_changes": true }
            }),
            author_metadata_override: AuthorMetadataOverride {
                family_name,
                given_name,
            },
            sidebar: serde_json::json!({ "default_mode": "similarity" }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn learner() -> User {
        User {
            id: 7,
            username: "jdoe".to_string(),
            email: "jdoe@example.com".to_string(),
            full_name: "Jane van Doe".to_string(),
            is_staff: false,
            is_active: true,
        }
    }

    #[test]
    fn test_create_submission_payload() {
        let payload =
            CreateSubmission::for_user(&learner(), "essay.pdf", "2024-01-01T12:00:00Z".into());
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["owner"], 7);
        assert_eq!(json["submitter"], 7);
        assert_eq!(json["title"], "essay.pdf-jdoe");
        assert_eq!(json["owner_default_permission_set"], "LEARNER");
        assert_eq!(json["submitter_default_permission_set"], "INSTRUCTOR");
        assert_eq!(json["extract_text_only"], false);
        assert_eq!(json["metadata"]["owners"][0]["given_name"], "Jane");
        assert_eq!(json["metadata"]["owners"][0]["family_name"], "van Doe");
        assert_eq!(json["metadata"]["submitter"]["email"], "jdoe@example.com");
        assert_eq!(
            json["metadata"]["original_submitted_time"],
            "2024-01-01T12:00:00Z"
        );
    }

    #[test]
    fn test_eula_payload_uses_string_user_id() {
        let payload = EulaAcceptance::new(&learner(), "2024-01-01T12:00:00Z".into(), "en-US");
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["user_id"], "7");
        assert_eq!(json["language"], "en-US");
    }

    #[test]
    fn test_viewer_payload() {
        let json = serde_json::to_value(ViewerLaunch::for_viewer(&learner(), "en-EN")).unwrap();
        assert_eq!(json["viewer_default_permission_set"], "INSTRUCTOR");
        assert_eq!(json["similarity"]["default_mode"], "match_overview");
        assert_eq!(json["author_metadata_override"]["family_name"], "van Doe");
        assert_eq!(json["sidebar"]["default_mode"], "similarity");
    }
}
