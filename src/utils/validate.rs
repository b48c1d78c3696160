use std::path::Path;

/// 校验 ORA 提交 ID（UUID 格式）
pub fn validate_ora_submission_id(id: &str) -> Result<(), String> {
    uuid::Uuid::parse_str(id)
        .map(|_| ())
        .map_err(|_| format!("The supplied ora_submission_id='{id}' is not valid."))
}

/// 提取小写扩展名（不含点号）
pub fn file_extension(file_name: &str) -> Option<String> {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

/// 文件扩展名是否在允许列表中
///
/// 允许列表中的条目可以带或不带点号，比较时忽略大小写。
pub fn is_allowed_extension(file_name: &str, allowed: &[String]) -> bool {
    let Some(extension) = file_extension(file_name) else {
        return false;
    };
    allowed
        .iter()
        .any(|a| a.trim_start_matches('.').eq_ignore_ascii_case(&extension))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allow_list() -> Vec<String> {
        ["doc", "docx", "pdf", "txt"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn test_valid_ora_submission_id() {
        assert!(validate_ora_submission_id("0a966646-83f9-4ce6-aa47-71e07baf4e30").is_ok());
    }

    #[test]
    fn test_invalid_ora_submission_id() {
        let err = validate_ora_submission_id("12345").unwrap_err();
        assert!(err.contains("12345"));
    }

    #[test]
    fn test_allowed_extensions() {
        let allowed = allow_list();
        assert!(is_allowed_extension("essay.pdf", &allowed));
        assert!(is_allowed_extension("Essay.DOCX", &allowed));
        assert!(is_allowed_extension("notes.final.txt", &allowed));
    }

    #[test]
    fn test_rejected_extensions() {
        let allowed = allow_list();
        assert!(!is_allowed_extension("photo.png", &allowed));
        assert!(!is_allowed_extension("archive.zip", &allowed));
        assert!(!is_allowed_extension("README", &allowed));
        assert!(!is_allowed_extension("", &allowed));
    }

    #[test]
    fn test_dotted_allow_list_entries() {
        let allowed = vec![".pdf".to_string()];
        assert!(is_allowed_extension("essay.pdf", &allowed));
    }
}
