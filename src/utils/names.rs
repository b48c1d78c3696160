/// 按第一个空格拆分姓名
///
/// 第一个片段为名，其余部分（如有）为姓；空字符串返回两个空串。
pub fn split_full_name(name: &str) -> (String, String) {
    if name.is_empty() {
        return (String::new(), String::new());
    }
    match name.split_once(' ') {
        Some((given, family)) => (given.to_string(), family.to_string()),
        None => (name.to_string(), String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_part_name() {
        assert_eq!(
            split_full_name("First Last Extra"),
            ("First".to_string(), "Last Extra".to_string())
        );
    }

    #[test]
    fn test_single_name() {
        assert_eq!(
            split_full_name("Solo"),
            ("Solo".to_string(), String::new())
        );
    }

    #[test]
    fn test_empty_name() {
        assert_eq!(split_full_name(""), (String::new(), String::new()));
    }

    #[test]
    fn test_only_first_space_splits() {
        assert_eq!(
            split_full_name("Ana  Maria"),
            ("Ana".to_string(), " Maria".to_string())
        );
    }
}
