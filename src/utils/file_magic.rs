/// 验证上传文档的魔术字节是否与扩展名匹配
///
/// # Arguments
/// * `data` - 完整的文件内容
/// * `extension` - 文件扩展名（不含点号，如 "pdf"）
///
/// # Returns
/// * `true` - 魔术字节匹配，或该类型没有固定文件头
/// * `false` - 内容为空或魔术字节不匹配
pub fn validate_magic_bytes(data: &[u8], extension: &str) -> bool {
    if data.is_empty() {
        return false;
    }

    match extension.trim_start_matches('.').to_lowercase().as_str() {
        "pdf" => data.starts_with(b"%PDF"),
        // MS Office 旧格式 (OLE Compound Document)
        "doc" => data.starts_with(&[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1]),
        // OOXML / ODF 均为 ZIP 容器
        "docx" | "odt" => data.starts_with(&[0x50, 0x4B, 0x03, 0x04]),
        "rtf" => data.starts_with(b"{\\rtf"),
        // 纯文本不限制编码，Latin-1 等同样接受
        // 允许列表之外的类型在此之前已被过滤
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_magic() {
        let pdf_header = b"%PDF-1.4";
        assert!(validate_magic_bytes(pdf_header, "pdf"));
        assert!(validate_magic_bytes(pdf_header, ".PDF"));
        assert!(!validate_magic_bytes(pdf_header, "doc"));
    }

    #[test]
    fn test_office_magic() {
        let ole = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];
        let zip = [0x50, 0x4B, 0x03, 0x04, 0x14];
        assert!(validate_magic_bytes(&ole, "doc"));
        assert!(validate_magic_bytes(&zip, "docx"));
        assert!(!validate_magic_bytes(&zip, "doc"));
    }

    #[test]
    fn test_text_accepts_any_encoding() {
        assert!(validate_magic_bytes("Hello, World!".as_bytes(), "txt"));
        // Latin-1 的 "résumé"
        assert!(validate_magic_bytes(b"r\xe9sum\xe9", "txt"));
        // UTF-8 多字节字符被截断
        assert!(validate_magic_bytes(&"é".as_bytes()[..1], "txt"));
    }

    #[test]
    fn test_empty_data() {
        assert!(!validate_magic_bytes(&[], "pdf"));
        assert!(!validate_magic_bytes(&[], "txt"));
    }
}
