use lazy_static::lazy_static;
use regex::Regex;

/// 文件大小转为人类可读格式
pub fn format_file_size(size_bytes: u64) -> String {
    let mut size = size_bytes as f64;
    for unit in ["B", "KB", "MB", "GB", "TB"] {
        if size < 1024.0 {
            return format!("{:.2} {}", size, unit);
        }
        size /= 1024.0;
    }
    format!("{:.2} PB", size)
}

lazy_static! {
    static ref INVALID_CHARS: Regex = Regex::new(r#"[<>:"/\\|?*]"#).unwrap();
}

/// 清理文件名中的非法字符并限制长度
pub fn sanitize_filename(filename: &str) -> String {
    let cleaned = INVALID_CHARS.replace_all(filename, "").to_string();

    if cleaned.chars().count() <= 200 {
        return cleaned;
    }

    // 超长时保留扩展名截断
    match cleaned.rsplit_once('.') {
        Some((name, ext)) => {
            let head: String = name.chars().take(195).collect();
            format!("{}.{}", head, ext)
        }
        None => cleaned.chars().take(200).collect(),
    }
}
