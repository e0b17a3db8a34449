use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

use super::models::VideoInfo;
use crate::common::utils::format_file_size;

// 识别为视频的扩展名
pub const VIDEO_EXTENSIONS: &[&str] = &[
    ".mp4", ".mkv", ".avi", ".mov", ".wmv", ".flv", ".webm", ".m4v",
];

lazy_static! {
    static ref SCRIPT_BLOCKS: Regex = Regex::new(r"(?is)<script[^>]*>(.*?)</script>").unwrap();

    // 已知的 script 内 JSON 赋值形态
    static ref SCRIPT_DATA_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"(?s)window\.__INITIAL_STATE__\s*=\s*(\{.+?\});").unwrap(),
        Regex::new(r"(?s)locals\.data\s*=\s*(\{.+?\});").unwrap(),
        Regex::new(r"(?s)yunData\.setData\((\{.+?\})\)").unwrap(),
        Regex::new(r#"(?s)"file_list"\s*:\s*(\[.+?\])"#).unwrap(),
    ];

    // 整页正则兜底：前四个取捕获组，后两个取整个匹配
    static ref PAGE_LINK_PATTERNS: Vec<Regex> = vec![
        Regex::new(r#""dlink"\s*:\s*"([^"]+)""#).unwrap(),
        Regex::new(r#""downloadurl"\s*:\s*"([^"]+)""#).unwrap(),
        Regex::new(r#""stream_url"\s*:\s*"([^"]+)""#).unwrap(),
        Regex::new(r#""m3u8_url"\s*:\s*"([^"]+)""#).unwrap(),
        Regex::new(r#"https://[^"']+\.m3u8[^"'\s]*"#).unwrap(),
        Regex::new(r#"https://[^"']+/file/[^"'\s]+"#).unwrap(),
    ];

    // 带键名的页面字段形态
    static ref PAGE_FIELD_PATTERNS: Vec<(Regex, &'static str)> = vec![
        (Regex::new(r#""dlink"\s*:\s*"([^"]+)""#).unwrap(), "dlink"),
        (Regex::new(r#""downloadUrl"\s*:\s*"([^"]+)""#).unwrap(), "download_link"),
        (Regex::new(r#""stream_url"\s*:\s*"([^"]+)""#).unwrap(), "stream_url"),
    ];

    // 近似的平衡大括号扫描，只容忍一层嵌套
    static ref JSON_OBJECT: Regex = Regex::new(r"\{[^{}]*(?:\{[^{}]*\}[^{}]*)*\}").unwrap();

    static ref TITLE_PATTERNS: Vec<Regex> = vec![
        Regex::new(r#"(?i)<meta\s+property="og:title"\s+content="([^"]+)""#).unwrap(),
        Regex::new(r"(?is)<title[^>]*>(.*?)</title>").unwrap(),
        Regex::new(r"(?is)<h1[^>]*>(.*?)</h1>").unwrap(),
        Regex::new(r#"(?is)<[^>]+class="[^"]*file-?name[^"]*"[^>]*>(.*?)<"#).unwrap(),
    ];

    static ref SERVER_FILENAME: Regex = Regex::new(r#""server_filename"\s*:\s*"([^"]+)""#).unwrap();
    static ref SIZE_FIELD: Regex = Regex::new(r#""size"\s*:\s*(\d+)"#).unwrap();
}

/// 还原被转义的路径分隔符
pub fn unescape_link(link: &str) -> String {
    link.replace("\\/", "/")
}

/// 取字符串字段，缺失时为空串
pub fn str_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string()
}

/// 取数值字段
pub fn u64_field(value: &Value, key: &str) -> u64 {
    value.get(key).and_then(|v| v.as_u64()).unwrap_or(0)
}

/// shareid/uk 等字段可能是数字也可能是字符串
pub fn id_field(value: &Value, key: &str) -> String {
    match value.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// 文件列表选择：先找视频扩展名，再取第一个非目录项，最后兜底第一项
pub fn find_video_file(list: &[Value]) -> Option<&Value> {
    for file in list {
        if file.get("isdir").and_then(|v| v.as_i64()) == Some(0) {
            let name = str_field(file, "server_filename").to_lowercase();
            if VIDEO_EXTENSIONS.iter().any(|ext| name.ends_with(ext)) {
                return Some(file);
            }
        }
    }

    for file in list {
        if file.get("isdir").and_then(|v| v.as_i64()) == Some(0) {
            return Some(file);
        }
    }

    list.first()
}

/// 链接字段调和：按已知字段名顺序取第一个非空，含嵌套 data.dlink
pub fn reconcile_link(data: &Value) -> Option<String> {
    const LINK_FIELDS: &[&str] = &[
        "download_link",
        "direct_link",
        "dlink",
        "url",
        "downloadUrl",
        "stream_url",
        "m3u8_url",
    ];

    for field in LINK_FIELDS {
        let link = str_field(data, field);
        if !link.is_empty() {
            return Some(unescape_link(&link));
        }
    }

    if let Some(nested) = data.get("data") {
        let link = str_field(nested, "dlink");
        if !link.is_empty() {
            return Some(unescape_link(&link));
        }
    }

    None
}

/// 页面中的所有 script 块内容
pub fn script_blocks(html: &str) -> Vec<&str> {
    SCRIPT_BLOCKS
        .captures_iter(html)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect()
}

/// 从 script 内容中提取已知赋值形态的 JSON
pub fn extract_script_data(script: &str) -> Option<Value> {
    for pattern in SCRIPT_DATA_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(script) {
            if let Ok(value) = serde_json::from_str::<Value>(&caps[1]) {
                return Some(value);
            }
        }
    }
    None
}

/// 按变量名提取嵌在 HTML 里的 JSON
pub fn extract_named_json(html: &str, variable: &str) -> Option<Value> {
    let name = regex::escape(variable);
    let patterns = [
        format!(r"(?s)var\s+{}\s*=\s*(\{{.+?\}});", name),
        format!(r"(?s){}\s*:\s*(\{{.+?\}}),", name),
        format!(r"(?s)'{}'\s*:\s*(\{{.+?\}}),", name),
        format!(r#"(?s)"{}"\s*:\s*(\{{.+?\}}),"#, name),
    ];

    for pattern in patterns {
        if let Ok(re) = Regex::new(&pattern) {
            if let Some(caps) = re.captures(html) {
                if let Ok(value) = serde_json::from_str::<Value>(&caps[1]) {
                    return Some(value);
                }
            }
        }
    }
    None
}

/// 扫描页面中所有形如 JSON 的对象并逐个解析，解析失败静默丢弃
pub fn scan_json_objects(html: &str) -> Vec<Value> {
    JSON_OBJECT
        .find_iter(html)
        .filter_map(|m| serde_json::from_str::<Value>(m.as_str()).ok())
        .filter(|v| v.is_object())
        .collect()
}

/// 载荷中是否带有可用的链接字段
pub fn is_video_payload(data: &Value) -> bool {
    const VIDEO_KEYS: &[&str] = &["dlink", "download_link", "stream_url", "m3u8_url", "downloadUrl"];
    VIDEO_KEYS.iter().any(|key| data.get(key).is_some())
}

/// 解析整页 HTML：先结构化扫描，再退化为字段正则
pub fn parse_html_for_video(html: &str) -> Option<Value> {
    for data in scan_json_objects(html) {
        if is_video_payload(&data) {
            return Some(data);
        }
    }

    let mut map = serde_json::Map::new();
    for (pattern, key) in PAGE_FIELD_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(html) {
            map.insert((*key).to_string(), Value::String(unescape_link(&caps[1])));
        }
    }

    if map.is_empty() {
        return None;
    }

    if let Some(caps) = SERVER_FILENAME.captures(html) {
        map.insert("server_filename".to_string(), Value::String(caps[1].to_string()));
    }
    if let Some(caps) = SIZE_FIELD.captures(html) {
        if let Ok(size) = caps[1].parse::<u64>() {
            map.insert("size".to_string(), Value::Number(size.into()));
        }
    }

    Some(Value::Object(map))
}

/// 整页直接搜索裸链接，web 抓取的最后兜底
pub fn find_raw_link(html: &str) -> Option<String> {
    for pattern in PAGE_LINK_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(html) {
            let matched = match caps.get(1) {
                Some(group) => group.as_str(),
                None => caps.get(0).map(|m| m.as_str()).unwrap_or_default(),
            };
            let link = unescape_link(matched);
            if !link.is_empty() && link.contains("http") {
                return Some(link);
            }
        }
    }
    None
}

/// 从 HTML 提取标题（og:title → title → h1）
pub fn extract_title_from_html(html: &str) -> Option<String> {
    for pattern in TITLE_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(html) {
            let title = caps[1].trim().to_string();
            if !title.is_empty() {
                return Some(title);
            }
        }
    }
    None
}

/// 从异构载荷构造 VideoInfo，处理 file_list/list 两种嵌套
pub fn video_info_from_payload(data: &Value, share_id: &str) -> VideoInfo {
    let file_data: Value = if let Some(list) = data.get("file_list").and_then(|v| v.as_array()) {
        list.first().cloned().unwrap_or(Value::Object(Default::default()))
    } else if let Some(list) = data.get("list").and_then(|v| v.as_array()) {
        list.first().cloned().unwrap_or(Value::Object(Default::default()))
    } else {
        data.clone()
    };

    let dlink = ["dlink", "download_link", "downloadUrl"]
        .iter()
        .map(|key| str_field(&file_data, key))
        .find(|link| !link.is_empty())
        .map(|link| unescape_link(&link))
        .unwrap_or_default();

    let stream = unescape_link(&str_field(&file_data, "stream_url"));
    let m3u8 = unescape_link(&str_field(&file_data, "m3u8_url"));
    let size = u64_field(&file_data, "size");

    let title = [str_field(&file_data, "server_filename"), str_field(&file_data, "title")]
        .into_iter()
        .find(|t| !t.is_empty())
        .unwrap_or_else(|| "Video".to_string());

    let thumbnail = file_data
        .get("thumbs")
        .map(|t| str_field(t, "url3"))
        .unwrap_or_default();

    VideoInfo {
        title,
        size,
        size_formatted: format_file_size(size),
        thumbnail,
        direct_link: dlink.clone(),
        download_link: dlink,
        stream_link: stream,
        m3u8_link: m3u8,
        share_id: share_id.to_string(),
        raw_data: file_data,
        ..Default::default()
    }
}
