use serde_json::json;

use tera_extractor::common::utils::{format_file_size, sanitize_filename};
use tera_extractor::extractor::models::VideoInfo;
use tera_extractor::extractor::page_parse;
use tera_extractor::service::presenter;

#[test]
fn test_video_info_validity() {
    // 新构造的空结果必须无效
    assert!(!VideoInfo::default().is_valid());

    let with_download = VideoInfo {
        download_link: "http://x/file".to_string(),
        ..Default::default()
    };
    assert!(with_download.is_valid());

    let with_m3u8 = VideoInfo {
        m3u8_link: "http://x/play.m3u8".to_string(),
        ..Default::default()
    };
    assert!(with_m3u8.is_valid());
}

#[test]
fn test_best_link_precedence() {
    // stream > direct > m3u8 > download
    let video_info = VideoInfo {
        stream_link: "http://s".to_string(),
        direct_link: "http://d".to_string(),
        m3u8_link: "http://m".to_string(),
        download_link: "http://dl".to_string(),
        ..Default::default()
    };
    assert_eq!(video_info.best_link(), Some("http://s"));

    let without_stream = VideoInfo {
        direct_link: "http://d".to_string(),
        m3u8_link: "http://m".to_string(),
        download_link: "http://dl".to_string(),
        ..Default::default()
    };
    assert_eq!(without_stream.best_link(), Some("http://d"));

    let only_m3u8_and_download = VideoInfo {
        m3u8_link: "http://m".to_string(),
        download_link: "http://dl".to_string(),
        ..Default::default()
    };
    assert_eq!(only_m3u8_and_download.best_link(), Some("http://m"));

    assert_eq!(VideoInfo::default().best_link(), None);
}

#[test]
fn test_format_file_size() {
    assert_eq!(format_file_size(0), "0.00 B");
    assert_eq!(format_file_size(512), "512.00 B");
    assert_eq!(format_file_size(1024), "1.00 KB");
    assert_eq!(format_file_size(1536), "1.50 KB");
    assert_eq!(format_file_size(1048576), "1.00 MB");
    assert_eq!(format_file_size(1073741824), "1.00 GB");
}

#[test]
fn test_sanitize_filename() {
    assert_eq!(sanitize_filename("movie: the <best>?.mp4"), "movie the best.mp4");

    // 超长文件名保留扩展名截断
    let long_name = format!("{}.mp4", "a".repeat(300));
    let cleaned = sanitize_filename(&long_name);
    assert!(cleaned.ends_with(".mp4"));
    assert!(cleaned.chars().count() <= 200);
}

#[test]
fn test_find_video_file_prefers_video_extension() {
    let files = vec![
        json!({"isdir": 1, "server_filename": "folder"}),
        json!({"isdir": 0, "server_filename": "readme.txt"}),
        json!({"isdir": 0, "server_filename": "Movie.MP4"}),
    ];

    let picked = page_parse::find_video_file(&files).expect("应当选中文件");
    assert_eq!(picked["server_filename"], "Movie.MP4");
}

#[test]
fn test_find_video_file_fallbacks() {
    // 没有视频扩展名时取第一个非目录项
    let files = vec![
        json!({"isdir": 1, "server_filename": "folder"}),
        json!({"isdir": 0, "server_filename": "notes.txt"}),
    ];
    let picked = page_parse::find_video_file(&files).expect("应当选中文件");
    assert_eq!(picked["server_filename"], "notes.txt");

    // 全是目录时兜底第一项
    let dirs = vec![json!({"isdir": 1, "server_filename": "a"})];
    let picked = page_parse::find_video_file(&dirs).expect("应当选中文件");
    assert_eq!(picked["server_filename"], "a");

    assert!(page_parse::find_video_file(&[]).is_none());
}

#[test]
fn test_reconcile_link_field_order() {
    let data = json!({"download_link": "http://a", "dlink": "http://b"});
    assert_eq!(page_parse::reconcile_link(&data), Some("http://a".to_string()));

    // 嵌套的 data.dlink，带转义分隔符
    let nested = json!({"data": {"dlink": "http:\\/\\/cdn\\/v.mp4"}});
    assert_eq!(
        page_parse::reconcile_link(&nested),
        Some("http://cdn/v.mp4".to_string())
    );

    assert_eq!(page_parse::reconcile_link(&json!({"other": 1})), None);
}

#[test]
fn test_scan_json_objects_shallow() {
    let html = r#"<html>prefix {"dlink": "http://x", "size": 5} middle {"a": {"b": 1}} {broken"#;
    let objects = page_parse::scan_json_objects(html);

    // 两个合法对象被找到，残缺的被静默丢弃
    assert_eq!(objects.len(), 2);
    assert_eq!(objects[0]["dlink"], "http://x");
    assert_eq!(objects[1]["a"]["b"], 1);
}

#[test]
fn test_extract_script_data() {
    let script = r#"window.__INITIAL_STATE__ = {"file_list": [{"server_filename": "v.mp4"}]};"#;
    let data = page_parse::extract_script_data(script).expect("应当解析出数据");
    assert_eq!(data["file_list"][0]["server_filename"], "v.mp4");

    assert!(page_parse::extract_script_data("var x = 1;").is_none());
}

#[test]
fn test_extract_named_json() {
    let html = r#"<script>var yunData = {"uk": 123};</script>"#;
    let data = page_parse::extract_named_json(html, "yunData").expect("应当解析出数据");
    assert_eq!(data["uk"], 123);
}

#[test]
fn test_parse_html_for_video_regex_fallback() {
    // 页面里没有完整 JSON 对象，只有零散字段
    let html = r#"<html>"dlink":"http:\/\/cdn\/v.mp4" and "server_filename":"v.mp4" and "size": 2048 end"#;
    let data = page_parse::parse_html_for_video(html).expect("应当解析出数据");

    let video_info = page_parse::video_info_from_payload(&data, "1abc123def");
    assert!(video_info.is_valid());
    assert_eq!(video_info.direct_link, "http://cdn/v.mp4");
    assert_eq!(video_info.share_id, "1abc123def");
}

#[test]
fn test_extract_title_from_html() {
    let html = r#"<head><meta property="og:title" content="我的视频"><title>页面标题</title></head>"#;
    assert_eq!(
        page_parse::extract_title_from_html(html),
        Some("我的视频".to_string())
    );

    let only_title = "<title>页面标题</title>";
    assert_eq!(
        page_parse::extract_title_from_html(only_title),
        Some("页面标题".to_string())
    );

    assert_eq!(page_parse::extract_title_from_html("<div>x</div>"), None);
}

#[test]
fn test_video_info_from_payload_nesting() {
    let payload = json!({
        "file_list": [{
            "server_filename": "movie.mp4",
            "size": 1048576,
            "dlink": "http:\\/\\/cdn\\/movie.mp4",
            "thumbs": {"url3": "http://thumb/3.jpg"}
        }]
    });

    let video_info = page_parse::video_info_from_payload(&payload, "1abc123def");
    assert_eq!(video_info.title, "movie.mp4");
    assert_eq!(video_info.size, 1048576);
    assert_eq!(video_info.size_formatted, "1.00 MB");
    assert_eq!(video_info.direct_link, "http://cdn/movie.mp4");
    assert_eq!(video_info.thumbnail, "http://thumb/3.jpg");
}

#[test]
fn test_presenter_caps_quality_options() {
    let mut video_info = VideoInfo {
        title: "movie.mp4".to_string(),
        size_formatted: "1.00 MB".to_string(),
        stream_link: "http://stream/v".to_string(),
        ..Default::default()
    };
    video_info
        .quality_options
        .insert("1080p".to_string(), "http://q/1080".to_string());
    video_info
        .quality_options
        .insert("720p".to_string(), "http://q/720".to_string());
    video_info
        .quality_options
        .insert("480p".to_string(), "http://q/480".to_string());

    let message = presenter::render(&video_info);

    // 最佳链接展示流链接
    assert!(message.contains("http://stream/v"));
    // 清晰度按钮最多两个
    let buttons = message.lines().filter(|line| line.contains("•")).count();
    assert_eq!(buttons, 2);
}
