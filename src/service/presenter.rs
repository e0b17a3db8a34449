use crate::common::utils::sanitize_filename;
use crate::extractor::models::VideoInfo;

// 展示的清晰度选项上限
const MAX_QUALITY_OPTIONS: usize = 2;
// 标题展示长度上限
const MAX_TITLE_CHARS: usize = 80;

/// 把提取结果渲染为面向用户的短消息。
/// 只输出标题、大小、分辨率、最佳链接和有限的清晰度选项，
/// 原始载荷一律不外泄。
pub fn render(video_info: &VideoInfo) -> String {
    let mut lines = Vec::new();

    let title = sanitize_filename(&video_info.title);
    let title: String = title.chars().take(MAX_TITLE_CHARS).collect();
    if !title.is_empty() {
        lines.push(format!("🎬 {}", title));
    }

    if !video_info.size_formatted.is_empty() {
        lines.push(format!("📦 大小: {}", video_info.size_formatted));
    }

    if !video_info.resolution.is_empty() {
        lines.push(format!("🖥 分辨率: {}", video_info.resolution));
    }

    if let Some(link) = video_info.best_link() {
        lines.push(format!("▶ 播放链接: {}", link));
    }

    for (label, link) in video_info.quality_options.iter().take(MAX_QUALITY_OPTIONS) {
        lines.push(format!("  • {}: {}", label, link));
    }

    lines.join("\n")
}

/// 失败时面向用户的短消息，不暴露底层细节
pub fn render_failure(message: &str) -> String {
    let head: String = message.chars().take(200).collect();
    format!("❌ 提取失败: {}", head)
}
