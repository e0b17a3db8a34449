use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use headless_chrome::{Browser, LaunchOptions};

use super::Strategy;
use crate::common::api::client::TeraClient;
use crate::common::config::Config;
use crate::common::retry::RetryPolicy;
use crate::extractor::errors::ExtractError;
use crate::extractor::models::{ShareReference, VideoInfo};
use crate::extractor::page_parse;

// 出现在媒体请求地址里的特征片段
const MEDIA_INDICATORS: &[&str] = &[".m3u8", ".mp4", "download", "stream"];

const PLAY_SELECTORS: &[&str] = &[
    r#"button[class*="play"]"#,
    r#"div[class*="play"]"#,
    ".vjs-play-control",
];

/// 策略八：真实浏览器内核加载分享页，观察网络请求并解析渲染后的页面。
/// 最昂贵也最脆弱，放在最后；浏览器实例每次独立启停，不做池化。
pub struct BrowserEmulation {
    pub headless: bool,
    pub enabled: bool,
}

impl BrowserEmulation {
    pub fn from_config(config: &Config) -> Self {
        Self {
            headless: config.headless,
            enabled: config.use_browser_fallback,
        }
    }
}

#[async_trait]
impl Strategy for BrowserEmulation {
    fn name(&self) -> &'static str {
        "browser_emulation"
    }

    fn retry_policy(&self, _config: &Config) -> RetryPolicy {
        RetryPolicy::new(2, 2.0)
    }

    async fn extract(
        &self,
        _client: &TeraClient,
        share: &ShareReference,
    ) -> Result<VideoInfo, ExtractError> {
        if !self.enabled {
            return Err(ExtractError::BrowserDisabled);
        }

        let url = share.page_url();
        let headless = self.headless;

        let (captured, html) = tokio::task::spawn_blocking(move || run_browser(&url, headless))
            .await
            .map_err(|e| ExtractError::Parse(format!("浏览器任务失败: {}", e)))??;

        // 网络请求里捕获到的媒体地址优先
        for captured_url in captured {
            if captured_url.contains("http") {
                return Ok(VideoInfo {
                    title: "Video".to_string(),
                    direct_link: captured_url,
                    share_id: share.share_id.clone(),
                    ..Default::default()
                });
            }
        }

        // 退化为解析渲染后的页面
        if let Some(data) = page_parse::parse_html_for_video(&html) {
            let info = page_parse::video_info_from_payload(&data, &share.share_id);
            if info.is_valid() {
                return Ok(info);
            }
        }

        Err(ExtractError::Parse("浏览器仿真未能提取到视频信息".to_string()))
    }
}

fn browser_err(context: &str, e: impl std::fmt::Display) -> ExtractError {
    ExtractError::Parse(format!("{}: {}", context, e))
}

fn run_browser(url: &str, headless: bool) -> Result<(Vec<String>, String), ExtractError> {
    let options = LaunchOptions::default_builder()
        .headless(headless)
        .sandbox(false)
        .window_size(Some((1920, 1080)))
        .build()
        .map_err(|e| browser_err("启动参数构建失败", e))?;

    let browser = Browser::new(options).map_err(|e| browser_err("启动浏览器失败", e))?;
    let tab = browser.new_tab().map_err(|e| browser_err("打开标签页失败", e))?;

    // 监听网络响应，收集媒体相关的请求地址
    let captured = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&captured);
    tab.register_response_handling(
        "media-capture",
        Box::new(move |params, _fetch_body| {
            let response_url = params.response.url.clone();
            if MEDIA_INDICATORS.iter().any(|ind| response_url.contains(ind)) {
                if let Ok(mut urls) = sink.lock() {
                    urls.push(response_url);
                }
            }
        }),
    )
    .map_err(|e| browser_err("注册响应监听失败", e))?;

    tab.navigate_to(url).map_err(|e| browser_err("页面跳转失败", e))?;
    tab.wait_until_navigated()
        .map_err(|e| browser_err("等待页面加载失败", e))?;
    std::thread::sleep(Duration::from_secs(3));

    // 尽力点一下播放控件，触发流媒体请求
    for selector in PLAY_SELECTORS {
        if let Ok(element) = tab.find_element(selector) {
            if element.click().is_ok() {
                std::thread::sleep(Duration::from_secs(2));
            }
            break;
        }
    }

    let html = tab.get_content().map_err(|e| browser_err("读取页面内容失败", e))?;

    let urls = captured.lock().map(|v| v.clone()).unwrap_or_default();
    Ok((urls, html))
}
