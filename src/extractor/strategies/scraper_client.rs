use std::time::Duration;

use async_trait::async_trait;
use reqwest::redirect::Policy;
use reqwest::ClientBuilder;

use super::Strategy;
use crate::common::api::client::TeraClient;
use crate::common::api::error::ApiError;
use crate::common::headers::HeaderGenerator;
use crate::extractor::errors::ExtractError;
use crate::extractor::models::{ShareReference, VideoInfo};
use crate::extractor::page_parse;

/// 策略四：模拟完整浏览器指纹的客户端，用来绕过基础反爬检测。
/// 每次调用独立构建，先访问站点首页收集 Cookie 再取分享页。
pub struct ScraperClient;

#[async_trait]
impl Strategy for ScraperClient {
    fn name(&self) -> &'static str {
        "scraper_client"
    }

    async fn extract(
        &self,
        _client: &TeraClient,
        share: &ShareReference,
    ) -> Result<VideoInfo, ExtractError> {
        let scraper = ClientBuilder::new()
            .timeout(Duration::from_secs(60))
            .cookie_store(true)
            .redirect(Policy::limited(10))
            .default_headers(HeaderGenerator::page_headers(None))
            .build()
            .map_err(|e| ApiError::ClientBuild(e.to_string()))?;

        // 预热请求，拿到站点下发的 Cookie
        let base = format!("https://www.{}/", share.api_domain);
        let _ = scraper.get(&base).send().await;

        let url = share.page_url();
        let html = scraper
            .get(&url)
            .headers(HeaderGenerator::page_headers(Some(&base)))
            .send()
            .await
            .map_err(ApiError::from)?
            .text()
            .await
            .map_err(ApiError::from)?;

        if let Some(data) = page_parse::parse_html_for_video(&html) {
            let info = page_parse::video_info_from_payload(&data, &share.share_id);
            if info.is_valid() {
                return Ok(info);
            }
        }

        Err(ExtractError::Parse("反爬客户端未能提取到视频信息".to_string()))
    }
}
