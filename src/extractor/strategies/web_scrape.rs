use async_trait::async_trait;

use super::Strategy;
use crate::common::api::client::TeraClient;
use crate::common::headers::HeaderGenerator;
use crate::extractor::errors::ExtractError;
use crate::extractor::models::{ShareReference, VideoInfo};
use crate::extractor::page_parse;

/// 策略三：抓取分享页 HTML，扫描内嵌数据
pub struct WebScrape;

#[async_trait]
impl Strategy for WebScrape {
    fn name(&self) -> &'static str {
        "web_scraping"
    }

    async fn extract(
        &self,
        client: &TeraClient,
        share: &ShareReference,
    ) -> Result<VideoInfo, ExtractError> {
        let url = share.page_url();
        let html = client
            .get_text(&url, HeaderGenerator::page_headers(Some(&url)))
            .await?;

        // 先在 script 块里找已知形态的内嵌数据
        for script in page_parse::script_blocks(&html) {
            if let Some(data) = page_parse::extract_script_data(script) {
                let info = page_parse::video_info_from_payload(&data, &share.share_id);
                if info.is_valid() {
                    return Ok(info);
                }
            }
        }

        // 再整页正则搜索裸链接
        if let Some(link) = page_parse::find_raw_link(&html) {
            let info = VideoInfo {
                title: page_parse::extract_title_from_html(&html)
                    .unwrap_or_else(|| "Video".to_string()),
                direct_link: link,
                share_id: share.share_id.clone(),
                ..Default::default()
            };
            if info.is_valid() {
                return Ok(info);
            }
        }

        Err(ExtractError::Parse("无法从页面中提取视频信息".to_string()))
    }
}
