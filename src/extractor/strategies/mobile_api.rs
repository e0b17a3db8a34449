use async_trait::async_trait;
use reqwest::header::{HeaderValue, USER_AGENT};

use super::{fetch_download_link, Strategy};
use crate::common::api::client::TeraClient;
use crate::common::headers::{HeaderGenerator, MOBILE_USER_AGENT};
use crate::extractor::errors::ExtractError;
use crate::extractor::models::{ShareReference, VideoInfo};
use crate::extractor::page_parse::{find_video_file, id_field, str_field};

/// 策略五：以移动端客户端身份调用接口，反爬待遇可能不同
pub struct MobileApi;

#[async_trait]
impl Strategy for MobileApi {
    fn name(&self) -> &'static str {
        "mobile_api"
    }

    async fn extract(
        &self,
        client: &TeraClient,
        share: &ShareReference,
    ) -> Result<VideoInfo, ExtractError> {
        let api_url = format!("https://www.{}/api/shorturlinfo", share.api_domain);
        let referer = share.page_url();
        let query = [
            ("shorturl", share.share_id.clone()),
            ("root", "1".to_string()),
            ("app_id", "250528".to_string()),
            ("web", "1".to_string()),
            // 移动端客户端标记
            ("clienttype", "1".to_string()),
        ];

        let mut headers = HeaderGenerator::api_headers(Some(&referer));
        headers.insert(USER_AGENT, HeaderValue::from_static(MOBILE_USER_AGENT));

        let data = client.get_json(&api_url, &query, headers).await?;

        let list = data
            .get("list")
            .and_then(|v| v.as_array())
            .filter(|list| !list.is_empty())
            .ok_or_else(|| ExtractError::Parse("移动端接口响应中没有文件".to_string()))?;

        let video_file = find_video_file(list)
            .ok_or_else(|| ExtractError::Parse("移动端接口响应中没有文件".to_string()))?;

        let shareid = id_field(&data, "shareid");
        let uk = id_field(&data, "uk");
        let sign = str_field(&data, "sign");
        let timestamp = data.get("timestamp").and_then(|v| v.as_i64()).unwrap_or(0);

        fetch_download_link(client, video_file, &shareid, &uk, &sign, timestamp, share).await
    }
}
