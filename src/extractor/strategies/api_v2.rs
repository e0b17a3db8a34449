use async_trait::async_trait;
use reqwest::header::{HeaderValue, COOKIE};

use super::{fetch_download_link, Strategy};
use crate::common::api::client::TeraClient;
use crate::common::headers::{generate_device_id, HeaderGenerator};
use crate::extractor::errors::ExtractError;
use crate::extractor::models::{ShareReference, VideoInfo};
use crate::extractor::page_parse::{find_video_file, id_field, str_field};

/// 策略二：share/list 备用端点，带应用常量参数和合成会话 Cookie
pub struct ApiV2;

#[async_trait]
impl Strategy for ApiV2 {
    fn name(&self) -> &'static str {
        "api_v2"
    }

    async fn extract(
        &self,
        client: &TeraClient,
        share: &ShareReference,
    ) -> Result<VideoInfo, ExtractError> {
        let api_url = format!("https://www.{}/share/list", share.api_domain);
        let referer = share.page_url();
        let query = [
            ("app_id", "250528".to_string()),
            ("shorturl", share.share_id.clone()),
            ("root", "1".to_string()),
            ("web", "1".to_string()),
            ("channel", "dubox".to_string()),
            ("clienttype", "0".to_string()),
        ];

        let mut headers = HeaderGenerator::api_headers(Some(&referer));
        if let Ok(value) = HeaderValue::from_str(&format!("ndus={}", generate_device_id())) {
            headers.insert(COOKIE, value);
        }

        let data = client.get_json(&api_url, &query, headers).await?;

        let list = data
            .get("list")
            .and_then(|v| v.as_array())
            .filter(|list| !list.is_empty())
            .ok_or_else(|| ExtractError::Parse("响应中没有文件列表".to_string()))?;

        let video_file = find_video_file(list)
            .ok_or_else(|| ExtractError::Parse("响应中没有文件列表".to_string()))?;

        // 这个端点的 shareid 字段名不固定
        let mut shareid = id_field(&data, "share_id");
        if shareid.is_empty() {
            shareid = id_field(&data, "shareid");
        }
        let uk = id_field(&data, "uk");
        let sign = str_field(&data, "sign");
        let timestamp = data.get("timestamp").and_then(|v| v.as_i64()).unwrap_or(0);

        fetch_download_link(client, video_file, &shareid, &uk, &sign, timestamp, share).await
    }
}
