use async_trait::async_trait;

use super::{fetch_download_link, Strategy};
use crate::common::api::client::TeraClient;
use crate::common::headers::HeaderGenerator;
use crate::extractor::errors::ExtractError;
use crate::extractor::models::{ShareReference, VideoInfo};
use crate::extractor::page_parse::{find_video_file, id_field, str_field};

/// 策略一：标准 shorturlinfo + share/download 两步接口
pub struct ApiV1;

#[async_trait]
impl Strategy for ApiV1 {
    fn name(&self) -> &'static str {
        "api_v1"
    }

    async fn extract(
        &self,
        client: &TeraClient,
        share: &ShareReference,
    ) -> Result<VideoInfo, ExtractError> {
        // 第一步：列出分享内的文件
        let api_url = format!("https://www.{}/api/shorturlinfo", share.api_domain);
        let referer = share.page_url();
        let query = [
            ("shorturl", share.share_id.clone()),
            ("root", "1".to_string()),
        ];

        let data = client
            .get_json(&api_url, &query, HeaderGenerator::api_headers(Some(&referer)))
            .await?;

        let list = data
            .get("list")
            .and_then(|v| v.as_array())
            .filter(|list| !list.is_empty())
            .ok_or_else(|| ExtractError::Parse("分享中没有文件".to_string()))?;

        let video_file = find_video_file(list)
            .ok_or_else(|| ExtractError::Parse("分享中没有文件".to_string()))?;

        // 第二步：换取下载链接
        let shareid = id_field(&data, "shareid");
        let uk = id_field(&data, "uk");
        let sign = str_field(&data, "sign");
        let timestamp = data.get("timestamp").and_then(|v| v.as_i64()).unwrap_or(0);

        fetch_download_link(client, video_file, &shareid, &uk, &sign, timestamp, share).await
    }
}
