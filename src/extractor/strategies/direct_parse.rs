use async_trait::async_trait;
use tracing::debug;

use super::Strategy;
use crate::common::api::client::TeraClient;
use crate::common::headers::HeaderGenerator;
use crate::common::utils::format_file_size;
use crate::extractor::errors::ExtractError;
use crate::extractor::models::{ShareReference, VideoInfo};
use crate::extractor::page_parse::{str_field, u64_field, unescape_link};
use crate::mirrors;

/// 策略六：逐个主域名尝试 shorturlinfo，响应里自带 dlink 就直接用，免去第二步
pub struct DirectParse;

#[async_trait]
impl Strategy for DirectParse {
    fn name(&self) -> &'static str {
        "direct_parse"
    }

    async fn extract(
        &self,
        client: &TeraClient,
        share: &ShareReference,
    ) -> Result<VideoInfo, ExtractError> {
        for candidate in mirrors::candidate_api_urls(&share.share_id) {
            let headers = HeaderGenerator::api_headers(Some(&candidate.page));

            let data = match client.get_json_raw(&candidate.shorturlinfo, &[], headers).await {
                Ok(data) => data,
                Err(e) => {
                    debug!("域名 {} 请求失败: {}", candidate.domain, e);
                    continue;
                }
            };

            if data.get("errno").and_then(|v| v.as_i64()) != Some(0) {
                continue;
            }

            let Some(file_info) = data
                .get("list")
                .and_then(|v| v.as_array())
                .and_then(|list| list.first())
            else {
                continue;
            };

            let dlink = unescape_link(&str_field(file_info, "dlink"));
            if dlink.is_empty() {
                continue;
            }

            let size = u64_field(file_info, "size");
            let title = {
                let name = str_field(file_info, "server_filename");
                if name.is_empty() { "Video".to_string() } else { name }
            };

            return Ok(VideoInfo {
                title,
                size,
                size_formatted: format_file_size(size),
                direct_link: dlink,
                thumbnail: file_info
                    .get("thumbs")
                    .map(|t| str_field(t, "url3"))
                    .unwrap_or_default(),
                share_id: share.share_id.clone(),
                raw_data: file_info.clone(),
                ..Default::default()
            });
        }

        Err(ExtractError::Parse("所有候选域名的直接解析均失败".to_string()))
    }
}
