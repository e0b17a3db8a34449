use async_trait::async_trait;
use tracing::debug;

use super::Strategy;
use crate::common::api::client::TeraClient;
use crate::common::headers::HeaderGenerator;
use crate::common::utils::format_file_size;
use crate::extractor::errors::ExtractError;
use crate::extractor::models::{ShareReference, VideoInfo};
use crate::extractor::page_parse::{reconcile_link, str_field, u64_field};

/// 策略七：调用独立运营的第三方解析服务，由对方在服务端完成提取
pub struct RelayApi;

#[async_trait]
impl Strategy for RelayApi {
    fn name(&self) -> &'static str {
        "relay_api"
    }

    async fn extract(
        &self,
        client: &TeraClient,
        share: &ShareReference,
    ) -> Result<VideoInfo, ExtractError> {
        let page_url = share.page_url();
        let endpoints = [
            format!(
                "https://terabox.hnn.workers.dev/api/get-info?shorturl={}",
                share.share_id
            ),
            format!(
                "https://terabox.udayscriptsx.workers.dev/?url={}",
                urlencoding::encode(&page_url)
            ),
            format!(
                "https://tera.instavideosave.com/?url={}",
                urlencoding::encode(&page_url)
            ),
        ];

        for endpoint in endpoints {
            let data = match client
                .get_json_raw(&endpoint, &[], HeaderGenerator::api_headers(None))
                .await
            {
                Ok(data) if data.is_object() => data,
                Ok(_) => continue,
                Err(e) => {
                    debug!("第三方解析端点 {} 失败: {}", endpoint, e);
                    continue;
                }
            };

            // 不同服务的字段命名各异，统一调和
            let Some(link) = reconcile_link(&data) else {
                continue;
            };

            let size = u64_field(&data, "size");
            let title = [str_field(&data, "file_name"), str_field(&data, "title")]
                .into_iter()
                .find(|t| !t.is_empty())
                .unwrap_or_else(|| "Video".to_string());
            let thumbnail = [str_field(&data, "thumb"), str_field(&data, "thumbnail")]
                .into_iter()
                .find(|t| !t.is_empty())
                .unwrap_or_default();

            return Ok(VideoInfo {
                title,
                size,
                size_formatted: format_file_size(size),
                direct_link: link,
                thumbnail,
                share_id: share.share_id.clone(),
                raw_data: data,
                ..Default::default()
            });
        }

        Err(ExtractError::Parse("所有第三方解析端点均失败".to_string()))
    }
}
