use async_trait::async_trait;
use reqwest::header::{HeaderValue, COOKIE};
use serde_json::Value;

use super::errors::ExtractError;
use super::models::{ShareReference, VideoInfo};
use super::page_parse::{id_field, str_field, u64_field, unescape_link};
use crate::common::api::client::TeraClient;
use crate::common::config::Config;
use crate::common::headers::HeaderGenerator;
use crate::common::retry::RetryPolicy;
use crate::common::utils::format_file_size;

pub mod api_v1;
pub mod api_v2;
#[cfg(feature = "browser")]
pub mod browser;
pub mod direct_parse;
pub mod mobile_api;
pub mod relay_api;
pub mod scraper_client;
pub mod web_scrape;

pub use api_v1::ApiV1;
pub use api_v2::ApiV2;
#[cfg(feature = "browser")]
pub use browser::BrowserEmulation;
pub use direct_parse::DirectParse;
pub use mobile_api::MobileApi;
pub use relay_api::RelayApi;
pub use scraper_client::ScraperClient;
pub use web_scrape::WebScrape;

/// 单个提取策略：输入分享引用，产出统一的 VideoInfo 契约
#[async_trait]
pub trait Strategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// 本策略的重试参数
    fn retry_policy(&self, config: &Config) -> RetryPolicy {
        RetryPolicy::new(config.max_retries, config.retry_delay)
    }

    async fn extract(
        &self,
        client: &TeraClient,
        share: &ShareReference,
    ) -> Result<VideoInfo, ExtractError>;
}

/// 固定优先级的策略集合，枚举分发
pub enum AnyStrategy {
    ApiV1(ApiV1),
    ApiV2(ApiV2),
    WebScrape(WebScrape),
    ScraperClient(ScraperClient),
    MobileApi(MobileApi),
    DirectParse(DirectParse),
    RelayApi(RelayApi),
    #[cfg(feature = "browser")]
    Browser(BrowserEmulation),
}

#[async_trait]
impl Strategy for AnyStrategy {
    fn name(&self) -> &'static str {
        match self {
            AnyStrategy::ApiV1(s) => s.name(),
            AnyStrategy::ApiV2(s) => s.name(),
            AnyStrategy::WebScrape(s) => s.name(),
            AnyStrategy::ScraperClient(s) => s.name(),
            AnyStrategy::MobileApi(s) => s.name(),
            AnyStrategy::DirectParse(s) => s.name(),
            AnyStrategy::RelayApi(s) => s.name(),
            #[cfg(feature = "browser")]
            AnyStrategy::Browser(s) => s.name(),
        }
    }

    fn retry_policy(&self, config: &Config) -> RetryPolicy {
        match self {
            AnyStrategy::ApiV1(s) => s.retry_policy(config),
            AnyStrategy::ApiV2(s) => s.retry_policy(config),
            AnyStrategy::WebScrape(s) => s.retry_policy(config),
            AnyStrategy::ScraperClient(s) => s.retry_policy(config),
            AnyStrategy::MobileApi(s) => s.retry_policy(config),
            AnyStrategy::DirectParse(s) => s.retry_policy(config),
            AnyStrategy::RelayApi(s) => s.retry_policy(config),
            #[cfg(feature = "browser")]
            AnyStrategy::Browser(s) => s.retry_policy(config),
        }
    }

    async fn extract(
        &self,
        client: &TeraClient,
        share: &ShareReference,
    ) -> Result<VideoInfo, ExtractError> {
        match self {
            AnyStrategy::ApiV1(s) => s.extract(client, share).await,
            AnyStrategy::ApiV2(s) => s.extract(client, share).await,
            AnyStrategy::WebScrape(s) => s.extract(client, share).await,
            AnyStrategy::ScraperClient(s) => s.extract(client, share).await,
            AnyStrategy::MobileApi(s) => s.extract(client, share).await,
            AnyStrategy::DirectParse(s) => s.extract(client, share).await,
            AnyStrategy::RelayApi(s) => s.extract(client, share).await,
            #[cfg(feature = "browser")]
            AnyStrategy::Browser(s) => s.extract(client, share).await,
        }
    }
}

/// 第二步通用逻辑：用第一步返回的签名字段换取真实下载链接
pub(crate) async fn fetch_download_link(
    client: &TeraClient,
    file_info: &Value,
    shareid: &str,
    uk: &str,
    sign: &str,
    timestamp: i64,
    share: &ShareReference,
) -> Result<VideoInfo, ExtractError> {
    let fs_id = file_info.get("fs_id").cloned().unwrap_or(Value::Null);

    let api_url = format!("https://www.{}/share/download", share.api_domain);
    let referer = share.page_url();
    let query = [
        ("app_id", "250528".to_string()),
        ("channel", "dubox".to_string()),
        ("clienttype", "0".to_string()),
        ("web", "1".to_string()),
        ("shareid", shareid.to_string()),
        ("uk", uk.to_string()),
        ("sign", sign.to_string()),
        ("timestamp", timestamp.to_string()),
        ("fid_list", serde_json::json!([fs_id]).to_string()),
        ("primaryid", shareid.to_string()),
    ];

    let mut headers = HeaderGenerator::api_headers(Some(&referer));
    if let Ok(value) = HeaderValue::from_str(&format!("ndus={}", client.device_id())) {
        headers.insert(COOKIE, value);
    }

    // 这个端点在拿不到链接时会返回非零 errno，此时退回列表里自带的 dlink
    let data = client.get_json_raw(&api_url, &query, headers).await?;

    let mut dlink = String::new();
    if data.get("errno").and_then(|v| v.as_i64()) == Some(0) {
        dlink = str_field(&data, "dlink");
        if dlink.is_empty() {
            dlink = data
                .get("list")
                .and_then(|v| v.as_array())
                .and_then(|list| list.first())
                .map(|first| str_field(first, "dlink"))
                .unwrap_or_default();
        }
    }
    if dlink.is_empty() {
        dlink = str_field(file_info, "dlink");
    }
    let dlink = unescape_link(&dlink);

    let size = u64_field(file_info, "size");
    let title = {
        let name = str_field(file_info, "server_filename");
        if name.is_empty() { "Video".to_string() } else { name }
    };

    Ok(VideoInfo {
        title,
        size,
        size_formatted: format_file_size(size),
        thumbnail: file_info
            .get("thumbs")
            .map(|t| str_field(t, "url3"))
            .unwrap_or_default(),
        direct_link: dlink.clone(),
        download_link: dlink,
        file_id: id_field(file_info, "fs_id"),
        share_id: share.share_id.clone(),
        uk: uk.to_string(),
        sign: sign.to_string(),
        timestamp,
        raw_data: file_info.clone(),
        ..Default::default()
    })
}
