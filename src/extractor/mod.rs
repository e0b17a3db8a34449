use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio::time::timeout;
use tracing::{info, warn};

pub mod errors;
pub mod models;
pub mod page_parse;
pub mod strategies;

use crate::common::api::client::TeraClient;
use crate::common::cache::LinkCache;
use crate::common::config::Config;
use crate::common::retry::retry_async;
use crate::mirrors;
use errors::ExtractError;
use models::{ShareReference, VideoInfo};
#[cfg(feature = "browser")]
use strategies::BrowserEmulation;
use strategies::{
    AnyStrategy, ApiV1, ApiV2, DirectParse, MobileApi, RelayApi, ScraperClient, Strategy,
    WebScrape,
};

/// 按固定优先级构建策略列表：便宜可靠的在前，昂贵脆弱的在后。
/// 顺序是调参出来的策略常量，不在运行时自适应调整。
pub fn default_strategies(config: &Config) -> Vec<AnyStrategy> {
    #[cfg(not(feature = "browser"))]
    let _ = config;

    let mut list = vec![
        AnyStrategy::ApiV1(ApiV1),
        AnyStrategy::ApiV2(ApiV2),
        AnyStrategy::WebScrape(WebScrape),
        AnyStrategy::ScraperClient(ScraperClient),
        AnyStrategy::MobileApi(MobileApi),
        AnyStrategy::DirectParse(DirectParse),
        AnyStrategy::RelayApi(RelayApi),
    ];

    #[cfg(feature = "browser")]
    list.push(AnyStrategy::Browser(BrowserEmulation::from_config(config)));

    list
}

/// 策略循环：依次执行，首个有效结果即停；单个策略的失败绝不外溢，
/// 全部耗尽时只带出最后一个底层错误
pub async fn run_strategies<S: Strategy>(
    client: &TeraClient,
    share: &ShareReference,
    strategies: &[S],
    config: &Config,
) -> Result<VideoInfo, ExtractError> {
    let mut last_error = String::new();

    for strategy in strategies {
        info!("尝试策略: {}", strategy.name());
        let policy = strategy.retry_policy(config);

        match retry_async(&policy, strategy.name(), || strategy.extract(client, share)).await {
            Ok(video_info) if video_info.is_valid() => {
                info!("策略 {} 提取成功", strategy.name());
                return Ok(video_info);
            }
            Ok(_) => {
                warn!("策略 {} 返回了空链接结果", strategy.name());
                last_error = format!("策略 {} 返回了空链接结果", strategy.name());
            }
            Err(e) => {
                warn!("策略 {} 失败: {}", strategy.name(), e);
                last_error = e.to_string();
            }
        }
    }

    if last_error.is_empty() {
        last_error = "没有可用的提取策略".to_string();
    }
    Err(ExtractError::AllStrategiesFailed(last_error))
}

/// 提取入口：缓存 → 校验 → 策略循环，整体受并发闸门和总超时约束
pub struct TeraExtractor {
    client: TeraClient,
    cache: LinkCache,
    semaphore: Arc<Semaphore>,
    strategies: Vec<AnyStrategy>,
    config: Config,
}

impl TeraExtractor {
    pub fn new(config: Config) -> Result<Self, ExtractError> {
        let client = TeraClient::new(&config)?;
        let cache = LinkCache::new(config.cache_capacity, config.cache_ttl_secs);
        let semaphore = Arc::new(Semaphore::new(config.max_concurrent_extractions));
        let strategies = default_strategies(&config);

        Ok(Self {
            client,
            cache,
            semaphore,
            strategies,
            config,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub async fn extract(&self, url: &str) -> Result<VideoInfo, ExtractError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| ExtractError::Parse("并发闸门已关闭".to_string()))?;

        let deadline = Duration::from_secs(self.config.extraction_timeout);
        match timeout(deadline, self.extract_inner(url)).await {
            Ok(result) => result,
            Err(_) => {
                warn!("提取超时: {}", url);
                Err(ExtractError::Timeout)
            }
        }
    }

    async fn extract_inner(&self, url: &str) -> Result<VideoInfo, ExtractError> {
        let cache_key = LinkCache::cache_key(url);
        if let Some(hit) = self.cache.get(&cache_key).await {
            info!("缓存命中: {}", cache_key);
            return Ok(hit);
        }

        if !mirrors::is_tera_url(url) {
            return Err(ExtractError::InvalidUrl(url.to_string()));
        }

        let share_id = mirrors::extract_share_id(url)
            .ok_or_else(|| ExtractError::NoShareId(url.to_string()))?;
        let share = ShareReference {
            raw_url: url.to_string(),
            share_id,
            api_domain: mirrors::api_domain(url),
        };
        info!("开始提取: {} (分享ID: {})", url, share.share_id);

        let video_info =
            run_strategies(&self.client, &share, &self.strategies, &self.config).await?;
        self.cache.put(cache_key, video_info.clone()).await;
        Ok(video_info)
    }
}
