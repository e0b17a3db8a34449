use std::time::Duration;

use md5::{Digest, Md5};
use moka::future::Cache;

use crate::extractor::models::VideoInfo;
use crate::mirrors;

/// 解析结果缓存：按分享ID存放，定时过期。
/// 只是尽力而为的加速器，不提供同 key 并发请求的合并。
#[derive(Clone)]
pub struct LinkCache {
    inner: Cache<String, VideoInfo>,
}

impl LinkCache {
    pub fn new(capacity: u64, ttl_secs: u64) -> Self {
        Self {
            inner: Cache::builder()
                .max_capacity(capacity)
                .time_to_live(Duration::from_secs(ttl_secs))
                .build(),
        }
    }

    /// 测试用：自定义 TTL 精度
    pub fn with_ttl(capacity: u64, ttl: Duration) -> Self {
        Self {
            inner: Cache::builder()
                .max_capacity(capacity)
                .time_to_live(ttl)
                .build(),
        }
    }

    pub async fn get(&self, key: &str) -> Option<VideoInfo> {
        self.inner.get(key).await
    }

    pub async fn put(&self, key: String, value: VideoInfo) {
        self.inner.insert(key, value).await;
    }

    /// 缓存键：优先用分享ID，提取不到时退化为原始链接的 md5
    pub fn cache_key(url: &str) -> String {
        match mirrors::extract_share_id(url) {
            Some(share_id) => share_id,
            None => {
                let mut hasher = Md5::new();
                hasher.update(url.as_bytes());
                format!("{:x}", hasher.finalize())
            }
        }
    }
}
