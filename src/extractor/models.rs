use std::collections::BTreeMap;

use serde::Serialize;

/// 一次请求对应的分享引用，构造后不再变化
#[derive(Debug, Clone, PartialEq)]
pub struct ShareReference {
    pub raw_url: String,
    pub share_id: String,
    pub api_domain: &'static str,
}

impl ShareReference {
    /// 归一化后的分享页地址
    pub fn page_url(&self) -> String {
        format!("https://www.{}/s/{}", self.api_domain, self.share_id)
    }
}

/// 所有提取策略的统一输出契约
#[derive(Debug, Clone, Default, Serialize)]
pub struct VideoInfo {
    pub title: String,
    pub thumbnail: String,
    pub duration: u64,
    pub size: u64,
    pub size_formatted: String,
    pub resolution: String,
    pub direct_link: String,
    pub download_link: String,
    pub stream_link: String,
    pub m3u8_link: String,
    pub file_id: String,
    pub share_id: String,
    pub uk: String,
    pub sign: String,
    pub timestamp: i64,
    pub quality_options: BTreeMap<String, String>,
    // 原始载荷仅用于诊断，不进入输出
    #[serde(skip)]
    pub raw_data: serde_json::Value,
}

impl VideoInfo {
    /// 有效性：四个链接字段至少一个非空
    pub fn is_valid(&self) -> bool {
        !self.direct_link.is_empty()
            || !self.stream_link.is_empty()
            || !self.m3u8_link.is_empty()
            || !self.download_link.is_empty()
    }

    /// 按固定优先级选出展示给用户的最佳链接
    pub fn best_link(&self) -> Option<&str> {
        [
            &self.stream_link,
            &self.direct_link,
            &self.m3u8_link,
            &self.download_link,
        ]
        .into_iter()
        .find(|link| !link.is_empty())
        .map(|link| link.as_str())
    }
}
