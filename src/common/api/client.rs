use std::time::Duration;

use reqwest::header::HeaderMap;
use reqwest::{Client, ClientBuilder, Proxy};
use serde_json::Value;
use tracing::debug;

use super::error::ApiError;
use crate::common::config::Config;
use crate::common::headers::{self, HeaderGenerator};

/// 进程级共享的 HTTP 客户端，连接池在所有请求和策略之间复用
#[derive(Debug, Clone)]
pub struct TeraClient {
    pub inner: Client,
    device_id: String,
}

impl TeraClient {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let mut builder = ClientBuilder::new()
            .timeout(Duration::from_secs(config.request_timeout))
            .pool_max_idle_per_host(30)
            .cookie_store(true)
            .default_headers(HeaderGenerator::page_headers(None));

        if let Some(proxy) = &config.proxy_url {
            let proxy = Proxy::all(proxy).map_err(|e| ApiError::ClientBuild(e.to_string()))?;
            builder = builder.proxy(proxy);
        }

        let inner = builder
            .build()
            .map_err(|e| ApiError::ClientBuild(e.to_string()))?;

        Ok(Self {
            inner,
            device_id: headers::generate_device_id(),
        })
    }

    /// 本进程的随机设备ID，作为 ndus Cookie 模拟回访客户端
    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    /// GET 并按 Terabox 标准信封（errno/errmsg）校验
    pub async fn get_json(
        &self,
        url: &str,
        query: &[(&str, String)],
        headers: HeaderMap,
    ) -> Result<Value, ApiError> {
        let value = self.get_json_raw(url, query, headers).await?;

        if let Some(errno) = value.get("errno").and_then(|v| v.as_i64()) {
            if errno != 0 {
                let errmsg = value
                    .get("errmsg")
                    .and_then(|v| v.as_str())
                    .unwrap_or("Unknown error")
                    .to_string();
                return Err(ApiError::Tera(errno, errmsg));
            }
        }

        Ok(value)
    }

    /// GET 返回 JSON，不校验信封（部分端点没有 errno 字段）
    pub async fn get_json_raw(
        &self,
        url: &str,
        query: &[(&str, String)],
        headers: HeaderMap,
    ) -> Result<Value, ApiError> {
        let mut req = self.inner.get(url).headers(headers);
        if !query.is_empty() {
            req = req.query(query);
        }

        let resp = req.send().await?;
        let status = resp.status();
        debug!("GET {} -> {}", url, status);

        if status.is_server_error() {
            return Err(ApiError::RetryLater);
        }
        if !status.is_success() {
            return Err(ApiError::InvalidResponse(format!("HTTP 状态 {}", status)));
        }

        let text = resp.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            let head: String = text.chars().take(200).collect();
            ApiError::InvalidResponse(format!("解析响应失败: {}. 原始响应: {}", e, head))
        })
    }

    /// GET 返回页面文本
    pub async fn get_text(&self, url: &str, headers: HeaderMap) -> Result<String, ApiError> {
        let resp = self.inner.get(url).headers(headers).send().await?;
        let status = resp.status();
        debug!("GET {} -> {}", url, status);

        if status.is_server_error() {
            return Err(ApiError::RetryLater);
        }

        Ok(resp.text().await?)
    }
}
