use thiserror::Error;

use crate::common::api::error::ApiError;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("无效的 Terabox 链接: {0}")]
    InvalidUrl(String),

    #[error("无法从链接中提取分享ID: {0}")]
    NoShareId(String),

    #[error("API 请求失败: {0}")]
    Api(#[from] ApiError),

    #[error("解析失败: {0}")]
    Parse(String),

    #[error("浏览器回退已禁用")]
    BrowserDisabled,

    #[error("所有提取策略均失败，最后错误: {0}")]
    AllStrategiesFailed(String),

    #[error("提取超时")]
    Timeout,
}
