use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("网络请求失败: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("响应解析失败: {0}")]
    InvalidResponse(String),

    #[error("客户端构建失败: {0}")]
    ClientBuild(String),

    #[error("服务暂时不可用，请稍后重试")]
    RetryLater,

    #[error("Terabox API 错误 (errno={0}): {1}")]
    Tera(i64, String),
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        Self::InvalidResponse(e.to_string())
    }
}
