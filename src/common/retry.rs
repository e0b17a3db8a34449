use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use rand::Rng;
use tracing::{error, warn};

/// 重试策略：最大次数、基础延迟、固定退避倍数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub delay: f64,
    pub backoff: f64,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, delay: f64) -> Self {
        Self {
            max_retries,
            delay,
            backoff: 2.0,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, 1.0)
    }
}

/// 带指数退避的异步重试。
/// 每次失败后等待 delay * backoff^attempt + jitter 秒，耗尽后抛出最后一次错误。
pub async fn retry_async<T, E, F, Fut>(policy: &RetryPolicy, name: &str, mut op: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let mut last_error = None;
    let mut current_delay = policy.delay;
    let attempts = policy.max_retries.max(1);

    for attempt in 0..attempts {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) => {
                warn!("{} 第 {}/{} 次尝试失败: {}", name, attempt + 1, attempts, e);
                last_error = Some(e);

                if attempt + 1 < attempts {
                    let jitter: f64 = rand::rng().random_range(0.0..1.0);
                    tokio::time::sleep(Duration::from_secs_f64(current_delay + jitter)).await;
                    current_delay *= policy.backoff;
                }
            }
        }
    }

    error!("{} 共 {} 次尝试全部失败", name, attempts);
    // attempts 至少为 1，这里必然已有错误
    Err(last_error.unwrap())
}
