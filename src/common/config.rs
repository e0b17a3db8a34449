use std::env;

/// 进程级配置，启动时构造一次后注入各组件
#[derive(Debug, Clone)]
pub struct Config {
    // 机器人凭据（由外部前端使用）
    pub bot_token: String,
    pub admin_ids: Vec<i64>,

    // 限流
    pub max_concurrent_extractions: usize,
    pub rate_limit_secs: u64,

    // 超时（秒）
    pub request_timeout: u64,
    pub extraction_timeout: u64,

    // 重试
    pub max_retries: u32,
    pub retry_delay: f64,

    // 代理（可选）
    pub proxy_url: Option<String>,

    // 浏览器仿真
    pub headless: bool,
    pub use_browser_fallback: bool,

    // 结果缓存
    pub cache_capacity: u64,
    pub cache_ttl_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            admin_ids: Vec::new(),
            max_concurrent_extractions: 10,
            rate_limit_secs: 3,
            request_timeout: 60,
            extraction_timeout: 120,
            max_retries: 3,
            retry_delay: 1.0,
            proxy_url: None,
            headless: true,
            use_browser_fallback: true,
            cache_capacity: 1000,
            cache_ttl_secs: 3600,
        }
    }
}

impl Config {
    /// 从环境变量读取配置，未设置的项取默认值
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            bot_token: env::var("BOT_TOKEN").unwrap_or_default(),
            admin_ids: env::var("ADMIN_IDS")
                .unwrap_or_default()
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect(),
            max_concurrent_extractions: parse_env("MAX_CONCURRENT_EXTRACTIONS", defaults.max_concurrent_extractions),
            rate_limit_secs: parse_env("RATE_LIMIT_SECONDS", defaults.rate_limit_secs),
            request_timeout: parse_env("REQUEST_TIMEOUT", defaults.request_timeout),
            extraction_timeout: parse_env("EXTRACTION_TIMEOUT", defaults.extraction_timeout),
            max_retries: parse_env("MAX_RETRIES", defaults.max_retries),
            retry_delay: parse_env("RETRY_DELAY", defaults.retry_delay),
            proxy_url: env::var("PROXY_URL").ok().filter(|s| !s.is_empty()),
            headless: parse_env("HEADLESS", defaults.headless),
            use_browser_fallback: parse_env("USE_BROWSER_FALLBACK", defaults.use_browser_fallback),
            cache_capacity: defaults.cache_capacity,
            cache_ttl_secs: defaults.cache_ttl_secs,
        }
    }
}

fn parse_env<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
