use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;

use tera_extractor::common::api::client::TeraClient;
use tera_extractor::common::config::Config;
use tera_extractor::common::retry::RetryPolicy;
use tera_extractor::extractor::errors::ExtractError;
use tera_extractor::extractor::models::{ShareReference, VideoInfo};
use tera_extractor::extractor::run_strategies;
use tera_extractor::extractor::strategies::Strategy;

enum StubBehavior {
    // 直接报错
    Fail,
    // 返回没有任何链接的无效结果
    Empty,
    // 返回带直链的有效结果
    Valid(&'static str),
}

struct StubStrategy {
    name: &'static str,
    behavior: StubBehavior,
    calls: AtomicU32,
}

impl StubStrategy {
    fn new(name: &'static str, behavior: StubBehavior) -> Self {
        Self {
            name,
            behavior,
            calls: AtomicU32::new(0),
        }
    }

    fn call_count(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Strategy for StubStrategy {
    fn name(&self) -> &'static str {
        self.name
    }

    fn retry_policy(&self, _config: &Config) -> RetryPolicy {
        // 测试里不做真实退避
        RetryPolicy {
            max_retries: 1,
            delay: 0.0,
            backoff: 2.0,
        }
    }

    async fn extract(
        &self,
        _client: &TeraClient,
        share: &ShareReference,
    ) -> Result<VideoInfo, ExtractError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        match &self.behavior {
            StubBehavior::Fail => Err(ExtractError::Parse(format!("{} 故障", self.name))),
            StubBehavior::Empty => Ok(VideoInfo::default()),
            StubBehavior::Valid(link) => Ok(VideoInfo {
                direct_link: (*link).to_string(),
                share_id: share.share_id.clone(),
                ..Default::default()
            }),
        }
    }
}

fn test_share() -> ShareReference {
    ShareReference {
        raw_url: "https://www.terabox.com/s/1abc123def".to_string(),
        share_id: "1abc123def".to_string(),
        api_domain: "terabox.com",
    }
}

fn test_client() -> TeraClient {
    TeraClient::new(&Config::default()).expect("构建客户端失败")
}

#[tokio::test]
async fn test_runner_stops_at_first_valid_result() {
    let client = test_client();
    let config = Config::default();
    let strategies = vec![
        StubStrategy::new("first", StubBehavior::Valid("http://x/video.mp4")),
        StubStrategy::new("second", StubBehavior::Valid("http://y/video.mp4")),
    ];

    let result = run_strategies(&client, &test_share(), &strategies, &config)
        .await
        .expect("应当成功");

    assert_eq!(result.direct_link, "http://x/video.mp4");
    assert_eq!(strategies[0].call_count(), 1);
    // 后续策略不应被调用
    assert_eq!(strategies[1].call_count(), 0);
}

#[tokio::test]
async fn test_runner_skips_failures_and_empty_results() {
    // 场景：策略一报错，策略二返回空链接，策略三给出有效直链
    let client = test_client();
    let config = Config::default();
    let strategies = vec![
        StubStrategy::new("one", StubBehavior::Fail),
        StubStrategy::new("two", StubBehavior::Empty),
        StubStrategy::new("three", StubBehavior::Valid("http://x/video.mp4")),
        StubStrategy::new("four", StubBehavior::Valid("http://never/video.mp4")),
    ];

    let result = run_strategies(&client, &test_share(), &strategies, &config)
        .await
        .expect("应当成功");

    assert_eq!(result.direct_link, "http://x/video.mp4");
    assert_eq!(strategies[0].call_count(), 1);
    assert_eq!(strategies[1].call_count(), 1);
    assert_eq!(strategies[2].call_count(), 1);
    // 第三个策略成功后，第四个永远不会被调用
    assert_eq!(strategies[3].call_count(), 0);
}

#[tokio::test]
async fn test_runner_aggregates_last_error() {
    // 场景：全部策略失败，聚合错误里只保留最后一个
    let client = test_client();
    let config = Config::default();
    let strategies = vec![
        StubStrategy::new("alpha", StubBehavior::Fail),
        StubStrategy::new("beta", StubBehavior::Fail),
        StubStrategy::new("gamma", StubBehavior::Fail),
    ];

    let err = run_strategies(&client, &test_share(), &strategies, &config)
        .await
        .expect_err("应当失败");

    match err {
        ExtractError::AllStrategiesFailed(message) => {
            assert!(message.contains("gamma"), "应引用最后一个错误: {}", message);
            assert!(!message.contains("alpha"), "不应枚举更早的错误: {}", message);
        }
        other => panic!("期望 AllStrategiesFailed，实际为 {:?}", other),
    }

    // 每个策略都被尝试过一次
    for strategy in &strategies {
        assert_eq!(strategy.call_count(), 1);
    }
}

#[tokio::test]
async fn test_runner_empty_strategy_list() {
    let client = test_client();
    let config = Config::default();
    let strategies: Vec<StubStrategy> = Vec::new();

    let err = run_strategies(&client, &test_share(), &strategies, &config)
        .await
        .expect_err("应当失败");

    assert!(matches!(err, ExtractError::AllStrategiesFailed(_)));
}

struct RetryCountingStrategy {
    calls: AtomicU32,
}

#[async_trait]
impl Strategy for RetryCountingStrategy {
    fn name(&self) -> &'static str {
        "retry_counting"
    }

    fn retry_policy(&self, _config: &Config) -> RetryPolicy {
        RetryPolicy {
            max_retries: 3,
            delay: 0.0,
            backoff: 2.0,
        }
    }

    async fn extract(
        &self,
        _client: &TeraClient,
        _share: &ShareReference,
    ) -> Result<VideoInfo, ExtractError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(ExtractError::Parse("总是失败".to_string()))
    }
}

#[tokio::test]
async fn test_runner_retries_before_moving_on() {
    // 单个策略在被放弃前按策略配置重试
    let client = test_client();
    let config = Config::default();
    let strategies = vec![RetryCountingStrategy {
        calls: AtomicU32::new(0),
    }];

    let err = run_strategies(&client, &test_share(), &strategies, &config)
        .await
        .expect_err("应当失败");

    assert!(matches!(err, ExtractError::AllStrategiesFailed(_)));
    assert_eq!(strategies[0].calls.load(Ordering::SeqCst), 3);
}
