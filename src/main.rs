use clap::Parser;
use tracing_subscriber::EnvFilter;

use tera_extractor::common::config::Config;
use tera_extractor::common::logger::PrettyLogger;
use tera_extractor::extractor::errors::ExtractError;
use tera_extractor::extractor::TeraExtractor;
use tera_extractor::service::presenter;
use tera_extractor::service::request_log::{RequestLog, TracingLog};
use tera_extractor::{log_error, log_info, log_step, log_success};

mod cli;

/// 从命令行参数覆盖环境配置
fn build_config(args: &cli::Cli) -> Config {
    let mut config = Config::from_env();

    if let Some(proxy) = &args.proxy {
        config.proxy_url = Some(proxy.clone());
    }
    config.extraction_timeout = args.timeout;
    config.max_retries = args.retries;
    if args.no_browser {
        config.use_browser_fallback = false;
    }

    config
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 解析命令行参数
    let args = cli::Cli::parse();
    let config = build_config(&args);

    log_step!("解析分享链接: {}", args.url);
    let extractor = TeraExtractor::new(config)?;
    let request_log = TracingLog;

    match extractor.extract(&args.url).await {
        Ok(video_info) => {
            request_log.log_request(
                0,
                &args.url,
                true,
                None,
                Some(&video_info.title),
                Some(video_info.size),
            );

            if args.json {
                println!("{}", serde_json::to_string_pretty(&video_info)?);
            } else {
                PrettyLogger::separator();
                println!("{}", presenter::render(&video_info));
                PrettyLogger::separator();
                log_success!("提取完成");
            }
            Ok(())
        }
        Err(e) => {
            request_log.log_request(0, &args.url, false, Some(&e.to_string()), None, None);
            log_error!("{}", presenter::render_failure(&e.to_string()));

            if matches!(e, ExtractError::Timeout) {
                log_info!("提取超时，稍后再试一次可能就好");
            }
            Err(e.into())
        }
    }
}
