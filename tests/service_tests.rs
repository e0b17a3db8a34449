use tera_extractor::service::presenter;
use tera_extractor::service::rate::RateGate;
use tera_extractor::service::request_log::{RequestLog, TracingLog};

#[test]
fn test_rate_gate_blocks_rapid_requests() {
    let gate = RateGate::new(3600);

    // 第一次放行，紧接着的第二次被拦
    assert!(gate.check(1001));
    assert!(!gate.check(1001));

    // 不同用户互不影响
    assert!(gate.check(1002));
}

#[test]
fn test_rate_gate_zero_interval() {
    let gate = RateGate::new(0);
    assert!(gate.check(1));
    assert!(gate.check(1));
}

#[test]
fn test_render_failure_bounded() {
    let long_message = "x".repeat(1000);
    let rendered = presenter::render_failure(&long_message);

    assert!(rendered.starts_with("❌"));
    // 输出长度有界，不会把整段底层错误倒给用户
    assert!(rendered.chars().count() < 250);
}

#[test]
fn test_request_log_is_fire_and_forget() {
    // 日志落地不允许失败，这里只验证调用不会恐慌
    let sink = TracingLog;
    sink.log_request(42, "https://terabox.com/s/abc123", true, None, Some("v.mp4"), Some(1024));
    sink.log_request(42, "https://terabox.com/s/abc123", false, Some("超时"), None, None);
}
