use tracing::info;

/// 请求日志落地接口。实现必须是即发即忘的：
/// 记录失败或阻塞都不允许影响提取主路径。
pub trait RequestLog: Send + Sync {
    fn log_request(
        &self,
        user_id: i64,
        url: &str,
        success: bool,
        error_message: Option<&str>,
        video_title: Option<&str>,
        video_size: Option<u64>,
    );
}

/// 默认实现：写结构化日志
pub struct TracingLog;

impl RequestLog for TracingLog {
    fn log_request(
        &self,
        user_id: i64,
        url: &str,
        success: bool,
        error_message: Option<&str>,
        video_title: Option<&str>,
        video_size: Option<u64>,
    ) {
        info!(
            user_id,
            url,
            success,
            error = error_message.unwrap_or(""),
            title = video_title.unwrap_or(""),
            size = video_size.unwrap_or(0),
            "记录提取请求"
        );
    }
}
