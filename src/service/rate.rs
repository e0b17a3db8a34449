use std::time::{Duration, Instant};

use dashmap::DashMap;

/// 按用户限流：两次请求之间必须间隔最小时长，在进入提取核心之前生效
pub struct RateGate {
    min_interval: Duration,
    last_seen: DashMap<i64, Instant>,
}

impl RateGate {
    pub fn new(min_interval_secs: u64) -> Self {
        Self {
            min_interval: Duration::from_secs(min_interval_secs),
            last_seen: DashMap::new(),
        }
    }

    /// 尝试放行一次请求；放行时记录本次时间
    pub fn check(&self, user_id: i64) -> bool {
        let now = Instant::now();

        if let Some(last) = self.last_seen.get(&user_id) {
            if now.duration_since(*last) < self.min_interval {
                return false;
            }
        }

        self.last_seen.insert(user_id, now);
        true
    }
}
