use std::time::{Duration, Instant};

use crate::config::TimeMode;

/// セッションの経過時間管理
///
/// 値はミリ秒単位に切り捨てる。
#[derive(Debug, Clone)]
pub struct SessionClock {
    mode: TimeMode,
    start: Instant,
    last: Option<Instant>,
}

impl SessionClock {
    pub fn new(mode: TimeMode, start: Instant) -> Self {
        Self {
            mode,
            start,
            last: None,
        }
    }

    /// フレーム受信時刻から Time 列の値を求める
    pub fn tick(&mut self, now: Instant) -> Duration {
        let elapsed = match (self.mode, self.last) {
            (TimeMode::Cumulative, _) => now.saturating_duration_since(self.start),
            (TimeMode::Delta, Some(prev)) => now.saturating_duration_since(prev),
            (TimeMode::Delta, None) => Duration::ZERO,
        };
        self.last = Some(now);
        Duration::from_millis(elapsed.as_millis() as u64)
    }

    /// 開始からの経過時間（実行時間の上限判定用、モードに依らない）
    pub fn since_start(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.start)
    }
}
