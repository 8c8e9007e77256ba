//! 产品 ID 生成

use std::sync::atomic::{AtomicI64, Ordering};

/// 基于毫秒时钟的 ID 生成器
///
/// 取值为 `max(当前毫秒时间戳, 上一个 ID + 1)`，同一进程内严格递增、不会重复。
/// 不同进程或重启之间不保证唯一。
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: AtomicI64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self) -> i64 {
        self.next_at(chrono::Utc::now().timestamp_millis())
    }

    fn next_at(&self, now_ms: i64) -> i64 {
        let prev = self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now_ms.max(last + 1))
            })
            .unwrap_or_else(|last| last);
        now_ms.max(prev + 1)
    }
}
