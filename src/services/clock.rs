// 時計の具象実装

use crate::core::Clock;
use chrono::{DateTime, Local};
use std::time::Duration;

/// システム時刻による時計
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }

    fn elapsed_since(&self, since: DateTime<Local>) -> Duration {
        // 時刻が巻き戻った場合はゼロ扱い
        (Local::now() - since).to_std().unwrap_or_default()
    }
}
