// パイプラインに関連するデータ型定義

use chrono::{DateTime, Local};
use serde::Serialize;
use std::fmt;

/// ウィジェットのタイムスタンプ表示形式（マイクロ秒まで）
pub const TIME_FORMAT: &str = "%H:%M:%S%.6f";

/// パイプラインを流れる1単位の作業
///
/// 生成時に全フィールドが確定し、以後は読み取り専用。
#[derive(Debug, Clone, PartialEq)]
pub struct Widget {
    pub id: String,
    pub origin: String,
    pub created_at: DateTime<Local>,
    pub broken: bool,
}

impl Widget {
    pub fn new(
        id: impl Into<String>,
        origin: impl Into<String>,
        created_at: DateTime<Local>,
        broken: bool,
    ) -> Self {
        Self {
            id: id.into(),
            origin: origin.into(),
            created_at,
            broken,
        }
    }

    /// `[id=.. source=.. time=.. broken=..]` 形式の表示
    pub fn describe(&self) -> String {
        format!(
            "[id={} source={} time={} broken={}]",
            self.id,
            self.origin,
            self.created_at.format(TIME_FORMAT),
            self.broken
        )
    }
}

/// Producer - 序数から名前が決まる
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Producer {
    pub name: String,
}

impl Producer {
    pub fn with_ordinal(ordinal: usize) -> Self {
        Self {
            name: format!("producer_{ordinal}"),
        }
    }
}

/// Consumer - 序数から名前が決まる
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Consumer {
    pub name: String,
}

impl Consumer {
    pub fn with_ordinal(ordinal: usize) -> Self {
        Self {
            name: format!("consumer_{ordinal}"),
        }
    }
}

/// ワーカーから集計タスクへ送られる進捗イベント
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressEvent {
    /// スロットを取得してウィジェットを生成した
    Produced,
    /// ウィジェットを評価した
    Consumed { broken: bool },
}

/// 集計タスクが所有する進捗カウンタ
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProgressCounts {
    pub produced: usize,
    pub consumed: usize,
    pub broken_reports: usize,
}

impl ProgressCounts {
    pub fn apply(&mut self, event: ProgressEvent) {
        match event {
            ProgressEvent::Produced => self.produced += 1,
            ProgressEvent::Consumed { broken } => {
                self.consumed += 1;
                if broken {
                    self.broken_reports += 1;
                }
            }
        }
    }
}

/// コーディネータの状態遷移
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Initializing,
    Running,
    Draining,
    Stopped,
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Initializing => "initializing",
            Self::Running => "running",
            Self::Draining => "draining",
            Self::Stopped => "stopped",
        };
        f.write_str(name)
    }
}

/// 実行がどの経路で終了したか
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunOutcome {
    /// 全ワーカーが自然に終了した
    Completed,
    /// 壊れたウィジェットを消費して停止した
    BrokenWidget,
    /// 外部から停止要求があった
    Cancelled,
}

/// 実行全体のサマリー
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub total_widgets: u64,
    pub produced: usize,
    /// 出力キューへ実際に渡した数（停止で送信を中断した分は含まない）
    pub delivered: usize,
    pub consumed: usize,
    pub broken_reports: usize,
    pub outcome: RunOutcome,
    pub total_processing_time_ms: u64,
}
