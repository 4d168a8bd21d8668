// 進捗監視の具象実装

use crate::core::{PipelineState, ProgressReporter, RunOutcome, RunSummary, Widget};
use async_trait::async_trait;
use std::time::Duration;

/// コンソール出力による進捗報告実装
#[derive(Debug, Default, Clone)]
pub struct ConsoleProgressReporter {
    quiet: bool,
}

impl ConsoleProgressReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// ウィジェット単位の行を出さない
    pub fn quiet() -> Self {
        Self { quiet: true }
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }
}

/// 正常消費の1行
pub fn format_consumed_line(consumer: &str, widget: &Widget, latency: Duration) -> String {
    format!("{consumer} consumes {} in {latency:?} time", widget.describe())
}

/// 壊れたウィジェット検出の1行
pub fn format_broken_line(consumer: &str, widget: &Widget) -> String {
    format!(
        "{consumer} found a broken widget {} -- stopping production",
        widget.describe()
    )
}

#[async_trait]
impl ProgressReporter for ConsoleProgressReporter {
    async fn report_started(&self, _total_widgets: u64, _producers: usize, _consumers: usize) {
        // 元の出力形式に開始行は無い
    }

    async fn report_state(&self, _state: PipelineState) {
        // 状態遷移はコンソールに出さない
    }

    async fn report_consumed(&self, consumer: &str, widget: &Widget, latency: Duration) {
        if !self.quiet {
            println!("{}", format_consumed_line(consumer, widget, latency));
        }
    }

    async fn report_broken(&self, consumer: &str, widget: &Widget) {
        if !self.quiet {
            println!("{}", format_broken_line(consumer, widget));
        }
    }

    async fn report_execution_stopped(&self) {
        println!("[execution stops]");
    }

    async fn report_completed(&self, summary: &RunSummary) {
        if self.quiet {
            let reason = match summary.outcome {
                RunOutcome::Completed => "completed",
                RunOutcome::BrokenWidget => "stopped on broken widget",
                RunOutcome::Cancelled => "cancelled",
            };
            println!(
                "Run {reason}: produced {}, consumed {}, broken {}",
                summary.produced, summary.consumed, summary.broken_reports
            );
        } else if summary.outcome == RunOutcome::Cancelled {
            eprintln!("⚠️  Run cancelled before all widgets were consumed");
        }
    }
}

/// 何もしない進捗報告実装（テスト・ベンチマーク用）
#[derive(Debug, Default, Clone)]
pub struct NoOpProgressReporter;

impl NoOpProgressReporter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProgressReporter for NoOpProgressReporter {
    async fn report_started(&self, _total_widgets: u64, _producers: usize, _consumers: usize) {
        // 何もしない
    }

    async fn report_state(&self, _state: PipelineState) {
        // 何もしない
    }

    async fn report_consumed(&self, _consumer: &str, _widget: &Widget, _latency: Duration) {
        // 何もしない
    }

    async fn report_broken(&self, _consumer: &str, _widget: &Widget) {
        // 何もしない
    }

    async fn report_execution_stopped(&self) {
        // 何もしない
    }

    async fn report_completed(&self, _summary: &RunSummary) {
        // 何もしない
    }
}
