// パイプラインのトレイト定義
// コアが呼び出す外部協力者（設定・報告・ID生成・時計）の抽象化

use super::types::{PipelineState, RunSummary, Widget};
use async_trait::async_trait;
use chrono::{DateTime, Local};
use mockall::automock;
use std::time::Duration;

/// パイプライン設定を抽象化するトレイト
#[automock]
pub trait PipelineConfig: Send + Sync {
    /// 生成するウィジェットの総数
    fn total_widgets(&self) -> u64;

    /// Producerワーカー数
    fn producer_count(&self) -> usize;

    /// Consumerワーカー数
    fn consumer_count(&self) -> usize;

    /// 壊れたウィジェットのスロット番号（1始まり、0以下は無し）
    fn defect_index(&self) -> i64;

    /// 出力キューの容量
    fn channel_buffer_size(&self) -> usize;
}

/// 進捗報告の抽象化トレイト
#[automock]
#[async_trait]
pub trait ProgressReporter: Send + Sync {
    /// 実行開始時の報告
    async fn report_started(&self, total_widgets: u64, producers: usize, consumers: usize);

    /// コーディネータの状態遷移
    async fn report_state(&self, state: PipelineState);

    /// 正常なウィジェットの消費
    async fn report_consumed(&self, consumer: &str, widget: &Widget, latency: Duration);

    /// 壊れたウィジェットの検出
    async fn report_broken(&self, consumer: &str, widget: &Widget);

    /// 停止信号の発行
    async fn report_execution_stopped(&self);

    /// 実行完了時の報告
    async fn report_completed(&self, summary: &RunSummary);
}

/// ウィジェットIDの生成
#[automock]
pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// 時計
#[automock]
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;

    /// `since` からの経過時間（負の場合はゼロ）
    fn elapsed_since(&self, since: DateTime<Local>) -> Duration;
}
