// 高レベル公開API
// WidgetPipelineを簡単に使用できるようにするための便利な関数

use super::pipeline::WidgetPipeline;
use crate::services::{
    ConsoleProgressReporter, NoOpProgressReporter, RandomIdGenerator, SystemClock,
};
use std::sync::Arc;

/// 標準の協力者で構成したパイプライン
pub type ConsolePipeline = WidgetPipeline<RandomIdGenerator, SystemClock, ConsoleProgressReporter>;

/// 出力なしのパイプライン（テスト・ベンチマーク用）
pub type QuietPipeline = WidgetPipeline<RandomIdGenerator, SystemClock, NoOpProgressReporter>;

/// コンソール出力付きパイプラインの作成
pub fn create_console_pipeline(
    reporter: ConsoleProgressReporter,
    seed: Option<u64>,
) -> ConsolePipeline {
    WidgetPipeline::new(
        Arc::new(RandomIdGenerator::with_seed(seed)),
        Arc::new(SystemClock::new()),
        Arc::new(reporter),
    )
}

/// 静音パイプラインの作成
pub fn create_quiet_pipeline(seed: Option<u64>) -> QuietPipeline {
    WidgetPipeline::new(
        Arc::new(RandomIdGenerator::with_seed(seed)),
        Arc::new(SystemClock::new()),
        Arc::new(NoOpProgressReporter::new()),
    )
}
