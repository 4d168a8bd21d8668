// エンジン層 - 並列処理とオーケストレーション
// サービス層を組み合わせて生産ラインを構成する

pub mod api;
pub mod consumer;
pub mod pipeline;
pub mod producer;
pub mod signal;

// 公開API - 主要エンジンクラス
pub use api::{create_console_pipeline, create_quiet_pipeline, ConsolePipeline, QuietPipeline};
pub use consumer::{spawn_consumers, ConsumerPoolHandle, ConsumptionLine};
pub use pipeline::WidgetPipeline;
pub use producer::{spawn_producers, ProducerPoolHandle, ProductionLine};
pub use signal::BrokenSignal;
