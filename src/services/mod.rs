// サービス層 - パイプラインが呼び出す協力者の具象実装
// 各サービスは特定の責任を持ち、疎結合で設計されている

pub mod clock;
pub mod config;
pub mod id_generator;
pub mod monitoring;
pub mod progress;

// 公開API - 各サービスの主要機能を明示的にエクスポート
pub use clock::SystemClock;
pub use config::{validate_config, DefaultPipelineConfig};
pub use id_generator::RandomIdGenerator;
pub use monitoring::{ConsoleProgressReporter, NoOpProgressReporter};
pub use progress::spawn_progress_collector;
