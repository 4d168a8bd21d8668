// 設定管理
// パイプラインの構成値と検証

pub mod implementations;

// 公開API
pub use implementations::{validate_config, DefaultPipelineConfig, MAX_AUTO_BUFFER};
