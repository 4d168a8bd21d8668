// 進捗監視機能
// ウィジェット消費の報告、停止通知、完了通知

pub mod implementations;

// 公開API
pub use implementations::{
    format_broken_line, format_consumed_line, ConsoleProgressReporter, NoOpProgressReporter,
};
