// 進捗集計
// 単一所有者のタスクがカウンタを保持する

pub mod collector;

// 公開API
pub use collector::spawn_progress_collector;
