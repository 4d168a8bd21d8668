// Collector - 進捗カウンタの集計
//
// カウンタを書き換えるのはこのタスクだけ。ワーカーはイベントを送るのみ。
// 全送信側がドロップされるとチャンネルが閉じ、最終値を返して終了する。

use crate::core::{ProgressCounts, ProgressEvent};
use tokio::sync::mpsc;

/// Collector: 進捗イベントを集計
pub fn spawn_progress_collector(
    mut progress_rx: mpsc::UnboundedReceiver<ProgressEvent>,
) -> tokio::task::JoinHandle<ProgressCounts> {
    tokio::spawn(async move {
        let mut counts = ProgressCounts::default();
        while let Some(event) = progress_rx.recv().await {
            counts.apply(event);
        }
        counts
    })
}
