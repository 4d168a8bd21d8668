// Consumer - ウィジェットの評価と停止判断

use super::signal::BrokenSignal;
use crate::core::{
    Clock, Consumer, PipelineError, PipelineResult, ProgressEvent, ProgressReporter, Widget,
};
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

/// 消費側ワーカーが共有するキューと信号
#[derive(Debug, Clone)]
pub struct ConsumptionLine {
    pub input: Arc<Mutex<mpsc::Receiver<Widget>>>,
    pub stop: CancellationToken,
    pub broken: BrokenSignal,
    pub progress: mpsc::UnboundedSender<ProgressEvent>,
}

async fn next_widget(input: &Mutex<mpsc::Receiver<Widget>>) -> Option<Widget> {
    input.lock().await.recv().await
}

/// 単一Consumerワーカー
///
/// 戻り値は壊れたウィジェットを観測したかどうか。
pub fn spawn_single_consumer<R, C>(
    consumer: Consumer,
    reporter: Arc<R>,
    clock: Arc<C>,
    line: ConsumptionLine,
    tracker: &TaskTracker,
) -> tokio::task::JoinHandle<bool>
where
    R: ProgressReporter + 'static,
    C: Clock + 'static,
{
    tracker.spawn(async move {
        loop {
            // 次のウィジェットを取得
            let widget = tokio::select! {
                biased;
                _ = line.stop.cancelled() => return false,
                widget = next_widget(&line.input) => match widget {
                    Some(widget) => widget,
                    None => return false, // キュー終了
                },
            };

            // 受信と停止が競合した場合は評価しない
            if line.stop.is_cancelled() {
                return false;
            }

            let event = ProgressEvent::Consumed {
                broken: widget.broken,
            };
            if line.progress.send(event).is_err() {
                return false; // 集計タスクが異常終了した
            }

            if !widget.broken {
                let latency = clock.elapsed_since(widget.created_at);
                reporter
                    .report_consumed(&consumer.name, &widget, latency)
                    .await;
                continue;
            }

            reporter.report_broken(&consumer.name, &widget).await;
            // 最初に検出したワーカーだけが全体停止を発行する
            if line.broken.raise() {
                line.stop.cancel();
            }
            return true;
        }
    })
}

/// Consumerプールの待機ハンドル
#[derive(Debug)]
pub struct ConsumerPoolHandle {
    handles: Vec<tokio::task::JoinHandle<bool>>,
}

impl ConsumerPoolHandle {
    pub fn worker_count(&self) -> usize {
        self.handles.len()
    }

    /// 全ワーカーの終了を待ち、壊れたウィジェットを観測したかを返す
    pub async fn join(self) -> PipelineResult<bool> {
        let mut observed_broken = false;
        for handle in self.handles {
            observed_broken |= handle.await.map_err(PipelineError::task)?;
        }
        Ok(observed_broken)
    }
}

/// Consumers: 並列ワーカープール
pub fn spawn_consumers<R, C>(
    consumers: Vec<Consumer>,
    reporter: Arc<R>,
    clock: Arc<C>,
    line: ConsumptionLine,
    tracker: &TaskTracker,
) -> ConsumerPoolHandle
where
    R: ProgressReporter + 'static,
    C: Clock + 'static,
{
    let handles = consumers
        .into_iter()
        .map(|consumer| {
            spawn_single_consumer(
                consumer,
                Arc::clone(&reporter),
                Arc::clone(&clock),
                line.clone(),
                tracker,
            )
        })
        .collect();

    ConsumerPoolHandle { handles }
}
