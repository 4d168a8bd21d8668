// Producer - ジョブスロットからウィジェットを生成

use crate::core::{
    Clock, IdGenerator, PipelineError, PipelineResult, Producer, ProgressEvent, Widget,
};
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

/// 生産側ワーカーが共有するキューと信号
#[derive(Debug, Clone)]
pub struct ProductionLine {
    pub jobs: Arc<Mutex<mpsc::UnboundedReceiver<u64>>>,
    pub output: mpsc::Sender<Widget>,
    pub stop: CancellationToken,
    pub progress: mpsc::UnboundedSender<ProgressEvent>,
}

/// スロット番号が壊れたウィジェットの位置か
pub fn is_defective(slot: u64, defect_index: i64) -> bool {
    i64::try_from(slot).is_ok_and(|slot| slot == defect_index)
}

/// 1個のウィジェットを生成
pub fn produce_widget<G, C>(
    producer: &Producer,
    id_generator: &G,
    clock: &C,
    broken: bool,
) -> Widget
where
    G: IdGenerator + ?Sized,
    C: Clock + ?Sized,
{
    Widget::new(
        id_generator.generate(),
        producer.name.clone(),
        clock.now(),
        broken,
    )
}

async fn next_slot(jobs: &Mutex<mpsc::UnboundedReceiver<u64>>) -> Option<u64> {
    jobs.lock().await.recv().await
}

/// 単一Producerワーカー
///
/// 戻り値は出力キューへ実際に渡したウィジェット数。
pub fn spawn_single_producer<G, C>(
    producer: Producer,
    id_generator: Arc<G>,
    clock: Arc<C>,
    defect_index: i64,
    line: ProductionLine,
    tracker: &TaskTracker,
) -> tokio::task::JoinHandle<usize>
where
    G: IdGenerator + 'static,
    C: Clock + 'static,
{
    tracker.spawn(async move {
        let mut delivered = 0;
        loop {
            // 次のスロットを取得
            let slot = tokio::select! {
                biased;
                _ = line.stop.cancelled() => break,
                slot = next_slot(&line.jobs) => match slot {
                    Some(slot) => slot,
                    None => break, // ジョブ枯渇
                },
            };

            // 生成時点で壊れているかが確定する
            let widget = produce_widget(
                &producer,
                id_generator.as_ref(),
                clock.as_ref(),
                is_defective(slot, defect_index),
            );
            if line.progress.send(ProgressEvent::Produced).is_err() {
                break; // 集計タスクが異常終了した
            }

            // 出力キューが満杯でも停止信号で抜ける
            tokio::select! {
                biased;
                _ = line.stop.cancelled() => break,
                sent = line.output.send(widget) => {
                    if sent.is_err() {
                        break; // 受信側が閉じた
                    }
                    delivered += 1;
                }
            }
        }
        delivered
    })
}

/// Producerプールの待機ハンドル
#[derive(Debug)]
pub struct ProducerPoolHandle {
    handles: Vec<tokio::task::JoinHandle<usize>>,
}

impl ProducerPoolHandle {
    pub fn worker_count(&self) -> usize {
        self.handles.len()
    }

    /// 全ワーカーの終了を待ち、出力キューへ渡した総数を返す
    pub async fn join(self) -> PipelineResult<usize> {
        let mut delivered = 0;
        for handle in self.handles {
            delivered += handle.await.map_err(PipelineError::task)?;
        }
        Ok(delivered)
    }
}

/// Producers: 並列ワーカープール
///
/// `line` はここでドロップされるため、全ワーカーが終了した時点で
/// 出力キューが閉じる。
pub fn spawn_producers<G, C>(
    producers: Vec<Producer>,
    id_generator: Arc<G>,
    clock: Arc<C>,
    defect_index: i64,
    line: ProductionLine,
    tracker: &TaskTracker,
) -> ProducerPoolHandle
where
    G: IdGenerator + 'static,
    C: Clock + 'static,
{
    let handles = producers
        .into_iter()
        .map(|producer| {
            spawn_single_producer(
                producer,
                Arc::clone(&id_generator),
                Arc::clone(&clock),
                defect_index,
                line.clone(),
                tracker,
            )
        })
        .collect();

    ProducerPoolHandle { handles }
}
