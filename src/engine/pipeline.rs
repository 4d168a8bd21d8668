// Pipeline - Producer-Consumer パイプライン
// 状態遷移、停止判断、全ワーカーの終了待ちを担うコーディネータ

use super::consumer::{spawn_consumers, ConsumptionLine};
use super::producer::{spawn_producers, ProductionLine};
use super::signal::BrokenSignal;
use crate::core::{
    Clock, Consumer, IdGenerator, PipelineConfig, PipelineError, PipelineResult, PipelineState,
    Producer, ProgressReporter, RunOutcome, RunSummary,
};
use crate::services::{progress::spawn_progress_collector, validate_config};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, Mutex};
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

/// 経過時間をミリ秒へ（u64に収まらない場合は飽和）
fn saturating_millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

/// ウィジェット生産ラインのコーディネータ
pub struct WidgetPipeline<G, C, R> {
    id_generator: Arc<G>,
    clock: Arc<C>,
    reporter: Arc<R>,
}

impl<G, C, R> WidgetPipeline<G, C, R>
where
    G: IdGenerator + 'static,
    C: Clock + 'static,
    R: ProgressReporter + 'static,
{
    /// 新しいパイプラインを作成
    pub fn new(id_generator: Arc<G>, clock: Arc<C>, reporter: Arc<R>) -> Self {
        Self {
            id_generator,
            clock,
            reporter,
        }
    }

    pub fn reporter(&self) -> &Arc<R> {
        &self.reporter
    }

    /// 1回分の実行
    pub async fn execute<P>(&self, config: &P) -> PipelineResult<RunSummary>
    where
        P: PipelineConfig + ?Sized,
    {
        self.execute_with_stop(config, CancellationToken::new())
            .await
    }

    /// 外部停止信号付きの実行
    ///
    /// `external` が発火すると全ワーカーを停止し `RunOutcome::Cancelled` を返す。
    /// 内部の停止は子トークンで行うため、呼び出し側のトークンは変更しない。
    pub async fn execute_with_stop<P>(
        &self,
        config: &P,
        external: CancellationToken,
    ) -> PipelineResult<RunSummary>
    where
        P: PipelineConfig + ?Sized,
    {
        let start_time = Instant::now();

        // --- Initializing ---
        self.reporter.report_state(PipelineState::Initializing).await;
        validate_config(config)?;

        let total_widgets = config.total_widgets();
        let producers: Vec<Producer> = (0..config.producer_count())
            .map(Producer::with_ordinal)
            .collect();
        let consumers: Vec<Consumer> = (0..config.consumer_count())
            .map(Consumer::with_ordinal)
            .collect();
        self.reporter
            .report_started(total_widgets, producers.len(), consumers.len())
            .await;

        // ジョブを全て積んでから送信側を閉じる
        let (job_tx, job_rx) = mpsc::unbounded_channel::<u64>();
        for slot in 1..=total_widgets {
            job_tx
                .send(slot)
                .map_err(|e| PipelineError::channel(format!("job queue closed at slot {}", e.0)))?;
        }
        drop(job_tx);

        let (widget_tx, widget_rx) = mpsc::channel(config.channel_buffer_size());
        let (progress_tx, progress_rx) = mpsc::unbounded_channel();
        let stop = external.child_token();
        let broken = BrokenSignal::new();
        let tracker = TaskTracker::new();
        let collector_handle = spawn_progress_collector(progress_rx);

        // --- Running ---
        self.reporter.report_state(PipelineState::Running).await;
        let producer_pool = spawn_producers(
            producers,
            Arc::clone(&self.id_generator),
            Arc::clone(&self.clock),
            config.defect_index(),
            ProductionLine {
                jobs: Arc::new(Mutex::new(job_rx)),
                output: widget_tx,
                stop: stop.clone(),
                progress: progress_tx.clone(),
            },
            &tracker,
        );
        let consumer_pool = spawn_consumers(
            consumers,
            Arc::clone(&self.reporter),
            Arc::clone(&self.clock),
            ConsumptionLine {
                input: Arc::new(Mutex::new(widget_rx)),
                stop: stop.clone(),
                broken: broken.clone(),
                progress: progress_tx,
            },
            &tracker,
        );
        tracker.close();

        // 壊れたウィジェット > 外部停止 > 自然終了 の優先順で判定
        let outcome = tokio::select! {
            biased;
            _ = broken.wait() => RunOutcome::BrokenWidget,
            _ = external.cancelled() => RunOutcome::Cancelled,
            _ = tracker.wait() => RunOutcome::Completed,
        };

        // --- Draining ---
        self.reporter.report_state(PipelineState::Draining).await;
        if outcome != RunOutcome::Completed {
            self.reporter.report_execution_stopped().await;
        }
        stop.cancel();
        tracker.wait().await;

        let delivered = producer_pool.join().await?;
        let observed_broken = consumer_pool.join().await?;
        let counts = collector_handle.await?;
        debug_assert_eq!(observed_broken, broken.is_raised());

        // --- Stopped ---
        self.reporter.report_state(PipelineState::Stopped).await;
        let summary = RunSummary {
            total_widgets,
            produced: counts.produced,
            delivered,
            consumed: counts.consumed,
            broken_reports: counts.broken_reports,
            outcome,
            total_processing_time_ms: saturating_millis(start_time.elapsed()),
        };
        self.reporter.report_completed(&summary).await;

        Ok(summary)
    }
}
