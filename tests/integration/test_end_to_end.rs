// エンドツーエンド統合テスト
use crate::fixtures::{Recorded, RecordingReporter};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::time::{timeout, Duration};
use widget_line::{
    core::PipelineState,
    services::{DefaultPipelineConfig, RandomIdGenerator, SystemClock},
    RunOutcome, RunSummary, WidgetPipeline,
};

async fn run_recorded(config: DefaultPipelineConfig) -> (RunSummary, RecordingReporter) {
    let reporter = RecordingReporter::new();
    let pipeline = WidgetPipeline::new(
        Arc::new(RandomIdGenerator::new()),
        Arc::new(SystemClock::new()),
        Arc::new(reporter.clone()),
    );
    let summary = timeout(Duration::from_secs(30), pipeline.execute(&config))
        .await
        .expect("pipeline must not hang")
        .unwrap();
    (summary, reporter)
}

#[tokio::test]
async fn test_scenario_a_all_widgets_consumed() {
    let config = DefaultPipelineConfig::new(5)
        .with_producers(1)
        .with_consumers(1)
        .with_defect_index(-1);
    let (summary, reporter) = run_recorded(config).await;

    assert_eq!(summary.outcome, RunOutcome::Completed);
    assert_eq!(reporter.consumed_ids().len(), 5);
    assert_eq!(reporter.broken_count(), 0);
    assert!(!reporter.events().contains(&Recorded::ExecutionStopped));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_scenario_b_single_broken_report() {
    let config = DefaultPipelineConfig::new(5)
        .with_producers(2)
        .with_consumers(2)
        .with_defect_index(3);
    let (summary, reporter) = run_recorded(config).await;

    assert_eq!(summary.outcome, RunOutcome::BrokenWidget);
    assert_eq!(reporter.broken_count(), 1);
    assert_eq!(summary.broken_reports, 1);
    assert!(summary.produced <= 5);
    assert!(summary.produced >= 3);
    assert!(reporter.events().contains(&Recorded::ExecutionStopped));
}

#[tokio::test]
async fn test_scenario_c_zero_widgets() {
    let (summary, reporter) = run_recorded(DefaultPipelineConfig::new(0)).await;

    assert_eq!(summary.outcome, RunOutcome::Completed);
    assert_eq!(summary.produced, 0);
    assert!(reporter.consumed_ids().is_empty());
    assert_eq!(reporter.broken_count(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_every_run_without_defect_completes_fully() {
    for total in [1u64, 2, 17, 100] {
        for (producers, consumers) in [(1, 1), (3, 1), (1, 3), (4, 4)] {
            let config = DefaultPipelineConfig::new(total)
                .with_producers(producers)
                .with_consumers(consumers)
                .with_buffer_size(2);
            let (summary, reporter) = run_recorded(config).await;

            assert_eq!(summary.outcome, RunOutcome::Completed);
            assert_eq!(summary.produced as u64, total);
            assert_eq!(summary.consumed as u64, total);
            assert_eq!(reporter.consumed_ids().len() as u64, total);
        }
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_every_defect_position_stops_exactly_once() {
    let total = 12u64;
    for defect_index in 1..=total as i64 {
        let config = DefaultPipelineConfig::new(total)
            .with_producers(3)
            .with_consumers(3)
            .with_defect_index(defect_index)
            .with_buffer_size(1);
        let (summary, reporter) = run_recorded(config).await;

        assert_eq!(summary.outcome, RunOutcome::BrokenWidget);
        assert_eq!(reporter.broken_count(), 1);
        assert!(summary.produced as i64 >= defect_index);
        assert!(summary.produced as u64 <= total);
    }
}

#[tokio::test]
async fn test_defect_beyond_total_behaves_like_none() {
    let config = DefaultPipelineConfig::new(8).with_defect_index(9);
    let (summary, reporter) = run_recorded(config).await;

    assert_eq!(summary.outcome, RunOutcome::Completed);
    assert_eq!(summary.consumed, 8);
    assert_eq!(reporter.broken_count(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_ids_unique_across_large_run() {
    let config = DefaultPipelineConfig::new(10_000)
        .with_producers(4)
        .with_consumers(4);
    let (summary, reporter) = run_recorded(config).await;

    let ids: HashSet<String> = reporter.consumed_ids().into_iter().collect();
    assert_eq!(summary.consumed, 10_000);
    assert_eq!(ids.len(), 10_000);
}

#[tokio::test]
async fn test_state_sequence() {
    let (_, reporter) = run_recorded(DefaultPipelineConfig::new(3)).await;

    assert_eq!(
        reporter.states(),
        vec![
            PipelineState::Initializing,
            PipelineState::Running,
            PipelineState::Draining,
            PipelineState::Stopped,
        ]
    );
}

#[tokio::test]
async fn test_pipeline_is_reusable_across_runs() {
    let reporter = RecordingReporter::new();
    let pipeline = WidgetPipeline::new(
        Arc::new(RandomIdGenerator::with_seed(Some(9))),
        Arc::new(SystemClock::new()),
        Arc::new(reporter.clone()),
    );

    let first = pipeline
        .execute(&DefaultPipelineConfig::new(4).with_defect_index(2))
        .await
        .unwrap();
    let second = pipeline
        .execute(&DefaultPipelineConfig::new(4))
        .await
        .unwrap();

    assert_eq!(first.outcome, RunOutcome::BrokenWidget);
    assert_eq!(second.outcome, RunOutcome::Completed);
    assert_eq!(second.consumed, 4);
}
