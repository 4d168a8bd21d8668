use crate::cli::args::Cli;
use crate::core::{PipelineError, RunSummary};
use crate::engine::create_console_pipeline;
use crate::services::ConsoleProgressReporter;
use anyhow::{Context, Result};
use tokio_util::sync::CancellationToken;

/// Execute one production run as described by the command line.
///
/// Ctrl+C cancels the run; workers drain and the summary reports
/// `cancelled`.
pub async fn execute_run(cli: &Cli) -> Result<RunSummary> {
    let config = cli.to_config();
    let reporter = if cli.quiet {
        ConsoleProgressReporter::quiet()
    } else {
        ConsoleProgressReporter::new()
    };
    let pipeline = create_console_pipeline(reporter, cli.seed);

    let stop = CancellationToken::new();
    let interrupt = {
        let stop = stop.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                stop.cancel();
            }
        })
    };

    let result = pipeline.execute_with_stop(&config, stop).await;
    interrupt.abort();
    let summary = result.context("widget production failed")?;

    if cli.json {
        let json = serde_json::to_string_pretty(&summary).context("failed to encode summary")?;
        println!("{json}");
    }

    Ok(summary)
}

/// 失敗時にstderrへ出すメッセージ
///
/// 入力で直せる失敗には使い方の案内を付ける。
pub fn failure_message(error: &anyhow::Error) -> String {
    let user_error = error
        .downcast_ref::<PipelineError>()
        .is_some_and(PipelineError::is_user_error);
    if user_error {
        format!("❌ エラー: {error:#}\n   run with --help for usage")
    } else {
        format!("❌ エラー: {error:#}")
    }
}
