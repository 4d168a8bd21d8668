//! Widget production line.
//!
//! A fixed pool of producers turns numbered job slots into widgets and a
//! fixed pool of consumers evaluates them. When the widget at the configured
//! slot comes out broken, the consumer that sees it stops the whole line;
//! otherwise the line drains naturally. See [`engine::WidgetPipeline`].

pub mod cli;
pub mod core;
pub mod engine;
pub mod services;

pub use crate::core::{PipelineConfig, PipelineError, RunOutcome, RunSummary};
pub use engine::WidgetPipeline;
pub use services::DefaultPipelineConfig;
