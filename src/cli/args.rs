use crate::services::DefaultPipelineConfig;
use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "widget_line")]
#[command(about = "A producer/consumer widget production line that halts on a broken widget")]
#[command(version)]
pub struct Cli {
    /// Number of widgets to produce
    #[arg(short = 'n', long = "widgets", default_value_t = 10)]
    pub widgets: u64,

    /// Number of producer workers
    #[arg(short = 'p', long, default_value_t = 1)]
    pub producers: usize,

    /// Number of consumer workers
    #[arg(short = 'c', long, default_value_t = 1)]
    pub consumers: usize,

    /// 1-based position of the broken widget (0 or negative for none)
    #[arg(short = 'k', long = "kth", default_value_t = -1, allow_negative_numbers = true)]
    pub kth: i64,

    /// Output queue capacity (0 for one slot per widget)
    #[arg(short = 'b', long, default_value_t = 0)]
    pub buffer_size: usize,

    /// Seed for reproducible widget ids
    #[arg(long)]
    pub seed: Option<u64>,

    /// Suppress per-widget lines
    #[arg(short, long)]
    pub quiet: bool,

    /// Print the run summary as JSON
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    pub fn to_config(&self) -> DefaultPipelineConfig {
        DefaultPipelineConfig::new(self.widgets)
            .with_producers(self.producers)
            .with_consumers(self.consumers)
            .with_defect_index(self.kth)
            .with_buffer_size(self.buffer_size)
    }
}
