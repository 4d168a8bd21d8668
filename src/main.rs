use anyhow::Result;
use clap::Parser;
use std::time::Instant;

use widget_line::cli::{
    commands::{execute_run, failure_message},
    Cli,
};

#[tokio::main]
async fn main() -> Result<()> {
    let time_begin = Instant::now();
    let cli = Cli::parse();

    if let Err(error) = execute_run(&cli).await {
        eprintln!("{}", failure_message(&error));
        std::process::exit(1);
    }

    println!(
        "The program took [ {:?} ] to finish.",
        time_begin.elapsed()
    );
    Ok(())
}
