//! Splitarc CLI: archive a directory as size-capped containers.

use anyhow::Result;
use clap::Parser;
use splitarc::engine::arg_parser::Cli;
use splitarc::engine::handle_run;
use std::time::Instant;

fn main() -> Result<()> {
    let start_time = Instant::now();
    let cli = Cli::parse();
    handle_run(&cli)?;
    log::debug!("Total time: {:?}", start_time.elapsed());
    Ok(())
}
