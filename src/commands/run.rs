use anyhow::Result;
use std::path::PathBuf;

use gleaner::config::Config;
use gleaner::storage::QueueFile;

use crate::commands::{discover, download};

/// Full pipeline: discovery, then download when the queue has work
pub async fn run(config: &Config, inputs: &[PathBuf]) -> Result<()> {
    let report = discover::discover(config, inputs).await?;
    if report.interrupted {
        return Ok(());
    }

    let queue = QueueFile::new(&config.output.queue_file);
    if report.links_found > 0 || !queue.load()?.is_empty() {
        println!("\nSwitching to download phase...\n");
        download::download(config).await?;
    } else {
        println!("\nSkipping download: the queue is empty.");
    }

    Ok(())
}
