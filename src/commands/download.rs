use anyhow::Result;
use tracing::warn;

use gleaner::config::Config;
use gleaner::downloader::Downloader;
use gleaner::models::StatsSnapshot;
use gleaner::storage::QueueFile;

/// Download phase: drain the queue into article files
pub async fn download(config: &Config) -> Result<StatsSnapshot> {
    let queue = QueueFile::new(&config.output.queue_file);
    if !queue.exists() {
        anyhow::bail!(
            "Queue file not found: {}. Run discover first.",
            queue.path().display()
        );
    }

    let urls = queue.load()?;

    println!("Phase 2: Download");
    println!("=================");
    println!("Queue size: {} articles", urls.len());

    let downloader =
        Downloader::new(config)?.with_progress(|n| println!("   >>> Saved {n} articles so far..."));

    // Ctrl-C abandons in-flight work; finished articles are already on
    // disk, so only the summary comes from a partial snapshot.
    let stats = tokio::select! {
        stats = downloader.download_all(&urls) => stats,
        _ = tokio::signal::ctrl_c() => {
            warn!("Download interrupted");
            println!("\nStopped by user.");
            downloader.stats()
        }
    };

    println!();
    println!(
        "Download complete: {} saved, {} failed, {} skipped",
        stats.saved, stats.failed, stats.skipped
    );
    println!("Files saved to: {}", config.articles_dir().display());

    Ok(stats)
}
