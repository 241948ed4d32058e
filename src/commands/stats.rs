use anyhow::{Context, Result};

use gleaner::config::Config;
use gleaner::storage::QueueFile;

/// Show the state of the queue and the article directory
pub fn stats(config: &Config) -> Result<()> {
    let queue = QueueFile::new(&config.output.queue_file);
    let queued = queue.load()?.len();

    let articles_dir = config.articles_dir();
    let saved = if articles_dir.is_dir() {
        std::fs::read_dir(&articles_dir)
            .with_context(|| format!("Failed to read {}", articles_dir.display()))?
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "txt"))
            .count()
    } else {
        0
    };

    println!("Pipeline Status");
    println!("===============");
    println!("Queue file:     {}", queue.path().display());
    println!("Queued URLs:    {queued}");
    println!("Articles dir:   {}", articles_dir.display());
    println!("Saved articles: {saved}");

    Ok(())
}
