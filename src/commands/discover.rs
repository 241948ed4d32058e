use anyhow::Result;
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::{info, warn};

use gleaner::config::Config;
use gleaner::crawler::url;
use gleaner::crawler::DiscoveryEngine;
use gleaner::models::DiscoveryReport;
use gleaner::storage::QueueFile;
use gleaner::utils::domain_root;

/// Discovery phase: scan inputs, crawl domains, write the queue
///
/// The queue file is rewritten after every productive domain, so an
/// interrupted run can resume where it stopped.
pub async fn discover(config: &Config, inputs: &[PathBuf]) -> Result<DiscoveryReport> {
    println!("Phase 1: Discovery");
    println!("==================");

    if inputs.is_empty() {
        anyhow::bail!("No input files given. Pass one or more text files containing links.");
    }

    let domains = scan_input_files(inputs).await?;
    if domains.is_empty() {
        anyhow::bail!("No usable links found in the input files.");
    }
    println!("Checking {} unique domains", domains.len());

    let engine = DiscoveryEngine::new(config)?;
    let queue = QueueFile::new(&config.output.queue_file);

    let mut links: HashSet<String> = queue.load()?.into_iter().collect();
    if !links.is_empty() {
        info!(count = links.len(), "Resuming with pre-existing queue links");
        println!("Resuming with {} queued links", links.len());
    }

    let mut report = DiscoveryReport::default();

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    for domain in &domains {
        report.domains_checked += 1;

        let interrupted = tokio::select! {
            result = process_domain(&engine, &queue, domain, config, &mut links, &mut report) => {
                result?;
                false
            }
            _ = &mut ctrl_c => true,
        };

        if interrupted {
            warn!("Interrupted, flushing queue");
            queue.save(&links)?;
            report.links_found = links.len();
            report.interrupted = true;
            println!(
                "\nStopped by user. {} links saved to {}",
                links.len(),
                queue.path().display()
            );
            return Ok(report);
        }
    }

    queue.save(&links)?;
    report.links_found = links.len();

    println!();
    println!("Discovery complete");
    println!("  Domains checked:  {}", report.domains_checked);
    println!("  Domains accepted: {}", report.domains_accepted);
    println!("  Queue size:       {}", report.links_found);
    println!("  Queue file:       {}", queue.path().display());

    Ok(report)
}

/// Run relevance and discovery for one domain, then the politeness delay
async fn process_domain(
    engine: &DiscoveryEngine,
    queue: &QueueFile,
    domain: &str,
    config: &Config,
    links: &mut HashSet<String>,
    report: &mut DiscoveryReport,
) -> Result<()> {
    if engine.is_relevant(domain).await {
        report.domains_accepted += 1;
        println!("Scanning: {domain}");

        let found = engine.discover(domain).await;
        if found.is_empty() {
            println!("  - no articles found");
        } else {
            println!("  + found {} articles", found.len());
            links.extend(found);
            // Flush right away so a crash loses at most one domain.
            queue.save(links)?;
        }
    }

    tokio::time::sleep(config.domain_delay()).await;
    Ok(())
}

/// Reduce the input files to a sorted list of unique domain roots
async fn scan_input_files(inputs: &[PathBuf]) -> Result<Vec<String>> {
    let mut domains = HashSet::new();
    let mut raw_count = 0usize;

    for path in inputs {
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Could not read input file");
                continue;
            }
        };
        let text = String::from_utf8_lossy(&bytes);

        for fragment in url::scan_text(&text) {
            let Some(normalized) = url::normalize(&fragment) else {
                continue;
            };
            if url::has_asset_extension(&normalized) {
                continue;
            }
            raw_count += 1;
            if let Some(root) = domain_root(&normalized) {
                domains.insert(root);
            }
        }
    }

    info!(
        raw_links = raw_count,
        domains = domains.len(),
        "Input scan finished"
    );

    let mut sorted: Vec<String> = domains.into_iter().collect();
    sorted.sort_unstable();
    Ok(sorted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_scan_input_files_extracts_domains() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "check out https://ai-blog.example/post/1 and www.other.example/page,"
        )
        .unwrap();
        writeln!(file, "image at https://cdn.example/logo.png should vanish").unwrap();

        let domains = scan_input_files(&[file.path().to_path_buf()]).await.unwrap();
        assert_eq!(
            domains,
            vec!["https://ai-blog.example", "https://www.other.example"]
        );
    }

    #[tokio::test]
    async fn test_scan_input_files_survives_missing_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "https://ai-blog.example/post/1").unwrap();

        let inputs = vec![
            PathBuf::from("/definitely/not/here.txt"),
            file.path().to_path_buf(),
        ];
        let domains = scan_input_files(&inputs).await.unwrap();
        assert_eq!(domains, vec!["https://ai-blog.example"]);
    }

    #[tokio::test]
    async fn test_scan_input_files_lossy_on_bad_bytes() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"\xFF\xFE junk https://ai-blog.example/post/1 tail")
            .unwrap();

        let domains = scan_input_files(&[file.path().to_path_buf()]).await.unwrap();
        assert_eq!(domains, vec!["https://ai-blog.example"]);
    }
}
