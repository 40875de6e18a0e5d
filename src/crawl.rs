use crate::config::CrawlSettings;
use crate::output::{self, RunDir};
use crate::runner::ToolCommand;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Default, Clone)]
pub struct CrawlOutcome {
    /// Set when the crawler left its output file behind.
    pub artifact: Option<PathBuf>,
    /// Non-blank lines of that file, for display.
    pub urls: Vec<String>,
}

/// Web crawl through `katana`. The tool writes its own output file, which is kept as is.
pub struct Crawler {
    binary: String,
    settings: CrawlSettings,
}

impl Crawler {
    pub fn new(binary: &str, settings: CrawlSettings) -> Self {
        Self {
            binary: binary.to_string(),
            settings,
        }
    }

    pub fn command(&self, input: &Path, output: &Path) -> ToolCommand {
        ToolCommand::new(&self.binary, Duration::from_secs(self.settings.budget_secs))
            .arg("-list")
            .path_arg(input)
            .arg("-concurrency")
            .arg(self.settings.concurrency.to_string())
            .args(["-silent", "-jc", "-output"])
            .path_arg(output)
    }

    pub fn run(&self, input: &Path, run: &RunDir) -> CrawlOutcome {
        println!("[*] Crawling URLs from {}...", input.display());

        if output::is_missing_or_empty(input) {
            log::warn!("Input file {} is empty or missing", input.display());
            return CrawlOutcome::default();
        }

        let crawl_file = run.artifact(output::CRAWL_FILE);
        if let Err(e) = self.command(input, &crawl_file).run() {
            log::warn!("Web crawl failed: {}", e);
        }

        // Whatever the crawler managed to write before failing is still worth showing.
        if !crawl_file.is_file() {
            return CrawlOutcome::default();
        }
        match output::read_lines(&crawl_file) {
            Ok(urls) => CrawlOutcome {
                artifact: Some(crawl_file),
                urls,
            },
            Err(e) => {
                log::warn!("Cannot read {}: {}", crawl_file.display(), e);
                CrawlOutcome {
                    artifact: Some(crawl_file),
                    urls: Vec::new(),
                }
            }
        }
    }
}
