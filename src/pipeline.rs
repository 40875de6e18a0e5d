use crate::aggregate::{AggregationReport, Aggregator};
use crate::config::ReconConfig;
use crate::crawl::{CrawlOutcome, Crawler};
use crate::display;
use crate::output::{self, RunDir};
use crate::probe::{ProbeFormat, ProbeOutcome, Prober};
use crate::producers::{self, Producer};
use crate::runner;
use anyhow::Context;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct EnumerationOutcome {
    /// Merged candidates in first-seen order.
    pub subdomains: Vec<String>,
    pub report: AggregationReport,
    /// Sorted copy on disk.
    pub artifact: PathBuf,
}

/// Runs every configured source for `domain` and writes `domains.txt`.
pub fn enumerate(config: &ReconConfig, domain: &str, run: &RunDir) -> anyhow::Result<EnumerationOutcome> {
    let producers = producers::default_producers(config);
    enumerate_with(&producers, domain, run)
}

/// Runs `producers` one after another in the given order and persists the merge.
pub fn enumerate_with(
    producers: &[Box<dyn Producer>],
    domain: &str,
    run: &RunDir,
) -> anyhow::Result<EnumerationOutcome> {
    display::enumeration_banner(domain);

    let mut aggregator = Aggregator::new();
    for producer in producers {
        aggregator.collect(producer.as_ref(), domain);
    }

    let artifact = run.artifact(output::DOMAINS_FILE);
    let subdomains = aggregator
        .persist(&artifact)
        .with_context(|| format!("writing {}", artifact.display()))?;
    let report = aggregator.report();

    display::enumeration_summary(&report, &artifact);

    Ok(EnumerationOutcome {
        subdomains,
        report,
        artifact,
    })
}

pub fn live_check(
    config: &ReconConfig,
    input: &Path,
    run: &RunDir,
    detailed: bool,
) -> anyhow::Result<ProbeOutcome> {
    let prober = Prober::new(&config.tools.httpx, config.probe.clone(), ProbeFormat::from_detailed(detailed));
    let outcome = prober.run(input, run)?;
    display::probe_summary(&outcome, detailed);
    Ok(outcome)
}

pub fn web_crawl(config: &ReconConfig, input: &Path, run: &RunDir) -> CrawlOutcome {
    let outcome = Crawler::new(&config.tools.katana, config.crawl.clone()).run(input, run);
    display::crawl_summary(&outcome);
    outcome
}

/// Resolves every configured tool on PATH.
pub fn check_tools(config: &ReconConfig) -> Vec<(String, Option<PathBuf>)> {
    config
        .tools
        .all()
        .iter()
        .map(|tool| (tool.to_string(), runner::resolve_binary(tool)))
        .collect()
}

/// Picks a stage input: the explicit path if given, else an artifact this run already wrote.
pub fn resolve_input(explicit: Option<&Path>, run: &RunDir, produced: &str) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    let candidate = run.artifact(produced);
    candidate.is_file().then_some(candidate)
}
