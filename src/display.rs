use crate::aggregate::AggregationReport;
use crate::crawl::CrawlOutcome;
use crate::probe::{ProbeOutcome, ProbeStatus, StatusClass};
use colored::Colorize;
use std::path::{Path, PathBuf};

const CRAWL_PREVIEW: usize = 10;

pub fn enumeration_banner(domain: &str) {
    println!("🎯 Starting subdomain enumeration for: {}", domain.cyan());
    println!("{}", "-".repeat(50));
}

pub fn enumeration_summary(report: &AggregationReport, artifact: &Path) {
    println!("\n📊 Results:");
    for (name, count) in &report.per_source {
        println!("{} found: {} unique subdomains", name, count);
    }
    println!("Total unique subdomains: {}", report.total_unique.to_string().green());
    println!("\n💾 Results saved to: {}", artifact.display());
}

/// One console line for a probed URL, annotated by its status bucket.
pub fn probe_line(url: &str, status: &ProbeStatus) -> String {
    let class = status.class();
    let base = format!("{} [{}]", url, status);
    match (class, class.annotation()) {
        (StatusClass::TryBypass, Some(note)) => format!("{} {}", base.red(), note),
        (StatusClass::Confirmed, Some(note)) => format!("{} {}", base.green(), note),
        _ => base,
    }
}

pub fn probe_summary(outcome: &ProbeOutcome, detailed: bool) {
    println!("\n📊 Results: {} live subdomains found", outcome.live.len());
    println!("\n🌐 Live Subdomains:");
    for url in &outcome.live {
        println!("{}", probe_line(url, &outcome.status_of(url)));
    }

    match &outcome.live_file {
        Some(path) => println!("\n💾 Clean URLs saved to: {}", path.display()),
        None => println!("\n{} No live URLs to save", "[!]".yellow()),
    }
    if detailed {
        match &outcome.report_file {
            Some(path) => println!("📋 Detailed results (excluding redirects) saved to: {}", path.display()),
            None => println!("{} No detailed results to save", "[!]".yellow()),
        }
    }
}

pub fn crawl_summary(outcome: &CrawlOutcome) {
    let Some(artifact) = &outcome.artifact else {
        println!("{} Crawler produced no output", "[!]".yellow());
        return;
    };
    println!("\n📊 Results: {} URLs found", outcome.urls.len());
    println!("\n🌐 Crawled URLs (first {}):", CRAWL_PREVIEW);
    for url in outcome.urls.iter().take(CRAWL_PREVIEW) {
        println!("{}", url);
    }
    if outcome.urls.len() > CRAWL_PREVIEW {
        println!("...");
    }
    println!("\n💾 Results saved to: {}", artifact.display());
}

pub fn tool_report(tools: &[(String, Option<PathBuf>)]) {
    println!("\n🔍 Checking required tools:\n");
    for (tool, found) in tools {
        match found {
            Some(path) => println!("✅ {} is installed ({})", tool.green(), path.display()),
            None => println!("❌ {} is missing", tool.red()),
        }
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_line_buckets() {
        colored::control::set_override(false);
        assert_eq!(
            probe_line("https://a.example.com", &ProbeStatus::Code(403)),
            "https://a.example.com [403] 🚨 (403 - try bypassing!)"
        );
        assert_eq!(
            probe_line("https://a.example.com", &ProbeStatus::Code(200)),
            "https://a.example.com [200] ✅"
        );
        assert_eq!(
            probe_line("https://a.example.com", &ProbeStatus::Code(404)),
            "https://a.example.com [404]"
        );
        assert_eq!(
            probe_line("https://a.example.com", &ProbeStatus::Unknown),
            "https://a.example.com [Unknown]"
        );
    }
}
