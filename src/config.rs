use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Wordlists every brute-force run starts from. User lists are appended.
pub const DEFAULT_WORDLISTS: &[&str] = &["wordlists/common_subdomains.txt"];

/// Run-wide settings, built once at startup and handed to every stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconConfig {
    pub output_root: PathBuf,
    pub wordlists: Vec<PathBuf>,
    pub builtin_wordlist: bool,
    pub tools: ToolPaths,
    pub passive_budget_secs: u64,
    pub ct: CertLogSettings,
    pub brute_force: BruteForceSettings,
    pub probe: ProbeSettings,
    pub crawl: CrawlSettings,
}

/// Binary names (or absolute paths) of the external adapters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolPaths {
    pub subfinder: String,
    pub assetfinder: String,
    pub gobuster: String,
    pub httpx: String,
    pub katana: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CertLogSettings {
    pub endpoint: String,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BruteForceSettings {
    pub threads: usize,
    /// Per-query DNS timeout handed to the tool, e.g. `15s`.
    pub dns_timeout: String,
    pub budget_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeSettings {
    pub threads: usize,
    pub request_timeout_secs: u64,
    pub rate_limit: u32,
    pub budget_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CrawlSettings {
    pub concurrency: usize,
    pub budget_secs: u64,
}

impl Default for ReconConfig {
    fn default() -> Self {
        Self {
            output_root: PathBuf::from("results"),
            wordlists: DEFAULT_WORDLISTS.iter().map(|p| PathBuf::from(*p)).collect(),
            builtin_wordlist: false,
            tools: ToolPaths::default(),
            passive_budget_secs: 300,
            ct: CertLogSettings::default(),
            brute_force: BruteForceSettings::default(),
            probe: ProbeSettings::default(),
            crawl: CrawlSettings::default(),
        }
    }
}

impl Default for ToolPaths {
    fn default() -> Self {
        Self {
            subfinder: "subfinder".to_string(),
            assetfinder: "assetfinder".to_string(),
            gobuster: "gobuster".to_string(),
            httpx: "httpx".to_string(),
            katana: "katana".to_string(),
        }
    }
}

impl ToolPaths {
    pub fn all(&self) -> [&str; 5] {
        [
            self.subfinder.as_str(),
            self.assetfinder.as_str(),
            self.gobuster.as_str(),
            self.httpx.as_str(),
            self.katana.as_str(),
        ]
    }
}

impl Default for CertLogSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://crt.sh/".to_string(),
            request_timeout_secs: 60,
        }
    }
}

impl Default for BruteForceSettings {
    fn default() -> Self {
        Self {
            threads: 50,
            dns_timeout: "15s".to_string(),
            budget_secs: 300,
        }
    }
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            threads: 50,
            request_timeout_secs: 10,
            rate_limit: 50,
            budget_secs: 600,
        }
    }
}

impl Default for CrawlSettings {
    fn default() -> Self {
        Self {
            concurrency: 10,
            budget_secs: 1800,
        }
    }
}

impl ReconConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        let config: ReconConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_output_root(mut self, root: PathBuf) -> Self {
        self.output_root = root;
        self
    }

    /// Appends user wordlists after the configured ones, dropping repeats.
    pub fn with_extra_wordlists<I>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = PathBuf>,
    {
        for path in extra {
            if !self.wordlists.contains(&path) {
                self.wordlists.push(path);
            }
        }
        self
    }

    pub fn with_builtin_wordlist(mut self, enabled: bool) -> Self {
        self.builtin_wordlist = enabled;
        self
    }

    pub fn with_tools(mut self, tools: ToolPaths) -> Self {
        self.tools = tools;
        self
    }

    /// Forces the same wall-clock budget onto every external invocation.
    pub fn with_budget_override(mut self, secs: u64) -> Self {
        self.passive_budget_secs = secs;
        self.brute_force.budget_secs = secs;
        self.probe.budget_secs = secs;
        self.crawl.budget_secs = secs;
        self
    }

    pub fn passive_budget(&self) -> Duration {
        Duration::from_secs(self.passive_budget_secs)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.probe.threads == 0 || self.brute_force.threads == 0 {
            return Err(ConfigError::Invalid("thread counts must be greater than 0".to_string()));
        }
        if self.crawl.concurrency == 0 {
            return Err(ConfigError::Invalid("crawl concurrency must be greater than 0".to_string()));
        }
        if self.probe.rate_limit == 0 {
            return Err(ConfigError::Invalid("probe rate limit must be greater than 0".to_string()));
        }
        let budgets = [
            self.passive_budget_secs,
            self.brute_force.budget_secs,
            self.probe.budget_secs,
            self.crawl.budget_secs,
        ];
        if budgets.contains(&0) {
            return Err(ConfigError::Invalid("tool budgets must be greater than 0".to_string()));
        }
        if self.tools.all().iter().any(|t| t.trim().is_empty()) {
            return Err(ConfigError::Invalid("tool paths must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Splits a comma-separated `-w` value into paths, ignoring blank segments.
pub fn parse_wordlist_arg(raw: &str) -> Vec<PathBuf> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .collect()
}
