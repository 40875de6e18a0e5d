use super::Producer;
use crate::config::{BruteForceSettings, ReconConfig};
use crate::error::ProducerError;
use crate::output;
use crate::runner::ToolCommand;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::Builder;

/// Small word set used when the built-in wordlist is switched on.
pub const BUILTIN_WORDS: &[&str] = &[
    "www", "mail", "api", "dev", "staging", "test", "admin", "portal", "vpn", "blog", "shop",
    "app", "beta", "cdn", "docs", "git", "internal", "static", "m", "ftp",
];

/// Wordlist-driven DNS brute force through `gobuster dns`.
pub struct BruteForce {
    binary: String,
    wordlists: Vec<PathBuf>,
    builtin: bool,
    settings: BruteForceSettings,
}

impl BruteForce {
    pub fn new(binary: &str, wordlists: Vec<PathBuf>, settings: BruteForceSettings) -> Self {
        Self {
            binary: binary.to_string(),
            wordlists,
            builtin: false,
            settings,
        }
    }

    pub fn from_config(config: &ReconConfig) -> Self {
        Self::new(&config.tools.gobuster, config.wordlists.clone(), config.brute_force.clone())
            .with_builtin(config.builtin_wordlist)
    }

    pub fn with_builtin(mut self, builtin: bool) -> Self {
        self.builtin = builtin;
        self
    }

    pub fn command(&self, domain: &str, wordlist: &Path, output: &Path) -> ToolCommand {
        ToolCommand::new(&self.binary, Duration::from_secs(self.settings.budget_secs))
            .args(["dns", "-d", domain, "-w"])
            .path_arg(wordlist)
            .arg("-t")
            .arg(self.settings.threads.to_string())
            .arg("--timeout")
            .arg(&self.settings.dns_timeout)
            .arg("-o")
            .path_arg(output)
    }

    /// One tool run over `words`. Both scratch files are removed when this returns.
    fn scan(&self, domain: &str, words: &[String]) -> Result<Vec<String>, ProducerError> {
        let mut wordlist = Builder::new().prefix("tyson_words_").suffix(".txt").tempfile()?;
        wordlist.write_all(words.join("\n").as_bytes())?;
        wordlist.flush()?;

        let found_file = Builder::new().prefix("tyson_gobuster_").suffix(".txt").tempfile()?;
        let result = self.command(domain, wordlist.path(), found_file.path()).run()?;

        let written = fs::read_to_string(found_file.path()).unwrap_or_default();
        let text = if written.trim().is_empty() { result.stdout } else { written };
        Ok(parse_found_lines(&text))
    }

    fn scan_logged(&self, domain: &str, label: &str, words: &[String]) -> Vec<String> {
        if words.is_empty() {
            log::warn!("Wordlist {} is empty, skipping", label);
            return Vec::new();
        }
        match self.scan(domain, words) {
            Ok(found) => {
                log::debug!("gobuster found {} names with {}", found.len(), label);
                found
            }
            Err(e) => {
                log::warn!("gobuster run with {} failed: {}", label, e);
                Vec::new()
            }
        }
    }
}

impl Producer for BruteForce {
    fn name(&self) -> &str {
        "gobuster"
    }

    fn fetch(&self, domain: &str) -> Result<Vec<String>, ProducerError> {
        println!("🔍 Running gobuster (bruteforce)...");
        let mut found = Vec::new();

        for path in &self.wordlists {
            if !path.is_file() {
                log::warn!("Wordlist not found: {}", path.display());
                continue;
            }
            let words = match output::read_lines(path) {
                Ok(words) => words,
                Err(e) => {
                    log::warn!("Cannot read wordlist {}: {}", path.display(), e);
                    continue;
                }
            };
            found.extend(self.scan_logged(domain, &path.display().to_string(), &words));
        }

        if self.builtin {
            let words: Vec<String> = BUILTIN_WORDS.iter().map(|w| w.to_string()).collect();
            found.extend(self.scan_logged(domain, "built-in wordlist", &words));
        }

        Ok(found)
    }
}

/// Keeps the name after `Found:` on each matching line and ignores everything else.
pub fn parse_found_lines(text: &str) -> Vec<String> {
    text.lines()
        .filter_map(|line| {
            let (_, rest) = line.split_once("Found:")?;
            rest.split_whitespace().next().map(str::to_string)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> BruteForceSettings {
        BruteForceSettings::default()
    }

    #[test]
    fn test_parse_found_lines() {
        let text = "===============\nGobuster v3.6\n[+] Domain: example.com\n\
                    Found: www.example.com\n\nFound: api.example.com [10.0.0.1]\nProgress: 20 / 20\n";
        assert_eq!(parse_found_lines(text), vec!["www.example.com", "api.example.com"]);
    }

    #[test]
    fn test_parse_found_lines_unknown_format_is_empty() {
        assert!(parse_found_lines("www.example.com\nHIT api.example.com\n").is_empty());
    }

    #[test]
    fn test_command_shape() {
        let bf = BruteForce::new("gobuster", Vec::new(), settings());
        let cmd = bf.command("example.com", Path::new("/tmp/w.txt"), Path::new("/tmp/o.txt"));
        assert_eq!(
            cmd.display(),
            "gobuster dns -d example.com -w /tmp/w.txt -t 50 --timeout 15s -o /tmp/o.txt"
        );
    }

    #[test]
    fn test_missing_wordlist_is_skipped() {
        let bf = BruteForce::new(
            "tyson-no-such-gobuster",
            vec![PathBuf::from("/nonexistent/words.txt")],
            settings(),
        );
        assert!(bf.fetch("example.com").unwrap().is_empty());
    }

    #[test]
    fn test_missing_binary_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let words = dir.path().join("words.txt");
        fs::write(&words, "www\n\napi\n").unwrap();
        let bf = BruteForce::new("tyson-no-such-gobuster", vec![words], settings()).with_builtin(true);
        assert!(bf.fetch("example.com").unwrap().is_empty());
    }
}
