pub mod bruteforce;
pub mod certlog;
pub mod passive;

pub use bruteforce::BruteForce;
pub use certlog::CertLog;
pub use passive::{AssetFinder, Subfinder};

use crate::config::ReconConfig;
use crate::error::ProducerError;

/// A data source that turns a target domain into raw candidate names.
pub trait Producer {
    fn name(&self) -> &str;

    /// Queries the source. Output is raw: duplicates, blanks and padding are allowed.
    fn fetch(&self, domain: &str) -> Result<Vec<String>, ProducerError>;

    /// Like `fetch`, but any failure becomes an empty result plus a diagnostic.
    fn produce(&self, domain: &str) -> Vec<String> {
        match self.fetch(domain) {
            Ok(candidates) => candidates,
            Err(e) => {
                log::warn!("{} failed: {}", self.name(), e);
                Vec::new()
            }
        }
    }
}

/// The enumeration sources in the order they run and merge.
pub fn default_producers(config: &ReconConfig) -> Vec<Box<dyn Producer>> {
    vec![
        Box::new(Subfinder::new(&config.tools.subfinder, config.passive_budget())),
        Box::new(AssetFinder::new(&config.tools.assetfinder, config.passive_budget())),
        Box::new(CertLog::new(config.ct.clone())),
        Box::new(BruteForce::from_config(config)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ToolError;

    struct Broken;

    impl Producer for Broken {
        fn name(&self) -> &str {
            "broken"
        }

        fn fetch(&self, _domain: &str) -> Result<Vec<String>, ProducerError> {
            Err(ToolError::NotFound { tool: "broken".to_string() }.into())
        }
    }

    #[test]
    fn test_failure_becomes_empty() {
        assert!(Broken.produce("example.com").is_empty());
    }

    #[test]
    fn test_default_order() {
        let producers = default_producers(&ReconConfig::new());
        let names: Vec<&str> = producers.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["subfinder", "assetfinder", "crt.sh", "gobuster"]);
    }
}
