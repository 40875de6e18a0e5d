use super::Producer;
use crate::error::ProducerError;
use crate::runner::ToolCommand;
use std::time::Duration;

/// `subfinder -d <domain> -silent`
pub struct Subfinder {
    binary: String,
    budget: Duration,
}

impl Subfinder {
    pub fn new(binary: &str, budget: Duration) -> Self {
        Self {
            binary: binary.to_string(),
            budget,
        }
    }

    pub fn command(&self, domain: &str) -> ToolCommand {
        ToolCommand::new(&self.binary, self.budget).args(["-d", domain, "-silent"])
    }
}

impl Producer for Subfinder {
    fn name(&self) -> &str {
        "subfinder"
    }

    fn fetch(&self, domain: &str) -> Result<Vec<String>, ProducerError> {
        println!("🔍 Running subfinder...");
        Ok(self.command(domain).run()?.lines())
    }
}

/// `assetfinder <domain>`
pub struct AssetFinder {
    binary: String,
    budget: Duration,
}

impl AssetFinder {
    pub fn new(binary: &str, budget: Duration) -> Self {
        Self {
            binary: binary.to_string(),
            budget,
        }
    }

    pub fn command(&self, domain: &str) -> ToolCommand {
        ToolCommand::new(&self.binary, self.budget).arg(domain)
    }
}

impl Producer for AssetFinder {
    fn name(&self) -> &str {
        "assetfinder"
    }

    fn fetch(&self, domain: &str) -> Result<Vec<String>, ProducerError> {
        println!("🔍 Running assetfinder...");
        Ok(self.command(domain).run()?.lines())
    }
}
