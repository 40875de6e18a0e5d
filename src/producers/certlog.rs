use super::Producer;
use crate::config::CertLogSettings;
use crate::error::ProducerError;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::blocking::{Client, Request};
use serde::Deserialize;
use std::time::Duration;

static HOSTNAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:[A-Za-z0-9_](?:[A-Za-z0-9_-]{0,61}[A-Za-z0-9_])?\.)+[A-Za-z][A-Za-z0-9-]{0,61}[A-Za-z0-9]")
        .expect("hostname pattern compiles")
});

#[derive(Debug, Deserialize)]
struct CertEntry {
    #[serde(default)]
    name_value: String,
}

/// Certificate-transparency lookup against a crt.sh style endpoint.
pub struct CertLog {
    settings: CertLogSettings,
}

impl CertLog {
    pub fn new(settings: CertLogSettings) -> Self {
        Self { settings }
    }

    /// Builds the lookup request. The query pairs are percent-encoded, so a
    /// target containing `&`, `#` or spaces stays inside the `q` parameter.
    pub fn request(&self, client: &Client, domain: &str) -> reqwest::Result<Request> {
        let pattern = format!("%.{}", domain);
        client
            .get(&self.settings.endpoint)
            .query(&[("q", pattern.as_str()), ("output", "json")])
            .build()
    }
}

impl Producer for CertLog {
    fn name(&self) -> &str {
        "crt.sh"
    }

    fn fetch(&self, domain: &str) -> Result<Vec<String>, ProducerError> {
        println!("🔍 Running crt.sh...");
        let client = Client::builder()
            .timeout(Duration::from_secs(self.settings.request_timeout_secs))
            .build()?;

        let resp = client.execute(self.request(&client, domain)?)?;
        if !resp.status().is_success() {
            return Err(ProducerError::Status(resp.status().as_u16()));
        }
        let body = resp.text()?;
        extract_names(&body)
    }
}

/// Pulls hostname-shaped names out of a crt.sh JSON body, sorted and unique.
pub fn extract_names(body: &str) -> Result<Vec<String>, ProducerError> {
    let entries: Vec<CertEntry> = serde_json::from_str(body)?;
    let mut names: Vec<String> = entries
        .iter()
        .flat_map(|entry| HOSTNAME.find_iter(&entry.name_value))
        .map(|m| m.as_str().to_string())
        .collect();
    names.sort();
    names.dedup();
    Ok(names)
}
