pub mod json;
pub mod plain;

use crate::config::ProbeSettings;
use crate::output::{self, RunDir};
use crate::runner::ToolCommand;
use anyhow::Context;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Which output the probing tool is asked for, and so which parser reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeFormat {
    /// `<url> [<status>]` lines.
    Plain,
    /// One JSON object per line, with title and technology tags.
    Json,
}

impl ProbeFormat {
    pub fn from_detailed(detailed: bool) -> Self {
        if detailed {
            ProbeFormat::Json
        } else {
            ProbeFormat::Plain
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeStatus {
    Code(u16),
    /// A bracketed token that was not a number.
    Raw(String),
    Unknown,
}

impl ProbeStatus {
    pub fn from_token(token: &str) -> Self {
        let token = token.trim();
        if !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(code) = token.parse() {
                return ProbeStatus::Code(code);
            }
        }
        ProbeStatus::Raw(token.to_string())
    }

    pub fn code(&self) -> Option<u16> {
        match self {
            ProbeStatus::Code(code) => Some(*code),
            _ => None,
        }
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self.code(), Some(301) | Some(302))
    }

    pub fn class(&self) -> StatusClass {
        match self.code() {
            Some(403) => StatusClass::TryBypass,
            Some(200) => StatusClass::Confirmed,
            _ => StatusClass::Plain,
        }
    }
}

impl fmt::Display for ProbeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeStatus::Code(code) => write!(f, "{}", code),
            ProbeStatus::Raw(raw) => write!(f, "{}", raw),
            ProbeStatus::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Console buckets for a probed URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    /// 403: worth trying access-control bypasses.
    TryBypass,
    /// 200.
    Confirmed,
    Plain,
}

impl StatusClass {
    pub fn annotation(&self) -> Option<&'static str> {
        match self {
            StatusClass::TryBypass => Some("🚨 (403 - try bypassing!)"),
            StatusClass::Confirmed => Some("✅"),
            StatusClass::Plain => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Technology {
    pub name: String,
    pub version: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeRecord {
    pub url: String,
    pub status: ProbeStatus,
    pub title: Option<String>,
    pub technologies: Vec<Technology>,
}

impl ProbeRecord {
    pub fn new(url: &str, status: ProbeStatus) -> Self {
        Self {
            url: url.to_string(),
            status,
            title: None,
            technologies: Vec::new(),
        }
    }

    /// Redirects are live but never reported.
    pub fn is_reportable(&self) -> bool {
        !self.status.is_redirect()
    }

    pub fn report_line(&self) -> String {
        let title = self.title.as_deref().unwrap_or("No Title");
        let names: Vec<&str> = self.technologies.iter().map(|t| t.name.as_str()).collect();
        let mut line = format!("{} [{}] [{}] [{}]", self.url, self.status, title, names.join(", "));

        let versions: Vec<String> = self
            .technologies
            .iter()
            .filter_map(|t| t.version.as_ref().map(|v| format!("{} {}", t.name, v).trim().to_string()))
            .collect();
        if !versions.is_empty() {
            line.push_str(&format!(" [Versions: {}]", versions.join(", ")));
        }
        line
    }
}

/// Runs the matching parser over every non-blank line, skipping lines it rejects.
pub fn parse_probe_output(format: ProbeFormat, text: &str) -> Vec<ProbeRecord> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| match format {
            ProbeFormat::Plain => plain::parse_line(line),
            ProbeFormat::Json => json::parse_line(line),
        })
        .collect()
}

#[derive(Debug, Default, Clone)]
pub struct ProbeOutcome {
    /// Every probed URL in tool output order.
    pub live: Vec<String>,
    pub statuses: HashMap<String, ProbeStatus>,
    /// Enriched lines, detailed mode only, redirects excluded.
    pub report: Vec<String>,
    pub live_file: Option<PathBuf>,
    pub report_file: Option<PathBuf>,
}

impl ProbeOutcome {
    pub fn from_records(format: ProbeFormat, records: Vec<ProbeRecord>) -> Self {
        let mut outcome = ProbeOutcome::default();
        for record in records {
            if format == ProbeFormat::Json && record.is_reportable() {
                outcome.report.push(record.report_line());
            }
            outcome.live.push(record.url.clone());
            outcome.statuses.insert(record.url, record.status);
        }
        outcome
    }

    pub fn status_of(&self, url: &str) -> ProbeStatus {
        self.statuses.get(url).cloned().unwrap_or(ProbeStatus::Unknown)
    }
}

/// Liveness check through `httpx`.
pub struct Prober {
    binary: String,
    settings: ProbeSettings,
    format: ProbeFormat,
}

impl Prober {
    pub fn new(binary: &str, settings: ProbeSettings, format: ProbeFormat) -> Self {
        Self {
            binary: binary.to_string(),
            settings,
            format,
        }
    }

    pub fn format(&self) -> ProbeFormat {
        self.format
    }

    pub fn command(&self, input: &Path) -> ToolCommand {
        let cmd = ToolCommand::new(&self.binary, Duration::from_secs(self.settings.budget_secs))
            .arg("-l")
            .path_arg(input)
            .args(["-sc", "-fr", "-timeout"])
            .arg(self.settings.request_timeout_secs.to_string())
            .arg("-t")
            .arg(self.settings.threads.to_string())
            .arg("-rl")
            .arg(self.settings.rate_limit.to_string());
        match self.format {
            ProbeFormat::Plain => cmd,
            ProbeFormat::Json => cmd.args(["-title", "-td", "-json"]),
        }
    }

    /// Probes every candidate in `input` and writes the live list and the report into `run`.
    ///
    /// A missing or empty input returns an empty outcome without running the tool.
    /// Tool failures are logged and also produce an empty outcome.
    pub fn run(&self, input: &Path, run: &RunDir) -> anyhow::Result<ProbeOutcome> {
        println!("[*] Checking live subdomains from {}...", input.display());

        if output::is_missing_or_empty(input) {
            log::warn!("Input file {} is empty or missing", input.display());
            return Ok(ProbeOutcome::default());
        }

        let stdout = match self.command(input).run() {
            Ok(out) => out.stdout,
            Err(e) => {
                log::warn!("Live check failed: {}", e);
                return Ok(ProbeOutcome::default());
            }
        };

        let mut outcome = ProbeOutcome::from_records(self.format, parse_probe_output(self.format, &stdout));

        if !outcome.live.is_empty() {
            let path = run.artifact(output::LIVE_FILE);
            output::write_lines(&path, &outcome.live)
                .with_context(|| format!("writing {}", path.display()))?;
            outcome.live_file = Some(path);
        }

        if self.format == ProbeFormat::Json && !outcome.report.is_empty() {
            let path = run.artifact(output::DETAILED_FILE);
            output::write_lines(&path, &outcome.report)
                .with_context(|| format!("writing {}", path.display()))?;
            outcome.report_file = Some(path);
        }

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_buckets() {
        assert_eq!(ProbeStatus::Code(403).class(), StatusClass::TryBypass);
        assert_eq!(ProbeStatus::Code(200).class(), StatusClass::Confirmed);
        assert_eq!(ProbeStatus::Code(301).class(), StatusClass::Plain);
        assert_eq!(ProbeStatus::Code(404).class(), StatusClass::Plain);
        assert_eq!(ProbeStatus::Unknown.class(), StatusClass::Plain);
        assert_eq!(ProbeStatus::Raw("forbidden".to_string()).class(), StatusClass::Plain);
        assert!(StatusClass::TryBypass.annotation().unwrap().contains("try bypassing"));
        assert_eq!(StatusClass::Plain.annotation(), None);
    }

    #[test]
    fn test_from_token() {
        assert_eq!(ProbeStatus::from_token("200"), ProbeStatus::Code(200));
        assert_eq!(ProbeStatus::from_token("-1"), ProbeStatus::Raw("-1".to_string()));
        assert_eq!(ProbeStatus::from_token("99999"), ProbeStatus::Raw("99999".to_string()));
        assert_eq!(ProbeStatus::Unknown.to_string(), "Unknown");
    }

    #[test]
    fn test_report_line() {
        let mut record = ProbeRecord::new("https://a.example.com", ProbeStatus::Code(200));
        assert_eq!(record.report_line(), "https://a.example.com [200] [No Title] []");

        record.title = Some("Shop".to_string());
        record.technologies = vec![
            Technology { name: "Nginx".to_string(), version: Some("1.25".to_string()) },
            Technology { name: "jQuery".to_string(), version: None },
        ];
        assert_eq!(
            record.report_line(),
            "https://a.example.com [200] [Shop] [Nginx, jQuery] [Versions: Nginx 1.25]"
        );
    }

    #[test]
    fn test_plain_line_scenario() {
        let records = parse_probe_output(ProbeFormat::Plain, "https://a.example.com [403]\n");
        let outcome = ProbeOutcome::from_records(ProbeFormat::Plain, records);
        assert_eq!(outcome.live, vec!["https://a.example.com"]);
        assert_eq!(outcome.status_of("https://a.example.com"), ProbeStatus::Code(403));
        assert_eq!(outcome.status_of("https://a.example.com").class(), StatusClass::TryBypass);
        assert!(outcome.report.is_empty());
    }

    #[test]
    fn test_malformed_json_line_is_skipped() {
        let text = "{\"url\":\"https://a.example.com\",\"status_code\":200}\n{not json\n\n";
        let outcome = ProbeOutcome::from_records(ProbeFormat::Json, parse_probe_output(ProbeFormat::Json, text));
        assert_eq!(outcome.live.len(), 1);
        assert_eq!(outcome.report.len(), 1);
    }

    #[test]
    fn test_redirect_is_live_but_not_reported() {
        let text = "{\"url\":\"https://old.example.com\",\"status_code\":301}\n\
                    {\"url\":\"https://tmp.example.com\",\"status_code\":302}\n\
                    {\"url\":\"https://new.example.com\",\"status_code\":200}\n";
        let outcome = ProbeOutcome::from_records(ProbeFormat::Json, parse_probe_output(ProbeFormat::Json, text));
        assert_eq!(outcome.live.len(), 3);
        assert_eq!(outcome.status_of("https://old.example.com"), ProbeStatus::Code(301));
        assert_eq!(outcome.report, vec!["https://new.example.com [200] [No Title] []"]);
    }

    #[test]
    fn test_command_flags() {
        let plain = Prober::new("httpx", ProbeSettings::default(), ProbeFormat::Plain);
        assert_eq!(
            plain.command(Path::new("domains.txt")).display(),
            "httpx -l domains.txt -sc -fr -timeout 10 -t 50 -rl 50"
        );
        let detailed = Prober::new("httpx", ProbeSettings::default(), ProbeFormat::from_detailed(true));
        assert!(detailed.command(Path::new("domains.txt")).display().ends_with("-rl 50 -title -td -json"));
    }
}
