use super::{ProbeRecord, ProbeStatus, Technology};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct HttpxLine {
    #[serde(default)]
    url: String,
    #[serde(default)]
    status_code: Option<u16>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default, alias = "tech")]
    technologies: Vec<TechEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TechEntry {
    Named {
        name: String,
        #[serde(default)]
        version: Option<String>,
    },
    Tagged(String),
}

impl From<TechEntry> for Technology {
    fn from(entry: TechEntry) -> Self {
        match entry {
            TechEntry::Named { name, version } => Technology {
                name,
                version: version.filter(|v| !v.trim().is_empty()),
            },
            TechEntry::Tagged(tag) => match tag.split_once(':') {
                Some((name, version)) if !version.trim().is_empty() => Technology {
                    name: name.to_string(),
                    version: Some(version.to_string()),
                },
                Some((name, _)) => Technology {
                    name: name.to_string(),
                    version: None,
                },
                None => Technology { name: tag, version: None },
            },
        }
    }
}

/// Parses one JSON record. Undecodable lines and records without a url yield `None`.
pub fn parse_line(line: &str) -> Option<ProbeRecord> {
    let parsed: HttpxLine = match serde_json::from_str(line) {
        Ok(parsed) => parsed,
        Err(e) => {
            log::debug!("Skipping undecodable probe line: {}", e);
            return None;
        }
    };

    let url = parsed.url.trim();
    if url.is_empty() {
        return None;
    }

    let status = parsed.status_code.map_or(ProbeStatus::Unknown, ProbeStatus::Code);
    let mut record = ProbeRecord::new(url, status);
    record.title = parsed.title;
    record.technologies = parsed.technologies.into_iter().map(Technology::from).collect();
    Some(record)
}
