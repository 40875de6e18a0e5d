use chrono::Local;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const DOMAINS_FILE: &str = "domains.txt";
pub const LIVE_FILE: &str = "live_subdomains.txt";
pub const DETAILED_FILE: &str = "detailed_results.txt";
pub const CRAWL_FILE: &str = "crawled_urls.txt";

/// Per-run output directory, `<root>/<target>_<YYYYmmdd_HHMMSS>`.
#[derive(Debug, Clone)]
pub struct RunDir {
    path: PathBuf,
}

impl RunDir {
    pub fn create(root: &Path, target: &str) -> io::Result<Self> {
        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        let path = root.join(format!("{}_{}", dir_safe(target), timestamp));
        fs::create_dir_all(&path)?;
        Ok(Self { path })
    }

    /// Wraps an existing directory, creating it if needed.
    pub fn at(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        fs::create_dir_all(&path)?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn artifact(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }
}

fn dir_safe(target: &str) -> String {
    target
        .trim()
        .chars()
        .map(|c| if c == '/' || c == '\\' || c.is_control() { '_' } else { c })
        .collect()
}

/// Writes `lines` one per line, replacing any previous content.
pub fn write_lines<S: AsRef<str>>(path: &Path, lines: &[S]) -> io::Result<()> {
    let mut content = String::new();
    for line in lines {
        content.push_str(line.as_ref());
        content.push('\n');
    }
    fs::write(path, content)
}

/// Reads the non-blank, trimmed lines of a file.
pub fn read_lines(path: &Path) -> io::Result<Vec<String>> {
    let content = fs::read_to_string(path)?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect())
}

/// True when a stage input is absent or has zero length.
pub fn is_missing_or_empty(path: &Path) -> bool {
    match fs::metadata(path) {
        Ok(meta) => meta.len() == 0,
        Err(_) => true,
    }
}
