use crate::output;
use crate::producers::Producer;
use std::collections::HashSet;
use std::io;
use std::path::Path;

/// Trims every value, drops blanks and keeps the first occurrence of each.
pub fn deduplicate_preserving_order<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut unique = Vec::new();
    for value in values {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            continue;
        }
        if seen.insert(trimmed.to_string()) {
            unique.push(trimmed.to_string());
        }
    }
    unique
}

/// Writes the values sorted lexicographically, one per line.
///
/// The in-memory order of `values` is left untouched.
pub fn export_sorted<S: AsRef<str>>(values: &[S], path: &Path) -> io::Result<()> {
    let mut sorted: Vec<&str> = values.iter().map(AsRef::as_ref).collect();
    sorted.sort_unstable();
    output::write_lines(path, &sorted)
}

/// What one producer handed back for a target.
#[derive(Debug, Clone)]
pub struct SourceResult {
    pub name: String,
    pub candidates: Vec<String>,
}

impl SourceResult {
    /// Size of this producer's own deduplicated subset.
    pub fn unique_count(&self) -> usize {
        deduplicate_preserving_order(&self.candidates).len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregationReport {
    pub per_source: Vec<(String, usize)>,
    pub total_unique: usize,
}

/// Collects producer output in invocation order and merges it.
#[derive(Debug, Default)]
pub struct Aggregator {
    sources: Vec<SourceResult>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, name: impl Into<String>, candidates: Vec<String>) {
        self.sources.push(SourceResult {
            name: name.into(),
            candidates,
        });
    }

    /// Runs a producer and records whatever it returned.
    pub fn collect(&mut self, producer: &dyn Producer, domain: &str) {
        let candidates = producer.produce(domain);
        let result = SourceResult {
            name: producer.name().to_string(),
            candidates,
        };
        log::info!("{} found {} unique subdomains", result.name, result.unique_count());
        self.sources.push(result);
    }

    pub fn sources(&self) -> &[SourceResult] {
        &self.sources
    }

    pub fn merged(&self) -> Vec<String> {
        deduplicate_preserving_order(self.sources.iter().flat_map(|s| s.candidates.iter()))
    }

    pub fn report(&self) -> AggregationReport {
        AggregationReport {
            per_source: self
                .sources
                .iter()
                .map(|s| (s.name.clone(), s.unique_count()))
                .collect(),
            total_unique: self.merged().len(),
        }
    }

    /// Persists the merged set sorted and returns it in first-seen order.
    pub fn persist(&self, path: &Path) -> io::Result<Vec<String>> {
        let merged = self.merged();
        export_sorted(&merged, path)?;
        Ok(merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_trims_and_keeps_first_seen() {
        let out = deduplicate_preserving_order(["b", " a.example.com", "", "a.example.com ", "  ", "b", "c"]);
        assert_eq!(out, vec!["b", "a.example.com", "c"]);
    }

    #[test]
    fn test_dedup_is_idempotent() {
        let once = deduplicate_preserving_order(["z", "y ", "z", "x", "\t", "y"]);
        let twice = deduplicate_preserving_order(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_dedup_is_exact_match() {
        let out = deduplicate_preserving_order(["A.example.com", "a.example.com"]);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_empty_source_contributes_nothing() {
        let mut agg = Aggregator::new();
        agg.add("a", vec!["x.example.com".to_string()]);
        agg.add("failed", Vec::new());
        let report = agg.report();
        assert_eq!(report.total_unique, 1);
        assert_eq!(report.per_source[1], ("failed".to_string(), 0));
    }

    #[test]
    fn test_per_source_counts_can_exceed_total() {
        let mut agg = Aggregator::new();
        agg.add("one", vec!["a".to_string(), "b".to_string(), "a".to_string()]);
        agg.add("two", vec!["b".to_string(), "c".to_string()]);
        let report = agg.report();
        assert_eq!(
            report.per_source,
            vec![("one".to_string(), 2), ("two".to_string(), 2)]
        );
        assert_eq!(report.total_unique, 3);
        assert_eq!(agg.merged(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_export_sorted_leaves_memory_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("domains.txt");
        let values = vec!["c".to_string(), "a".to_string(), "b".to_string()];
        export_sorted(&values, &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "a\nb\nc\n");
        assert_eq!(values, vec!["c", "a", "b"]);
    }
}
