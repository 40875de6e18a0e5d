use std::fs;
use tempfile::tempdir;
use tyson::error::{ProducerError, ToolError};
use tyson::output::{self, RunDir};
use tyson::pipeline;
use tyson::{deduplicate_preserving_order, export_sorted, Producer};

struct Canned {
    name: &'static str,
    result: Option<Vec<&'static str>>,
}

impl Canned {
    fn ok(name: &'static str, values: Vec<&'static str>) -> Box<dyn Producer> {
        Box::new(Canned { name, result: Some(values) })
    }

    fn failing(name: &'static str) -> Box<dyn Producer> {
        Box::new(Canned { name, result: None })
    }
}

impl Producer for Canned {
    fn name(&self) -> &str {
        self.name
    }

    fn fetch(&self, _domain: &str) -> Result<Vec<String>, ProducerError> {
        match &self.result {
            Some(values) => Ok(values.iter().map(|v| v.to_string()).collect()),
            None => Err(ToolError::NotFound { tool: self.name.to_string() }.into()),
        }
    }
}

#[test]
fn test_four_sources_merge_into_sorted_domains_file() {
    let dir = tempdir().unwrap();
    let run = RunDir::at(dir.path()).unwrap();
    let producers = vec![
        Canned::ok("subfinder", vec!["b.example.com", "a.example.com"]),
        Canned::ok("assetfinder", vec!["b.example.com", " "]),
        Canned::failing("crt.sh"),
        Canned::ok("gobuster", vec!["c.example.com"]),
    ];

    let outcome = pipeline::enumerate_with(&producers, "example.com", &run).unwrap();

    assert_eq!(outcome.subdomains, vec!["b.example.com", "a.example.com", "c.example.com"]);
    assert_eq!(
        fs::read_to_string(run.artifact(output::DOMAINS_FILE)).unwrap(),
        "a.example.com\nb.example.com\nc.example.com\n"
    );
    let counts: Vec<usize> = outcome.report.per_source.iter().map(|(_, c)| *c).collect();
    assert_eq!(counts, vec![2, 1, 0, 1]);
    assert_eq!(outcome.report.total_unique, 3);
}

#[test]
fn test_all_sources_failing_still_writes_empty_artifact() {
    let dir = tempdir().unwrap();
    let run = RunDir::at(dir.path()).unwrap();
    let producers = vec![Canned::failing("subfinder"), Canned::ok("assetfinder", vec![])];

    let outcome = pipeline::enumerate_with(&producers, "example.com", &run).unwrap();

    assert!(outcome.subdomains.is_empty());
    assert_eq!(fs::read_to_string(&outcome.artifact).unwrap(), "");
}

#[test]
fn test_sorted_export_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("domains.txt");
    let input = ["z.example.com", " m.example.com", "", "a.example.com", "m.example.com ", "z.example.com"];

    let unique = deduplicate_preserving_order(input);
    export_sorted(&unique, &path).unwrap();

    let mut expected: Vec<String> = unique.clone();
    expected.sort();
    assert_eq!(output::read_lines(&path).unwrap(), expected);
    assert_eq!(expected, vec!["a.example.com", "m.example.com", "z.example.com"]);
}

#[test]
fn test_dedup_output_has_each_distinct_value_once() {
    let input = vec!["x", "y", " x", "y\t", "", "z", "x "];
    let out = deduplicate_preserving_order(&input);

    for value in &out {
        assert_eq!(out.iter().filter(|v| *v == value).count(), 1);
        assert_eq!(value.trim(), value.as_str());
        assert!(!value.is_empty());
    }
    assert_eq!(out, vec!["x", "y", "z"]);
    assert_eq!(deduplicate_preserving_order(&out), out);
}
