//! Recon toolkit: runs external enumeration, probing and crawling tools,
//! merges what they find and keeps each stage's result as a flat file.

pub mod aggregate;
pub mod config;
pub mod crawl;
pub mod display;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod probe;
pub mod producers;
pub mod runner;

pub use aggregate::{deduplicate_preserving_order, export_sorted, Aggregator};
pub use config::ReconConfig;
pub use error::{ConfigError, ProducerError, ToolError};
pub use output::RunDir;
pub use probe::{parse_probe_output, ProbeFormat, ProbeOutcome, ProbeStatus, Prober, StatusClass};
pub use producers::Producer;
