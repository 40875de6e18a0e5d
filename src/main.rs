use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use tyson::config::{parse_wordlist_arg, ReconConfig};
use tyson::output::{self, RunDir};
use tyson::{display, pipeline};

/// All-in-one recon toolkit: subdomain enumeration, live checks and web crawling
#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    /// Target domain (e.g. example.com)
    #[arg(short, long, required_unless_present = "check_tools")]
    target: Option<String>,

    /// Perform subdomain enumeration
    #[arg(short = 's', long = "enumerate")]
    enumerate: bool,

    /// Perform live subdomain check
    #[arg(short = 'l', long = "live")]
    live: bool,

    /// Perform web crawling
    #[arg(long = "wc", alias = "crawl")]
    crawl: bool,

    /// Detailed live check: titles, tech detection and versions (excludes redirects)
    #[arg(short, long)]
    detailed: bool,

    /// Comma-separated list of extra wordlists (e.g. wordlists/list1.txt,wordlists/list2.txt)
    #[arg(short, long)]
    wordlists: Option<String>,

    /// Add the built-in word set to the brute force
    #[arg(long)]
    builtin_wordlist: bool,

    /// Input file for live check or web crawl (e.g. domains.txt)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Directory that receives the per-run result directories
    #[arg(short, long)]
    output_root: Option<PathBuf>,

    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Wall-clock budget in seconds for every external tool
    #[arg(long)]
    tool_timeout: Option<u64>,

    /// Report which external tools are installed and exit
    #[arg(long)]
    check_tools: bool,

    /// Log level: trace, debug, info, warn or error
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

fn setup_logging(args: &Args) {
    let level = if args.quiet {
        log::LevelFilter::Error
    } else {
        match args.log_level.to_lowercase().as_str() {
            "trace" => log::LevelFilter::Trace,
            "debug" => log::LevelFilter::Debug,
            "warn" => log::LevelFilter::Warn,
            "error" => log::LevelFilter::Error,
            _ => log::LevelFilter::Info,
        }
    };

    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .init();
}

fn build_config(args: &Args) -> anyhow::Result<ReconConfig> {
    let mut config = match &args.config {
        Some(path) => ReconConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ReconConfig::new(),
    };

    if let Some(raw) = &args.wordlists {
        config = config.with_extra_wordlists(parse_wordlist_arg(raw));
    }
    if args.builtin_wordlist {
        config = config.with_builtin_wordlist(true);
    }
    if let Some(root) = &args.output_root {
        config = config.with_output_root(root.clone());
    }
    if let Some(secs) = args.tool_timeout {
        config = config.with_budget_override(secs);
    }

    config.validate()?;
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    setup_logging(&args);
    if args.no_color {
        colored::control::set_override(false);
    }

    let config = build_config(&args)?;

    if args.check_tools {
        display::tool_report(&pipeline::check_tools(&config));
        return Ok(());
    }

    let Some(target) = args.target.as_deref().map(str::trim).filter(|t| !t.is_empty()) else {
        anyhow::bail!("a non-empty target is required");
    };

    if !(args.enumerate || args.live || args.crawl) {
        println!("{} Nothing to do: choose at least one of -s, -l or --wc", "[!]".yellow());
        return Ok(());
    }

    println!("[+] Starting Tyson recon for {}", target.cyan());
    if args.enumerate {
        let lists: Vec<String> = config.wordlists.iter().map(|w| w.display().to_string()).collect();
        println!("[+] Using wordlists: {}", lists.join(", "));
    }

    let run = RunDir::create(&config.output_root, target)
        .with_context(|| format!("creating output directory under {}", config.output_root.display()))?;
    log::info!("Writing results to {}", run.path().display());

    if args.enumerate {
        if let Err(e) = pipeline::enumerate(&config, target, &run) {
            log::error!("Subdomain enumeration failed: {:#}", e);
        }
    }

    if args.live {
        let Some(input) = pipeline::resolve_input(args.input.as_deref(), &run, output::DOMAINS_FILE) else {
            println!("{} Input file required for live check. Use -i domains.txt", "[!]".red());
            return Ok(());
        };
        if let Err(e) = pipeline::live_check(&config, &input, &run, args.detailed) {
            log::error!("Live check failed: {:#}", e);
        }
    }

    if args.crawl {
        let Some(input) = pipeline::resolve_input(args.input.as_deref(), &run, output::LIVE_FILE) else {
            println!("{} Input file required for web crawl. Use -i live_subdomains.txt", "[!]".red());
            return Ok(());
        };
        pipeline::web_crawl(&config, &input, &run);
    }

    Ok(())
}
