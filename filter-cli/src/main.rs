use anyhow::{Context, Result};
use clap::Parser;
use htmlfilter::{FilterConfig, FilterReport, HtmlFilter};
use serde::Serialize;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "htmlfilter")]
#[command(version, about = "Strip dangerous markup from HTML fragments")]
struct Cli {
    /// Input string to filter
    #[arg(short, long, conflicts_with = "file")]
    input: Option<String>,

    /// File to filter (stdin when neither --input nor --file is given)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Filter every non-empty line as a separate input
    #[arg(long)]
    lines: bool,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Additional forbidden tag (repeatable)
    #[arg(long = "forbid-tag", value_name = "NAME")]
    forbid_tags: Vec<String>,

    /// Additional forbidden attribute (repeatable)
    #[arg(long = "forbid-attr", value_name = "NAME")]
    forbid_attrs: Vec<String>,

    /// Output results in JSON format
    #[arg(long)]
    json: bool,

    /// Log every removal at trace level
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Serialize, Debug)]
struct FilterResult {
    output: String,
    report: FilterReport,
}

// drops are logged at trace level, so --verbose has to reach it
fn default_log_filter(verbose: bool) -> &'static str {
    if verbose {
        "htmlfilter=trace"
    } else {
        "warn"
    }
}

fn init_tracing(verbose: bool) {
    let default_level = default_log_filter(verbose);
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .init();
}

fn load_config(path: Option<&Path>) -> Result<FilterConfig> {
    let Some(path) = path else {
        return Ok(FilterConfig::default());
    };
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;
    FilterConfig::from_json(&json).with_context(|| format!("Invalid config file: {:?}", path))
}

fn read_input(cli: &Cli) -> Result<String> {
    if let Some(input) = &cli.input {
        return Ok(input.clone());
    }
    if let Some(file) = &cli.file {
        return fs::read_to_string(file).with_context(|| format!("Failed to read file: {:?}", file));
    }
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read stdin")?;
    Ok(input)
}

fn build_filter(cli: &Cli) -> Result<HtmlFilter> {
    let mut config = load_config(cli.config.as_deref())?;
    config.forbidden_tags.extend(&cli.forbid_tags);
    config.forbidden_attributes.extend(&cli.forbid_attrs);
    HtmlFilter::try_new(config).context("Invalid filter configuration")
}

fn split_inputs(input: &str, lines: bool) -> Vec<&str> {
    if lines {
        input.lines().filter(|line| !line.trim().is_empty()).collect()
    } else {
        vec![input]
    }
}

fn run_filter(filter: &HtmlFilter, inputs: Vec<&str>) -> Vec<FilterResult> {
    inputs
        .into_iter()
        .map(|input| {
            let (output, report) = filter.filter_with_report(input);
            FilterResult { output, report }
        })
        .collect()
}

// With `--lines` the JSON form is always an array, even for a single line.
fn render(results: &[FilterResult], lines: bool, json: bool) -> Result<String> {
    if json {
        let json = match results {
            [single] if !lines => serde_json::to_string_pretty(single)?,
            all => serde_json::to_string_pretty(all)?,
        };
        return Ok(format!("{}\n", json));
    }

    let mut out = String::new();
    for result in results {
        out.push_str(&result.output);
        if lines {
            out.push('\n');
        }
    }
    Ok(out)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let filter = build_filter(&cli)?;
    tracing::debug!(config = ?filter.config(), "filter ready");

    let input = read_input(&cli)?;
    let results = run_filter(&filter, split_inputs(&input, cli.lines));
    print!("{}", render(&results, cli.lines, cli.json)?);

    Ok(())
}
