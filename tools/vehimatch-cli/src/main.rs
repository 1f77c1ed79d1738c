//! Vehicle description matcher
//!
//! Reads one description per line, matches each against a catalog loaded
//! from SQLite or JSON, and prints one JSON result per line in input order.

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use rayon::ThreadPoolBuilder;
use tracing::info;
use vehimatch_core::{Catalog, MatchResult, Matcher, MatcherConfig};

/// CLI arguments
#[derive(Parser, Debug)]
#[command(name = "vehimatch")]
#[command(about = "Match free-text vehicle descriptions against a catalog")]
#[command(version)]
struct Cli {
    /// Catalog to match against (`.json`, otherwise a SQLite database)
    #[arg(short, long, env = "VEHIMATCH_CATALOG")]
    catalog: PathBuf,

    /// File with one description per line (defaults to stdin)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// JSON matcher configuration overriding the default field weights
    #[arg(short, long, env = "VEHIMATCH_WEIGHTS")]
    weights: Option<PathBuf>,

    /// Worker threads; 1 matches sequentially, default uses every core
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Print a single pretty-printed JSON array instead of JSON lines
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let cli = Cli::parse();

    let config = load_config(cli.weights.as_deref())?;
    let matcher = Matcher::new(config).context("Invalid matcher configuration")?;

    let catalog = vehimatch_store::load_catalog(&cli.catalog)
        .with_context(|| format!("Failed to load catalog from {}", cli.catalog.display()))?;

    let descriptions = match &cli.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            read_descriptions(BufReader::new(file))?
        }
        None => read_descriptions(io::stdin().lock())?,
    };

    let results = run_batch(&matcher, &catalog, &descriptions, cli.jobs)?;

    let matched = results.iter().filter(|r| r.is_match()).count();
    info!(
        descriptions = results.len(),
        matched,
        catalog = catalog.len(),
        "batch complete"
    );

    let stdout = io::stdout();
    write_results(&mut BufWriter::new(stdout.lock()), &results, cli.pretty)
}

fn load_config(path: Option<&Path>) -> Result<MatcherConfig> {
    let Some(path) = path else {
        return Ok(MatcherConfig::default());
    };
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read weights from {}", path.display()))?;
    let config = MatcherConfig::from_json(&content)
        .with_context(|| format!("Invalid weights file {}", path.display()))?;
    info!(path = %path.display(), total_weight = config.weights.total(), "loaded matcher weights");
    Ok(config)
}

/// Trimmed, non-blank lines in input order.
fn read_descriptions<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let mut descriptions = Vec::new();
    for line in reader.lines() {
        let line = line.context("Failed to read descriptions")?;
        let line = line.trim();
        if !line.is_empty() {
            descriptions.push(line.to_string());
        }
    }
    Ok(descriptions)
}

fn run_batch(
    matcher: &Matcher,
    catalog: &Catalog,
    descriptions: &[String],
    jobs: Option<usize>,
) -> Result<Vec<MatchResult>> {
    match jobs {
        Some(1) => Ok(matcher.match_batch(catalog, descriptions)),
        Some(threads) => {
            let pool = ThreadPoolBuilder::new()
                .num_threads(threads)
                .thread_name(|i| format!("vehimatch-wrk-{i}"))
                .build()
                .context("Failed to start worker pool")?;
            Ok(pool.install(|| matcher.match_batch_parallel(catalog, descriptions)))
        }
        None => Ok(matcher.match_batch_parallel(catalog, descriptions)),
    }
}

fn write_results<W: Write>(out: &mut W, results: &[MatchResult], pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, results)?;
        writeln!(out)?;
    } else {
        for result in results {
            serde_json::to_writer(&mut *out, result)?;
            writeln!(out)?;
        }
    }
    out.flush()?;
    Ok(())
}
