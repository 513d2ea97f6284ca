//! Core logic of the `rbtree` command-line tool.
//!
//! The binary only parses arguments and installs a logger; loading input,
//! building the index, running search probes and rendering the report all
//! live here so they can be driven from tests.

use std::fmt::{self, Write as _};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use log::{info, warn};
use rand::rngs::OsRng;
use rand::{Rng, RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;
use thiserror::Error;

use crate::OrderedIndex;

/// Inputs and node counts above this are left out of the printed report.
pub const PRINT_LIMIT: usize = 1000;

const RULE: &str = "------------------------------";

// ── Errors ────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("{} is not a JSON array of integers: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid random range: min {min} is greater than max {max}")]
    InvalidRange { min: i64, max: i64 },
    #[error("failed to write {}: {source}", path.display())]
    WriteFile { path: PathBuf, source: io::Error },
    #[error("failed to write report: {0}")]
    Report(#[from] io::Error),
    #[error("failed to format report")]
    Format(#[from] fmt::Error),
}

// ── Configuration ─────────────────────────────────────────────────────────

/// Where the values fed into the index come from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputSource {
    /// A file holding a JSON array of integers.
    File(PathBuf),
    Numbers(Vec<i64>),
    /// `size` integers drawn uniformly from `min..=max`.
    Random {
        size: usize,
        min: i64,
        max: i64,
        seed: Option<u64>,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunConfig {
    pub source: InputSource,
    /// Values looked up both by linear scan and through the index.
    pub probes: Vec<i64>,
    /// Values to delete (one instance each) after the index is built.
    pub deletions: Vec<i64>,
    /// Where to write the prefix-notation string, if anywhere.
    pub output_file: Option<PathBuf>,
}

// ── Input ─────────────────────────────────────────────────────────────────

pub fn read_values(path: &Path) -> Result<Vec<i64>, CliError> {
    let contents = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| CliError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Draws `size` integers from `min..=max` with xoshiro256**.
///
/// Without a seed the generator is seeded from the OS.
pub fn random_values(
    size: usize,
    min: i64,
    max: i64,
    seed: Option<u64>,
) -> Result<Vec<i64>, CliError> {
    if min > max {
        return Err(CliError::InvalidRange { min, max });
    }
    let seed = seed.unwrap_or_else(|| OsRng.next_u64());
    info!("random input: {size} values in {min}..={max}, seed {seed}");
    let mut rng = Xoshiro256StarStar::seed_from_u64(seed);
    Ok((0..size).map(|_| rng.gen_range(min..=max)).collect())
}

pub fn load_values(source: &InputSource) -> Result<Vec<i64>, CliError> {
    match source {
        InputSource::File(path) => read_values(path),
        InputSource::Numbers(values) => Ok(values.clone()),
        InputSource::Random {
            size,
            min,
            max,
            seed,
        } => random_values(*size, *min, *max, *seed),
    }
}

// ── Probes ────────────────────────────────────────────────────────────────

/// Outcome of looking one value up with both strategies.
#[derive(Clone, Debug)]
pub struct Probe {
    pub value: i64,
    pub linear_found: bool,
    pub linear_ms: f64,
    pub tree_found: bool,
    pub tree_ms: f64,
}

pub fn probe(values: &[i64], index: &OrderedIndex<i64>, value: i64) -> Probe {
    let start = Instant::now();
    let linear_found = values.iter().any(|&v| v == value);
    let linear_ms = start.elapsed().as_secs_f64() * 1000.0;

    let start = Instant::now();
    let tree_found = index.search(&value);
    let tree_ms = start.elapsed().as_secs_f64() * 1000.0;

    Probe {
        value,
        linear_found,
        linear_ms,
        tree_found,
        tree_ms,
    }
}

// ── Report ────────────────────────────────────────────────────────────────

fn heading(out: &mut String, title: &str) -> fmt::Result {
    writeln!(out, "{title}")?;
    writeln!(out, "{RULE}")
}

fn presence(value: i64, found: bool) -> String {
    if found {
        format!("{value} is present")
    } else {
        format!("{value} is missing")
    }
}

fn probe_section(out: &mut String, title: &str, probes: &[Probe], linear: bool) -> fmt::Result {
    heading(out, title)?;
    let kind = if linear { "linear" } else { "binary" };
    for (i, p) in probes.iter().enumerate() {
        let (found, ms) = if linear {
            (p.linear_found, p.linear_ms)
        } else {
            (p.tree_found, p.tree_ms)
        };
        writeln!(out, "{}", presence(p.value, found))?;
        writeln!(out, "The {kind} search took {ms:.4} milliseconds")?;
        if i + 1 < probes.len() {
            out.push('\n');
        }
    }
    Ok(())
}

/// Renders the full text report for one run.
///
/// `values` is the live input in its original order, i.e. with one instance
/// removed for every successful deletion.
pub fn render_report(
    values: &[i64],
    index: &OrderedIndex<i64>,
    probes: &[Probe],
) -> Result<String, fmt::Error> {
    let mut out = String::new();

    if values.len() <= PRINT_LIMIT {
        heading(&mut out, "Unsorted list")?;
        writeln!(out, "{values:?}\n")?;
    }

    let (node_count, value_count) = index.size();
    let root = index
        .root_value()
        .map_or_else(|| "none".to_string(), |v| v.to_string());
    heading(&mut out, "Statistics")?;
    writeln!(
        out,
        "Root value: {root} Node count: {node_count} Value count: {value_count} Height: {}",
        index.height()
    )?;

    if node_count <= PRINT_LIMIT {
        out.push('\n');
        heading(&mut out, "String representation")?;
        writeln!(out, "{index}")?;
    }

    if !probes.is_empty() {
        out.push('\n');
        probe_section(&mut out, "Linear search results", probes, true)?;
        out.push('\n');
        probe_section(&mut out, "Binary search results", probes, false)?;
    }

    Ok(out)
}

// ── Run ───────────────────────────────────────────────────────────────────

/// Executes one run and writes its report to `out`. Returns the built index.
pub fn run<W: io::Write>(config: &RunConfig, out: &mut W) -> Result<OrderedIndex<i64>, CliError> {
    let mut values = load_values(&config.source)?;
    let mut index: OrderedIndex<i64> = values.iter().copied().collect();
    info!("built index from {} values", values.len());

    // Keep the scanned list in step with the index.
    for value in &config.deletions {
        if !index.delete(value) {
            warn!("delete {value}: not present");
            continue;
        }
        if let Some(pos) = values.iter().position(|v| v == value) {
            values.remove(pos);
        }
    }

    let probes: Vec<Probe> = config
        .probes
        .iter()
        .map(|&value| probe(&values, &index, value))
        .collect();

    out.write_all(render_report(&values, &index, &probes)?.as_bytes())?;

    if let Some(path) = &config.output_file {
        std::fs::write(path, index.to_string()).map_err(|source| CliError::WriteFile {
            path: path.clone(),
            source,
        })?;
        info!("wrote prefix notation to {}", path.display());
    }

    Ok(index)
}
