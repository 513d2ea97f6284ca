//! `rbtree` — build a red-black ordered index from a list of integers and
//! report on it.
//!
//! Usage:
//!   rbtree (--input-file <path> | --numbers <n>... | --random [--size N --min A --max B --seed S])
//!          [--test <n>...] [--delete <n>...] [--output-file <path>] [-v...]

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, ArgGroup, Parser};
use ordered_index::cli::{run, InputSource, RunConfig};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

#[derive(Parser, Debug)]
#[command(name = "rbtree")]
#[command(about = "Red-black tree ordered index.", long_about = None)]
#[command(group(
    ArgGroup::new("input")
        .required(true)
        .args(["input_file", "numbers", "random"])
))]
struct Cli {
    /// File holding a JSON array of integers.
    #[arg(short = 'i', long)]
    input_file: Option<PathBuf>,
    /// Integers given directly on the command line.
    #[arg(short = 'n', long, num_args = 1.., allow_negative_numbers = true)]
    numbers: Option<Vec<i64>>,
    /// Generate random integers.
    #[arg(short = 'r', long)]
    random: bool,
    /// How many random integers to generate.
    #[arg(short = 's', long, default_value_t = 10)]
    size: usize,
    /// Smallest random integer (inclusive).
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    min: i64,
    /// Largest random integer (inclusive).
    #[arg(long, default_value_t = 100, allow_negative_numbers = true)]
    max: i64,
    /// Seed for reproducible random input.
    #[arg(long)]
    seed: Option<u64>,
    /// Values to look up by linear scan and by tree search.
    #[arg(short = 't', long, num_args = 1.., allow_negative_numbers = true)]
    test: Vec<i64>,
    /// Values to delete (one instance each) after building the tree.
    #[arg(short = 'd', long, num_args = 1.., allow_negative_numbers = true)]
    delete: Vec<i64>,
    /// Write the prefix-notation string to this file.
    #[arg(short = 'o', long)]
    output_file: Option<PathBuf>,
    /// Log more (repeat for debug and trace).
    #[arg(short = 'v', long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn into_config(self) -> RunConfig {
        let source = if let Some(path) = self.input_file {
            InputSource::File(path)
        } else if let Some(numbers) = self.numbers {
            InputSource::Numbers(numbers)
        } else {
            InputSource::Random {
                size: self.size,
                min: self.min,
                max: self.max,
                seed: self.seed,
            }
        };
        RunConfig {
            source,
            probes: self.test,
            deletions: self.delete,
            output_file: self.output_file,
        }
    }
}

fn init_logging(verbose: u8) -> Result<()> {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto)
        .context("failed to install logger")
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let config = cli.into_config();
    let mut stdout = io::stdout().lock();
    run(&config, &mut stdout).context("rbtree run failed")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{error::ErrorKind, CommandFactory};

    fn parse(args: &[&str]) -> Result<RunConfig, clap::Error> {
        Cli::try_parse_from(std::iter::once("rbtree").chain(args.iter().copied()))
            .map(Cli::into_config)
    }

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn input_source_is_required() {
        let err = parse(&["-t", "1"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn input_sources_are_exclusive() {
        let err = parse(&["-n", "1", "-r"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
        let err = parse(&["-i", "values.json", "--numbers", "2"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn numbers_accept_negatives() {
        let config = parse(&["--numbers", "-3", "4", "--test", "-3", "--delete", "-3"]).unwrap();
        assert_eq!(config.source, InputSource::Numbers(vec![-3, 4]));
        assert_eq!(config.probes, vec![-3]);
        assert_eq!(config.deletions, vec![-3]);
        assert_eq!(config.output_file, None);
    }

    #[test]
    fn random_uses_defaults() {
        let config = parse(&["--random"]).unwrap();
        assert_eq!(
            config.source,
            InputSource::Random {
                size: 10,
                min: 0,
                max: 100,
                seed: None,
            }
        );

        let config = parse(&["-r", "-s", "3", "--min", "-5", "--max", "5", "--seed", "7"]).unwrap();
        assert_eq!(
            config.source,
            InputSource::Random {
                size: 3,
                min: -5,
                max: 5,
                seed: Some(7),
            }
        );
    }

    #[test]
    fn file_options_map_through() {
        let config = parse(&["-i", "in.json", "-t", "1", "2", "-d", "2", "-o", "out.txt"]).unwrap();
        assert_eq!(config.source, InputSource::File(PathBuf::from("in.json")));
        assert_eq!(config.probes, vec![1, 2]);
        assert_eq!(config.deletions, vec![2]);
        assert_eq!(config.output_file, Some(PathBuf::from("out.txt")));
    }

    #[test]
    fn verbosity_counts_flags() {
        let cli = Cli::try_parse_from(["rbtree", "-r", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }
}
