//! spam-cli - YouTube comment spam classifier
//!
//! Usage:
//!   spam-cli run Youtube01.csv Youtube02.csv        # Full experiment report
//!   spam-cli run data/*.csv --json                   # Same, as JSON
//!   spam-cli classify data/*.csv --text "free money" # Label ad-hoc comments
//!   spam-cli signals "Check my SECRET video"         # Auxiliary heuristics

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod commands;
mod error;
mod output;

use commands::classify::ModelChoice;
use commands::run::Overrides;
use commands::{classify, run, signals};

/// spam-cli - train and evaluate comment spam classifiers
#[derive(Parser)]
#[command(name = "spam-cli")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// More log output on stderr (repeat for more)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Errors only
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Split, cross-validate and evaluate both models on a labeled corpus
    Run {
        /// Corpus CSV files with CONTENT and CLASS columns
        #[arg(value_name = "CSV", required = true)]
        files: Vec<PathBuf>,

        /// TOML experiment configuration
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Seed for the split and the forest
        #[arg(long)]
        seed: Option<u64>,

        /// Cross-validation folds
        #[arg(long)]
        folds: Option<usize>,

        /// Trees in the random forest
        #[arg(long)]
        trees: Option<usize>,

        /// Held-out fraction in (0, 1)
        #[arg(long)]
        test_size: Option<f64>,

        /// Learn the vocabulary from the whole corpus, test rows included
        #[arg(long)]
        full_corpus_vocabulary: bool,
    },

    /// Train on a corpus and label the given comments
    Classify {
        /// Corpus CSV files with CONTENT and CLASS columns
        #[arg(value_name = "CSV", required = true)]
        files: Vec<PathBuf>,

        /// Comment to classify (repeatable)
        #[arg(long = "text", value_name = "TEXT", required = true)]
        texts: Vec<String>,

        /// Model to use
        #[arg(long, value_enum, default_value = "both")]
        model: ModelChoice,

        /// TOML experiment configuration
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Print auxiliary signals (URLs, casing, sentiment, keywords)
    Signals {
        /// Comments to inspect
        #[arg(value_name = "TEXT", required = true)]
        texts: Vec<String>,
    },
}

fn default_filter(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose, quiet)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let result = match cli.command {
        Commands::Run {
            files,
            config,
            seed,
            folds,
            trees,
            test_size,
            full_corpus_vocabulary,
        } => {
            let overrides = Overrides {
                seed,
                folds,
                trees,
                test_size,
                full_corpus_vocabulary,
            };
            run::run(&files, config.as_deref(), &overrides, cli.json)
        }

        Commands::Classify {
            files,
            texts,
            model,
            config,
        } => classify::run(&files, &texts, model, config.as_deref(), cli.json),

        Commands::Signals { texts } => signals::run(&texts, cli.json),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            e.exit_code()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_run_flags() {
        let cli = Cli::try_parse_from([
            "spam-cli", "-vv", "run", "a.csv", "b.csv", "--seed", "7", "--trees", "10",
            "--full-corpus-vocabulary", "--json",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(cli.json);
        match cli.command {
            Commands::Run {
                files,
                seed,
                trees,
                full_corpus_vocabulary,
                ..
            } => {
                assert_eq!(files.len(), 2);
                assert_eq!(seed, Some(7));
                assert_eq!(trees, Some(10));
                assert!(full_corpus_vocabulary);
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_parse_classify_defaults_to_both_models() {
        let cli = Cli::try_parse_from(["spam-cli", "classify", "a.csv", "--text", "hi", "--text", "yo"])
            .unwrap();
        match cli.command {
            Commands::Classify { texts, model, .. } => {
                assert_eq!(texts, vec!["hi", "yo"]);
                assert_eq!(model, ModelChoice::Both);
            }
            _ => panic!("expected classify"),
        }
    }

    #[test]
    fn test_run_requires_a_file() {
        assert!(Cli::try_parse_from(["spam-cli", "run"]).is_err());
    }

    #[test]
    fn test_verbosity_filters() {
        assert_eq!(default_filter(0, false), "warn");
        assert_eq!(default_filter(1, false), "info");
        assert_eq!(default_filter(5, false), "trace");
        assert_eq!(default_filter(3, true), "error");
    }
}
