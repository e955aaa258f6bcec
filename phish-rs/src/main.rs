//! phish-rs command line
//!
//! # Usage
//!
//! ```bash
//! # Show the feature ranking
//! phish-rs rank --dataset phishing.csv --all
//!
//! # Train on the training split and write the model
//! phish-rs train --dataset phishing.csv --output model.json
//!
//! # Train and report held-out metrics
//! phish-rs evaluate --dataset phishing.csv
//!
//! # Score one site with a saved model
//! phish-rs predict --model model.json SSLfinal_State=0 URL_of_Anchor=1
//! ```

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use phish_rs::classifier::evaluator::format_metric;
use phish_rs::classifier::{
    evaluate_with_policy, persistence, predictor, rank, rank_all, train, EvaluationPolicy,
};
use phish_rs::config::{Config, LoggingConfig};
use phish_rs::dataset::{load_dataset, train_test_split, Dataset, FeatureVector};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "phish-rs")]
#[command(about = "Naive Bayes phishing website classifier", long_about = None)]
struct Cli {
    /// Configuration file (TOML); PHISH_* environment variables override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank features by likelihood ratio
    Rank {
        /// Dataset path
        #[arg(short, long)]
        dataset: Option<String>,
        /// Group threshold
        #[arg(short, long, allow_negative_numbers = true)]
        threshold: Option<i64>,
        /// Number of features to keep
        #[arg(short = 'k', long)]
        top_k: Option<usize>,
        /// Show every feature instead of the top K
        #[arg(long)]
        all: bool,
    },
    /// Train a model on the training split and save it
    Train {
        /// Dataset path
        #[arg(short, long)]
        dataset: Option<String>,
        /// Model output path
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Train on the training split and report metrics on the test split
    Evaluate {
        /// Dataset path
        #[arg(short, long)]
        dataset: Option<String>,
        /// Skip records with unseen values instead of failing
        #[arg(long)]
        skip_unscorable: bool,
    },
    /// Score one site with a saved model
    Predict {
        /// Model path
        #[arg(short, long)]
        model: Option<String>,
        /// Feature values as NAME=VALUE
        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    init_logging(&config.logging);

    match cli.command {
        Commands::Rank {
            dataset,
            threshold,
            top_k,
            all,
        } => {
            let data = load(&config, dataset)?;
            let threshold = threshold.unwrap_or(config.ranking.threshold);
            let ranking = if all {
                rank_all(&data, threshold)
            } else {
                rank(&data, threshold, top_k.unwrap_or(config.ranking.top_k))
            };

            println!("{:<30} {:>10} {:>10} {:>10}", "Feature", "P(high)", "P(low)", "Ratio");
            println!("{:-<63}", "");
            for entry in ranking.entries.iter().rev() {
                println!(
                    "{:<30} {:>10.4} {:>10.4} {:>10.4}",
                    entry.feature, entry.p_high, entry.p_low, entry.ratio
                );
            }
        }
        Commands::Train { dataset, output } => {
            let data = load(&config, dataset)?;
            let (train_data, _) =
                train_test_split(&data, config.split.test_fraction, config.split.seed)?;

            let features =
                rank(&train_data, config.ranking.threshold, config.ranking.top_k).selected_features();
            let model = train(&features, &train_data)?;

            let output = output.unwrap_or_else(|| config.model.path.clone());
            persistence::save(&model, &output)
                .with_context(|| format!("Failed to write model to {}", output))?;

            println!("✓ Model written to {}", output);
            println!("  Prior P(phishing): {:.4}", model.prior());
            println!("  Features: {}", features.join(", "));
        }
        Commands::Evaluate {
            dataset,
            skip_unscorable,
        } => {
            let data = load(&config, dataset)?;
            let (train_data, test_data) =
                train_test_split(&data, config.split.test_fraction, config.split.seed)?;

            let features =
                rank(&train_data, config.ranking.threshold, config.ranking.top_k).selected_features();
            let policy = if skip_unscorable {
                EvaluationPolicy::SkipUnscorable
            } else {
                EvaluationPolicy::Abort
            };
            let report = evaluate_with_policy(&features, &train_data, &test_data, policy)?;

            println!("Features:  {}", features.join(", "));
            println!("Scored:    {} of {} ({} skipped)", report.scored, report.total, report.skipped);
            println!("Accuracy:  {}", format_metric(report.accuracy));
            println!("Precision: {}", format_metric(report.precision));
            println!("Recall:    {}", format_metric(report.recall));
        }
        Commands::Predict { model, values } => {
            let path = model.unwrap_or_else(|| config.model.path.clone());
            let model = persistence::load(&path)
                .with_context(|| format!("Failed to read model from {}", path))?;
            let values = parse_values(&values)?;

            let scores = predictor::score_site(&model, &values)?;

            println!("{}", if scores.is_phishing() { "phishing" } else { "legitimate" });
            println!(
                "  log score: phishing {:.4}, legitimate {:.4}",
                scores.phishing, scores.legitimate
            );
        }
    }

    Ok(())
}

fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("phish_rs={}", logging.level)));

    let registry = tracing_subscriber::registry().with(filter);
    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
            .init();
    }
}

fn load(config: &Config, dataset: Option<String>) -> anyhow::Result<Dataset> {
    let path = dataset.unwrap_or_else(|| config.dataset.path.clone());
    info!("Loading dataset from {}", path);
    load_dataset(&path, &config.dataset).with_context(|| format!("Failed to load dataset {}", path))
}

fn parse_values(pairs: &[String]) -> anyhow::Result<FeatureVector> {
    let mut values = FeatureVector::new();
    for pair in pairs {
        let Some((name, value)) = pair.split_once('=') else {
            bail!("Expected NAME=VALUE, got '{}'", pair);
        };
        let value: i64 = value
            .trim()
            .parse()
            .with_context(|| format!("Value of '{}' is not an integer", name))?;
        if values.insert(name.trim().to_string(), value).is_some() {
            bail!("Feature '{}' given twice", name);
        }
    }
    Ok(values)
}
