use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use leafprep::config::Config;
use leafprep::generate::{mode_name, run_generate, GenerateOptions};

#[derive(Debug, Parser)]
#[command(
    name = "generate_training_data",
    version,
    about = "Generate ML training/testing data from per-leaf spectral CSV files"
)]
struct Args {
    /// Data collection date, YYYY_MMDD (key into [directories]).
    date: String,

    /// Delete previous training/testing/sample-count artifacts first.
    #[arg(short = 'd', long)]
    delete: bool,

    /// Keep only files whose names contain all of these keywords.
    #[arg(short = 'k', long, num_args = 0.., value_name = "KEYWORD")]
    keywords: Vec<String>,

    /// Split each file's rows proportionally instead of by whole leaf.
    #[arg(short = 'p', long)]
    proportional: bool,

    /// Fraction of the data saved as training data, in [0,1]
    /// (default: split.save_proportion from config).
    #[arg(short = 's', long, value_name = "PROPORTION")]
    save_proportion: Option<f64>,

    /// Config path.
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Override the by-leaf shuffle seed from config.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();
    let cfg = Config::load(&args.config).context("load config")?;

    let opts = GenerateOptions {
        date: args.date.clone(),
        delete: args.delete,
        keywords: args.keywords,
        by_leaf: !args.proportional,
        save_proportion: args.save_proportion,
        seed: args.seed,
    };

    let res = run_generate(&cfg, &opts)
        .with_context(|| format!("generate training data for {}", args.date))?;

    println!("date={}", res.date);
    println!("mode={}", mode_name(res.by_leaf));
    println!("save_proportion={}", res.save_proportion);
    println!("seed={}", res.seed);
    println!("files={}", res.files.len());
    println!("train_rows={}", res.train_rows);
    println!("test_rows={}", res.test_rows);
    println!("training_data={}", res.training_path.display());
    println!("testing_data={}", res.testing_path.display());
    println!("sample_counts={}", res.counts_path.display());
    Ok(())
}
