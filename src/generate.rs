use std::path::PathBuf;

use anyhow::Context as _;
use serde::Serialize;
use tracing::info;

use crate::artifacts;
use crate::config::Config;
use crate::discovery;
use crate::error::PrepError;
use crate::leaf_csv;
use crate::schema::{FILE_GENERATE_META, SCHEMA_VERSION};
use crate::split::{self, SplitOptions};
use crate::types::{now_ms, LeafFile};

#[derive(Clone, Debug)]
pub struct GenerateOptions {
    /// Date key (`YYYY_MMDD`) into the `[directories]` table.
    pub date: String,
    /// Delete pre-existing artifacts before regenerating.
    pub delete: bool,
    /// A file is kept only if its name contains all keywords.
    pub keywords: Vec<String>,
    /// Whole-file assignment (default) vs per-row proportional cut.
    pub by_leaf: bool,
    /// Train fraction override; `None` uses the config default.
    pub save_proportion: Option<f64>,
    /// By-leaf shuffle seed override; `None` uses the config default.
    pub seed: Option<u64>,
}

#[derive(Clone, Debug)]
pub struct GenerateResult {
    pub date: String,
    pub by_leaf: bool,
    pub save_proportion: f64,
    pub seed: u64,
    pub files: Vec<String>,
    pub train_rows: usize,
    pub test_rows: usize,
    pub training_path: PathBuf,
    pub testing_path: PathBuf,
    pub counts_path: PathBuf,
}

/// Sidecar written next to the artifacts so a run can be traced back to its
/// inputs and split parameters.
#[derive(Debug, Serialize)]
struct GenerateMeta {
    schema_version: String,
    date: String,
    mode: String,
    save_proportion: f64,
    seed: u64,
    generated_at_unix_ms: u64,
    source_files: Vec<String>,
    train_rows: usize,
    test_rows: usize,
}

/// The whole pipeline: resolve directories, discover files, optionally
/// delete old artifacts, split, persist.
pub fn run_generate(cfg: &Config, opts: &GenerateOptions) -> anyhow::Result<GenerateResult> {
    let save_proportion = opts.save_proportion.unwrap_or(cfg.split.save_proportion);
    let seed = opts.seed.unwrap_or(cfg.split.seed);

    let data_dir = cfg.data_dir(&opts.date)?;
    let ml_dir = cfg.ml_dir(&opts.date)?;

    let files = discovery::find_data_files(data_dir, &opts.keywords)
        .context("discover data files")?;
    info!(date = %opts.date, files = files.len(), "discovered data files");

    // Checked before any artifact is touched so a bad keyword filter never
    // wipes an existing dataset.
    if files.is_empty() {
        anyhow::bail!(PrepError::NoDataFound {
            dir: data_dir.to_path_buf(),
            keywords: opts.keywords.clone(),
        });
    }

    if opts.delete {
        let removed = artifacts::delete_artifacts(ml_dir).context("delete old artifacts")?;
        info!(removed = removed.len(), "removed old artifacts");
    }

    let mut leaves: Vec<LeafFile> = Vec::with_capacity(files.len());
    for name in &files {
        leaves.push(leaf_csv::read_leaf_file(data_dir, name).with_context(|| format!("read {name}"))?);
    }

    let tt = split::separate_train_test(
        leaves,
        SplitOptions {
            by_leaf: opts.by_leaf,
            save_proportion,
            seed,
        },
    )?;
    info!(
        by_leaf = opts.by_leaf,
        train_rows = tt.train.len(),
        test_rows = tt.test.len(),
        "split samples"
    );

    let training_path = artifacts::save_training_data(ml_dir, &tt.train)
        .context("save training data")?;
    let testing_path = artifacts::save_testing_data(ml_dir, &tt.test)
        .context("save testing data")?;
    let counts_path = artifacts::write_sample_counts(ml_dir, &tt)
        .context("write sample counts")?;

    let meta = GenerateMeta {
        schema_version: SCHEMA_VERSION.to_string(),
        date: opts.date.clone(),
        mode: mode_name(opts.by_leaf).to_string(),
        save_proportion,
        seed,
        generated_at_unix_ms: now_ms(),
        source_files: files.clone(),
        train_rows: tt.train.len(),
        test_rows: tt.test.len(),
    };
    let meta_path = ml_dir.join(FILE_GENERATE_META);
    let json = serde_json::to_vec_pretty(&meta).context("serialize generate_meta.json")?;
    std::fs::write(&meta_path, json)
        .with_context(|| format!("write {}", meta_path.display()))?;

    info!(ml_dir = %ml_dir.display(), "wrote artifacts");

    Ok(GenerateResult {
        date: opts.date.clone(),
        by_leaf: opts.by_leaf,
        save_proportion,
        seed,
        files,
        train_rows: tt.train.len(),
        test_rows: tt.test.len(),
        training_path,
        testing_path,
        counts_path,
    })
}

pub fn mode_name(by_leaf: bool) -> &'static str {
    if by_leaf {
        "by_leaf"
    } else {
        "proportional"
    }
}
