//! Train/test partitioning.
//!
//! Two strategies, both deterministic:
//! - by-leaf (default): a seeded shuffle of the file list, then the first
//!   `round(n_files * p)` files go to train. Every file's rows stay
//!   together on one side.
//! - by-proportion: each file is cut independently; its first
//!   `round(n_rows * p)` rows go to train, the rest to test.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::PrepError;
use crate::types::{LeafFile, TrainTest};

#[derive(Clone, Copy, Debug)]
pub struct SplitOptions {
    pub by_leaf: bool,
    /// Train fraction in `[0,1]`.
    pub save_proportion: f64,
    /// By-leaf shuffle seed; unused in proportional mode.
    pub seed: u64,
}

/// Consolidates the parsed files into `(train_X, train_y, test_X, test_y)`.
pub fn separate_train_test(files: Vec<LeafFile>, opts: SplitOptions) -> anyhow::Result<TrainTest> {
    let p = opts.save_proportion;
    if !p.is_finite() || !(0.0..=1.0).contains(&p) {
        anyhow::bail!(PrepError::InvalidProportion { value: p });
    }

    if opts.by_leaf {
        Ok(split_by_leaf(files, p, opts.seed))
    } else {
        Ok(split_by_proportion(files, p))
    }
}

/// `round(n * p)` clamped to `n`; rounding is half-away-from-zero, which
/// for non-negative inputs is half-up.
fn train_share(n: usize, p: f64) -> usize {
    (((n as f64) * p).round() as usize).min(n)
}

fn split_by_leaf(mut files: Vec<LeafFile>, p: f64, seed: u64) -> TrainTest {
    let mut rng = StdRng::seed_from_u64(seed);
    files.shuffle(&mut rng);

    let train_files = train_share(files.len(), p);
    let mut out = TrainTest::default();
    for (i, file) in files.into_iter().enumerate() {
        if i < train_files {
            out.train.extend_from_file(file);
        } else {
            out.test.extend_from_file(file);
        }
    }
    out
}

fn split_by_proportion(files: Vec<LeafFile>, p: f64) -> TrainTest {
    let mut out = TrainTest::default();
    for file in files {
        let cut = train_share(file.len(), p);
        for (i, (feats, label)) in file
            .features
            .into_iter()
            .zip(file.labels.into_iter())
            .enumerate()
        {
            if i < cut {
                out.train.push(feats, label);
            } else {
                out.test.push(feats, label);
            }
        }
    }
    out
}
