//! Frozen artifact names and CSV headers.
//!
//! Downstream model-training scripts read these files by name; renaming any
//! of them is a breaking change to the whole analysis pipeline.

pub const SCHEMA_VERSION: &str = "leafprep_v1";

pub const FILE_TRAINING_DATA: &str = "training_data.csv";
pub const FILE_TESTING_DATA: &str = "testing_data.csv";
pub const FILE_SAMPLE_COUNTS: &str = "sample_counts.csv";
pub const FILE_GENERATE_META: &str = "generate_meta.json";

/// Suffix appended to a date key to address its ML artifact directory
/// in the `[directories]` table (e.g. `2016_0323` -> `2016_0323_ML`).
pub const ML_KEY_SUFFIX: &str = "_ML";

pub const SAMPLE_COUNTS_HEADER: [&str; 3] = ["label", "train_rows", "test_rows"];

pub fn ml_key(date: &str) -> String {
    format!("{date}{ML_KEY_SUFFIX}")
}

/// Header for training/testing data files: `f0,..,f{k-1},label`.
pub fn dataset_header(feature_count: usize) -> Vec<String> {
    let mut cols: Vec<String> = (0..feature_count).map(|i| format!("f{i}")).collect();
    cols.push("label".to_string());
    cols
}
