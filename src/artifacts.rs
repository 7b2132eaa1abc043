use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::schema::{
    dataset_header, FILE_SAMPLE_COUNTS, FILE_TESTING_DATA, FILE_TRAINING_DATA,
    SAMPLE_COUNTS_HEADER,
};
use crate::types::{Dataset, TrainTest};

pub fn save_training_data(ml_dir: &Path, train: &Dataset) -> anyhow::Result<PathBuf> {
    let path = ml_dir.join(FILE_TRAINING_DATA);
    write_dataset(&path, train)?;
    Ok(path)
}

pub fn save_testing_data(ml_dir: &Path, test: &Dataset) -> anyhow::Result<PathBuf> {
    let path = ml_dir.join(FILE_TESTING_DATA);
    write_dataset(&path, test)?;
    Ok(path)
}

fn write_dataset(path: &Path, ds: &Dataset) -> anyhow::Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("open {}", path.display()))?;
    wtr.write_record(dataset_header(ds.feature_count()))
        .context("write dataset header")?;

    for (feats, label) in ds.x().iter().zip(ds.y()) {
        let mut record: Vec<String> = feats.iter().map(|v| fmt_f64(*v)).collect();
        record.push(label.clone());
        wtr.write_record(record)
            .with_context(|| format!("write row to {}", path.display()))?;
    }

    wtr.flush()
        .with_context(|| format!("flush {}", path.display()))?;
    Ok(())
}

/// Per-label row counts over both sides, label-sorted.
pub fn write_sample_counts(ml_dir: &Path, tt: &TrainTest) -> anyhow::Result<PathBuf> {
    let mut counts: BTreeMap<&str, (u64, u64)> = BTreeMap::new();
    for label in tt.train.y() {
        counts.entry(label.as_str()).or_default().0 += 1;
    }
    for label in tt.test.y() {
        counts.entry(label.as_str()).or_default().1 += 1;
    }

    let path = ml_dir.join(FILE_SAMPLE_COUNTS);
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(&path)
        .with_context(|| format!("open {}", path.display()))?;
    wtr.write_record(SAMPLE_COUNTS_HEADER)
        .context("write sample counts header")?;
    for (label, (train_rows, test_rows)) in counts {
        wtr.write_record([label.to_string(), train_rows.to_string(), test_rows.to_string()])
            .with_context(|| format!("write row to {}", path.display()))?;
    }
    wtr.flush()
        .with_context(|| format!("flush {}", path.display()))?;
    Ok(path)
}

/// Removes whichever of the three artifacts exist; absent files are skipped.
/// Returns the paths actually removed. Safe to call twice in a row.
pub fn delete_artifacts(ml_dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut removed = Vec::new();
    for name in [FILE_TRAINING_DATA, FILE_TESTING_DATA, FILE_SAMPLE_COUNTS] {
        let path = ml_dir.join(name);
        if !path.exists() {
            continue;
        }
        std::fs::remove_file(&path).with_context(|| format!("remove {}", path.display()))?;
        removed.push(path);
    }
    Ok(removed)
}

fn fmt_f64(v: f64) -> String {
    if !v.is_finite() {
        return "NaN".to_string();
    }
    format!("{v:.6}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "leafprep_artifacts_{tag}_{}_{}",
            std::process::id(),
            crate::types::now_ms()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).expect("create fixture dir");
        dir
    }

    fn sample_train_test() -> TrainTest {
        let mut tt = TrainTest::default();
        tt.train.push(vec![0.1, 0.2], "healthy".to_string());
        tt.train.push(vec![0.3, 0.4], "stressed".to_string());
        tt.test.push(vec![0.5, 0.6], "healthy".to_string());
        tt
    }

    #[test]
    fn datasets_are_written_with_headers() -> anyhow::Result<()> {
        let dir = fixture_dir("write");
        let tt = sample_train_test();
        let train_path = save_training_data(&dir, &tt.train)?;
        let test_path = save_testing_data(&dir, &tt.test)?;

        let raw = std::fs::read_to_string(&train_path)?;
        let mut lines = raw.lines();
        assert_eq!(lines.next(), Some("f0,f1,label"));
        assert_eq!(lines.next(), Some("0.100000,0.200000,healthy"));
        assert_eq!(lines.next(), Some("0.300000,0.400000,stressed"));
        assert_eq!(lines.next(), None);

        let raw = std::fs::read_to_string(&test_path)?;
        assert_eq!(raw.lines().count(), 2);
        Ok(())
    }

    #[test]
    fn sample_counts_tally_both_sides() -> anyhow::Result<()> {
        let dir = fixture_dir("counts");
        let tt = sample_train_test();
        let path = write_sample_counts(&dir, &tt)?;

        let raw = std::fs::read_to_string(&path)?;
        let lines: Vec<&str> = raw.lines().collect();
        assert_eq!(lines, ["label,train_rows,test_rows", "healthy,1,1", "stressed,1,0"]);
        Ok(())
    }

    #[test]
    fn regeneration_overwrites_existing_artifacts() -> anyhow::Result<()> {
        let dir = fixture_dir("overwrite");
        let tt = sample_train_test();
        save_training_data(&dir, &tt.train)?;

        let mut smaller = Dataset::default();
        smaller.push(vec![9.0, 9.0], "healthy".to_string());
        let path = save_training_data(&dir, &smaller)?;
        assert_eq!(std::fs::read_to_string(&path)?.lines().count(), 2);
        Ok(())
    }

    #[test]
    fn delete_is_idempotent() -> anyhow::Result<()> {
        let dir = fixture_dir("delete");
        let tt = sample_train_test();
        save_training_data(&dir, &tt.train)?;
        save_testing_data(&dir, &tt.test)?;
        write_sample_counts(&dir, &tt)?;

        let removed = delete_artifacts(&dir)?;
        assert_eq!(removed.len(), 3);
        // Second call finds nothing and still succeeds.
        let removed = delete_artifacts(&dir)?;
        assert!(removed.is_empty());
        Ok(())
    }

    #[test]
    fn missing_output_directory_is_an_error() {
        let dir = std::env::temp_dir().join("leafprep_artifacts_no_such_dir");
        let tt = sample_train_test();
        assert!(save_training_data(&dir, &tt.train).is_err());
    }
}
