use std::path::Path;

use anyhow::Context as _;

use crate::types::LeafFile;

/// Parses one leaf CSV into parallel feature/label arrays.
///
/// Schema contract: no header row; every column is a finite `f64` feature
/// except the last, which is the label and is kept as trimmed text. All
/// rows in a file must have the same width.
pub fn read_leaf_file(dir: &Path, filename: &str) -> anyhow::Result<LeafFile> {
    let path = dir.join(filename);
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(&path)
        .with_context(|| format!("open {}", path.display()))?;

    let mut features: Vec<Vec<f64>> = Vec::new();
    let mut labels: Vec<String> = Vec::new();
    let mut width: Option<usize> = None;

    for (row, record) in rdr.records().enumerate() {
        let record = record.with_context(|| format!("read {} row {row}", path.display()))?;
        if record.len() < 2 {
            anyhow::bail!(
                "{} row {row}: need at least one feature column plus a label",
                path.display()
            );
        }
        match width {
            None => width = Some(record.len()),
            Some(w) if w != record.len() => anyhow::bail!(
                "{} row {row}: expected {w} columns, got {}",
                path.display(),
                record.len()
            ),
            Some(_) => {}
        }

        let label_idx = record.len() - 1;
        let mut feats: Vec<f64> = Vec::with_capacity(label_idx);
        for (col, cell) in record.iter().take(label_idx).enumerate() {
            let v: f64 = cell.parse().with_context(|| {
                format!("{} row {row} col {col}: not a number: {cell:?}", path.display())
            })?;
            if !v.is_finite() {
                anyhow::bail!("{} row {row} col {col}: non-finite value", path.display());
            }
            feats.push(v);
        }

        features.push(feats);
        labels.push(record.get(label_idx).unwrap_or("").to_string());
    }

    Ok(LeafFile {
        filename: filename.to_string(),
        features,
        labels,
    })
}
