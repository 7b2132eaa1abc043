//! Core dataset types.
//!
//! Schema contract (frozen): every input CSV column parses as `f64` except
//! the last, which is the label and is carried as its original text. One
//! file holds one leaf's measurements; rows never move between files.

use std::time::{SystemTime, UNIX_EPOCH};

/// One parsed leaf CSV: parallel feature/label arrays plus the source name.
#[derive(Clone, Debug)]
pub struct LeafFile {
    pub filename: String,
    pub features: Vec<Vec<f64>>,
    pub labels: Vec<String>,
}

impl LeafFile {
    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// Feature matrix plus label vector, kept in lockstep.
#[derive(Clone, Debug, Default)]
pub struct Dataset {
    x: Vec<Vec<f64>>,
    y: Vec<String>,
}

impl Dataset {
    pub fn push(&mut self, features: Vec<f64>, label: String) {
        self.x.push(features);
        self.y.push(label);
    }

    /// Moves every row of `file` into this dataset.
    pub fn extend_from_file(&mut self, file: LeafFile) {
        self.x.extend(file.features);
        self.y.extend(file.labels);
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn x(&self) -> &[Vec<f64>] {
        &self.x
    }

    pub fn y(&self) -> &[String] {
        &self.y
    }

    pub fn feature_count(&self) -> usize {
        self.x.first().map(Vec::len).unwrap_or(0)
    }
}

/// The four output arrays of a split: `(train_X, train_y, test_X, test_y)`.
#[derive(Clone, Debug, Default)]
pub struct TrainTest {
    pub train: Dataset,
    pub test: Dataset,
}

pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dataset_keeps_x_and_y_in_lockstep() {
        let mut ds = Dataset::default();
        ds.push(vec![1.0, 2.0], "a".to_string());
        ds.extend_from_file(LeafFile {
            filename: "leaf.csv".to_string(),
            features: vec![vec![3.0, 4.0], vec![5.0, 6.0]],
            labels: vec!["b".to_string(), "b".to_string()],
        });
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.x().len(), ds.y().len());
        assert_eq!(ds.feature_count(), 2);
    }
}
