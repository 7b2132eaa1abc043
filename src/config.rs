use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Deserialize;

use crate::error::PrepError;
use crate::schema::ml_key;

/// Process-wide configuration: the date-keyed directory table plus split
/// defaults. Loaded once at startup, validated once, immutable after.
#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub split: SplitConfig,
    /// Maps a date key (`2016_0323`) to its raw-CSV directory and the
    /// companion `_ML` key (`2016_0323_ML`) to its artifact directory.
    #[serde(default)]
    pub directories: BTreeMap<String, PathBuf>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SplitConfig {
    /// Default train fraction when the CLI does not pass `-s`.
    #[serde(default = "default_save_proportion")]
    pub save_proportion: f64,
    /// Seed for the by-leaf file shuffle; fixed so reruns reproduce the
    /// same leaf assignment.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            save_proportion: default_save_proportion(),
            seed: default_seed(),
        }
    }
}

fn default_save_proportion() -> f64 {
    0.5
}

fn default_seed() -> u64 {
    20_160_323
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("read {}", path.display()))?;
        let cfg: Config =
            toml::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let p = self.split.save_proportion;
        if !p.is_finite() || !(0.0..=1.0).contains(&p) {
            anyhow::bail!(PrepError::InvalidProportion { value: p });
        }
        for (key, dir) in &self.directories {
            if key.trim().is_empty() {
                anyhow::bail!("empty date key in [directories]");
            }
            if dir.as_os_str().is_empty() {
                anyhow::bail!("[directories] entry {key:?} has an empty path");
            }
        }
        Ok(())
    }

    /// Raw-CSV directory for `date`.
    pub fn data_dir(&self, date: &str) -> Result<&Path, PrepError> {
        self.lookup(date)
    }

    /// Artifact directory for `date` (the `<date>_ML` entry).
    pub fn ml_dir(&self, date: &str) -> Result<&Path, PrepError> {
        self.lookup(&ml_key(date))
    }

    fn lookup(&self, key: &str) -> Result<&Path, PrepError> {
        self.directories
            .get(key)
            .map(PathBuf::as_path)
            .ok_or_else(|| PrepError::UnknownDateKey {
                key: key.to_string(),
            })
    }
}
