use std::path::PathBuf;

/// Failure kinds that terminate a run with a message rather than a stack of
/// I/O context. Wrapped in `anyhow::Error` at the call sites so tests can
/// still downcast to the concrete kind.
#[derive(Debug, thiserror::Error)]
pub enum PrepError {
    /// The date (or its `_ML` companion) is missing from `[directories]`.
    #[error("unknown date key in [directories]: {key}")]
    UnknownDateKey { key: String },

    /// The keyword filter matched zero CSV files.
    #[error("no data files in {} match keywords {keywords:?}", .dir.display())]
    NoDataFound { dir: PathBuf, keywords: Vec<String> },

    /// `save_proportion` outside `[0,1]` or non-finite.
    #[error("save_proportion must be finite in [0,1], got {value}")]
    InvalidProportion { value: f64 },
}
