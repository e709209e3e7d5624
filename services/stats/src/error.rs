use std::path::PathBuf;

/// Everything the engine can fail with.
///
/// Cell-level garbage is deliberately NOT represented here: a value that
/// does not parse as an integer counts as 0 at load time, because the
/// early dates in the source files are sparse.
#[derive(Debug, thiserror::Error)]
pub enum StatsError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("no data found for country: {country}")]
    NotFound { country: String },
}

pub type Result<T> = std::result::Result<T, StatsError>;
