use std::path::PathBuf;

use crate::{fsutil, selector};

/// Configuration errors. All of them are raised before any collection happens.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("max rate interval must be 0 or a positive value, got {0}")]
    NegativeMaxRateInterval(i64),
    #[error(transparent)]
    Selector(#[from] selector::Error),
    #[error(transparent)]
    FileOpen(#[from] fsutil::FileOpenError),
    #[error("failed to parse configuration from `{origin}`: {source}")]
    Parse {
        origin: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
