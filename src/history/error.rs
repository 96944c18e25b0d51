use std::path::PathBuf;

use crate::fsutil;
use crate::metric::MetricIdentity;

/// Errors raised while loading or persisting the counter history.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unable to use history file `{path}`: not a regular file")]
    NotAFile { path: PathBuf },
    #[error("failed to read metadata of history file `{path}`: {source}")]
    Metadata {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    FileOpen(#[from] fsutil::FileOpenError),
    #[error("failed to decode history file `{path}`: {source}")]
    Deserialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode history for `{path}`: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("refusing to write non-finite value of `{identity}` to history file `{path}`")]
    NonFiniteValue {
        path: PathBuf,
        identity: MetricIdentity,
    },
    #[error(transparent)]
    Write(#[from] fsutil::FileReplaceError),
}

pub type Result<T> = std::result::Result<T, Error>;
