use crate::{config, history};

use super::SourceError;

/// Errors that abort a collection pass or prevent a collector from being built.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Config(#[from] config::Error),
    #[error("couldn't get network statistics: {0}")]
    Source(#[source] SourceError),
    #[error(transparent)]
    History(#[from] history::Error),
    #[error("system clock is before the UNIX epoch: {0}")]
    Clock(#[from] std::time::SystemTimeError),
}

pub type Result<T> = std::result::Result<T, Error>;
