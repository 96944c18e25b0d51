/// Errors raised while building a [`DeviceSelector`](super::DeviceSelector).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(
        "includes and excludes can't have interfaces simultaneously: includes={includes:?}, excludes={excludes:?}"
    )]
    ConflictingInterfaces {
        includes: Vec<String>,
        excludes: Vec<String>,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
