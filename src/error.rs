pub trait ResultLogExt<T, E> {
    /// Logs the error at `warn` level and hands the result back unchanged.
    fn warn_log(self) -> Self;
}

impl<T, E> ResultLogExt<T, E> for std::result::Result<T, E>
where
    E: std::error::Error,
{
    fn warn_log(self) -> Self {
        self.inspect_err(|err| log::warn!("{err}"))
    }
}
