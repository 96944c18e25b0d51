use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

/// Error that occurs when opening a file fails.
#[derive(Debug, thiserror::Error)]
#[error("failed to open file `{path}`: {source}")]
pub struct FileOpenError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// Error that occurs when replacing the contents of a file fails.
#[derive(Debug, thiserror::Error)]
#[error("failed to replace file `{path}`: {source}")]
pub struct FileReplaceError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// Opens a file at the given path and wraps it in a [`BufReader`].
///
/// # Errors
///
/// Returns a [`FileOpenError`] if the file cannot be opened.
///
/// # Example
/// ```no_run
/// # use netif_rates::fsutil;
/// let reader = fsutil::open_file_reader("/some/file.json")?;
/// # Ok::<(), fsutil::FileOpenError>(())
/// ```
pub fn open_file_reader(path: impl AsRef<Path>) -> Result<BufReader<File>, FileOpenError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| FileOpenError {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufReader::new(file))
}

/// Replaces the file at `path` with `contents`.
///
/// The data is written to a temporary file in the destination directory, synced,
/// and renamed over `path`. Readers observe either the old or the new contents.
/// If any step fails the temporary file is removed and `path` is left untouched.
///
/// # Errors
///
/// Returns a [`FileReplaceError`] if the temporary file cannot be created, written,
/// or renamed onto `path`.
pub fn replace_file(path: impl AsRef<Path>, contents: &[u8]) -> Result<(), FileReplaceError> {
    let path = path.as_ref();
    let wrap = |source: io::Error| FileReplaceError {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(wrap)?;
    tmp.write_all(contents).map_err(wrap)?;
    tmp.as_file().sync_all().map_err(wrap)?;
    set_default_permissions(tmp.as_file()).map_err(wrap)?;
    tmp.persist(path).map_err(|err| wrap(err.error))?;

    Ok(())
}

// Temporary files are created 0600.
#[cfg(unix)]
fn set_default_permissions(file: &File) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(std::fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn set_default_permissions(_file: &File) -> io::Result<()> {
    Ok(())
}
