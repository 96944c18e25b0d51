use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use super::{Error, Result};
use crate::fsutil;
use crate::metric::{CounterSample, MetricIdentity};

/// Last observed value of a counter.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CounterHistoryRecord {
    pub value: f64,
    /// Milliseconds since the UNIX epoch.
    #[serde(rename = "timestamp")]
    pub timestamp_ms: i64,
}

/// Mapping from counter identity to its last observed reading.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CounterHistoryStore {
    records: BTreeMap<MetricIdentity, CounterHistoryRecord>,
}

impl CounterHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the history stored at `path`.
    ///
    /// A path that does not exist yields an empty store.
    ///
    /// # Errors
    ///
    /// - [`Error::NotAFile`] if `path` is a directory.
    /// - [`Error::Metadata`] if `path` cannot be inspected for any reason other than absence.
    /// - [`Error::FileOpen`] if the file exists but cannot be opened.
    /// - [`Error::Deserialize`] if the contents are not a valid history document.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        match std::fs::metadata(path) {
            Ok(metadata) if metadata.is_dir() => {
                return Err(Error::NotAFile {
                    path: path.to_path_buf(),
                });
            }
            Ok(_) => {}
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                log::debug!(
                    "History file {} does not exist, starting empty",
                    path.display()
                );
                return Ok(Self::new());
            }
            Err(source) => {
                return Err(Error::Metadata {
                    path: path.to_path_buf(),
                    source,
                });
            }
        }

        let reader = match fsutil::open_file_reader(path) {
            Ok(reader) => reader,
            // removed between the metadata check and the open
            Err(err) if err.source.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::new());
            }
            Err(err) => return Err(err.into()),
        };

        let store = Self::from_reader(reader, path)?;
        log::debug!(
            "Loaded {} history records from {}",
            store.len(),
            path.display()
        );
        Ok(store)
    }

    /// Decodes a history document from `reader`.
    ///
    /// `origin` only names the source in error messages.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Deserialize`] if reading fails or the document is malformed.
    /// No partially decoded state is kept.
    pub fn from_reader<R: Read>(reader: R, origin: &Path) -> Result<Self> {
        let records =
            serde_json::from_reader(reader).map_err(|source| Error::Deserialize {
                path: origin.to_path_buf(),
                source,
            })?;
        Ok(Self { records })
    }

    /// Returns the last reading recorded under `identity`.
    pub fn get(&self, identity: &MetricIdentity) -> Option<CounterHistoryRecord> {
        self.records.get(identity).copied()
    }

    /// Records a reading, replacing whatever was stored under `identity`.
    pub fn put(&mut self, identity: MetricIdentity, value: f64, timestamp_ms: i64) {
        self.records.insert(
            identity,
            CounterHistoryRecord {
                value,
                timestamp_ms,
            },
        );
    }

    /// Records the reading carried by `sample`.
    pub fn record(&mut self, sample: &CounterSample) {
        self.put(
            sample.identity().clone(),
            sample.value(),
            sample.timestamp_ms(),
        );
    }

    /// Writes every record to `path`, replacing the previous file.
    ///
    /// # Errors
    ///
    /// - [`Error::NonFiniteValue`] if a record holds NaN or an infinity, which JSON
    ///   cannot represent. The previous file is left in place.
    /// - [`Error::Serialize`] if the records cannot be encoded.
    /// - [`Error::Write`] if the file cannot be replaced.
    pub fn persist_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some((identity, _)) = self.records.iter().find(|(_, r)| !r.value.is_finite()) {
            return Err(Error::NonFiniteValue {
                path: path.to_path_buf(),
                identity: identity.clone(),
            });
        }
        let content = serde_json::to_vec(&self.records).map_err(|source| Error::Serialize {
            path: path.to_path_buf(),
            source,
        })?;
        fsutil::replace_file(path, &content)?;
        log::debug!(
            "Persisted {} history records to {}",
            self.len(),
            path.display()
        );
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates over the records in identity order.
    pub fn iter(&self) -> impl Iterator<Item = (&MetricIdentity, &CounterHistoryRecord)> {
        self.records.iter()
    }
}
