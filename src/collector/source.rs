use std::collections::BTreeMap;

use crate::selector::DeviceSelector;

/// Raw interface counters taken at one instant: `metric type -> interface -> value`.
///
/// For example `stats["bytes_sent"]["eno1"]` is the number of bytes sent by `eno1`.
pub type NetStats = BTreeMap<String, BTreeMap<String, f64>>;

/// Error reported by a [`SnapshotSource`].
pub type SourceError = Box<dyn std::error::Error + Send + Sync>;

/// Produces the raw counter snapshot for a pass.
///
/// The selector is handed over so a source may skip ignored interfaces while
/// reading; the collector filters the snapshot again either way.
///
/// Any `FnMut(&DeviceSelector) -> Result<NetStats, SourceError>` is a source.
pub trait SnapshotSource {
    fn snapshot(&mut self, selector: &DeviceSelector) -> Result<NetStats, SourceError>;
}

impl<F> SnapshotSource for F
where
    F: FnMut(&DeviceSelector) -> Result<NetStats, SourceError>,
{
    fn snapshot(&mut self, selector: &DeviceSelector) -> Result<NetStats, SourceError> {
        self(selector)
    }
}
