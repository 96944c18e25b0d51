//! The collection pipeline.
//!
//! One call to [`Collector::collect`] is one pass:
//!
//! 1. take a raw [`NetStats`] snapshot from a [`SnapshotSource`],
//! 2. load the counter history from the configured state file,
//! 3. for every metric type and every interface the [`DeviceSelector`] keeps,
//!    emit a counter sample, derive a rate against the history and record the new reading,
//! 4. optionally append an `interface="all"` total to each family,
//! 5. write the history back.
//!
//! Families come out ordered by metric type, each counter family directly followed
//! by its `<type>_rate` gauge family when at least one rate was produced.
//!
//! # Example
//!
//! ```no_run
//! use netif_rates::collector::{Collector, NetStats, SourceError};
//! use netif_rates::config::Config;
//! use netif_rates::selector::DeviceSelector;
//!
//! let collector = Collector::new(Config {
//!     state_file: "/var/cache/netif-rates.json".into(),
//!     sum: true,
//!     ..Config::default()
//! })?;
//!
//! let mut source = |_: &DeviceSelector| -> Result<NetStats, SourceError> {
//!     let mut stats = NetStats::new();
//!     stats.entry("bytes_sent".to_owned()).or_default().insert("eno1".to_owned(), 1024.0);
//!     Ok(stats)
//! };
//!
//! let collection = collector.collect(&mut source)?;
//! for family in collection.families() {
//!     println!("{} ({} samples)", family.name(), family.samples().len());
//! }
//! # Ok::<(), netif_rates::collector::Error>(())
//! ```
//!
//! [`DeviceSelector`]: crate::selector::DeviceSelector
mod error;
mod help;
mod pipeline;
mod source;

pub use error::{Error, Result};
pub use pipeline::{Collection, Collector, INTERFACE_LABEL, SUM_INTERFACE};
pub use source::{NetStats, SnapshotSource, SourceError};
