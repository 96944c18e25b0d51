//! Collector configuration.
//!
//! [`Config`] is a plain value built once and handed to
//! [`Collector::new`](crate::collector::Collector::new). It can be assembled in code or
//! decoded from a JSON document; missing keys take their defaults:
//!
//! ```json
//! {
//!   "include_interfaces": [],
//!   "exclude_interfaces": ["lo"],
//!   "loopback_interface": "lo",
//!   "sum": false,
//!   "state_file": "",
//!   "max_rate_interval_secs": 60
//! }
//! ```
mod error;

pub use error::{Error, Result};

use std::io::Read;
use std::path::{Path, PathBuf};

use crate::fsutil;
use crate::rate::MaxRateInterval;
use crate::selector::DeviceSelector;

/// Name of the loopback interface excluded by default.
pub const DEFAULT_LOOPBACK_INTERFACE: &str = "lo";

/// Default upper bound, in seconds, on the age of a reading used for rates.
pub const DEFAULT_MAX_RATE_INTERVAL_SECS: i64 = 60;

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct Config {
    /// Interfaces to collect. When non-empty, everything else is ignored.
    pub include_interfaces: Vec<String>,
    /// Interfaces to skip. Only honoured when `include_interfaces` is empty.
    pub exclude_interfaces: Vec<String>,
    /// Loopback name that may stay in `exclude_interfaces` next to includes.
    pub loopback_interface: String,
    /// Append an `interface="all"` sample holding the total to every family.
    pub sum: bool,
    /// History file used for rates. Empty disables rates and persistence.
    pub state_file: PathBuf,
    /// Maximum age in seconds of the previous reading for a rate to be emitted. `0` means no limit.
    pub max_rate_interval_secs: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            include_interfaces: Vec::new(),
            exclude_interfaces: vec![DEFAULT_LOOPBACK_INTERFACE.to_owned()],
            loopback_interface: DEFAULT_LOOPBACK_INTERFACE.to_owned(),
            sum: false,
            state_file: PathBuf::new(),
            max_rate_interval_secs: DEFAULT_MAX_RATE_INTERVAL_SECS,
        }
    }
}

impl Config {
    /// Reads a JSON configuration document from the file at `path`.
    ///
    /// The result is not validated; see [`Config::validate`].
    ///
    /// # Errors
    ///
    /// - [`Error::FileOpen`] if the file cannot be opened.
    /// - [`Error::Parse`] if the document is not valid configuration.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let reader = fsutil::open_file_reader(path)?;
        Self::from_reader(reader, path)
    }

    /// Reads a JSON configuration document from `reader`.
    ///
    /// `origin` only names the source in error messages.
    ///
    /// # Examples
    ///
    /// ```
    /// # use netif_rates::config::Config;
    /// let json = r#"{"include_interfaces": ["eno1"], "sum": true}"#;
    /// let config = Config::from_reader(json.as_bytes(), "inline").unwrap();
    /// assert!(config.sum);
    /// assert_eq!(config.max_rate_interval_secs, 60);
    /// ```
    pub fn from_reader<R: Read>(reader: R, origin: impl AsRef<Path>) -> Result<Self> {
        serde_json::from_reader(reader).map_err(|source| Error::Parse {
            origin: origin.as_ref().to_path_buf(),
            source,
        })
    }

    /// Normalises and checks the configuration.
    ///
    /// Interface names are trimmed and blank names dropped. An exclude list holding
    /// only the loopback interface is cleared when includes are present.
    ///
    /// # Errors
    ///
    /// - [`Error::NegativeMaxRateInterval`] if `max_rate_interval_secs` is negative.
    /// - [`Error::Selector`] if includes and excludes conflict.
    pub fn validate(mut self) -> Result<Self> {
        self.loopback_interface = self.loopback_interface.trim().to_owned();
        normalize_interface_names(&mut self.include_interfaces);
        normalize_interface_names(&mut self.exclude_interfaces);

        if !self.include_interfaces.is_empty()
            && self
                .exclude_interfaces
                .iter()
                .all(|name| *name == self.loopback_interface)
        {
            self.exclude_interfaces.clear();
        }

        self.max_rate_interval()?;
        self.selector()?;

        Ok(self)
    }

    /// Builds the [`DeviceSelector`] described by the interface lists.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Selector`] if includes and excludes conflict.
    pub fn selector(&self) -> Result<DeviceSelector> {
        Ok(DeviceSelector::new(
            self.include_interfaces.iter().cloned(),
            self.exclude_interfaces.iter().cloned(),
            &self.loopback_interface,
        )?)
    }

    /// # Errors
    ///
    /// Returns [`Error::NegativeMaxRateInterval`] if `max_rate_interval_secs` is negative.
    pub fn max_rate_interval(&self) -> Result<MaxRateInterval> {
        u64::try_from(self.max_rate_interval_secs)
            .map(MaxRateInterval::from_secs)
            .map_err(|_| Error::NegativeMaxRateInterval(self.max_rate_interval_secs))
    }

    /// Returns the history file, or `None` when rates are disabled.
    pub fn state_file(&self) -> Option<&Path> {
        if self.state_file.as_os_str().is_empty() {
            None
        } else {
            Some(&self.state_file)
        }
    }
}

fn normalize_interface_names(names: &mut Vec<String>) {
    for name in names.iter_mut() {
        let trimmed = name.trim();
        if trimmed.len() != name.len() {
            *name = trimmed.to_owned();
        }
    }
    names.retain(|name| !name.is_empty());
}
