//! Interface selection.
//!
//! A [`DeviceSelector`] decides whether a network interface takes part in metric
//! generation. It works in one of three modes:
//!
//! - **include mode** (includes non-empty): only the listed interfaces are kept.
//! - **exclude mode** (only excludes non-empty): every interface except the listed ones is kept.
//! - **pass-through** (both empty): nothing is ignored.
//!
//! Includes and excludes are mutually exclusive, with one carve-out: an exclude
//! set consisting of just the loopback interface may accompany includes. The
//! loopback exclusion is then meaningless and dropped, since include mode
//! already ignores everything not listed.
mod error;

pub use error::{Error, Result};

use std::collections::HashSet;

/// Filters interfaces by name according to an include or exclude list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceSelector {
    includes: HashSet<String>,
    excludes: HashSet<String>,
}

impl DeviceSelector {
    /// Builds a selector from include and exclude lists.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConflictingInterfaces`] if both lists are non-empty and the
    /// exclude list is anything other than exactly `loopback`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use netif_rates::selector::DeviceSelector;
    /// let selector = DeviceSelector::new(["eno1", "eno2"], ["lo"], "lo").unwrap();
    /// assert!(!selector.ignored("eno1"));
    /// assert!(selector.ignored("eno3"));
    ///
    /// assert!(DeviceSelector::new(["eno1"], ["docker0"], "lo").is_err());
    /// ```
    pub fn new<I, E>(includes: I, excludes: E, loopback: &str) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<String>,
        E: IntoIterator,
        E::Item: Into<String>,
    {
        let includes: HashSet<String> = includes.into_iter().map(Into::into).collect();
        let excludes: HashSet<String> = excludes.into_iter().map(Into::into).collect();

        if !includes.is_empty() && !excludes.is_empty() && !is_loopback_only(&excludes, loopback)
        {
            let mut includes: Vec<String> = includes.into_iter().collect();
            let mut excludes: Vec<String> = excludes.into_iter().collect();
            includes.sort();
            excludes.sort();
            return Err(Error::ConflictingInterfaces { includes, excludes });
        }

        Ok(Self { includes, excludes })
    }

    /// Returns whether the interface `name` should be left out of metric generation.
    pub fn ignored(&self, name: &str) -> bool {
        if !self.includes.is_empty() {
            return !self.includes.contains(name);
        }
        if !self.excludes.is_empty() {
            return self.excludes.contains(name);
        }
        false
    }
}

fn is_loopback_only(excludes: &HashSet<String>, loopback: &str) -> bool {
    excludes.len() == 1 && excludes.contains(loopback)
}
