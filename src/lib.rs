//! Netif Rates: turns raw network interface counters into counter metric families and
//! derives per-second rate gauges from the readings of the previous pass.
//!
//! The crate is the core of a periodic check: something outside reads the interface
//! counter table and something outside encodes the resulting families. In between, a
//! [`collector::Collector`] filters interfaces, correlates every reading with its
//! predecessor in a small JSON history file and produces the metric model.

pub mod collector;
pub mod config;
pub mod error;
pub mod fsutil;
pub mod history;
pub mod metric;
pub mod rate;
pub mod selector;
