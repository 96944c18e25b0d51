//! Metric model produced by a collection pass.
//!
//! - [`MetricIdentity`]: the key correlating readings of the same counter across passes.
//! - [`CounterSample`]: one raw counter reading taken during a pass.
//! - [`MetricFamily`]: a named group of [`Sample`]s of one [`MetricKind`], ready to be
//!   handed to an exposition encoder.
mod family;
mod identity;
mod sample;

pub use family::{MetricFamily, MetricKind};
pub use identity::MetricIdentity;
pub use sample::{CounterSample, LabelPair, Sample};
