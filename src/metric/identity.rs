use std::borrow::Borrow;
use std::fmt;

use super::LabelPair;

/// Deterministic key of a counter: the metric name followed by `-name=value` for
/// every label.
///
/// Labels are ordered by name before the key is built, so the same label set
/// always yields the same key regardless of the order it was supplied in.
///
/// # Examples
///
/// ```
/// # use netif_rates::metric::{LabelPair, MetricIdentity};
/// let id = MetricIdentity::new("bytes_sent", &[LabelPair::new("interface", "eno1")]);
/// assert_eq!(id.as_ref(), "bytes_sent-interface=eno1");
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(transparent)]
pub struct MetricIdentity(String);

impl MetricIdentity {
    pub fn new(name: &str, labels: &[LabelPair]) -> Self {
        let mut sorted: Vec<&LabelPair> = labels.iter().collect();
        // stable: repeated label names keep the caller's order
        sorted.sort_by(|a, b| a.name.cmp(&b.name));

        let mut key = String::with_capacity(
            name.len()
                + sorted
                    .iter()
                    .map(|l| l.name.len() + l.value.len() + 2)
                    .sum::<usize>(),
        );
        key.push_str(name);
        for label in sorted {
            key.push('-');
            key.push_str(&label.name);
            key.push('=');
            key.push_str(&label.value);
        }

        Self(key)
    }
}

impl AsRef<str> for MetricIdentity {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for MetricIdentity {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MetricIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
