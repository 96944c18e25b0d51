use super::MetricIdentity;

/// A single `name=value` label attached to a sample.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct LabelPair {
    pub name: String,
    pub value: String,
}

impl LabelPair {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// One value of a [`MetricFamily`](super::MetricFamily), with its labels and the
/// time (in milliseconds since the UNIX epoch) it was observed.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Sample {
    labels: Vec<LabelPair>,
    value: f64,
    timestamp_ms: i64,
}

impl Sample {
    pub fn new(labels: Vec<LabelPair>, value: f64, timestamp_ms: i64) -> Self {
        Self {
            labels,
            value,
            timestamp_ms,
        }
    }

    pub fn labels(&self) -> &[LabelPair] {
        &self.labels
    }

    /// Returns the value of the label called `name`, if present.
    pub fn label(&self, name: &str) -> Option<&str> {
        self.labels
            .iter()
            .find(|label| label.name == name)
            .map(|label| label.value.as_str())
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn timestamp_ms(&self) -> i64 {
        self.timestamp_ms
    }
}

/// A raw counter reading taken during one collection pass.
#[derive(Debug, Clone, PartialEq)]
pub struct CounterSample {
    identity: MetricIdentity,
    value: f64,
    timestamp_ms: i64,
}

impl CounterSample {
    pub fn new(identity: MetricIdentity, value: f64, timestamp_ms: i64) -> Self {
        Self {
            identity,
            value,
            timestamp_ms,
        }
    }

    pub fn identity(&self) -> &MetricIdentity {
        &self.identity
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Milliseconds since the UNIX epoch.
    pub fn timestamp_ms(&self) -> i64 {
        self.timestamp_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_label_lookup() {
        let sample = Sample::new(
            vec![
                LabelPair::new("interface", "eno1"),
                LabelPair::new("host", "web-1"),
            ],
            42.0,
            1_000,
        );
        assert_eq!(sample.label("interface"), Some("eno1"));
        assert_eq!(sample.label("host"), Some("web-1"));
        assert_eq!(sample.label("missing"), None);
    }

    #[test]
    fn test_sample_keeps_label_order() {
        let sample = Sample::new(
            vec![
                LabelPair::new("interface", "eno1"),
                LabelPair::new("host", "web-1"),
            ],
            42.0,
            1_000,
        );
        let names: Vec<&str> = sample.labels().iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["interface", "host"]);
        assert_eq!(sample.value(), 42.0);
        assert_eq!(sample.timestamp_ms(), 1_000);
    }
}
