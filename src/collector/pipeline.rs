use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use super::help;
use super::{Error, NetStats, Result, SnapshotSource};
use crate::config::Config;
use crate::error::ResultLogExt;
use crate::history::{self, CounterHistoryStore};
use crate::metric::{CounterSample, LabelPair, MetricFamily, MetricIdentity, MetricKind, Sample};
use crate::rate::RateCalculator;
use crate::selector::DeviceSelector;

/// Label carrying the interface name on every sample.
pub const INTERFACE_LABEL: &str = "interface";

/// Interface label value of the synthetic total sample.
pub const SUM_INTERFACE: &str = "all";

/// Result of one collection pass.
///
/// The families are always present once the snapshot was read and the history
/// loaded. Persisting the updated history may still have failed; that outcome is
/// kept separately so callers can emit the metrics regardless.
#[derive(Debug)]
pub struct Collection {
    families: Vec<MetricFamily>,
    persisted: history::Result<()>,
}

impl Collection {
    /// Counter families, each directly followed by its rate family when one was produced.
    pub fn families(&self) -> &[MetricFamily] {
        &self.families
    }

    pub fn into_families(self) -> Vec<MetricFamily> {
        self.families
    }

    /// Returns the error raised while persisting the history, if any.
    pub fn persist_error(&self) -> Option<&history::Error> {
        self.persisted.as_ref().err()
    }

    /// Splits the collection into its families and the persistence outcome.
    pub fn into_parts(self) -> (Vec<MetricFamily>, history::Result<()>) {
        (self.families, self.persisted)
    }
}

/// Turns raw interface counters into metric families, deriving rates from the
/// history kept in the configured state file.
#[derive(Debug, Clone)]
pub struct Collector {
    selector: DeviceSelector,
    rates: RateCalculator,
    sum: bool,
    state_file: Option<PathBuf>,
}

impl Collector {
    /// Validates `config` and builds a collector from it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the configuration is invalid.
    pub fn new(config: Config) -> Result<Self> {
        let config = config.validate()?;

        Ok(Self {
            selector: config.selector()?,
            rates: RateCalculator::new(config.max_rate_interval()?),
            sum: config.sum,
            state_file: config.state_file().map(Path::to_path_buf),
        })
    }

    pub fn selector(&self) -> &DeviceSelector {
        &self.selector
    }

    pub fn state_file(&self) -> Option<&Path> {
        self.state_file.as_deref()
    }

    /// Runs a pass stamped with the current wall-clock time.
    ///
    /// # Errors
    ///
    /// See [`Collector::collect_at`]. Additionally returns [`Error::Clock`] if the
    /// system clock reads before the UNIX epoch.
    pub fn collect(&self, source: &mut impl SnapshotSource) -> Result<Collection> {
        let now_ms = SystemTime::now().duration_since(UNIX_EPOCH)?.as_millis();
        self.collect_at(source, i64::try_from(now_ms).unwrap_or(i64::MAX))
    }

    /// Runs a pass with every sample stamped `now_ms` (milliseconds since the UNIX epoch).
    ///
    /// # Errors
    ///
    /// - [`Error::Source`] if the snapshot cannot be taken.
    /// - [`Error::History`] if the state file exists but cannot be loaded.
    ///
    /// A failure to persist the history is not an error here; it is reported by
    /// [`Collection::persist_error`].
    pub fn collect_at(&self, source: &mut impl SnapshotSource, now_ms: i64) -> Result<Collection> {
        let stats = source.snapshot(&self.selector).map_err(Error::Source)?;

        let mut store = match &self.state_file {
            Some(path) => CounterHistoryStore::load_from(path)?,
            None => CounterHistoryStore::new(),
        };

        let families = self.generate_families(&stats, &mut store, now_ms);
        log::debug!(
            "Collected {} metric families for {} metric types",
            families.len(),
            stats.len()
        );

        let persisted = match &self.state_file {
            Some(path) => store.persist_to(path).warn_log(),
            None => Ok(()),
        };

        Ok(Collection {
            families,
            persisted,
        })
    }

    fn generate_families(
        &self,
        stats: &NetStats,
        store: &mut CounterHistoryStore,
        now_ms: i64,
    ) -> Vec<MetricFamily> {
        let mut families = Vec::with_capacity(stats.len() * 2);

        for (metric_type, readings) in stats {
            let mut family = MetricFamily::new(
                metric_type.as_str(),
                help::counter_help(metric_type),
                MetricKind::Counter,
            );
            let mut rate_family = MetricFamily::new(
                help::rate_metric_name(metric_type),
                help::rate_help(metric_type),
                MetricKind::Gauge,
            );

            let mut total = 0.0;
            let mut rate_total = 0.0;

            for (interface, &value) in readings {
                if self.selector.ignored(interface) {
                    continue;
                }

                let labels = interface_labels(interface);
                let counter = CounterSample::new(
                    MetricIdentity::new(metric_type, &labels),
                    value,
                    now_ms,
                );

                if let Some(rate) = self.rates.rate(&counter, store.get(counter.identity())) {
                    rate_family.push(Sample::new(labels.clone(), rate, now_ms));
                    rate_total += rate;
                }

                if value.is_finite() {
                    store.record(&counter);
                } else {
                    log::debug!(
                        "Not recording non-finite reading {value} for {}",
                        counter.identity()
                    );
                }
                family.push(Sample::new(labels, value, now_ms));
                total += value;
            }

            let has_rate = !rate_family.is_empty();

            if self.sum {
                family.push(Sample::new(interface_labels(SUM_INTERFACE), total, now_ms));
                if has_rate {
                    rate_family.push(Sample::new(
                        interface_labels(SUM_INTERFACE),
                        rate_total,
                        now_ms,
                    ));
                }
            }

            families.push(family);
            if has_rate {
                families.push(rate_family);
            }
        }

        families
    }
}

fn interface_labels(interface: &str) -> Vec<LabelPair> {
    vec![LabelPair::new(INTERFACE_LABEL, interface)]
}
