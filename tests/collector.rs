use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use netif_rates::collector::{Collector, INTERFACE_LABEL, NetStats, SUM_INTERFACE, SourceError};
use netif_rates::config::Config;
use netif_rates::metric::{MetricFamily, MetricKind};
use netif_rates::selector::DeviceSelector;

const T0: i64 = 1_700_000_000_000;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn snapshot(entries: &[(&str, &[(&str, f64)])]) -> NetStats {
    entries
        .iter()
        .map(|(metric_type, readings)| {
            let readings: BTreeMap<String, f64> = readings
                .iter()
                .map(|(interface, value)| (interface.to_string(), *value))
                .collect();
            (metric_type.to_string(), readings)
        })
        .collect()
}

fn first() -> NetStats {
    snapshot(&[
        ("bytes_sent", &[("eno1", 12345676.0), ("eno2", 23435678.0)]),
        ("err_in", &[("eno1", 2.0), ("eno2", 4.0)]),
    ])
}

fn second() -> NetStats {
    snapshot(&[
        ("bytes_sent", &[("eno1", 22345676.0), ("eno2", 33435678.0)]),
        ("err_in", &[("eno1", 8.0), ("eno2", 12.0)]),
    ])
}

fn collector(state_file: &Path, sum: bool, max_rate_interval_secs: i64) -> Collector {
    Collector::new(Config {
        include_interfaces: Vec::new(),
        exclude_interfaces: Vec::new(),
        sum,
        state_file: state_file.to_path_buf(),
        max_rate_interval_secs,
        ..Config::default()
    })
    .expect("valid configuration")
}

fn run(collector: &Collector, stats: NetStats, now_ms: i64) -> Vec<MetricFamily> {
    let mut source = move |_: &DeviceSelector| -> Result<NetStats, SourceError> {
        Ok(stats.clone())
    };
    let collection = collector
        .collect_at(&mut source, now_ms)
        .expect("pass succeeds");
    assert!(collection.persist_error().is_none());
    collection.into_families()
}

fn by_name(families: &[MetricFamily]) -> HashMap<&str, &MetricFamily> {
    families.iter().map(|f| (f.name(), f)).collect()
}

fn has_sum_sample(family: &MetricFamily) -> bool {
    family
        .samples()
        .iter()
        .any(|s| s.label(INTERFACE_LABEL) == Some(SUM_INTERFACE))
}

#[test]
fn collect_with_sum() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");

    // sum, no rates
    let families = run(&collector(&path, true, 60), first(), T0);
    assert_eq!(families.len(), 2);
    let map = by_name(&families);
    assert!(map.contains_key("bytes_sent"));
    assert!(map.contains_key("err_in"));
    for family in &families {
        assert_eq!(family.samples().len(), 3);
        assert!(has_sum_sample(family));
    }

    // sum and rates
    let families = run(&collector(&path, true, 60), second(), T0 + 10_000);
    assert_eq!(families.len(), 4);
    let map = by_name(&families);
    for name in ["bytes_sent", "bytes_sent_rate", "err_in", "err_in_rate"] {
        assert!(map.contains_key(name), "missing {name}");
    }
    for family in &families {
        assert_eq!(family.samples().len(), 3);
        assert!(has_sum_sample(family));
    }
    assert_eq!(map["bytes_sent_rate"].kind(), MetricKind::Gauge);
}

#[test]
fn collect_without_sum() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");

    let families = run(&collector(&path, false, 60), first(), T0);
    assert_eq!(families.len(), 2);
    for family in &families {
        assert_eq!(family.samples().len(), 2);
        assert!(!has_sum_sample(family));
    }

    let families = run(&collector(&path, false, 60), second(), T0 + 10_000);
    assert_eq!(families.len(), 4);
    for family in &families {
        assert_eq!(family.samples().len(), 2);
        assert!(!has_sum_sample(family));
    }
}

#[test]
fn collect_without_state_file_after_history_was_written() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");

    let families = run(&collector(&path, false, 60), first(), T0);
    assert_eq!(families.len(), 2);

    let families = run(&collector(Path::new(""), false, 60), second(), T0 + 10_000);
    let map = by_name(&families);
    assert_eq!(families.len(), 2);
    assert!(!map.contains_key("bytes_sent_rate"));
    assert!(!map.contains_key("err_in_rate"));
}

#[test]
fn collect_with_max_rate_interval() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");

    // first pass writes the state file
    let families = run(&collector(&path, false, 3), first(), T0);
    assert_eq!(families.len(), 2);

    // one second later, within the interval
    let families = run(&collector(&path, false, 3), second(), T0 + 1_000);
    assert_eq!(families.len(), 4);

    // three seconds later with a one second limit
    let families = run(&collector(&path, false, 1), second(), T0 + 4_000);
    let map = by_name(&families);
    assert_eq!(families.len(), 2);
    assert!(!map.contains_key("bytes_sent_rate"));

    // three more seconds, no limit
    let families = run(&collector(&path, false, 0), second(), T0 + 7_000);
    let map = by_name(&families);
    assert_eq!(families.len(), 4);
    // counters did not move since the previous pass
    assert!(
        map["bytes_sent_rate"]
            .samples()
            .iter()
            .all(|s| s.value() == 0.0)
    );
}

#[test]
fn collect_resumes_from_existing_history_file() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    std::fs::write(
        &path,
        r#"{"bytes_recv-interface=eth0":{"value":1000,"timestamp":1699999990000},"bytes_recv-interface=gone0":{"value":5,"timestamp":1}}"#,
    )
    .unwrap();

    let families = run(
        &collector(&path, false, 60),
        snapshot(&[("bytes_recv", &[("eth0", 6000.0)])]),
        T0,
    );

    let map = by_name(&families);
    let rates = map["bytes_recv_rate"];
    assert_eq!(rates.samples().len(), 1);
    assert_eq!(rates.samples()[0].value(), 500.0);
    assert_eq!(rates.help(), "bytes received per second");

    // stale identities are carried over untouched
    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("bytes_recv-interface=gone0"));
    let expected = r#""bytes_recv-interface=eth0":{"value":6000.0,"timestamp":1700000000000}"#;
    assert!(written.contains(expected));
}

#[test]
fn collect_survives_infinite_reading() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");

    // first reading is infinite and is not kept
    let families = run(
        &collector(&path, false, 60),
        snapshot(&[("bytes_sent", &[("eno1", f64::INFINITY)])]),
        T0,
    );
    assert_eq!(families.len(), 1);
    let written = std::fs::read_to_string(&path).unwrap();
    assert!(!written.contains("null"));

    // the next pass loads the state file and starts over
    let families = run(
        &collector(&path, false, 60),
        snapshot(&[("bytes_sent", &[("eno1", 10.0)])]),
        T0 + 10_000,
    );
    assert_eq!(families.len(), 1);
    assert_eq!(families[0].samples()[0].value(), 10.0);

    let families = run(
        &collector(&path, false, 60),
        snapshot(&[("bytes_sent", &[("eno1", 30.0)])]),
        T0 + 20_000,
    );
    let map = by_name(&families);
    assert_eq!(map["bytes_sent_rate"].samples()[0].value(), 2.0);
}

#[test]
fn collect_with_default_config_skips_loopback() {
    init_logging();
    let collector = Collector::new(Config::default()).unwrap();
    let stats = snapshot(&[("packets_recv", &[("lo", 10.0), ("eno1", 20.0)])]);
    let mut source = move |_: &DeviceSelector| -> Result<NetStats, SourceError> {
        Ok(stats.clone())
    };

    let collection = collector.collect(&mut source).unwrap();

    let families = collection.families();
    assert_eq!(families.len(), 1);
    assert_eq!(families[0].samples().len(), 1);
    assert_eq!(families[0].samples()[0].label(INTERFACE_LABEL), Some("eno1"));
    assert_eq!(families[0].help(), "packets received");
}
