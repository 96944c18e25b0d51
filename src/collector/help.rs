use std::collections::HashMap;
use std::sync::LazyLock;

static HELP: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut m = HashMap::with_capacity(17);

    m.insert("bytes_sent", "bytes sent");
    m.insert("bytes_sent_rate", "bytes sent per second");
    m.insert("bytes_recv", "bytes received");
    m.insert("bytes_recv_rate", "bytes received per second");
    m.insert("packets_sent", "packets sent");
    m.insert("packets_sent_rate", "packets sent per second");
    m.insert("packets_recv", "packets received");
    m.insert("packets_recv_rate", "packets received per second");
    m.insert("err_out", "outbound errors");
    m.insert("err_out_rate", "outbound errors per second");
    m.insert("err_in", "inbound errors");
    m.insert("err_in_rate", "inbound errors per second");
    m.insert("drop_out", "outbound packets dropped");
    m.insert("drop_out_rate", "outbound packets dropped per second");
    m.insert("drop_in", "incoming packets dropped");
    m.insert("drop_in_rate", "incoming packets dropped per second");
    m.insert("mtu", "interface MTU configuration");

    m
});

const RATE_SUFFIX: &str = "_rate";

/// Name of the gauge family carrying the rates of `metric_type`.
pub(super) fn rate_metric_name(metric_type: &str) -> String {
    format!("{metric_type}{RATE_SUFFIX}")
}

pub(super) fn counter_help(metric_type: &str) -> String {
    match HELP.get(metric_type) {
        Some(help) => (*help).to_owned(),
        None => format!("Network interface statistic {metric_type}."),
    }
}

pub(super) fn rate_help(metric_type: &str) -> String {
    match HELP.get(rate_metric_name(metric_type).as_str()) {
        Some(help) => (*help).to_owned(),
        None => format!("Network interface {metric_type} per second."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_metric_help() {
        assert_eq!(counter_help("bytes_sent"), "bytes sent");
        assert_eq!(rate_help("bytes_sent"), "bytes sent per second");
        assert_eq!(counter_help("drop_in"), "incoming packets dropped");
        assert_eq!(counter_help("mtu"), "interface MTU configuration");
    }

    #[test]
    fn test_unknown_metric_help() {
        assert_eq!(
            counter_help("fifo_in"),
            "Network interface statistic fifo_in."
        );
        assert_eq!(rate_help("fifo_in"), "Network interface fifo_in per second.");
        // mtu has no rate description of its own
        assert_eq!(rate_help("mtu"), "Network interface mtu per second.");
    }

    #[test]
    fn test_rate_metric_name() {
        assert_eq!(rate_metric_name("err_out"), "err_out_rate");
    }
}
