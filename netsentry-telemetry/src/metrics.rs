//! ## netsentry-telemetry::metrics
//! **Prometheus counters for the capture pipeline**

use prometheus::{Counter, Histogram, HistogramOpts, Registry};

#[derive(Debug, Clone)]
pub struct MetricsRecorder {
    pub registry: Registry,
    pub packets_total: Counter,
    pub anomalies_total: Counter,
    pub tick_latency: Histogram,
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsRecorder {
    pub fn new() -> Self {
        let registry = Registry::new();
        let packets_total =
            Counter::new("netsentry_packets_total", "Total classified packet observations")
                .unwrap();
        let anomalies_total =
            Counter::new("netsentry_anomalies_total", "Total anomalous observations").unwrap();

        let tick_latency = Histogram::with_opts(
            HistogramOpts::new("netsentry_tick_latency_ns", "Capture tick processing time")
                .buckets(vec![1_000.0, 10_000.0, 100_000.0, 1_000_000.0]),
        )
        .unwrap();

        registry.register(Box::new(packets_total.clone())).unwrap();
        registry.register(Box::new(anomalies_total.clone())).unwrap();
        registry.register(Box::new(tick_latency.clone())).unwrap();

        Self {
            registry,
            packets_total,
            anomalies_total,
            tick_latency,
        }
    }

    pub fn gather_metrics(&self) -> Result<String, prometheus::Error> {
        use prometheus::Encoder;
        let encoder = prometheus::TextEncoder::new();
        let mut buffer = Vec::<u8>::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer).unwrap())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate() {
        let metrics = MetricsRecorder::new();
        metrics.packets_total.inc();
        metrics.packets_total.inc();
        metrics.anomalies_total.inc();
        assert_eq!(metrics.packets_total.get(), 2.0);
        assert_eq!(metrics.anomalies_total.get(), 1.0);
    }

    #[test]
    fn gather_renders_text_format() {
        let metrics = MetricsRecorder::new();
        metrics.packets_total.inc();
        let text = metrics.gather_metrics().unwrap();
        assert!(text.contains("netsentry_packets_total"));
    }
}
