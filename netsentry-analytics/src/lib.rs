//! # netsentry-analytics
//!
//! Derived aggregates over history-buffer snapshots: the time-bucketed
//! packet/anomaly series the dashboard charts render, and the protocol
//! distribution.
//!
//! Both views are recomputed from scratch on every call. There are no
//! incremental counters that could drift from the buffer's true contents;
//! with the buffer capped at 10,000 entries a full pass is cheap.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use netsentry_core::{PacketObservation, Protocol};

/// Width of one chart bucket: one second of virtual time.
pub const BUCKET_WIDTH_NS: u64 = 1_000_000_000;

/// One chart bucket: packet and anomaly counts for a single second.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrafficBucket {
    /// Bucket start, in whole seconds of the observation timestamp.
    pub bucket: u64,
    pub packets: u64,
    pub anomalies: u64,
}

/// Aggregates derived from one buffer snapshot.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TrafficSummary {
    /// Chronological series, oldest bucket first.
    pub series: Vec<TrafficBucket>,
    /// Occurrence count per protocol present in the snapshot.
    pub protocols: BTreeMap<Protocol, u64>,
    pub total_packets: u64,
    pub total_anomalies: u64,
}

/// Computes the chart series and protocol distribution for a snapshot.
///
/// Pure and idempotent: the same snapshot always yields the same summary,
/// and an empty snapshot yields empty collections.
pub fn summarize(snapshot: &[PacketObservation]) -> TrafficSummary {
    let mut buckets: BTreeMap<u64, (u64, u64)> = BTreeMap::new();
    let mut protocols: BTreeMap<Protocol, u64> = BTreeMap::new();
    let mut total_anomalies = 0;

    for observation in snapshot {
        let entry = buckets.entry(observation.bucket_second()).or_insert((0, 0));
        entry.0 += 1;
        if observation.is_anomaly {
            entry.1 += 1;
            total_anomalies += 1;
        }
        *protocols.entry(observation.protocol).or_insert(0) += 1;
    }

    TrafficSummary {
        series: buckets
            .into_iter()
            .map(|(bucket, (packets, anomalies))| TrafficBucket {
                bucket,
                packets,
                anomalies,
            })
            .collect(),
        protocols,
        total_packets: snapshot.len() as u64,
        total_anomalies,
    }
}

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;

    use netsentry_core::PacketRecord;

    use super::*;

    fn observation(id: u64, timestamp_ns: u64, protocol: Protocol, anomaly: bool) -> PacketObservation {
        PacketRecord {
            id,
            timestamp_ns,
            source_ip: Ipv4Addr::new(10, 0, 0, 1),
            destination_ip: Ipv4Addr::new(10, 0, 0, 2),
            protocol,
            length: 100,
        }
        .classified(anomaly, if anomaly { 0.9 } else { 0.1 })
    }

    #[test]
    fn empty_snapshot_yields_empty_summary() {
        let summary = summarize(&[]);
        assert!(summary.series.is_empty());
        assert!(summary.protocols.is_empty());
        assert_eq!(summary.total_packets, 0);
        assert_eq!(summary.total_anomalies, 0);
    }

    #[test]
    fn buckets_are_one_second_wide_and_chronological() {
        let snapshot = vec![
            observation(1, 500_000_000, Protocol::Tcp, false),
            observation(2, 999_999_999, Protocol::Tcp, true),
            observation(3, 1_000_000_000, Protocol::Udp, false),
            observation(4, 2_500_000_000, Protocol::Dns, true),
        ];
        let summary = summarize(&snapshot);
        assert_eq!(
            summary.series,
            vec![
                TrafficBucket { bucket: 0, packets: 2, anomalies: 1 },
                TrafficBucket { bucket: 1, packets: 1, anomalies: 0 },
                TrafficBucket { bucket: 2, packets: 1, anomalies: 1 },
            ]
        );
    }

    #[test]
    fn absent_protocols_are_omitted() {
        let snapshot = vec![
            observation(1, 0, Protocol::Https, false),
            observation(2, 0, Protocol::Https, false),
            observation(3, 0, Protocol::Icmp, false),
        ];
        let summary = summarize(&snapshot);
        assert_eq!(summary.protocols.get(&Protocol::Https), Some(&2));
        assert_eq!(summary.protocols.get(&Protocol::Icmp), Some(&1));
        assert!(!summary.protocols.contains_key(&Protocol::Tcp));
        assert_eq!(summary.protocols.len(), 2);
    }

    #[test]
    fn summarize_is_idempotent() {
        let snapshot: Vec<PacketObservation> = (0..100)
            .map(|i| observation(i, i * 300_000_000, Protocol::Tcp, i % 7 == 0))
            .collect();
        assert_eq!(summarize(&snapshot), summarize(&snapshot));
    }

    #[test]
    fn totals_match_counts() {
        let snapshot = vec![
            observation(1, 0, Protocol::Tcp, true),
            observation(2, 0, Protocol::Udp, true),
            observation(3, 0, Protocol::Udp, false),
        ];
        let summary = summarize(&snapshot);
        assert_eq!(summary.total_packets, 3);
        assert_eq!(summary.total_anomalies, 2);
        let bucket_packets: u64 = summary.series.iter().map(|b| b.packets).sum();
        assert_eq!(bucket_packets, summary.total_packets);
    }
}
