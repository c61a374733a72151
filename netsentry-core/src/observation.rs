//! Packet observation records.
//!
//! An observation is created unlabeled by the traffic source, labeled exactly
//! once by the classifier, and never mutated afterwards. Consumers only ever
//! see the labeled form.

use std::fmt;
use std::net::Ipv4Addr;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Fixed protocol vocabulary for synthetic traffic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Protocol {
    Tcp,
    Udp,
    Http,
    Https,
    Dns,
    Icmp,
}

impl Protocol {
    /// All protocols, in display order.
    pub const ALL: [Protocol; 6] = [
        Protocol::Tcp,
        Protocol::Udp,
        Protocol::Http,
        Protocol::Https,
        Protocol::Dns,
        Protocol::Icmp,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Tcp => "TCP",
            Protocol::Udp => "UDP",
            Protocol::Http => "HTTP",
            Protocol::Https => "HTTPS",
            Protocol::Dns => "DNS",
            Protocol::Icmp => "ICMP",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// An unlabeled packet observation as emitted by the traffic source.
///
/// `id` is monotonic from 1 within a generator; `timestamp_ns` is
/// virtual-clock nanoseconds since the unix epoch.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PacketRecord {
    pub id: u64,
    pub timestamp_ns: u64,
    pub source_ip: Ipv4Addr,
    pub destination_ip: Ipv4Addr,
    pub protocol: Protocol,
    pub length: u32,
}

impl PacketRecord {
    /// Attaches the classifier's verdict, producing the immutable labeled form.
    pub fn classified(self, is_anomaly: bool, anomaly_score: f64) -> PacketObservation {
        PacketObservation {
            id: self.id,
            timestamp_ns: self.timestamp_ns,
            source_ip: self.source_ip,
            destination_ip: self.destination_ip,
            protocol: self.protocol,
            length: self.length,
            is_anomaly,
            anomaly_score,
        }
    }
}

/// A classified packet observation. Immutable once constructed; destroyed
/// only by eviction from the history buffer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PacketObservation {
    pub id: u64,
    pub timestamp_ns: u64,
    pub source_ip: Ipv4Addr,
    pub destination_ip: Ipv4Addr,
    pub protocol: Protocol,
    pub length: u32,
    pub is_anomaly: bool,
    pub anomaly_score: f64,
}

impl PacketObservation {
    /// Wall-clock representation of the virtual timestamp, for feeds and
    /// export encoding.
    pub fn timestamp_utc(&self) -> DateTime<Utc> {
        Utc.timestamp_nanos(self.timestamp_ns as i64)
    }

    /// One-second bucket the observation falls into.
    pub fn bucket_second(&self) -> u64 {
        self.timestamp_ns / 1_000_000_000
    }
}
