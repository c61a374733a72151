//! # Netsentry Detection Engine
//!
//! Anomaly classification for packet observations.

pub mod classifier;

pub use classifier::{detection_rate, AnomalyClassifier, Verdict, OVERSIZE_BYTES};
