//! # netsentry-engine
//!
//! The live telemetry state engine: owns the capture lifecycle, drives the
//! generate → classify → buffer → aggregate pipeline on a periodic cadence,
//! and publishes immutable snapshots to presentation consumers.

pub mod engine;

pub use engine::{
    EngineOptions, EngineSnapshot, InterfaceInfo, InterfaceProvider, MonitorEngine,
    StaticInterfaces,
};
