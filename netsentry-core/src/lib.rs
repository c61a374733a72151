//! # netsentry-core
//!
//! Foundation layer for the netsentry telemetry engine: packet observation
//! records and the bounded history store every other crate builds on.
//!
//! ### Key Submodules:
//! - `observation`: immutable packet records and the protocol vocabulary
//! - `history`: strict-FIFO bounded buffer of classified observations

pub mod history;
pub mod observation;

pub use history::{HistoryBuffer, MAX_CAPACITY, MIN_CAPACITY};
pub use observation::{PacketObservation, PacketRecord, Protocol};
