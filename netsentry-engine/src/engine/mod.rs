mod interfaces;
mod runtime;
mod state;

pub use self::{
    interfaces::{InterfaceInfo, InterfaceProvider, StaticInterfaces},
    runtime::{EngineOptions, MonitorEngine},
    state::EngineSnapshot,
};
