//! Outbound adapters (processor variants).
//!
//! Real gateway integrations live outside this workspace; the variants here
//! simulate provider behaviour in-process.

mod scripted;
mod simulated;

pub use scripted::ScriptedProcessor;
pub use simulated::SimulatedGateway;
