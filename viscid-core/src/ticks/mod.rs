//! Game tick pacing for the liquid simulation.
//!
//! Hosts advance a game tick counter at their own rate (20 per second in the
//! reference host). Liquids only move on every `ticks_per_flow`-th game tick,
//! which [`FlowTicker`] decides.

mod flow_ticker;

pub use flow_ticker::{DEFAULT_TICKS_PER_FLOW, FlowTicker};
