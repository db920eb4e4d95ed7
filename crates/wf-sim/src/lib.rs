//! Stochastic flow simulation for waterflow networks.
//!
//! Provides:
//! - Endpoint usage model (bursty, category-specific draws)
//! - Leak model (disabled, random or fixed additive leakage at junctions)
//! - Junction aggregation over the current step's child flows
//! - Hourly simulation loop emitting one record per node per step

pub mod error;
pub mod flow;
pub mod leak;
pub mod sim;
pub mod usage;

// Re-exports for public API
pub use error::{SimError, SimResult};
pub use flow::{FlowState, JunctionFlow, calculate_flow};
pub use leak::LeakModel;
pub use sim::{RunParams, SimOptions, SimulationEngine, run_sim, simulate_network};
pub use usage::{MIN_USAGE, UsageProfile};
