//! wf-network: distribution tree model for waterflow.
//!
//! Provides:
//! - Arena tree of junctions and endpoints (`Network`, `Node`)
//! - Incremental builder with an explicit sensor id allocator
//! - Random and declarative topology layouts
//! - Sensor id lookup
//!
//! # Example
//!
//! ```
//! use wf_core::{EndpointCategory, SensorId};
//! use wf_network::NetworkBuilder;
//!
//! let mut builder = NetworkBuilder::new(SensorId(1000));
//! let local = builder.add_local();
//! builder.add_endpoint(local, EndpointCategory::Home);
//! let network = builder.build().unwrap();
//!
//! assert_eq!(network.nodes().len(), 3);
//! assert_eq!(network.path_of(local).to_string(), "1000->1001");
//! ```

pub mod builder;
pub mod error;
pub mod indexing;
pub mod network;
pub mod topology;
pub(crate) mod validate;

// Re-exports for ergonomics
pub use builder::{NetworkBuilder, SensorIdAllocator};
pub use error::NetworkError;
pub use indexing::SensorIndex;
pub use network::{Network, NetworkSummary, Node, NodeKind};
pub use topology::{
    LOCAL_JUNCTION_COUNT, LocalLayout, TopologyLayout, fan_out_range, random_network,
};
