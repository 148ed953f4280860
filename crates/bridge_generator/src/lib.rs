//! # bridge_generator
//!
//! The resource generation pass: walk the topology tree (bus →
//! applications → messages, channels, intermediaries, endpoints), resolve
//! the applicable artifact definitions for each node through
//! `bridge_config`, and append the resolved records to the node.
//!
//! ## Example
//!
//! ```rust
//! use bridge_generator::ResourceGenerator;
//! use bridge_model::TopologyModel;
//! use tokio_util::sync::CancellationToken;
//!
//! let mut model = TopologyModel::default();
//! let documents = Vec::new();
//!
//! let generator = ResourceGenerator::new();
//! generator.generate(&mut model, &documents, &CancellationToken::new()).unwrap();
//! ```

pub mod error;
pub mod generator;

pub use error::{GenerateError, GenerateResult};
pub use generator::ResourceGenerator;
