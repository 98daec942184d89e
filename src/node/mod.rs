//! Node context module
//!
//! A workflow node is the unit that issues requests. This module carries the
//! pieces of node context the helpers need:
//!
//! - **Identity**: name and type, attached to node-scoped errors
//! - **Parameters**: named configuration values resolved at call time
//! - **Execution items**: the records a node hands to the next one

mod types;

pub use types::{ExecutionItem, NodeIdentity, NodeParameters, ParameterResolver};
