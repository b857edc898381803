//! Graph construction and representation
//!
//! This module provides efficient graph building and storage
//! for the directed page link graph.

pub mod builder;
pub mod csr;

/// Dense node identifier assigned by the [`builder::GraphBuilder`]
pub type NodeId = u32;
