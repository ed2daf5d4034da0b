pub mod algorithm;
pub mod container;
pub mod error;
pub mod graph;
pub mod hierarchy;

/// Identifier of a directed edge of the underlying road network.
///
/// Edges are the vertices of the shortcut search graph, which is the
/// edge-based dual of the road graph.
pub type EdgeId = u32;
