pub use error::Error;

pub mod edges;
pub mod error;
pub mod shortcuts;

use std::path::Path;

use hexicut::graph::ShortcutGraph;

/// Assemble a query graph from a shortcut Parquet path (file or
/// directory) and an edge-metadata CSV.
pub fn load_graph(shortcuts_path: &Path, edges_path: &Path) -> Result<ShortcutGraph, Error> {
    let mut graph = ShortcutGraph::new();
    shortcuts::read_shortcuts(shortcuts_path, &mut graph)?;
    edges::read_edge_records(edges_path, &mut graph)?;
    graph.shrink_to_fit();
    Ok(graph)
}
