use hashbrown::hash_map::Entry;
use tracing::debug;

use crate::container::EdgeIdMap;
use crate::graph::{
    EdgeRecord, GetEdgeRecord, GetShortcuts, GetStats, GraphStats, Shortcut, ShortcutIdx,
};
use crate::EdgeId;

/// Immutable in-memory search graph: one flat shortcut array plus
/// per-direction adjacency index lists and the edge-metadata map.
///
/// The store is populated once by a loader and only borrowed afterwards;
/// queries run against `&self` and keep their transient state to
/// themselves, so separate queries may run on separate threads without
/// synchronization.
#[derive(Default, Clone)]
pub struct ShortcutGraph {
    shortcuts: Vec<Shortcut>,
    outgoing: EdgeIdMap<Vec<ShortcutIdx>>,
    incoming: EdgeIdMap<Vec<ShortcutIdx>>,
    edge_records: EdgeIdMap<EdgeRecord>,
}

impl ShortcutGraph {
    pub fn new() -> Self {
        Default::default()
    }

    /// Append a shortcut and index it in both adjacency directions.
    pub fn add_shortcut(&mut self, shortcut: Shortcut) {
        let idx = self.shortcuts.len() as ShortcutIdx;
        self.outgoing.entry(shortcut.from).or_default().push(idx);
        self.incoming.entry(shortcut.to).or_default().push(idx);
        self.shortcuts.push(shortcut);
    }

    /// Insert the metadata record for `edge`. The first record for an
    /// edge id wins.
    pub fn add_edge_record(&mut self, edge: EdgeId, record: EdgeRecord) {
        if let Entry::Vacant(vacant) = self.edge_records.entry(edge) {
            vacant.insert(record);
        }
    }

    pub fn num_shortcuts(&self) -> usize {
        self.shortcuts.len()
    }

    pub fn num_edge_records(&self) -> usize {
        self.edge_records.len()
    }

    pub fn shrink_to_fit(&mut self) {
        self.shortcuts.shrink_to_fit();
        for indices in self.outgoing.values_mut() {
            indices.shrink_to_fit();
        }
        for indices in self.incoming.values_mut() {
            indices.shrink_to_fit();
        }
        debug!(
            "graph ready with {} shortcuts and {} edge records",
            self.shortcuts.len(),
            self.edge_records.len()
        );
    }
}

impl GetShortcuts for ShortcutGraph {
    fn shortcuts(&self) -> &[Shortcut] {
        &self.shortcuts
    }

    fn shortcuts_from(&self, edge: EdgeId) -> &[ShortcutIdx] {
        self.outgoing
            .get(&edge)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    fn shortcuts_into(&self, edge: EdgeId) -> &[ShortcutIdx] {
        self.incoming
            .get(&edge)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

impl GetEdgeRecord for ShortcutGraph {
    fn edge_record(&self, edge: EdgeId) -> Option<&EdgeRecord> {
        self.edge_records.get(&edge)
    }
}

impl GetStats for ShortcutGraph {
    fn get_stats(&self) -> GraphStats {
        GraphStats {
            num_shortcuts: self.shortcuts.len(),
            num_edge_records: self.edge_records.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::graph::{HighCellSolver, ShortcutDirection};
    use crate::hierarchy::HighCell;

    use super::*;

    fn record(incoming_cell: u64, lca_res: i32, cost: f64) -> EdgeRecord {
        EdgeRecord {
            incoming_cell,
            outgoing_cell: incoming_cell,
            lca_res,
            length: 1.0,
            cost,
        }
    }

    fn shortcut(from: EdgeId, to: EdgeId, direction: ShortcutDirection) -> Shortcut {
        Shortcut {
            from,
            to,
            cost: 1.0,
            via_edge: 0,
            cell: 0,
            direction,
        }
    }

    #[test]
    fn adjacency_keeps_insertion_order() {
        let mut graph = ShortcutGraph::new();
        graph.add_shortcut(shortcut(1, 2, ShortcutDirection::Upward));
        graph.add_shortcut(shortcut(1, 3, ShortcutDirection::Upward));
        graph.add_shortcut(shortcut(4, 2, ShortcutDirection::Downward));

        assert_eq!(graph.shortcuts_from(1), [0, 1]);
        assert_eq!(graph.shortcuts_into(2), [0, 2]);
        assert!(graph.shortcuts_from(9).is_empty());
        assert_eq!(graph.num_shortcuts(), 3);
    }

    #[test]
    fn first_edge_record_wins() {
        let mut graph = ShortcutGraph::new();
        graph.add_edge_record(7, record(0, -1, 2.5));
        graph.add_edge_record(7, record(0, -1, 9.0));
        assert_eq!(graph.edge_cost(7), 2.5);
    }

    #[test]
    fn edge_accessors_default_for_missing_records() {
        let graph = ShortcutGraph::new();
        assert_eq!(graph.edge_cost(1), 0.0);
        assert_eq!(graph.edge_cell(1), 0);
        assert!(graph.edge_record(1).is_none());
    }

    #[test]
    fn high_cell_disabled_without_metadata() {
        let mut graph = ShortcutGraph::new();
        graph.add_edge_record(1, record(0x85283473fffffff, 5, 1.0));
        // 2 has no record
        assert_eq!(graph.high_cell(1, 2), HighCell::DISABLED);
    }

    #[test]
    fn high_cell_disabled_for_global_endpoint() {
        let mut graph = ShortcutGraph::new();
        graph.add_edge_record(1, record(0x85283473fffffff, 5, 1.0));
        graph.add_edge_record(2, record(0, -1, 1.0));
        assert_eq!(graph.high_cell(1, 2), HighCell::DISABLED);
    }
}
