//! Bidirectional Dijkstra variants over the shortcut graph.
//!
//! All variants share the same per-direction search state: a best-known
//! distance map, a parent map and a lazy-deletion min-heap. Duplicate heap
//! entries are allowed; entries whose distance exceeds the best known one
//! are stale and get skipped on pop.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use ordered_float::OrderedFloat;

use crate::container::EdgeIdMap;
use crate::EdgeId;

pub mod classic;
pub mod multi;
pub mod pruned;

/// Transient single-direction search state, discarded when the query
/// returns.
#[derive(Default)]
pub(crate) struct SearchState {
    dist: EdgeIdMap<f64>,
    parent: EdgeIdMap<EdgeId>,
    queue: BinaryHeap<Reverse<(OrderedFloat<f64>, EdgeId)>>,
}

impl SearchState {
    /// Register `edge` as a frontier root with the given initial distance.
    /// Re-seeding an edge keeps the minimum.
    pub fn seed(&mut self, edge: EdgeId, dist: f64) {
        match self.dist.entry(edge) {
            hashbrown::hash_map::Entry::Occupied(mut occupied) => {
                if dist >= *occupied.get() {
                    return;
                }
                occupied.insert(dist);
            }
            hashbrown::hash_map::Entry::Vacant(vacant) => {
                vacant.insert(dist);
            }
        }
        self.parent.insert(edge, edge);
        self.queue.push(Reverse((OrderedFloat(dist), edge)));
    }

    pub fn pop(&mut self) -> Option<(f64, EdgeId)> {
        self.queue
            .pop()
            .map(|Reverse((dist, edge))| (dist.into_inner(), edge))
    }

    /// Distance of the queue head, if any.
    pub fn peek_dist(&self) -> Option<f64> {
        self.queue
            .peek()
            .map(|Reverse((dist, _))| dist.into_inner())
    }

    pub fn queue_is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn clear_queue(&mut self) {
        self.queue.clear();
    }

    pub fn dist(&self, edge: EdgeId) -> Option<f64> {
        self.dist.get(&edge).copied()
    }

    /// A popped entry is stale when a better distance is already known.
    pub fn is_stale(&self, dist: f64, edge: EdgeId) -> bool {
        self.dist.get(&edge).is_some_and(|&known| dist > known)
    }

    /// Record `dist` for `neighbor` reached via `node` if it improves on
    /// the best known distance. Returns whether it did.
    pub fn relax(&mut self, node: EdgeId, neighbor: EdgeId, dist: f64) -> bool {
        if self.dist.get(&neighbor).is_some_and(|&known| dist >= known) {
            return false;
        }
        self.dist.insert(neighbor, dist);
        self.parent.insert(neighbor, node);
        self.queue.push(Reverse((OrderedFloat(dist), neighbor)));
        true
    }

    pub fn parents(&self) -> &EdgeIdMap<EdgeId> {
        &self.parent
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use h3o::{CellIndex, LatLng, Resolution};

    use crate::graph::{EdgeRecord, Shortcut, ShortcutDirection, ShortcutGraph};
    use crate::EdgeId;

    pub fn global_record(cost: f64) -> EdgeRecord {
        EdgeRecord {
            incoming_cell: 0,
            outgoing_cell: 0,
            lca_res: -1,
            length: 1.0,
            cost,
        }
    }

    pub fn record_in_cell(incoming_cell: u64, lca_res: i32) -> EdgeRecord {
        EdgeRecord {
            incoming_cell,
            outgoing_cell: incoming_cell,
            lca_res,
            length: 1.0,
            cost: 1.0,
        }
    }

    pub fn shortcut(from: EdgeId, to: EdgeId, cost: f64, direction: ShortcutDirection) -> Shortcut {
        Shortcut {
            from,
            to,
            cost,
            via_edge: 0,
            cell: 0,
            direction,
        }
    }

    /// edges `1..=n` with global metadata and unit cost, no shortcuts
    pub fn graph_with_edges(n: EdgeId) -> ShortcutGraph {
        let mut graph = ShortcutGraph::new();
        for edge in 1..=n {
            graph.add_edge_record(edge, global_record(1.0));
        }
        graph
    }

    pub fn cell_at(lat: f64, lng: f64, res: Resolution) -> u64 {
        LatLng::new(lat, lng).unwrap().to_cell(res).into()
    }

    /// a res-5 cell and two of its res-6 children
    pub fn sibling_cells() -> (u64, u64, u64) {
        let base = CellIndex::try_from(cell_at(23.3, 12.3, Resolution::Five)).unwrap();
        let mut children = base.children(Resolution::Six);
        let a = children.next().unwrap().into();
        let b = children.next().unwrap().into();
        (base.into(), a, b)
    }
}
