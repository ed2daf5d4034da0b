use tracing::debug;

use crate::algorithm::path::QueryResult;
use crate::algorithm::search::SearchState;
use crate::graph::{GetEdgeRecord, GetShortcuts, HighCellSolver, ShortcutDirection};
use crate::hierarchy::{parent_check, HighCell};
use crate::EdgeId;

/// Bidirectional Dijkstra bounded by the endpoint pair's high cell.
///
/// Expansion is decided on the popped node: the forward frontier only
/// expands nodes whose cell passes the parent check against the high
/// cell, the backward frontier admits shortcuts per hierarchy role:
///
/// | direction | admitted when |
/// |---|---|
/// | `Downward` | node passes the parent check |
/// | `Lateral`  | node cell is the high cell, or the node fails the check |
/// | `Bypass`   | node fails the check |
///
/// A node that fails the check is global with respect to the query; the
/// lateral and bypass rows are its fallback. With a disabled high cell
/// every parent check passes and the forward frontier behaves as in the
/// classic search.
pub trait ShortestPathPruned {
    fn shortest_path_pruned(&self, source: EdgeId, target: EdgeId) -> QueryResult;
}

impl<G> ShortestPathPruned for G
where
    G: GetShortcuts + GetEdgeRecord,
{
    fn shortest_path_pruned(&self, source: EdgeId, target: EdgeId) -> QueryResult {
        if source == target {
            return QueryResult::single(source, self.edge_cost(source));
        }

        let high: HighCell = self.high_cell(source, target);
        debug!(
            "pruned search {} -> {} within cell {:x} @ r={}",
            source, target, high.cell, high.res
        );

        let mut forward = SearchState::default();
        let mut backward = SearchState::default();
        forward.seed(source, 0.0);
        backward.seed(target, self.edge_cost(target));

        let mut best = f64::INFINITY;
        let mut meeting = None;

        while !forward.queue_is_empty() || !backward.queue_is_empty() {
            if let Some((dist, node)) = forward.pop() {
                // the meeting check precedes staleness and bound checks: a
                // popped node already known to the backward frontier must
                // get its chance to improve `best`
                if let Some(opposite) = backward.dist(node) {
                    if dist + opposite <= best {
                        best = dist + opposite;
                        meeting = Some(node);
                    }
                }
                if !forward.is_stale(dist, node)
                    && dist < best
                    && parent_check(self.edge_cell(node), high.cell, high.res)
                {
                    for &idx in self.shortcuts_from(node) {
                        let shortcut = &self.shortcuts()[idx as usize];
                        if shortcut.direction != ShortcutDirection::Upward {
                            continue;
                        }
                        forward.relax(node, shortcut.to, dist + shortcut.cost);
                    }
                }
            }

            if let Some((dist, node)) = backward.pop() {
                if let Some(opposite) = forward.dist(node) {
                    if opposite + dist < best {
                        best = opposite + dist;
                        meeting = Some(node);
                    }
                }
                if !backward.is_stale(dist, node) && dist < best {
                    let node_cell = self.edge_cell(node);
                    let check = parent_check(node_cell, high.cell, high.res);
                    let at_high = node_cell == high.cell;

                    for &idx in self.shortcuts_into(node) {
                        let shortcut = &self.shortcuts()[idx as usize];
                        let admitted = match shortcut.direction {
                            ShortcutDirection::Downward => check,
                            ShortcutDirection::Lateral => at_high || !check,
                            ShortcutDirection::Bypass => !check,
                            ShortcutDirection::Upward => false,
                        };
                        if !admitted {
                            continue;
                        }
                        backward.relax(node, shortcut.from, dist + shortcut.cost);
                    }
                }
            }

            if best < f64::INFINITY {
                let forward_live = forward.peek_dist().is_some_and(|top| top < best);
                let backward_live = backward.peek_dist().is_some_and(|top| top < best);
                if !forward_live && !backward_live {
                    break;
                }
            }
        }

        match meeting {
            Some(meeting) => {
                QueryResult::via_meeting(best, meeting, forward.parents(), backward.parents())
            }
            None => QueryResult::unreachable(),
        }
    }
}

#[cfg(test)]
mod tests {
    use h3o::Resolution;

    use crate::algorithm::search::fixtures::{
        cell_at, global_record, graph_with_edges, record_in_cell, shortcut, sibling_cells,
    };
    use crate::algorithm::ShortestPathClassic;
    use crate::graph::ShortcutGraph;

    use super::*;

    #[test]
    fn identity_query() {
        let mut graph = ShortcutGraph::new();
        graph.add_edge_record(42, global_record(7.5));
        assert_eq!(
            graph.shortest_path_pruned(42, 42),
            QueryResult::single(42, 7.5)
        );
    }

    #[test]
    fn matches_classic_with_global_metadata() {
        let mut graph = graph_with_edges(4);
        graph.add_shortcut(shortcut(1, 2, 2.0, ShortcutDirection::Upward));
        graph.add_shortcut(shortcut(2, 3, 3.0, ShortcutDirection::Downward));
        graph.add_shortcut(shortcut(1, 4, 1.0, ShortcutDirection::Upward));
        graph.add_shortcut(shortcut(4, 3, 1.5, ShortcutDirection::Downward));

        let classic = graph.shortest_path_classic(1, 3);
        let pruned = graph.shortest_path_pruned(1, 3);
        assert!(classic.reachable);
        assert_eq!(classic.distance, pruned.distance);
        assert_eq!(classic.path, pruned.path);
    }

    #[test]
    fn unreachable_without_shortcuts() {
        let graph = graph_with_edges(5);
        assert!(!graph.shortest_path_pruned(1, 5).reachable);
    }

    #[test]
    fn forward_prunes_nodes_outside_high_cell() {
        let (_, inside_a, inside_b) = sibling_cells();
        let outside = cell_at(-23.3, -12.3, Resolution::Six);

        let mut graph = ShortcutGraph::new();
        graph.add_edge_record(1, record_in_cell(inside_a, 5));
        graph.add_edge_record(2, record_in_cell(inside_b, 5));
        graph.add_edge_record(4, record_in_cell(outside, 5));
        // the only route runs through 4, which fails the parent check
        graph.add_shortcut(shortcut(1, 4, 1.0, ShortcutDirection::Upward));
        graph.add_shortcut(shortcut(4, 2, 1.0, ShortcutDirection::Upward));

        assert!(!graph.shortest_path_pruned(1, 2).reachable);
        // no spatial filter in the classic variant
        assert!(graph.shortest_path_classic(1, 2).reachable);
    }

    #[test]
    fn lateral_admitted_at_high_cell_apex() {
        let (base, child_a, child_b) = sibling_cells();

        let mut graph = ShortcutGraph::new();
        graph.add_edge_record(1, record_in_cell(child_a, 5));
        // the target edge sits at the high cell itself
        graph.add_edge_record(2, record_in_cell(base, 5));
        graph.add_edge_record(3, record_in_cell(child_b, 5));
        graph.add_shortcut(shortcut(1, 3, 1.0, ShortcutDirection::Upward));
        graph.add_shortcut(shortcut(3, 2, 2.0, ShortcutDirection::Lateral));

        let result = graph.shortest_path_pruned(1, 2);
        assert!(result.reachable);
        assert_eq!(result.distance, 1.0 + 2.0 + 1.0);
        assert_eq!(result.path, vec![1, 3, 2]);
    }

    #[test]
    fn lateral_rejected_strictly_inside_high_cell() {
        let (_, child_a, child_b) = sibling_cells();

        let mut graph = ShortcutGraph::new();
        graph.add_edge_record(1, record_in_cell(child_a, 5));
        // same layout as the apex case, but the target cell is a strict
        // descendant of the high cell
        graph.add_edge_record(2, record_in_cell(child_b, 5));
        graph.add_edge_record(3, record_in_cell(child_b, 5));
        graph.add_shortcut(shortcut(1, 3, 1.0, ShortcutDirection::Upward));
        graph.add_shortcut(shortcut(3, 2, 2.0, ShortcutDirection::Lateral));

        assert!(!graph.shortest_path_pruned(1, 2).reachable);
    }

    #[test]
    fn bypass_admitted_for_global_nodes_only() {
        let (_, child_a, child_b) = sibling_cells();

        let mut graph = ShortcutGraph::new();
        graph.add_edge_record(1, record_in_cell(child_a, 5));
        graph.add_edge_record(2, record_in_cell(child_b, 5));
        // 4 has no cell: it fails the parent check and takes the global
        // fallback rows of the admission table
        graph.add_edge_record(4, record_in_cell(0, -1));
        graph.add_shortcut(shortcut(1, 3, 1.0, ShortcutDirection::Upward));
        graph.add_shortcut(shortcut(3, 4, 1.0, ShortcutDirection::Bypass));
        graph.add_shortcut(shortcut(4, 2, 1.0, ShortcutDirection::Downward));

        let result = graph.shortest_path_pruned(1, 2);
        assert!(result.reachable);
        assert_eq!(result.path, vec![1, 3, 4, 2]);
        // the classic variant rejects bypass shortcuts
        assert!(!graph.shortest_path_classic(1, 2).reachable);
    }

    #[test]
    fn degrades_to_disabled_pruning_for_global_endpoint() {
        let (_, child_a, _) = sibling_cells();

        let mut graph = graph_with_edges(3);
        // a source without a cell disables the high-cell derivation
        graph.add_edge_record(1, record_in_cell(0, -1));
        graph.add_edge_record(5, record_in_cell(child_a, 5));
        graph.add_shortcut(shortcut(1, 2, 2.0, ShortcutDirection::Upward));
        graph.add_shortcut(shortcut(2, 3, 3.0, ShortcutDirection::Downward));

        assert_eq!(graph.high_cell(1, 3), HighCell::DISABLED);
        let classic = graph.shortest_path_classic(1, 3);
        let pruned = graph.shortest_path_pruned(1, 3);
        assert_eq!(classic.distance, pruned.distance);
        assert_eq!(classic.path, pruned.path);
    }

    #[test]
    fn pruned_never_beats_classic() {
        let (_, child_a, child_b) = sibling_cells();

        let mut graph = ShortcutGraph::new();
        graph.add_edge_record(1, record_in_cell(child_a, 5));
        graph.add_edge_record(2, record_in_cell(child_b, 5));
        graph.add_edge_record(3, record_in_cell(child_a, 5));
        graph.add_shortcut(shortcut(1, 3, 4.0, ShortcutDirection::Upward));
        graph.add_shortcut(shortcut(3, 2, 4.0, ShortcutDirection::Downward));

        let classic = graph.shortest_path_classic(1, 2);
        let pruned = graph.shortest_path_pruned(1, 2);
        assert!(classic.reachable && pruned.reachable);
        assert!(classic.distance <= pruned.distance);
        assert_eq!(classic.distance, pruned.distance);
    }
}
