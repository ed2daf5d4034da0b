use tracing::debug;

use crate::algorithm::path::QueryResult;
use crate::algorithm::search::SearchState;
use crate::graph::{GetEdgeRecord, GetShortcuts, ShortcutDirection};
use crate::EdgeId;

/// Bidirectional Dijkstra from many sources to many targets.
///
/// Each source carries an approach cost, each target an egress cost added
/// on top of the target edge's own cost. Endpoints without edge metadata
/// are dropped; a side whose endpoints are all dropped never meets the
/// other and yields an unreachable result. There is no spatial pruning:
/// with more than one endpoint per side no single high cell exists.
pub trait ShortestPathMulti {
    /// # Panics
    ///
    /// Panics when an edge slice and its distance slice differ in length.
    fn shortest_path_multi(
        &self,
        source_edges: &[EdgeId],
        source_dists: &[f64],
        target_edges: &[EdgeId],
        target_dists: &[f64],
    ) -> QueryResult;
}

impl<G> ShortestPathMulti for G
where
    G: GetShortcuts + GetEdgeRecord,
{
    fn shortest_path_multi(
        &self,
        source_edges: &[EdgeId],
        source_dists: &[f64],
        target_edges: &[EdgeId],
        target_dists: &[f64],
    ) -> QueryResult {
        assert_eq!(source_edges.len(), source_dists.len());
        assert_eq!(target_edges.len(), target_dists.len());
        debug!(
            "multi-endpoint search from {} sources to {} targets",
            source_edges.len(),
            target_edges.len()
        );

        let mut forward = SearchState::default();
        let mut backward = SearchState::default();
        for (&source, &approach) in source_edges.iter().zip(source_dists) {
            if self.edge_record(source).is_some() {
                forward.seed(source, approach);
            }
        }
        for (&target, &egress) in target_edges.iter().zip(target_dists) {
            if self.edge_record(target).is_some() {
                backward.seed(target, self.edge_cost(target) + egress);
            }
        }

        let mut best = f64::INFINITY;
        let mut meeting = None;

        while !forward.queue_is_empty() || !backward.queue_is_empty() {
            if let Some((dist, node)) = forward.pop() {
                if let Some(opposite) = backward.dist(node) {
                    if dist + opposite < best {
                        best = dist + opposite;
                        meeting = Some(node);
                    }
                }
                if dist < best && !forward.is_stale(dist, node) {
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
                if dist < best && !backward.is_stale(dist, node) {
                    for &idx in self.shortcuts_into(node) {
                        let shortcut = &self.shortcuts()[idx as usize];
                        if !matches!(
                            shortcut.direction,
                            ShortcutDirection::Downward | ShortcutDirection::Lateral
                        ) {
                            continue;
                        }
                        backward.relax(node, shortcut.from, dist + shortcut.cost);
                    }
                }
            }

            // a shared top-of-queue bound is unsound with several targets;
            // instead each queue is discarded once its head can no longer
            // improve `best`, and the loop runs until both are drained
            if best < f64::INFINITY {
                if forward.peek_dist().is_some_and(|top| top >= best) {
                    forward.clear_queue();
                }
                if backward.peek_dist().is_some_and(|top| top >= best) {
                    backward.clear_queue();
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
