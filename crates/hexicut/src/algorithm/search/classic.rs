use tracing::debug;

use crate::algorithm::path::QueryResult;
use crate::algorithm::search::SearchState;
use crate::graph::{GetEdgeRecord, GetShortcuts, ShortcutDirection};
use crate::EdgeId;

/// Bidirectional Dijkstra with direction-typed shortcut filtering and no
/// spatial pruning.
///
/// The forward frontier expands upward shortcuts only, the backward
/// frontier downward and lateral ones. Both directions advance once per
/// iteration; a meeting improves `best` during relaxation.
pub trait ShortestPathClassic {
    fn shortest_path_classic(&self, source: EdgeId, target: EdgeId) -> QueryResult;
}

impl<G> ShortestPathClassic for G
where
    G: GetShortcuts + GetEdgeRecord,
{
    fn shortest_path_classic(&self, source: EdgeId, target: EdgeId) -> QueryResult {
        if source == target {
            return QueryResult::single(source, self.edge_cost(source));
        }
        debug!("classic search {} -> {}", source, target);

        let mut forward = SearchState::default();
        let mut backward = SearchState::default();
        forward.seed(source, 0.0);
        backward.seed(target, self.edge_cost(target));

        let mut best = f64::INFINITY;
        let mut meeting = None;

        while !forward.queue_is_empty() || !backward.queue_is_empty() {
            if let Some((dist, node)) = forward.pop() {
                if !forward.is_stale(dist, node) && dist < best {
                    for &idx in self.shortcuts_from(node) {
                        let shortcut = &self.shortcuts()[idx as usize];
                        if shortcut.direction != ShortcutDirection::Upward {
                            continue;
                        }
                        let next_dist = dist + shortcut.cost;
                        if forward.relax(node, shortcut.to, next_dist) {
                            if let Some(opposite) = backward.dist(shortcut.to) {
                                if next_dist + opposite < best {
                                    best = next_dist + opposite;
                                    meeting = Some(shortcut.to);
                                }
                            }
                        }
                    }
                }
            }

            if let Some((dist, node)) = backward.pop() {
                if !backward.is_stale(dist, node) && dist < best {
                    for &idx in self.shortcuts_into(node) {
                        let shortcut = &self.shortcuts()[idx as usize];
                        if !matches!(
                            shortcut.direction,
                            ShortcutDirection::Downward | ShortcutDirection::Lateral
                        ) {
                            continue;
                        }
                        let next_dist = dist + shortcut.cost;
                        if backward.relax(node, shortcut.from, next_dist) {
                            if let Some(opposite) = forward.dist(shortcut.from) {
                                if opposite + next_dist < best {
                                    best = opposite + next_dist;
                                    meeting = Some(shortcut.from);
                                }
                            }
                        }
                    }
                }
            }

            match (forward.peek_dist(), backward.peek_dist()) {
                (Some(fwd_top), Some(bwd_top)) if fwd_top >= best && bwd_top >= best => break,
                (Some(top), None) | (None, Some(top)) if top >= best => break,
                (None, None) => break,
                _ => {}
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
