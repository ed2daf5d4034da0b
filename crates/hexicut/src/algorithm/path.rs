use crate::container::EdgeIdMap;
use crate::EdgeId;

/// Result of a shortest-path query.
///
/// Queries never fail; everything that prevents an answer collapses into
/// `reachable == false` with an empty path.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult {
    /// total path cost, [`Self::UNREACHABLE_DISTANCE`] when unreachable
    pub distance: f64,
    /// traversed edge ids, source first
    pub path: Vec<EdgeId>,
    pub reachable: bool,
}

impl QueryResult {
    pub const UNREACHABLE_DISTANCE: f64 = -1.0;

    pub fn unreachable() -> Self {
        Self {
            distance: Self::UNREACHABLE_DISTANCE,
            path: Vec::new(),
            reachable: false,
        }
    }

    /// Result for a query whose source and target coincide.
    pub fn single(edge: EdgeId, cost: f64) -> Self {
        Self {
            distance: cost,
            path: vec![edge],
            reachable: true,
        }
    }

    /// Assemble the result from the meeting point of the two frontiers.
    pub(crate) fn via_meeting(
        distance: f64,
        meeting: EdgeId,
        parent_fwd: &EdgeIdMap<EdgeId>,
        parent_bwd: &EdgeIdMap<EdgeId>,
    ) -> Self {
        Self {
            distance,
            path: assemble_path(meeting, parent_fwd, parent_bwd),
            reachable: true,
        }
    }
}

/// Walk both parent maps outward from `meeting` into a source→target edge
/// list. Roots carry themselves as parent.
fn assemble_path(
    meeting: EdgeId,
    parent_fwd: &EdgeIdMap<EdgeId>,
    parent_bwd: &EdgeIdMap<EdgeId>,
) -> Vec<EdgeId> {
    let mut path = Vec::new();

    let mut current = meeting;
    while let Some(&up) = parent_fwd.get(&current) {
        path.push(current);
        if up == current {
            break;
        }
        current = up;
    }
    path.reverse();

    // the meeting point itself is already part of the forward half
    let mut current = meeting;
    while let Some(&up) = parent_bwd.get(&current) {
        if up == current {
            break;
        }
        current = up;
        path.push(current);
    }

    path
}
