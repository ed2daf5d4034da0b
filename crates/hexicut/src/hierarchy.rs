//! Total H3 hierarchy operations over raw `u64` cell ids.
//!
//! The cell id `0` is the "absent / global" sentinel, the resolution `-1`
//! the matching "disabled / global" resolution. All functions in this
//! module are pure and total: invalid input collapses into the sentinels
//! instead of failing.

use h3o::{CellIndex, Resolution};

/// Resolution of `cell`, or `-1` when the cell is the absent sentinel
/// or no valid H3 index.
pub fn resolution(cell: u64) -> i32 {
    CellIndex::try_from(cell)
        .map(|index| i32::from(u8::from(index.resolution())))
        .unwrap_or(-1)
}

/// Ancestor of `cell` at `target_res`.
///
/// Returns `0` for the absent sentinel or a negative resolution, and the
/// cell unchanged when `target_res` is at or below its own resolution.
pub fn parent(cell: u64, target_res: i32) -> u64 {
    if cell == 0 || target_res < 0 {
        return 0;
    }
    let Ok(index) = CellIndex::try_from(cell) else {
        return 0;
    };
    if target_res >= i32::from(u8::from(index.resolution())) {
        return cell;
    }
    let Ok(target_res) = Resolution::try_from(target_res as u8) else {
        return 0;
    };
    index.parent(target_res).map(u64::from).unwrap_or(0)
}

/// Lowest common ancestor of `a` and `b`, or `0` when either is absent
/// or the two cells share no ancestor.
///
/// Both cells are raised to the coarser of their resolutions, then walked
/// upward in lockstep until they agree or resolution 0 is exhausted.
pub fn lca(a: u64, b: u64) -> u64 {
    if a == 0 || b == 0 {
        return 0;
    }
    let mut res = resolution(a).min(resolution(b));
    let mut raised_a = parent(a, res);
    let mut raised_b = parent(b, res);
    while raised_a != raised_b && res > 0 {
        res -= 1;
        raised_a = parent(raised_a, res);
        raised_b = parent(raised_b, res);
    }
    if raised_a == raised_b {
        raised_a
    } else {
        0
    }
}

/// Whether `node_cell` lies within the ancestor subtree of `high_cell`.
///
/// Always `true` while pruning is disabled (`high_cell == 0` or a negative
/// `high_res`); always `false` for a global node cell, or when the node
/// cell is coarser than `high_res`.
pub fn parent_check(node_cell: u64, high_cell: u64, high_res: i32) -> bool {
    if high_cell == 0 || high_res < 0 {
        return true;
    }
    if node_cell == 0 {
        return false;
    }
    if high_res > resolution(node_cell) {
        return false;
    }
    parent(node_cell, high_res) == high_cell
}

/// The cell bounding a single query, together with its resolution.
///
/// `DISABLED` carries the sentinels and turns the popped-node pruning off.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighCell {
    pub cell: u64,
    pub res: i32,
}

impl HighCell {
    pub const DISABLED: Self = Self { cell: 0, res: -1 };

    pub fn is_disabled(&self) -> bool {
        self.cell == 0 || self.res < 0
    }
}

impl Default for HighCell {
    fn default() -> Self {
        Self::DISABLED
    }
}
