use crate::error::Error;
use crate::EdgeId;

/// Hierarchy role of a shortcut, controlling in which search direction
/// it may be traversed.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i8)]
pub enum ShortcutDirection {
    /// ascends the hierarchy; forward search only
    Upward = 1,
    /// stays on the same hierarchy level; backward search, at the apex
    /// of the bounded region or as a global fallback
    Lateral = 0,
    /// descends the hierarchy; backward search inside the bounded region
    Downward = -1,
    /// direct-edge bypass; backward search, global fallback only
    Bypass = -2,
}

impl TryFrom<i8> for ShortcutDirection {
    type Error = Error;

    fn try_from(tag: i8) -> Result<Self, Self::Error> {
        match tag {
            1 => Ok(Self::Upward),
            0 => Ok(Self::Lateral),
            -1 => Ok(Self::Downward),
            -2 => Ok(Self::Bypass),
            other => Err(Error::InvalidDirectionTag(other)),
        }
    }
}

impl From<ShortcutDirection> for i8 {
    fn from(direction: ShortcutDirection) -> Self {
        direction as i8
    }
}

/// A directed, precomputed edge of the search graph.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shortcut {
    /// edge the shortcut leaves from
    pub from: EdgeId,
    /// edge the shortcut leads to
    pub to: EdgeId,
    /// non-negative traversal cost
    pub cost: f64,
    /// intermediate edge, `0` when the shortcut is direct
    pub via_edge: EdgeId,
    /// H3 cell bounding the shortcut
    pub cell: u64,
    pub direction: ShortcutDirection,
}

/// Per-edge metadata of the underlying road network.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeRecord {
    /// H3 cell at the edge entry, `0` when unknown
    pub incoming_cell: u64,
    /// H3 cell at the edge exit, `0` when unknown
    pub outgoing_cell: u64,
    /// resolution the cells get raised to for high-cell derivation,
    /// `-1` for global edges
    pub lca_res: i32,
    /// edge length in meters
    pub length: f64,
    /// edge traversal cost
    pub cost: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_roundtrip() {
        for tag in [1i8, 0, -1, -2] {
            let direction = ShortcutDirection::try_from(tag).unwrap();
            assert_eq!(i8::from(direction), tag);
        }
    }

    #[test]
    fn direction_rejects_unknown_tags() {
        assert!(matches!(
            ShortcutDirection::try_from(2),
            Err(Error::InvalidDirectionTag(2))
        ));
        assert!(ShortcutDirection::try_from(-3).is_err());
    }
}
