use dmap_core::{HasCoordinate, Point};

/// Distance of a cell to the nearest target. Lower is closer; targets are 0.
pub type Rank = u16;

/// Rank of unreached, impassable and out-of-bounds cells.
///
/// Kept a little below `u16::MAX` so that adding a step to it can never
/// overflow.
pub const RANK_MAX: Rank = u16::MAX - 10;

/// A cell together with its current rank, as returned by lookups and
/// neighbor queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeightedPoint {
    pub pos: Point,
    pub rank: Rank,
}

impl WeightedPoint {
    /// Create a new weighted point.
    #[inline]
    pub const fn new(pos: Point, rank: Rank) -> Self {
        Self { pos, rank }
    }

    /// Whether the cell was reached from some target.
    #[inline]
    pub const fn is_reached(self) -> bool {
        self.rank < RANK_MAX
    }
}

impl HasCoordinate for WeightedPoint {
    #[inline]
    fn coordinate(&self) -> Point {
        self.pos
    }
}
