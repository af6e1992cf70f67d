use dmap_core::Point;

use crate::rank::WeightedPoint;

/// Read access to the ranks of a Dijkstra map, as seen by a [`Topology`].
pub trait RankLookup {
    /// Weighted point at `p`. Out-of-bounds points report
    /// [`RANK_MAX`](crate::RANK_MAX).
    fn value_at(&self, p: Point) -> WeightedPoint;
}

/// Neighborhood used when relaxing a cell.
///
/// Implementations push the weighted samples to minimize over into `buf`
/// (the caller clears it first). Samples should be read through
/// [`RankLookup::value_at`] so off-map neighbors carry the maximum rank and
/// never win. The enumeration order must be fixed: ties are broken in
/// favour of the first sample.
///
/// Any `Fn(&dyn RankLookup, Point, &mut Vec<WeightedPoint>)` closure is a
/// topology too.
pub trait Topology {
    /// Append the neighbor samples of `p` into `buf`.
    fn neighbors(&self, map: &dyn RankLookup, p: Point, buf: &mut Vec<WeightedPoint>);
}

impl<F> Topology for F
where
    F: Fn(&dyn RankLookup, Point, &mut Vec<WeightedPoint>),
{
    fn neighbors(&self, map: &dyn RankLookup, p: Point, buf: &mut Vec<WeightedPoint>) {
        self(map, p, buf)
    }
}

/// East, west, north, south.
const ORTHOGONAL: [Point; 4] = [
    Point::new(1, 0),
    Point::new(-1, 0),
    Point::new(0, -1),
    Point::new(0, 1),
];

const DIAGONAL: [Point; 4] = [
    Point::new(1, 1),
    Point::new(1, -1),
    Point::new(-1, 1),
    Point::new(-1, -1),
];

/// 4-connected neighborhood: east, west, north, south.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Manhattan;

impl Topology for Manhattan {
    fn neighbors(&self, map: &dyn RankLookup, p: Point, buf: &mut Vec<WeightedPoint>) {
        buf.extend(ORTHOGONAL.iter().map(|&d| map.value_at(p + d)));
    }
}

/// 8-connected neighborhood: the [`Manhattan`] four, then south-east,
/// north-east, south-west, north-west.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Diagonal;

impl Topology for Diagonal {
    fn neighbors(&self, map: &dyn RankLookup, p: Point, buf: &mut Vec<WeightedPoint>) {
        buf.extend(
            ORTHOGONAL
                .iter()
                .chain(DIAGONAL.iter())
                .map(|&d| map.value_at(p + d)),
        );
    }
}
