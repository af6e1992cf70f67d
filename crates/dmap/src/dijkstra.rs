use std::fmt;

use dmap_core::{HasCoordinate, Point, Terrain};
use log::{debug, log_enabled, trace, warn};

use crate::field::RankField;
use crate::neighbors::{RankLookup, Topology};
use crate::rank::{RANK_MAX, Rank, WeightedPoint};

/// Scan order of a relaxation pass.
///
/// Both orders reach the same fixed point; they only differ in how many
/// passes it takes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Sweep {
    /// Each pass visits every cell in row-major order and, interleaved,
    /// its point reflection `(w - 1 - x, h - 1 - y)`, so ranks travel in
    /// every direction within a single pass.
    #[default]
    Dual,
    /// Each pass visits every cell once in row-major order.
    Forward,
}

/// A Brogue-style "Dijkstra map" over a [`Terrain`].
///
/// Every cell holds the number of steps (under topology `N`) to the nearest
/// target, moving only through passable cells. Unreached, impassable and
/// out-of-bounds cells hold [`RANK_MAX`]. An agent approaches the targets by
/// stepping to [`lowest_neighbor`](Self::lowest_neighbor).
///
/// The ranks are computed by repeatedly relaxing every cell to
/// `lowest neighbor + 1` until a whole pass changes nothing, not by a
/// priority-queue search.
///
/// ```
/// use dmap::{DijkstraMap, Manhattan, Point};
/// use dmap_core::TerrainGrid;
///
/// let terrain: TerrainGrid = "...\n...\n...".parse().unwrap();
/// let mut dm = DijkstraMap::blank(&terrain, Manhattan);
/// dm.calc([Point::new(1, 1)]);
/// assert_eq!(dm.value_at(Point::new(0, 0)).rank, 2);
/// assert_eq!(dm.lowest_neighbor(Point::new(0, 1)).pos, Point::new(1, 1));
/// ```
#[derive(Debug, Clone)]
pub struct DijkstraMap<T, N> {
    field: RankField,
    terrain: T,
    topology: N,
    sweep: Sweep,
}

impl<T: Terrain, N: Topology> DijkstraMap<T, N> {
    /// Create a map sized to `terrain` with every cell at [`RANK_MAX`].
    ///
    /// The terrain must keep these dimensions for the lifetime of the map.
    pub fn blank(terrain: T, topology: N) -> Self {
        let field = RankField::new(terrain.width(), terrain.height(), RANK_MAX);
        Self {
            field,
            terrain,
            topology,
            sweep: Sweep::default(),
        }
    }

    /// Use the given scan order for subsequent computations.
    pub fn with_sweep(mut self, sweep: Sweep) -> Self {
        self.sweep = sweep;
        self
    }

    /// Set every target to rank 0 and relax until the field is stable.
    ///
    /// Other cells are not reset first: call this on a fresh map from
    /// [`blank`](Self::blank), or use [`recalc`](Self::recalc). Targets are
    /// forced to 0 even when impassable; out-of-bounds targets are ignored.
    ///
    /// Returns the number of passes made, the last of which changed nothing.
    pub fn calc<I>(&mut self, targets: I) -> usize
    where
        I: IntoIterator,
        I::Item: HasCoordinate,
    {
        let mut seeded = 0usize;
        for target in targets {
            let p = target.coordinate();
            if self.field.set(p, 0) {
                seeded += 1;
            } else {
                warn!("dmap: ignoring out-of-bounds target {p}");
            }
        }

        let mut buf = Vec::with_capacity(8);
        let mut passes = 0usize;
        loop {
            passes += 1;
            let mutations = self.pass(&mut buf);
            trace!("dmap: pass {passes}: {mutations} cells lowered");
            if mutations == 0 {
                break;
            }
        }

        if log_enabled!(log::Level::Debug) {
            debug!(
                "dmap: {}x{} map, {seeded} targets, {passes} passes, {} cells reached",
                self.field.width(),
                self.field.height(),
                self.field.reachable()
            );
        }
        passes
    }

    /// Reset every cell to [`RANK_MAX`] in place, then [`calc`](Self::calc).
    ///
    /// Equivalent to building a new blank map and calling `calc`, without
    /// the allocation.
    ///
    /// # Panics
    ///
    /// Panics if the terrain's dimensions changed since [`blank`](Self::blank).
    pub fn recalc<I>(&mut self, targets: I) -> usize
    where
        I: IntoIterator,
        I::Item: HasCoordinate,
    {
        assert!(
            self.terrain.width() == self.field.width()
                && self.terrain.height() == self.field.height(),
            "dmap: terrain resized from {}x{} to {}x{}; build a new map instead",
            self.field.width(),
            self.field.height(),
            self.terrain.width(),
            self.terrain.height(),
        );
        self.field.fill(RANK_MAX);
        self.calc(targets)
    }

    /// One relaxation pass over the whole field. Returns the number of
    /// cells whose rank was lowered.
    fn pass(&mut self, buf: &mut Vec<WeightedPoint>) -> usize {
        let w = self.field.width();
        let h = self.field.height();
        let mut mutations = 0;
        for y in 0..h {
            for x in 0..w {
                if self.relax(Point::new(x, y), buf) {
                    mutations += 1;
                }
                if self.sweep == Sweep::Dual {
                    let mirror = Point::new(w - 1 - x, h - 1 - y);
                    if self.relax(mirror, buf) {
                        mutations += 1;
                    }
                }
            }
        }
        mutations
    }

    /// Lower the rank at `p` to its lowest neighbor's plus one, if that is
    /// an improvement.
    fn relax(&mut self, p: Point, buf: &mut Vec<WeightedPoint>) -> bool {
        if !self.terrain.is_passable(p) {
            return false;
        }
        let Some(i) = self.field.idx(p) else {
            return false;
        };
        let candidate = self.lowest_in(p, buf).rank.saturating_add(1);
        let current = self.field.as_slice()[i];
        if candidate < current {
            self.field.set(p, candidate);
            true
        } else {
            false
        }
    }

    fn lowest_in(&self, p: Point, buf: &mut Vec<WeightedPoint>) -> WeightedPoint {
        buf.clear();
        self.topology.neighbors(self, p, buf);
        buf.iter()
            .copied()
            .reduce(|best, w| if w.rank < best.rank { w } else { best })
            .unwrap_or(WeightedPoint::new(p, RANK_MAX))
    }

    /// The neighbor of `p` with the lowest rank, first in topology order on
    /// ties. A topology that yields no neighbors gives `p` at [`RANK_MAX`].
    pub fn lowest_neighbor(&self, p: Point) -> WeightedPoint {
        let mut buf = Vec::with_capacity(8);
        self.lowest_in(p, &mut buf)
    }

    /// Weighted point at `p`; [`RANK_MAX`] if `p` is out of bounds.
    pub fn value_at(&self, p: Point) -> WeightedPoint {
        if self.terrain.is_out_of_bounds(p) {
            return WeightedPoint::new(p, RANK_MAX);
        }
        WeightedPoint::new(p, self.field.get(p).unwrap_or(RANK_MAX))
    }

    /// Rank at `p`, or `None` if out of bounds.
    pub fn rank(&self, p: Point) -> Option<Rank> {
        self.field.get(p)
    }
}

impl<T, N> DijkstraMap<T, N> {
    /// The computed ranks.
    pub fn field(&self) -> &RankField {
        &self.field
    }

    /// The terrain the map was built for.
    pub fn terrain(&self) -> &T {
        &self.terrain
    }

    /// The neighborhood used for relaxation.
    pub fn topology(&self) -> &N {
        &self.topology
    }

    /// The configured scan order.
    pub fn sweep(&self) -> Sweep {
        self.sweep
    }

    /// Number of columns.
    pub fn width(&self) -> i32 {
        self.field.width()
    }

    /// Number of rows.
    pub fn height(&self) -> i32 {
        self.field.height()
    }
}

impl<T: Terrain, N: Topology> RankLookup for DijkstraMap<T, N> {
    fn value_at(&self, p: Point) -> WeightedPoint {
        DijkstraMap::value_at(self, p)
    }
}

impl<T, N> fmt::Display for DijkstraMap<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.field, f)
    }
}
