use std::fmt;

use dmap_core::{Point, Range};

use crate::rank::{RANK_MAX, Rank};

/// Dense row-major grid of ranks.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RankField {
    ranks: Vec<Rank>,
    width: i32,
    height: i32,
}

impl RankField {
    /// Create a `width × height` field with every cell set to `fill`.
    /// Negative dimensions are clamped to 0.
    pub fn new(width: i32, height: i32, fill: Rank) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            ranks: vec![fill; (width as usize) * (height as usize)],
            width,
            height,
        }
    }

    /// Number of columns.
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Number of rows.
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// The field rectangle `[0, width) × [0, height)`.
    #[inline]
    pub fn bounds(&self) -> Range {
        Range::new(0, 0, self.width, self.height)
    }

    #[inline]
    pub(crate) fn idx(&self, p: Point) -> Option<usize> {
        if !self.bounds().contains(p) {
            return None;
        }
        Some(p.y as usize * self.width as usize + p.x as usize)
    }

    /// Rank at `p`, or `None` if out of bounds.
    #[inline]
    pub fn get(&self, p: Point) -> Option<Rank> {
        self.idx(p).map(|i| self.ranks[i])
    }

    /// Set the rank at `p`. Returns `false` (and does nothing) if out of
    /// bounds.
    #[inline]
    pub fn set(&mut self, p: Point, rank: Rank) -> bool {
        match self.idx(p) {
            Some(i) => {
                self.ranks[i] = rank;
                true
            }
            None => false,
        }
    }

    /// Set every cell to `rank` without reallocating.
    pub fn fill(&mut self, rank: Rank) {
        self.ranks.fill(rank);
    }

    /// Raw row-major storage.
    pub fn as_slice(&self) -> &[Rank] {
        &self.ranks
    }

    /// Iterate over `(Point, Rank)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Point, Rank)> + '_ {
        self.bounds().iter().zip(self.ranks.iter().copied())
    }

    /// Number of cells holding a rank below [`RANK_MAX`].
    pub fn reachable(&self) -> usize {
        self.ranks.iter().filter(|&&r| r < RANK_MAX).count()
    }
}

impl fmt::Display for RankField {
    /// One line per row, every cell right-aligned to six columns and
    /// followed by `", "`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.width == 0 {
            return Ok(());
        }
        for row in self.ranks.chunks(self.width as usize) {
            for r in row {
                write!(f, "{r:6}, ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_fills() {
        let f = RankField::new(3, 2, RANK_MAX);
        assert_eq!(f.as_slice().len(), 6);
        assert!(f.as_slice().iter().all(|&r| r == RANK_MAX));
        assert_eq!(f.reachable(), 0);
    }

    #[test]
    fn get_set_row_major() {
        let mut f = RankField::new(3, 2, 9);
        assert!(f.set(Point::new(2, 1), 4));
        assert_eq!(f.as_slice()[5], 4);
        assert_eq!(f.get(Point::new(2, 1)), Some(4));
        assert_eq!(f.get(Point::new(3, 0)), None);
        assert!(!f.set(Point::new(-1, 0), 0));
    }

    #[test]
    fn fill_keeps_allocation() {
        let mut f = RankField::new(4, 4, 0);
        let ptr = f.as_slice().as_ptr();
        f.fill(7);
        assert_eq!(f.as_slice().as_ptr(), ptr);
        assert!(f.as_slice().iter().all(|&r| r == 7));
    }

    #[test]
    fn iter_pairs_points() {
        let mut f = RankField::new(2, 2, RANK_MAX);
        f.set(Point::new(1, 0), 1);
        let items: Vec<_> = f.iter().collect();
        assert_eq!(items.len(), 4);
        assert_eq!(items[1], (Point::new(1, 0), 1));
        assert_eq!(items[2], (Point::new(0, 1), RANK_MAX));
        assert_eq!(f.reachable(), 1);
    }

    #[test]
    fn display_pads_cells() {
        let mut f = RankField::new(2, 2, 1);
        f.set(Point::new(0, 0), 0);
        assert_eq!(
            f.to_string(),
            "     0,      1, \n     1,      1, \n"
        );
    }

    #[test]
    fn display_empty() {
        assert_eq!(RankField::new(0, 3, 0).to_string(), "");
    }
}
