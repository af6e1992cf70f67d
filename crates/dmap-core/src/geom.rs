//! Cell coordinates and rectangles.

use std::fmt;
use std::ops::Add;

/// A grid cell. X grows right, Y grows down, so "north" is `y - 1`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The cell `dx` columns and `dy` rows away.
    #[inline]
    pub const fn shift(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl Add for Point {
    type Output = Self;
    #[inline]
    fn add(self, offset: Self) -> Self {
        self.shift(offset.x, offset.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Anything that sits on a single grid cell.
///
/// Targets handed to a Dijkstra map only need to implement this, so game
/// entities can be passed directly without first collecting their positions.
pub trait HasCoordinate {
    /// The cell this value occupies.
    fn coordinate(&self) -> Point;
}

impl HasCoordinate for Point {
    #[inline]
    fn coordinate(&self) -> Point {
        *self
    }
}

impl HasCoordinate for (i32, i32) {
    #[inline]
    fn coordinate(&self) -> Point {
        Point::new(self.0, self.1)
    }
}

impl<T: HasCoordinate + ?Sized> HasCoordinate for &T {
    #[inline]
    fn coordinate(&self) -> Point {
        (**self).coordinate()
    }
}

/// Half-open rectangle of cells: `min` inclusive, `max` exclusive.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    pub min: Point,
    pub max: Point,
}

impl Range {
    /// Rectangle spanned by two corners, given in any order.
    #[inline]
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self {
            min: Point::new(x0.min(x1), y0.min(y1)),
            max: Point::new(x0.max(x1), y0.max(y1)),
        }
    }

    /// Number of cells.
    #[inline]
    pub fn len(self) -> usize {
        if self.is_empty() {
            return 0;
        }
        (self.max.x - self.min.x) as usize * (self.max.y - self.min.y) as usize
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y
    }

    #[inline]
    pub fn contains(self, p: Point) -> bool {
        (self.min.x..self.max.x).contains(&p.x) && (self.min.y..self.max.y).contains(&p.y)
    }

    /// Every cell, row by row.
    #[inline]
    pub fn iter(self) -> RangeIter {
        RangeIter {
            range: self,
            next: (!self.is_empty()).then_some(self.min),
        }
    }
}

impl IntoIterator for Range {
    type Item = Point;
    type IntoIter = RangeIter;
    #[inline]
    fn into_iter(self) -> RangeIter {
        self.iter()
    }
}

/// Row-major iterator returned by [`Range::iter`].
#[derive(Clone, Debug)]
pub struct RangeIter {
    range: Range,
    next: Option<Point>,
}

impl Iterator for RangeIter {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        let p = self.next?;
        let step = if p.x + 1 < self.range.max.x {
            p.shift(1, 0)
        } else {
            Point::new(self.range.min.x, p.y + 1)
        };
        self.next = (step.y < self.range.max.y).then_some(step);
        Some(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shift_and_add() {
        let p = Point::new(1, 2);
        assert_eq!(p.shift(-1, 1), Point::new(0, 3));
        assert_eq!(p + Point::new(3, -4), Point::new(4, -2));
    }

    #[test]
    fn coordinate_of_tuples_and_refs() {
        assert_eq!((4i32, 5i32).coordinate(), Point::new(4, 5));
        let p = Point::new(7, -1);
        let r = &p;
        assert_eq!(HasCoordinate::coordinate(&r), p);
    }

    #[test]
    fn contains_is_half_open() {
        let r = Range::new(0, 0, 3, 2);
        assert_eq!(r.len(), 6);
        assert!(r.contains(Point::new(0, 0)));
        assert!(r.contains(Point::new(2, 1)));
        assert!(!r.contains(Point::new(3, 0)));
        assert!(!r.contains(Point::new(0, 2)));
        assert!(!r.contains(Point::new(-1, 0)));
    }

    #[test]
    fn corners_in_any_order() {
        assert_eq!(Range::new(3, 2, 0, 0), Range::new(0, 0, 3, 2));
    }

    #[test]
    fn iter_row_major() {
        let pts: Vec<_> = Range::new(0, 0, 3, 2).iter().collect();
        assert_eq!(
            pts,
            vec![
                Point::new(0, 0),
                Point::new(1, 0),
                Point::new(2, 0),
                Point::new(0, 1),
                Point::new(1, 1),
                Point::new(2, 1),
            ]
        );
    }

    #[test]
    fn empty_range() {
        let r = Range::new(0, 0, 0, 5);
        assert!(r.is_empty());
        assert_eq!(r.len(), 0);
        assert_eq!(r.iter().count(), 0);
    }

    #[test]
    fn display() {
        assert_eq!(Point::new(1, -2).to_string(), "(1, -2)");
    }
}
