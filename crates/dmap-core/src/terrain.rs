//! The terrain contract consumed by Dijkstra maps, and [`TerrainGrid`], an
//! owned passability grid implementing it.

use crate::geom::{Point, Range};
use std::fmt;
use std::str::FromStr;

/// Capability contract for a map a Dijkstra map can be computed on.
///
/// All methods are called on the order of `width * height` times per sweep,
/// so they should be constant time. The dimensions must stay fixed for the
/// lifetime of any Dijkstra map built on top of the terrain; a resized map
/// needs a fresh one.
pub trait Terrain {
    /// Number of columns.
    fn width(&self) -> i32;

    /// Number of rows.
    fn height(&self) -> i32;

    /// Whether an agent may stand on / move through `p`.
    ///
    /// Should return `false` rather than panic for off-grid points.
    fn is_passable(&self, p: Point) -> bool;

    /// Whether `p` lies outside the grid. Must agree with
    /// [`width`](Self::width) and [`height`](Self::height).
    fn is_out_of_bounds(&self, p: Point) -> bool {
        !self.bounds().contains(p)
    }

    /// The grid rectangle `[0, width) × [0, height)`.
    fn bounds(&self) -> Range {
        Range::new(0, 0, self.width(), self.height())
    }
}

impl<T: Terrain + ?Sized> Terrain for &T {
    fn width(&self) -> i32 {
        (**self).width()
    }

    fn height(&self) -> i32 {
        (**self).height()
    }

    fn is_passable(&self, p: Point) -> bool {
        (**self).is_passable(p)
    }

    fn is_out_of_bounds(&self, p: Point) -> bool {
        (**self).is_out_of_bounds(p)
    }

    fn bounds(&self) -> Range {
        (**self).bounds()
    }
}

// ---------------------------------------------------------------------------
// TerrainGrid
// ---------------------------------------------------------------------------

/// Character for an impassable cell in the ASCII form of a [`TerrainGrid`].
pub const WALL: char = '#';
/// Character for a passable cell in the ASCII form of a [`TerrainGrid`].
pub const FLOOR: char = '.';

/// A row-major grid of passable / impassable cells.
///
/// Parses from and renders to ASCII, one line per row, using [`WALL`] and
/// [`FLOOR`]:
///
/// ```
/// use dmap_core::{Point, Terrain, TerrainGrid};
///
/// let t: TerrainGrid = "#.#\n...".parse().unwrap();
/// assert_eq!((t.width(), t.height()), (3, 2));
/// assert!(!t.is_passable(Point::new(0, 0)));
/// assert!(t.is_passable(Point::new(0, 1)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TerrainGrid {
    cells: Vec<bool>,
    width: i32,
    height: i32,
}

impl TerrainGrid {
    /// Create a fully passable grid. Negative dimensions are clamped to 0.
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            cells: vec![true; (width as usize) * (height as usize)],
            width,
            height,
        }
    }

    fn index(&self, p: Point) -> Option<usize> {
        if !self.bounds().contains(p) {
            return None;
        }
        Some((p.y * self.width + p.x) as usize)
    }

    /// Passability at `p`, or `None` if out of bounds.
    pub fn passable_at(&self, p: Point) -> Option<bool> {
        self.index(p).map(|i| self.cells[i])
    }

    /// Set passability at `p`. Does nothing if out of bounds.
    pub fn set_passable(&mut self, p: Point, passable: bool) {
        if let Some(i) = self.index(p) {
            self.cells[i] = passable;
        }
    }

    /// Set every cell to `passable`.
    pub fn fill(&mut self, passable: bool) {
        self.cells.fill(passable);
    }

    /// Number of passable cells.
    pub fn count_passable(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }
}

impl Terrain for TerrainGrid {
    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn is_passable(&self, p: Point) -> bool {
        self.passable_at(p).unwrap_or(false)
    }
}

impl FromStr for TerrainGrid {
    type Err = TerrainError;

    /// Parse an ASCII map. Leading blank lines and trailing whitespace are
    /// skipped. Error line numbers count from the first line of `s`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim_end();
        let blank = s.lines().take_while(|l| l.trim().is_empty()).count();
        let mut cells = Vec::with_capacity(s.len());
        let mut width: Option<i32> = None;
        let mut height = 0;

        for (n, line) in s.lines().enumerate().skip(blank) {
            let y = n - blank;
            let mut x = 0;
            for ch in line.chars() {
                let passable = match ch {
                    WALL => false,
                    FLOOR => true,
                    _ => {
                        return Err(TerrainError::InvalidRune {
                            ch,
                            pos: Point::new(x, y as i32),
                        });
                    }
                };
                cells.push(passable);
                x += 1;
            }
            match width {
                None => width = Some(x),
                Some(w) if w != x => {
                    return Err(TerrainError::InconsistentSize {
                        line: n as i32,
                        expected: w,
                        found: x,
                    });
                }
                Some(_) => {}
            }
            height += 1;
        }

        Ok(Self {
            cells,
            width: width.unwrap_or(0),
            height,
        })
    }
}

impl fmt::Display for TerrainGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for p in self.bounds() {
            let ch = if self.is_passable(p) { FLOOR } else { WALL };
            write!(f, "{ch}")?;
            if p.x == self.width - 1 && p.y < self.height - 1 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// Errors that can occur when parsing a [`TerrainGrid`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerrainError {
    /// A line's width differs from the first row's. `line` is the 0-based
    /// line of the parsed text.
    InconsistentSize { line: i32, expected: i32, found: i32 },
    /// A character other than [`WALL`] or [`FLOOR`] was found.
    InvalidRune { ch: char, pos: Point },
}

impl fmt::Display for TerrainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InconsistentSize {
                line,
                expected,
                found,
            } => write!(
                f,
                "terrain: line {line} is {found} cells wide, expected {expected}"
            ),
            Self::InvalidRune { ch, pos } => {
                write!(f, "terrain contains invalid rune \u{201c}{ch}\u{201d} at {pos}")
            }
        }
    }
}

impl std::error::Error for TerrainError {}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOM: &str = "\
#####
#...#
#.#.#
#####";

    #[test]
    fn new_is_all_passable() {
        let t = TerrainGrid::new(4, 3);
        assert_eq!(t.count_passable(), 12);
        assert!(t.is_passable(Point::new(3, 2)));
        assert!(!t.is_passable(Point::new(4, 2)));
    }

    #[test]
    fn negative_dimensions_clamp() {
        let t = TerrainGrid::new(-3, 2);
        assert_eq!(t.width(), 0);
        assert_eq!(t.count_passable(), 0);
    }

    #[test]
    fn set_and_query() {
        let mut t = TerrainGrid::new(3, 3);
        t.set_passable(Point::new(1, 1), false);
        t.set_passable(Point::new(9, 9), false);
        assert_eq!(t.passable_at(Point::new(1, 1)), Some(false));
        assert_eq!(t.passable_at(Point::new(0, 1)), Some(true));
        assert_eq!(t.passable_at(Point::new(9, 9)), None);
        t.fill(false);
        assert_eq!(t.count_passable(), 0);
    }

    #[test]
    fn out_of_bounds_agrees_with_size() {
        let t = TerrainGrid::new(2, 3);
        assert!(!t.is_out_of_bounds(Point::new(1, 2)));
        assert!(t.is_out_of_bounds(Point::new(2, 0)));
        assert!(t.is_out_of_bounds(Point::new(0, 3)));
        assert!(t.is_out_of_bounds(Point::new(-1, 0)));
        assert!(!t.is_passable(Point::new(-1, 0)));
    }

    #[test]
    fn parse_room() {
        let t: TerrainGrid = ROOM.parse().unwrap();
        assert_eq!((t.width(), t.height()), (5, 4));
        assert!(!t.is_passable(Point::new(0, 0)));
        assert!(t.is_passable(Point::new(1, 1)));
        assert!(!t.is_passable(Point::new(2, 2)));
        assert_eq!(t.count_passable(), 5);
    }

    #[test]
    fn display_round_trips_ascii() {
        let t: TerrainGrid = ROOM.parse().unwrap();
        assert_eq!(t.to_string(), ROOM);
    }

    #[test]
    fn parse_inconsistent_size() {
        let err = "...\n..".parse::<TerrainGrid>().unwrap_err();
        assert_eq!(
            err,
            TerrainError::InconsistentSize {
                line: 1,
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn parse_invalid_rune() {
        let err = "..\n.x".parse::<TerrainGrid>().unwrap_err();
        assert_eq!(
            err,
            TerrainError::InvalidRune {
                ch: 'x',
                pos: Point::new(1, 1)
            }
        );
        assert!(err.to_string().contains("(1, 1)"));
    }

    #[test]
    fn parse_errors_keep_text_line_numbers() {
        let err = "\n\n...\n..".parse::<TerrainGrid>().unwrap_err();
        assert_eq!(
            err,
            TerrainError::InconsistentSize {
                line: 3,
                expected: 3,
                found: 2
            }
        );
        let err = "\n.#\n.x".parse::<TerrainGrid>().unwrap_err();
        assert_eq!(
            err,
            TerrainError::InvalidRune {
                ch: 'x',
                pos: Point::new(1, 1)
            }
        );
    }

    #[test]
    fn parse_keeps_leading_columns() {
        let err = " ..\n...".parse::<TerrainGrid>().unwrap_err();
        assert_eq!(
            err,
            TerrainError::InvalidRune {
                ch: ' ',
                pos: Point::new(0, 0)
            }
        );
        let t: TerrainGrid = "\n#.\n..\n".parse().unwrap();
        assert_eq!((t.width(), t.height()), (2, 2));
        assert!(!t.is_passable(Point::new(0, 0)));
    }

    #[test]
    fn parse_empty() {
        let t: TerrainGrid = "  \n".parse().unwrap();
        assert_eq!(t.bounds().len(), 0);
    }

    #[test]
    fn reference_is_terrain() {
        fn width_of(t: impl Terrain) -> i32 {
            t.width()
        }
        let t = TerrainGrid::new(7, 1);
        assert_eq!(width_of(&t), 7);
    }
}
