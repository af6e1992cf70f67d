//! **dmap-core** — geometry and terrain types shared by the *dmap* crates.
//!
//! This crate provides [`Point`] and [`Range`], the [`HasCoordinate`]
//! capability for anything that can be targeted, and the [`Terrain`]
//! contract a map must satisfy before a Dijkstra map can be computed on it.

pub mod geom;
pub mod terrain;

pub use geom::{HasCoordinate, Point, Range};
pub use terrain::{FLOOR, Terrain, TerrainError, TerrainGrid, WALL};
