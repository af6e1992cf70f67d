//! Brogue-style "Dijkstra maps" for grid-based games.
//!
//! A Dijkstra map stores, for every cell of a [`Terrain`], the number of
//! steps to the nearest of a set of targets. Agents approach the targets by
//! repeatedly stepping to their [`lowest_neighbor`](DijkstraMap::lowest_neighbor),
//! without running a pathfinder per agent.
//!
//! Despite the name, ranks are computed by fixed-point relaxation rather than
//! Dijkstra's priority-queue search. Every step costs 1.
//!
//! # Pieces
//!
//! | Item | Role |
//! |---|---|
//! | [`Terrain`] | Map contract: size and passability (from `dmap-core`) |
//! | [`Topology`] | Neighborhood: [`Manhattan`], [`Diagonal`] or a closure |
//! | [`DijkstraMap`] | Owns the [`RankField`] and runs the relaxation |
//! | [`Sweep`] | Scan order of a relaxation pass |
//!
//! Ranks are [`Rank`] (`u16`); unreached cells hold [`RANK_MAX`].

mod dijkstra;
mod field;
mod neighbors;
mod rank;

pub use dijkstra::{DijkstraMap, Sweep};
pub use dmap_core::{HasCoordinate, Point, Range, Terrain};
pub use field::RankField;
pub use neighbors::{Diagonal, Manhattan, RankLookup, Topology};
pub use rank::{RANK_MAX, Rank, WeightedPoint};
