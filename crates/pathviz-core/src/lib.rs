//! **pathviz-core** — grid model and data structures for the step-by-step
//! search visualizer.
//!
//! This crate provides the foundational types used by the search algorithms
//! and the animation controller: geometry primitives, the searchable
//! [`GridGraph`] with per-node bookkeeping, ASCII [`map`]s, and the
//! [`IndexedHeap`] priority frontier with decrease-key.

pub mod frontier;
pub mod geom;
pub mod graph;
pub mod map;

pub use frontier::{IndexedHeap, Priority};
pub use geom::{Point, Range};
pub use graph::{DEFAULT_COLS, DEFAULT_ROWS, GridGraph, Node, NodeId, default_endpoints};
pub use map::MapError;
