//! Spatial partitioning data structures
//!
//! Provides the broad-phase index used by the collision engine: a quadtree
//! over the arena, rebuilt every tick.

mod quadtree;

pub use quadtree::{Entry, QuadTree, QuadTreeNode, NE, NW, SE, SW};
