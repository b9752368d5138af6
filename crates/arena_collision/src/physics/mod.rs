//! Physics module for collision detection
//!
//! Provides the geometric primitives, the per-tick entity snapshot and the
//! collision engine that ties them to the quadtree broad phase.

pub mod primitives;
pub mod entities;
pub mod collision_system;

#[cfg(test)]
mod tests;

pub use primitives::{circle_collision, Collidable, Region};
pub use entities::{EntityId, EntitySnapshot, Hit, HitTarget, IndexKey, Player, Projectile, TargetKind};
pub use collision_system::{CollisionEngine, TickStats};
