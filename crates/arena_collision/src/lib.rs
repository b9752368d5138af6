//! # Arena Collision
//!
//! Projectile hit detection for an authoritative arena game server.
//!
//! ## Features
//!
//! - **Quadtree Broad Phase**: Capacity-driven spatial index rebuilt every tick
//! - **Exact Narrow Phase**: Circle/circle tests on broad-phase candidates
//! - **Per-Match Engines**: One independent engine per running match
//! - **File Configuration**: TOML or RON settings with validation
//!
//! ## Quick Start
//!
//! ```rust
//! use arena_collision::prelude::*;
//!
//! let mut registry = MatchRegistry::new();
//! let arena = registry.create_match(CollisionConfig::default())?;
//!
//! let snapshot = EntitySnapshot::new()
//!     .with_player(Player::new(1, 400.0, 400.0))
//!     .with_projectile(Projectile::new(7, 410.0, 400.0));
//!
//! let stats = registry.tick(arena, &snapshot, |projectile, target| {
//!     println!("{} hit {}", projectile.id, target.id());
//! })?;
//! assert_eq!(stats.hits, 1);
//! # Ok::<(), arena_collision::RegistryError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod spatial;
pub mod physics;

mod registry;

pub use registry::{MatchId, MatchRegistry, RegistryError};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        MatchId, MatchRegistry, RegistryError,
        config::{CollisionConfig, Config, ConfigError, ConfigFormat},
        foundation::math::Vec2,
        physics::{
            CollisionEngine, TickStats,
            Collidable, Region,
            EntityId, EntitySnapshot, Hit, HitTarget, Player, Projectile, TargetKind,
        },
        spatial::QuadTree,
    };
}
