//! Per-tick entity snapshot supplied by the simulation loop
//!
//! The collision engine only reads these records. Anything that changes them
//! (damage, projectile removal, score) belongs to the caller.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::foundation::math::Vec2;

/// Identifier the simulation assigns to a player or projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Player record
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Player {
    /// Simulation id
    pub id: EntityId,
    /// Current center
    pub position: Vec2,
    /// Hit radius, or None for the configured default
    pub radius: Option<f32>,
}

impl Player {
    /// Player at `(x, y)` using the default radius
    pub fn new(id: u32, x: f32, y: f32) -> Self {
        Self {
            id: EntityId(id),
            position: Vec2::new(x, y),
            radius: None,
        }
    }

    /// Override the hit radius
    #[must_use]
    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = Some(radius);
        self
    }
}

/// Projectile record
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    /// Simulation id
    pub id: EntityId,
    /// Current center
    pub position: Vec2,
}

impl Projectile {
    /// Projectile at `(x, y)`
    pub fn new(id: u32, x: f32, y: f32) -> Self {
        Self {
            id: EntityId(id),
            position: Vec2::new(x, y),
        }
    }
}

/// Ordered view of every live entity for one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntitySnapshot {
    /// Players in simulation order
    pub players: Vec<Player>,
    /// Projectiles in simulation order
    pub projectiles: Vec<Projectile>,
}

impl EntitySnapshot {
    /// Empty snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a player
    #[must_use]
    pub fn with_player(mut self, player: Player) -> Self {
        self.players.push(player);
        self
    }

    /// Append a projectile
    #[must_use]
    pub fn with_projectile(mut self, projectile: Projectile) -> Self {
        self.projectiles.push(projectile);
        self
    }

    /// Total number of entities
    pub fn len(&self) -> usize {
        self.players.len() + self.projectiles.len()
    }

    /// True when there are no players and no projectiles
    pub fn is_empty(&self) -> bool {
        self.players.is_empty() && self.projectiles.is_empty()
    }

    /// Resolve an index key against this snapshot
    pub fn resolve(&self, key: IndexKey) -> Option<HitTarget<'_>> {
        match key {
            IndexKey::Player(index) => self.players.get(index).map(HitTarget::Player),
            IndexKey::Projectile(index) => self.projectiles.get(index).map(HitTarget::Projectile),
        }
    }
}

/// Key stored in the spatial index: position of the entity in the snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexKey {
    /// Index into [`EntitySnapshot::players`]
    Player(usize),
    /// Index into [`EntitySnapshot::projectiles`]
    Projectile(usize),
}

/// What kind of entity a projectile hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetKind {
    /// A player
    Player,
    /// Another projectile
    Projectile,
}

/// Entity hit by a projectile, borrowed from the snapshot
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitTarget<'a> {
    /// A player
    Player(&'a Player),
    /// Another projectile
    Projectile(&'a Projectile),
}

impl HitTarget<'_> {
    /// Simulation id of the target
    pub fn id(&self) -> EntityId {
        match self {
            HitTarget::Player(player) => player.id,
            HitTarget::Projectile(projectile) => projectile.id,
        }
    }

    /// Kind of the target
    pub fn kind(&self) -> TargetKind {
        match self {
            HitTarget::Player(_) => TargetKind::Player,
            HitTarget::Projectile(_) => TargetKind::Projectile,
        }
    }

    /// Center of the target
    pub fn position(&self) -> Vec2 {
        match self {
            HitTarget::Player(player) => player.position,
            HitTarget::Projectile(projectile) => projectile.position,
        }
    }
}

/// Confirmed hit, detached from the snapshot borrow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hit {
    /// Projectile that hit
    pub projectile: EntityId,
    /// Entity that was hit
    pub target: EntityId,
    /// Kind of the entity that was hit
    pub kind: TargetKind,
}

impl Hit {
    /// Detach a callback pair into plain ids
    pub fn new(projectile: &Projectile, target: HitTarget<'_>) -> Self {
        Self {
            projectile: projectile.id,
            target: target.id(),
            kind: target.kind(),
        }
    }
}
