//! Per-match ownership of collision engines
//!
//! Every match gets its own [`CollisionEngine`] with its own index and arena
//! bounds. All per-match calls go through a [`MatchId`], so two matches can
//! never read or rebuild each other's index.

use log::{info, warn};
use slotmap::{new_key_type, SlotMap};

use crate::config::{CollisionConfig, ConfigError};
use crate::physics::collision_system::{CollisionEngine, TickStats};
use crate::physics::entities::{EntitySnapshot, Hit, HitTarget, Projectile};

new_key_type! {
    /// Handle to a match's collision engine
    pub struct MatchId;
}

/// Errors from registry operations
#[derive(thiserror::Error, Debug)]
pub enum RegistryError {
    /// The match was never created or has already been removed
    #[error("Unknown match: {0:?}")]
    UnknownMatch(MatchId),

    /// The match configuration was rejected
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Owner of one collision engine per running match
#[derive(Debug, Default)]
pub struct MatchRegistry {
    engines: SlotMap<MatchId, CollisionEngine>,
}

impl MatchRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking a new match
    pub fn create_match(&mut self, config: CollisionConfig) -> Result<MatchId, RegistryError> {
        let engine = CollisionEngine::new(config).map_err(|e| {
            warn!("refusing match configuration: {e}");
            e
        })?;
        let id = self.engines.insert(engine);
        info!("created collision engine for match {id:?}");
        Ok(id)
    }

    /// Stop tracking a match, handing back its engine
    pub fn remove_match(&mut self, id: MatchId) -> Option<CollisionEngine> {
        let engine = self.engines.remove(id);
        if engine.is_some() {
            info!("removed collision engine for match {id:?}");
        }
        engine
    }

    /// Engine of a match
    pub fn engine(&self, id: MatchId) -> Option<&CollisionEngine> {
        self.engines.get(id)
    }

    /// Mutable engine of a match
    pub fn engine_mut(&mut self, id: MatchId) -> Option<&mut CollisionEngine> {
        self.engines.get_mut(id)
    }

    fn require(&mut self, id: MatchId) -> Result<&mut CollisionEngine, RegistryError> {
        self.engines.get_mut(id).ok_or(RegistryError::UnknownMatch(id))
    }

    /// Rebuild a match's index from its snapshot
    pub fn update(&mut self, id: MatchId, snapshot: &EntitySnapshot) -> Result<(), RegistryError> {
        self.require(id)?.update(snapshot);
        Ok(())
    }

    /// Report a match's hits for this tick, returning the hit count
    pub fn check_collisions<F>(
        &mut self,
        id: MatchId,
        snapshot: &EntitySnapshot,
        on_hit: F,
    ) -> Result<usize, RegistryError>
    where
        F: FnMut(&Projectile, HitTarget<'_>),
    {
        Ok(self.require(id)?.check_collisions(snapshot, on_hit))
    }

    /// Update and check a match in one call
    pub fn tick<F>(&mut self, id: MatchId, snapshot: &EntitySnapshot, on_hit: F) -> Result<TickStats, RegistryError>
    where
        F: FnMut(&Projectile, HitTarget<'_>),
    {
        Ok(self.require(id)?.tick(snapshot, on_hit))
    }

    /// Update a match and return its hits as plain ids
    pub fn tick_collect(&mut self, id: MatchId, snapshot: &EntitySnapshot) -> Result<Vec<Hit>, RegistryError> {
        let engine = self.require(id)?;
        engine.update(snapshot);
        Ok(engine.collect_hits(snapshot))
    }

    /// Ids of every tracked match
    pub fn match_ids(&self) -> impl Iterator<Item = MatchId> + '_ {
        self.engines.keys()
    }

    /// Number of tracked matches
    pub fn len(&self) -> usize {
        self.engines.len()
    }

    /// True when no match is tracked
    pub fn is_empty(&self) -> bool {
        self.engines.is_empty()
    }
}
