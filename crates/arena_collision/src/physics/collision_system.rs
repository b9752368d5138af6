//! Core collision detection system
//!
//! Collision detection is split into two phases. The broad phase retrieves
//! candidates from the quadtree around each projectile; the narrow phase runs
//! the exact circle test on those candidates and reports confirmed hits.
//!
//! The index is rebuilt from scratch every tick. That keeps the engine free of
//! removal bookkeeping, at the price of an O(n log n) rebuild per tick, which
//! caps how large a single match can grow before incremental maintenance is
//! needed.
//!
//! The index has no depth limit either. Entities stacked on one point add one
//! tree level per `capacity` entities, so n coincident entities cost O(n)
//! depth and O(n² / capacity) insert work. Matches are expected to keep
//! players from piling onto a single spot.

use log::{debug, trace};

use crate::config::{CollisionConfig, Config, ConfigError};
use crate::physics::entities::{EntitySnapshot, Hit, HitTarget, IndexKey, Projectile};
use crate::physics::primitives::{circle_collision, Collidable};
use crate::spatial::{Entry, QuadTree};

/// Counters for the most recent tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickStats {
    /// Entities accepted by the index
    pub indexed: usize,
    /// Entities the index refused (outside the arena or on a midline)
    pub rejected: usize,
    /// Broad-phase candidates examined
    pub candidates: usize,
    /// Confirmed hits reported to the callback
    pub hits: usize,
}

/// Per-match collision engine
///
/// Owns its own quadtree over the configured world bounds. Engines are never
/// shared between matches.
#[derive(Debug, Clone)]
pub struct CollisionEngine {
    /// Broad-phase index, rebuilt by [`CollisionEngine::update`]
    index: QuadTree<IndexKey>,

    /// Static settings
    config: CollisionConfig,

    /// When false, every operation is a no-op
    enabled: bool,

    /// Counters from the last update/check pair
    stats: TickStats,
}

impl CollisionEngine {
    /// Create an engine after validating the configuration
    pub fn new(config: CollisionConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            index: QuadTree::new(config.world_bounds, config.capacity),
            enabled: config.enabled,
            config,
            stats: TickStats::default(),
        })
    }

    /// Settings this engine was built with
    pub fn config(&self) -> &CollisionConfig {
        &self.config
    }

    /// Broad-phase index as of the last update
    pub fn index(&self) -> &QuadTree<IndexKey> {
        &self.index
    }

    /// Counters from the last tick
    pub fn last_stats(&self) -> TickStats {
        self.stats
    }

    /// Whether update and collision checks run
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Turn the whole engine on or off
    ///
    /// Disabling also empties the index so stale entries cannot be queried.
    pub fn set_enabled(&mut self, enabled: bool) {
        if !enabled {
            self.index.clear();
            self.stats = TickStats::default();
        }
        self.enabled = enabled;
    }

    fn player_radius(&self, radius: Option<f32>) -> f32 {
        radius.unwrap_or(self.config.default_player_radius)
    }

    /// Rebuild the index from this tick's snapshot
    ///
    /// Must run once per tick, before [`CollisionEngine::check_collisions`],
    /// with the same snapshot.
    pub fn update(&mut self, snapshot: &EntitySnapshot) {
        if !self.enabled {
            return;
        }

        self.index.clear();

        for (i, player) in snapshot.players.iter().enumerate() {
            let shape = Collidable::at(player.position, self.player_radius(player.radius));
            if !self.index.insert(shape, IndexKey::Player(i)) {
                trace!("player {} at {:?} not indexed this tick", player.id, player.position);
            }
        }

        for (i, projectile) in snapshot.projectiles.iter().enumerate() {
            let shape = Collidable::at(projectile.position, self.config.projectile_radius);
            if !self.index.insert(shape, IndexKey::Projectile(i)) {
                trace!("projectile {} at {:?} not indexed this tick", projectile.id, projectile.position);
            }
        }

        self.stats = TickStats {
            indexed: self.index.accepted_count(),
            rejected: self.index.rejected_count(),
            candidates: 0,
            hits: 0,
        };
    }

    /// Broad phase: index entries near a projectile
    fn broad_phase(&self, projectile: &Projectile, found: &mut Vec<Entry<IndexKey>>) {
        let probe = Collidable::at(projectile.position, self.config.probe_radius);
        self.index.retrieve(&probe, found);
    }

    /// Narrow phase: exact circle test between a projectile and one candidate
    fn narrow_phase<'a>(
        &self,
        snapshot: &'a EntitySnapshot,
        index: usize,
        projectile: &Projectile,
        candidate: &Entry<IndexKey>,
    ) -> Option<HitTarget<'a>> {
        let target_radius = match candidate.key {
            IndexKey::Projectile(other) if other == index => return None,
            IndexKey::Projectile(_) if !self.config.projectile_hits_projectiles => return None,
            IndexKey::Projectile(_) => self.config.projectile_radius,
            IndexKey::Player(i) => self.player_radius(snapshot.players.get(i)?.radius),
        };

        let target = snapshot.resolve(candidate.key)?;
        let shot = Collidable::at(projectile.position, self.config.projectile_radius);
        let body = Collidable::at(target.position(), target_radius);

        circle_collision(&shot, &body).then_some(target)
    }

    /// Report every projectile hit for this tick
    ///
    /// `on_hit` runs once per confirmed (projectile, target) pair. There is no
    /// deduplication across ticks; a projectile that should only hit once has
    /// to be removed by the caller. Returns the number of hits.
    pub fn check_collisions<F>(&mut self, snapshot: &EntitySnapshot, mut on_hit: F) -> usize
    where
        F: FnMut(&Projectile, HitTarget<'_>),
    {
        if !self.enabled {
            return 0;
        }

        let mut candidates = Vec::new();
        let mut examined = 0;
        let mut hits = 0;

        for (index, projectile) in snapshot.projectiles.iter().enumerate() {
            candidates.clear();
            self.broad_phase(projectile, &mut candidates);
            examined += candidates.len();

            for candidate in &candidates {
                if let Some(target) = self.narrow_phase(snapshot, index, projectile, candidate) {
                    on_hit(projectile, target);
                    hits += 1;
                }
            }
        }

        self.stats.candidates = examined;
        self.stats.hits = hits;

        debug!(
            "collision tick: {} indexed, {} rejected, {} candidates, {} hits",
            self.stats.indexed, self.stats.rejected, examined, hits
        );

        hits
    }

    /// Gather this tick's hits as plain ids
    ///
    /// Useful when the caller has to mutate the snapshot in response, which
    /// the callback form cannot do while the snapshot is borrowed.
    pub fn collect_hits(&mut self, snapshot: &EntitySnapshot) -> Vec<Hit> {
        let mut hits = Vec::new();
        self.check_collisions(snapshot, |projectile, target| hits.push(Hit::new(projectile, target)));
        hits
    }

    /// Rebuild the index and check collisions in the required order
    pub fn tick<F>(&mut self, snapshot: &EntitySnapshot, on_hit: F) -> TickStats
    where
        F: FnMut(&Projectile, HitTarget<'_>),
    {
        self.update(snapshot);
        self.check_collisions(snapshot, on_hit);
        self.stats
    }
}
