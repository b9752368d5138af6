//! Arena Collision Demo
//!
//! Runs two independent matches side by side for a fixed number of ticks:
//! - Players wander slowly, projectiles fly in straight lines
//! - Each match owns its own collision engine through the registry
//! - Projectiles are removed on their first hit, players lose health
//!
//! Usage: `arena_demo [config.toml|config.ron]`. Set `RUST_LOG=debug` to see
//! per-tick collision stats.

use std::collections::{HashMap, HashSet};

use arena_collision::foundation::logging;
use arena_collision::prelude::*;
use log::{error, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const TICKS: u32 = 300;
const TICK_SECONDS: f32 = 1.0 / 30.0;

const NUM_PLAYERS: u32 = 12;
const PROJECTILES_PER_TICK: u32 = 2;
const PLAYER_SPEED: f32 = 40.0;
const PROJECTILE_SPEED: f32 = 400.0;
const STARTING_HEALTH: i32 = 100;
const HIT_DAMAGE: i32 = 10;

struct Mover {
    velocity: Vec2,
}

/// Demo-side match state; the collision core only ever sees the snapshot
struct ArenaMatch {
    id: MatchId,
    bounds: Region,
    default_player_radius: f32,
    snapshot: EntitySnapshot,
    movers: HashMap<EntityId, Mover>,
    health: HashMap<EntityId, i32>,
    next_projectile: u32,
    total_hits: usize,
}

impl ArenaMatch {
    fn new(id: MatchId, config: &CollisionConfig, rng: &mut StdRng) -> Self {
        let bounds = config.world_bounds;
        let mut arena = Self {
            id,
            bounds,
            default_player_radius: config.default_player_radius,
            snapshot: EntitySnapshot::new(),
            movers: HashMap::new(),
            health: HashMap::new(),
            next_projectile: 10_000,
            total_hits: 0,
        };

        for player_id in 0..NUM_PLAYERS {
            let x = rng.gen_range(bounds.x + 50.0..bounds.right() - 50.0);
            let y = rng.gen_range(bounds.y + 50.0..bounds.bottom() - 50.0);
            let player = Player::new(player_id, x, y).with_radius(rng.gen_range(12.0..24.0));
            arena.movers.insert(player.id, Mover { velocity: random_direction(rng) * PLAYER_SPEED });
            arena.health.insert(player.id, STARTING_HEALTH);
            arena.snapshot.players.push(player);
        }

        arena
    }

    fn spawn_projectiles(&mut self, rng: &mut StdRng) {
        for _ in 0..PROJECTILES_PER_TICK {
            let shooter = self.snapshot.players[rng.gen_range(0..self.snapshot.players.len())];
            let direction = random_direction(rng);
            // Start just outside the shooter so it cannot hit itself
            let start = shooter.position + direction * (shooter.radius.unwrap_or(self.default_player_radius) + 8.0);

            let projectile = Projectile::new(self.next_projectile, start.x, start.y);
            self.next_projectile += 1;
            self.movers.insert(projectile.id, Mover { velocity: direction * PROJECTILE_SPEED });
            self.snapshot.projectiles.push(projectile);
        }
    }

    /// Straight-line integration; leaving the arena despawns projectiles and
    /// bounces players
    ///
    /// Players bounce off the arena shrunk by their own radius, so their whole
    /// circle stays inside the index bounds.
    fn integrate(&mut self) {
        let bounds = self.bounds;

        for player in &mut self.snapshot.players {
            if let Some(mover) = self.movers.get_mut(&player.id) {
                let radius = player.radius.unwrap_or(self.default_player_radius);
                let (min_x, max_x) = (bounds.x + radius, bounds.right() - radius);
                let (min_y, max_y) = (bounds.y + radius, bounds.bottom() - radius);

                player.position += mover.velocity * TICK_SECONDS;
                if player.position.x < min_x || player.position.x > max_x {
                    mover.velocity.x = -mover.velocity.x;
                }
                if player.position.y < min_y || player.position.y > max_y {
                    mover.velocity.y = -mover.velocity.y;
                }
                // Not clamp: min exceeds max for a player wider than the arena
                player.position.x = player.position.x.max(min_x).min(max_x);
                player.position.y = player.position.y.max(min_y).min(max_y);
            }
        }

        for projectile in &mut self.snapshot.projectiles {
            if let Some(mover) = self.movers.get(&projectile.id) {
                projectile.position += mover.velocity * TICK_SECONDS;
            }
        }

        let movers = &mut self.movers;
        self.snapshot.projectiles.retain(|projectile| {
            let inside = projectile.position.x >= bounds.x
                && projectile.position.x <= bounds.right()
                && projectile.position.y >= bounds.y
                && projectile.position.y <= bounds.bottom();
            if !inside {
                movers.remove(&projectile.id);
            }
            inside
        });
    }

    fn apply_hits(&mut self, hits: &[Hit]) {
        let mut spent = HashSet::new();

        for hit in hits {
            spent.insert(hit.projectile);
            if hit.kind != TargetKind::Player {
                continue;
            }
            if let Some(health) = self.health.get_mut(&hit.target) {
                *health -= HIT_DAMAGE;
                info!("match {:?}: projectile {} hit player {} ({} hp left)", self.id, hit.projectile, hit.target, health);
            }
        }

        self.total_hits += hits.len();
        self.snapshot.projectiles.retain(|projectile| !spent.contains(&projectile.id));
        for id in spent {
            self.movers.remove(&id);
        }
    }
}

fn random_direction(rng: &mut StdRng) -> Vec2 {
    let angle: f32 = rng.gen_range(0.0..std::f32::consts::TAU);
    Vec2::new(angle.cos(), angle.sin())
}

fn load_config() -> CollisionConfig {
    match std::env::args().nth(1) {
        Some(path) => match CollisionConfig::load_from_file(&path) {
            Ok(config) => {
                info!("loaded collision config from {path}");
                config
            }
            Err(e) => {
                warn!("could not load {path} ({e}), using defaults");
                CollisionConfig::default()
            }
        },
        None => CollisionConfig::default(),
    }
}

fn run() -> Result<(), RegistryError> {
    let config = load_config();
    let mut registry = MatchRegistry::new();
    let mut rng = StdRng::seed_from_u64(0x00A1_E7A5);

    let small_arena = Region::new(0.0, 0.0, config.world_bounds.width * 0.5, config.world_bounds.height * 0.5);
    let mut matches = Vec::new();
    for bounds in [config.world_bounds, small_arena] {
        let match_config = CollisionConfig {
            world_bounds: bounds,
            ..config.clone()
        };
        let id = registry.create_match(match_config.clone())?;
        matches.push(ArenaMatch::new(id, &match_config, &mut rng));
    }

    for tick in 0..TICKS {
        for arena in &mut matches {
            arena.spawn_projectiles(&mut rng);
            arena.integrate();
            let hits = registry.tick_collect(arena.id, &arena.snapshot)?;
            arena.apply_hits(&hits);
        }

        if tick % 100 == 0 {
            for arena in &matches {
                if let Some(engine) = registry.engine(arena.id) {
                    let stats = engine.last_stats();
                    info!(
                        "tick {tick} match {:?}: {} indexed, {} rejected, depth {}",
                        arena.id,
                        stats.indexed,
                        stats.rejected,
                        engine.index().depth()
                    );
                }
            }
        }
    }

    for arena in matches {
        info!("match {:?} finished with {} hits", arena.id, arena.total_hits);
        registry.remove_match(arena.id);
    }

    Ok(())
}

fn main() {
    logging::init();

    if let Err(e) = run() {
        error!("demo failed: {e}");
        std::process::exit(1);
    }
}
