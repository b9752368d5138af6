//! Collision engine configuration
//!
//! One of these is supplied per match. Missing fields in a config file fall
//! back to [`CollisionConfig::default`].

use serde::{Deserialize, Serialize};

use super::{Config, ConfigError};
use crate::physics::primitives::Region;

/// Static settings for one match's collision engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    /// Entries per index node before it subdivides
    pub capacity: usize,

    /// Hit radius for players that do not carry their own
    pub default_player_radius: f32,

    /// Hit radius of every projectile
    pub projectile_radius: f32,

    /// Radius of the broad-phase probe around each projectile
    ///
    /// Must be at least `projectile_radius`, otherwise hits against entries in
    /// pruned nodes can be missed.
    pub probe_radius: f32,

    /// When false, update and collision checks do nothing
    pub enabled: bool,

    /// Report projectile-versus-projectile hits
    pub projectile_hits_projectiles: bool,

    /// Arena bounds; also the root region of the spatial index
    ///
    /// Kept last so TOML output lists the plain keys before this table.
    pub world_bounds: Region,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            capacity: 4,
            default_player_radius: 20.0,
            projectile_radius: 5.0,
            probe_radius: 5.0,
            enabled: true,
            projectile_hits_projectiles: false,
            world_bounds: Region::new(0.0, 0.0, 1000.0, 1000.0),
        }
    }
}

impl CollisionConfig {
    /// Default settings over the given arena
    pub fn with_bounds(world_bounds: Region) -> Self {
        Self {
            world_bounds,
            ..Self::default()
        }
    }
}

fn check_non_negative(name: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!("{name} must be finite and >= 0, got {value}")))
    }
}

impl Config for CollisionConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        let bounds = &self.world_bounds;
        if !bounds.x.is_finite() || !bounds.y.is_finite() {
            return Err(ConfigError::Invalid(format!(
                "world_bounds origin must be finite, got ({}, {})",
                bounds.x, bounds.y
            )));
        }
        check_non_negative("world_bounds.width", bounds.width)?;
        check_non_negative("world_bounds.height", bounds.height)?;

        if self.capacity == 0 {
            return Err(ConfigError::Invalid("capacity must be at least 1".to_string()));
        }

        check_non_negative("default_player_radius", self.default_player_radius)?;
        check_non_negative("projectile_radius", self.projectile_radius)?;
        check_non_negative("probe_radius", self.probe_radius)?;

        if self.probe_radius < self.projectile_radius {
            return Err(ConfigError::Invalid(format!(
                "probe_radius ({}) must not be smaller than projectile_radius ({})",
                self.probe_radius, self.projectile_radius
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigFormat;

    #[test]
    fn test_default_is_valid() {
        let config = CollisionConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.enabled);
        assert_eq!(config.capacity, 4);
        assert_eq!(config.world_bounds, Region::new(0.0, 0.0, 1000.0, 1000.0));
    }

    #[test]
    fn test_parse_partial_toml() {
        let toml = r#"
capacity = 8
probe_radius = 6.0

[world_bounds]
x = 0.0
y = 0.0
width = 2048.0
height = 1024.0
"#;
        let config = CollisionConfig::from_str_with_format(toml, ConfigFormat::Toml).unwrap();
        assert_eq!(config.capacity, 8);
        assert_eq!(config.world_bounds.width, 2048.0);
        assert_eq!(config.probe_radius, 6.0);
        // Unlisted fields keep their defaults
        assert_eq!(config.projectile_radius, 5.0);
        assert!(config.enabled);
    }

    #[test]
    fn test_parse_ron() {
        let ron = "(capacity: 2, enabled: false, projectile_hits_projectiles: true)";
        let config = CollisionConfig::from_str_with_format(ron, ConfigFormat::Ron).unwrap();
        assert_eq!(config.capacity, 2);
        assert!(!config.enabled);
        assert!(config.projectile_hits_projectiles);
    }

    #[test]
    fn test_format_round_trip() {
        let config = CollisionConfig {
            capacity: 6,
            default_player_radius: 12.5,
            ..CollisionConfig::default()
        };
        for format in [ConfigFormat::Toml, ConfigFormat::Ron] {
            let text = config.to_string_with_format(format).unwrap();
            let parsed = CollisionConfig::from_str_with_format(&text, format).unwrap();
            assert_eq!(parsed, config);
        }
    }

    #[test]
    fn test_file_round_trip() {
        let path = std::env::temp_dir().join(format!("arena_collision_{}.toml", std::process::id()));
        let config = CollisionConfig::with_bounds(Region::new(-500.0, -500.0, 1000.0, 1000.0));

        config.save_to_file(&path).unwrap();
        let loaded = CollisionConfig::load_from_file(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let zero_capacity = CollisionConfig { capacity: 0, ..CollisionConfig::default() };
        assert!(matches!(zero_capacity.validate(), Err(ConfigError::Invalid(_))));

        let negative_width = CollisionConfig::with_bounds(Region::new(0.0, 0.0, -1.0, 10.0));
        assert!(negative_width.validate().is_err());

        let nan_radius = CollisionConfig { default_player_radius: f32::NAN, ..CollisionConfig::default() };
        assert!(nan_radius.validate().is_err());

        let small_probe = CollisionConfig { probe_radius: 2.0, projectile_radius: 5.0, ..CollisionConfig::default() };
        assert!(small_probe.validate().is_err());
    }

    #[test]
    fn test_invalid_file_contents_rejected_on_parse() {
        let result = CollisionConfig::from_str_with_format("capacity = 0", ConfigFormat::Toml);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        let result = CollisionConfig::from_str_with_format("capacity = \"four\"", ConfigFormat::Toml);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
