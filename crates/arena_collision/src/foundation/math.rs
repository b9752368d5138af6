//! Math utilities and types
//!
//! The collision core works in a flat 2D arena, so only the 2D aliases are
//! exposed here.

pub use nalgebra::Vector2;

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// Squared distance between two points
pub fn distance_squared(a: Vec2, b: Vec2) -> f32 {
    (a - b).magnitude_squared()
}
