//! Primitive collision shapes and intersection predicates
//!
//! Two value types cover the whole arena: [`Region`], an axis-aligned
//! rectangle used for partition bounds and world bounds, and [`Collidable`],
//! the circular hit volume of a player or projectile.
//!
//! All predicates are inclusive on edges so that containment always implies
//! intersection.

use serde::{Deserialize, Serialize};

use crate::foundation::math::{distance_squared, Vec2};

/// Axis-aligned rectangle
///
/// `x, y` is the minimum corner. In screen space that is the top-left corner,
/// with y growing downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Extent along x (never negative)
    pub width: f32,
    /// Extent along y (never negative)
    pub height: f32,
}

impl Region {
    /// Creates a new region from its minimum corner and size
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Right edge x coordinate
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge y coordinate
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Center point of the region
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Half width and half height
    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    /// Split into four equal quadrants, ordered NE, NW, SE, SW
    pub fn quadrants(&self) -> [Region; 4] {
        let half_w = self.width * 0.5;
        let half_h = self.height * 0.5;
        let mid_x = self.x + half_w;
        let mid_y = self.y + half_h;

        [
            Region::new(mid_x, self.y, half_w, half_h),
            Region::new(self.x, self.y, half_w, half_h),
            Region::new(mid_x, mid_y, half_w, half_h),
            Region::new(self.x, mid_y, half_w, half_h),
        ]
    }

    /// True iff the circle's full extent lies within this region on both axes
    pub fn contains(&self, circle: &Collidable) -> bool {
        let c = circle.center;
        let r = circle.radius;

        c.x - r >= self.x
            && c.x + r <= self.right()
            && c.y - r >= self.y
            && c.y + r <= self.bottom()
    }

    /// True iff the circle overlaps this region
    ///
    /// Rectangle/circle test against the region center: reject when the
    /// center is farther than half extent plus radius on either axis, accept
    /// when it projects inside the extent on either axis, otherwise compare
    /// the squared corner distance with the squared radius.
    pub fn intersects(&self, circle: &Collidable) -> bool {
        let half = self.half_extents();
        let offset = circle.center - self.center();
        let dx = offset.x.abs();
        let dy = offset.y.abs();
        let r = circle.radius;

        if dx > half.x + r || dy > half.y + r {
            return false;
        }

        if dx <= half.x || dy <= half.y {
            return true;
        }

        let corner_x = dx - half.x;
        let corner_y = dy - half.y;
        corner_x * corner_x + corner_y * corner_y <= r * r
    }
}

/// Circular hit volume of a player or projectile
///
/// Holds no reference to the entity it came from; the spatial index keeps a
/// caller-supplied key next to it instead.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collidable {
    /// Center of the circle
    pub center: Vec2,
    /// Radius (never negative)
    pub radius: f32,
}

impl Collidable {
    /// Creates a circle at `(x, y)`
    pub fn new(x: f32, y: f32, radius: f32) -> Self {
        Self {
            center: Vec2::new(x, y),
            radius,
        }
    }

    /// Creates a circle at `center`
    pub const fn at(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Exact narrow-phase test: center distance strictly below the radius sum
    pub fn overlaps(&self, other: &Collidable) -> bool {
        circle_collision(self, other)
    }
}

/// Circle/circle overlap: `distance(a, b) < a.radius + b.radius`
///
/// Touching circles do not collide.
pub fn circle_collision(a: &Collidable, b: &Collidable) -> bool {
    let radius_sum = a.radius + b.radius;
    distance_squared(a.center, b.center) < radius_sum * radius_sum
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_region_edges_and_center() {
        let region = Region::new(10.0, 20.0, 100.0, 50.0);
        assert_relative_eq!(region.right(), 110.0);
        assert_relative_eq!(region.bottom(), 70.0);
        assert_relative_eq!(region.center(), Vec2::new(60.0, 45.0));
        assert_relative_eq!(region.half_extents(), Vec2::new(50.0, 25.0));
    }

    #[test]
    fn test_quadrants_order_and_coverage() {
        let region = Region::new(0.0, 0.0, 100.0, 100.0);
        let [ne, nw, se, sw] = region.quadrants();

        assert_eq!(ne, Region::new(50.0, 0.0, 50.0, 50.0));
        assert_eq!(nw, Region::new(0.0, 0.0, 50.0, 50.0));
        assert_eq!(se, Region::new(50.0, 50.0, 50.0, 50.0));
        assert_eq!(sw, Region::new(0.0, 50.0, 50.0, 50.0));

        let area: f32 = region.quadrants().iter().map(|q| q.width * q.height).sum();
        assert_relative_eq!(area, region.width * region.height);
    }

    #[test]
    fn test_contains_full_extent() {
        let region = Region::new(0.0, 0.0, 100.0, 100.0);

        assert!(region.contains(&Collidable::new(50.0, 50.0, 10.0)));
        // Touching the edge from inside still counts
        assert!(region.contains(&Collidable::new(10.0, 50.0, 10.0)));
        // Center inside, extent crosses the left edge
        assert!(!region.contains(&Collidable::new(5.0, 50.0, 10.0)));
        // Crosses the bottom edge
        assert!(!region.contains(&Collidable::new(50.0, 95.0, 10.0)));
        assert!(!region.contains(&Collidable::new(150.0, 50.0, 1.0)));
    }

    #[test]
    fn test_intersects_axes_and_corners() {
        let region = Region::new(0.0, 0.0, 100.0, 100.0);

        // Inside
        assert!(region.intersects(&Collidable::new(50.0, 50.0, 1.0)));
        // Left of the region, overlapping through the side
        assert!(region.intersects(&Collidable::new(-5.0, 50.0, 6.0)));
        assert!(!region.intersects(&Collidable::new(-5.0, 50.0, 4.0)));
        // Diagonal off the top-left corner: corner distance is sqrt(50) ~ 7.07
        assert!(region.intersects(&Collidable::new(-5.0, -5.0, 7.1)));
        assert!(!region.intersects(&Collidable::new(-5.0, -5.0, 7.0)));
        // Inside the axis slab but outside the rounded corner
        assert!(!region.intersects(&Collidable::new(104.0, 104.0, 5.0)));
        assert!(region.intersects(&Collidable::new(103.0, 103.0, 5.0)));
    }

    #[test]
    fn test_intersects_exact_boundary_touch() {
        let region = Region::new(0.0, 0.0, 10.0, 10.0);
        assert!(region.intersects(&Collidable::new(15.0, 5.0, 5.0)));
        assert!(region.intersects(&Collidable::new(10.0, 10.0, 0.0)));
    }

    #[test]
    fn test_containment_implies_intersection() {
        let regions = [
            Region::new(0.0, 0.0, 100.0, 100.0),
            Region::new(-50.0, 25.0, 10.0, 300.0),
            Region::new(3.0, 3.0, 0.0, 0.0),
        ];

        for region in &regions {
            for ix in -12..=12 {
                for iy in -12..=12 {
                    for radius in [0.0, 0.5, 3.0, 20.0] {
                        let circle = Collidable::new(ix as f32 * 10.0, iy as f32 * 10.0 + 3.0, radius);
                        if region.contains(&circle) {
                            assert!(region.intersects(&circle), "{region:?} contains but misses {circle:?}");
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_degenerate_region() {
        let point_region = Region::new(5.0, 5.0, 0.0, 0.0);

        assert!(point_region.contains(&Collidable::new(5.0, 5.0, 0.0)));
        assert!(!point_region.contains(&Collidable::new(5.0, 5.0, 0.1)));
        assert!(point_region.intersects(&Collidable::new(5.0, 6.0, 1.0)));
        assert!(!point_region.intersects(&Collidable::new(5.0, 7.0, 1.0)));
    }

    #[test]
    fn test_circle_collision_narrow_phase() {
        let a = Collidable::new(0.0, 0.0, 5.0);

        assert!(circle_collision(&a, &Collidable::new(7.0, 0.0, 3.0)));
        assert!(!circle_collision(&a, &Collidable::new(9.0, 0.0, 3.0)));
        // Exactly touching is not a hit
        assert!(!a.overlaps(&Collidable::new(8.0, 0.0, 3.0)));
        assert!(a.overlaps(&a));
    }
}
