use crate::Vec3;

/// Squared length below which a direction is treated as zero.
const DEGENERATE_LENGTH_SQUARED: f32 = 1e-12;

/// A ray in 3D space with an origin and a direction.
///
/// The direction is not required to be unit length. Distances reported
/// against a ray are always measured in multiples of `direction`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Get the origin point of the ray.
    ///
    /// Note: Since `origin` is public, you can also access it directly via `ray.origin`.
    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Get the direction vector of the ray.
    ///
    /// Note: Since `direction` is public, you can also access it directly via `ray.direction`.
    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// True when the direction has (numerically) zero length.
    ///
    /// Such a ray never intersects anything.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.direction.length_squared() < DEGENERATE_LENGTH_SQUARED
    }
}

impl Default for Ray {
    fn default() -> Self {
        Self {
            origin: Vec3::ZERO,
            direction: Vec3::NEG_Z,
        }
    }
}
