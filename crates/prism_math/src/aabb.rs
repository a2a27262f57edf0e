use crate::{Interval, Ray, Vec3};

/// Axis-aligned bounding box.
///
/// An AABB is defined by three intervals (one per axis) that bound a 3D volume.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub x: Interval,
    pub y: Interval,
    pub z: Interval,
}

impl Aabb {
    /// Create a new AABB from three intervals.
    pub fn new(x: Interval, y: Interval, z: Interval) -> Self {
        Self { x, y, z }
    }

    /// Create an AABB from two corner points.
    pub fn from_points(a: Vec3, b: Vec3) -> Self {
        let x = Interval::new(a.x.min(b.x), a.x.max(b.x));
        let y = Interval::new(a.y.min(b.y), a.y.max(b.y));
        let z = Interval::new(a.z.min(b.z), a.z.max(b.z));
        Self { x, y, z }
    }

    /// Create an AABB centred on `center` with full edge lengths `size`.
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size.abs() * 0.5;
        Self::from_points(center - half, center + half)
    }

    /// Get the interval for a specific axis (0=X, 1=Y, 2=Z).
    pub fn axis_interval(&self, n: usize) -> Interval {
        match n {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }

    /// Minimum corner.
    pub fn min(&self) -> Vec3 {
        Vec3::new(self.x.min, self.y.min, self.z.min)
    }

    /// Maximum corner.
    pub fn max(&self) -> Vec3 {
        Vec3::new(self.x.max, self.y.max, self.z.max)
    }

    /// Parameter range over which the ray's line lies inside the box.
    ///
    /// Uses the slab method, narrowing a running [tmin, tmax] interval one
    /// axis at a time. The range is not clipped to the ray's forward half:
    /// a ray starting inside the box gets a negative `min`. Returns `None`
    /// when the line misses the box or the whole range lies behind the
    /// origin.
    pub fn slab_range(&self, r: &Ray) -> Option<Interval> {
        let mut range = Interval::UNIVERSE;

        for axis in 0..3 {
            let slab = self.axis_interval(axis);
            let orig = r.origin[axis];
            let dir = r.direction[axis];

            // Parallel to this slab: inside it for every t, or never
            if dir.abs() < f32::EPSILON {
                if !slab.contains(orig) {
                    return None;
                }
                continue;
            }

            let adinv = 1.0 / dir;
            let mut t0 = (slab.min - orig) * adinv;
            let mut t1 = (slab.max - orig) * adinv;
            if adinv < 0.0 {
                std::mem::swap(&mut t0, &mut t1);
            }

            range = range.intersect(&Interval::new(t0, t1));
            if range.is_empty() {
                return None;
            }
        }

        if range.max < 0.0 {
            return None;
        }
        Some(range)
    }

    /// Outward unit normal of the face closest to `p`.
    ///
    /// Faces within `epsilon` of each other (edges, corners) resolve to the
    /// first axis in X, Y, Z order, so the result is always one of the six
    /// axis directions.
    pub fn face_normal(&self, p: Vec3, epsilon: f32) -> Vec3 {
        let mut best = Vec3::ZERO;
        let mut best_dist = f32::INFINITY;

        for axis in 0..3 {
            let slab = self.axis_interval(axis);
            for (bound, sign) in [(slab.min, -1.0), (slab.max, 1.0)] {
                let dist = (p[axis] - bound).abs();
                if dist + epsilon < best_dist {
                    best_dist = dist;
                    best = Vec3::ZERO;
                    best[axis] = sign;
                }
            }
        }

        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_from_points() {
        let a = Vec3::new(10.0, 0.0, 10.0);
        let b = Vec3::new(0.0, 10.0, 0.0);
        let aabb = Aabb::from_points(a, b);

        assert_eq!(aabb.min(), Vec3::ZERO);
        assert_eq!(aabb.max(), Vec3::splat(10.0));
    }

    #[test]
    fn test_aabb_from_center_size() {
        let aabb = Aabb::from_center_size(Vec3::new(1.0, 2.0, 3.0), Vec3::new(2.0, 4.0, 6.0));

        assert_eq!(aabb.min(), Vec3::new(0.0, 0.0, 0.0));
        assert_eq!(aabb.max(), Vec3::new(2.0, 4.0, 6.0));
    }

    #[test]
    fn test_aabb_slab_range() {
        let aabb = Aabb::from_points(Vec3::splat(-1.0), Vec3::splat(1.0));

        // Ray pointing at center
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, 1.0));
        let range = aabb.slab_range(&ray).unwrap();
        assert!((range.min - 4.0).abs() < 1e-6);
        assert!((range.max - 6.0).abs() < 1e-6);

        // Ray pointing away
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(aabb.slab_range(&ray).is_none());

        // Ray missing the box while parallel to two slabs
        let ray = Ray::new(Vec3::new(10.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(aabb.slab_range(&ray).is_none());
    }

    #[test]
    fn test_aabb_slab_range_from_inside() {
        let aabb = Aabb::from_points(Vec3::splat(-1.0), Vec3::splat(1.0));
        let ray = Ray::new(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0));
        let range = aabb.slab_range(&ray).unwrap();

        assert!(range.min < 0.0);
        assert!((range.max - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_aabb_face_normal() {
        let aabb = Aabb::from_points(Vec3::splat(-1.0), Vec3::splat(1.0));

        assert_eq!(aabb.face_normal(Vec3::new(0.2, 1.0, -0.3), 1e-6), Vec3::Y);
        assert_eq!(aabb.face_normal(Vec3::new(-1.0, 0.5, 0.0), 1e-6), Vec3::NEG_X);
        // Slightly off the face still resolves to it
        assert_eq!(aabb.face_normal(Vec3::new(0.0, 0.0, 1.00001), 1e-6), Vec3::Z);
    }
}
