// external crates
use serde::{Deserialize, Serialize};

/// A single bounding sphere in a [SphereTree](crate::SphereTree) level
///
/// Spheres are plain values, copied out of the parser buffers as they are
/// read so nothing borrows from the source once a tree is built.
///
/// ```rust
/// # use spheretools_tree::Sphere;
/// let sphere = Sphere::new([1.0, -2.0, 0.5], 0.25);
/// assert_eq!(sphere.xyzr(), [1.0, -2.0, 0.5, 0.25]);
/// assert!(!sphere.is_pruned());
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sphere {
    /// Centre of the sphere (x, y, z)
    pub center: [f64; 3],
    /// Sphere radius, non-positive values mark pruned nodes in source files
    pub radius: f64,
}

impl Sphere {
    /// New sphere from a centre and radius
    pub fn new(center: [f64; 3], radius: f64) -> Self {
        Self { center, radius }
    }

    /// Centre x coordinate
    pub fn x(&self) -> f64 {
        self.center[0]
    }

    /// Centre y coordinate
    pub fn y(&self) -> f64 {
        self.center[1]
    }

    /// Centre z coordinate
    pub fn z(&self) -> f64 {
        self.center[2]
    }

    /// Flat `[x, y, z, radius]` array
    pub fn xyzr(&self) -> [f64; 4] {
        [self.center[0], self.center[1], self.center[2], self.radius]
    }

    /// True for radius <= 0 or NaN, the marker generators use for removed nodes
    pub fn is_pruned(&self) -> bool {
        self.radius.is_nan() || self.radius <= 0.0
    }

    /// Copy of the sphere with the centre and radius multiplied by `factor`
    ///
    /// ```rust
    /// # use spheretools_tree::Sphere;
    /// let sphere = Sphere::new([1.0, 2.0, 3.0], 0.5).scaled(2.0);
    /// assert_eq!(sphere, Sphere::new([2.0, 4.0, 6.0], 1.0));
    /// ```
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            center: self.center.map(|c| c * factor),
            radius: self.radius * factor,
        }
    }
}

impl std::fmt::Display for Sphere {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "({}, {}, {}) r={}",
            self.center[0], self.center[1], self.center[2], self.radius
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pruned_radii() {
        assert!(!Sphere::new([0.0; 3], 0.5).is_pruned());
        assert!(Sphere::new([0.0; 3], 0.0).is_pruned());
        assert!(Sphere::new([0.0; 3], -1.0).is_pruned());
        assert!(Sphere::new([0.0; 3], f64::NAN).is_pruned());
    }
}
