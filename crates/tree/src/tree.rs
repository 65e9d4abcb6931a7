// standard library
use std::collections::BTreeMap;

// crate modules
use crate::error::{Error, Result};
use crate::sphere::Sphere;

// spheretools modules
use spheretools_utils::f;

// external crates
use serde::Serialize;

/// Hierarchical set of bounding spheres organised by level
///
/// Level 0 is the root and every following level is a finer approximation of
/// the same shape. The branching factor predicts how many spheres each level
/// should hold (`branching_factor^level`) but is not enforced, since pruned
/// nodes are never stored.
///
/// A tree is built once by a reader and is read-only afterwards. There is no
/// way to modify one through the public API, so a [SphereTree] can be shared
/// freely between threads.
///
/// ```rust
/// # use spheretools_tree::{RadiusPolicy, SphereTreeReader};
/// let mut reader = SphereTreeReader::new();
/// reader.set_radius_policy(RadiusPolicy::Clamp);
///
/// let text = "2 2\n0 0 0 1.0 x\n1 0 0 0.5 x\n-1 0 0 0.5 x\n";
/// let tree = reader.parse_legacy_str(text).unwrap();
///
/// assert_eq!(tree.level_count(), 2);
/// assert_eq!(tree.branching_factor(), 2);
/// assert_eq!(tree.level_spheres(1).len(), 2);
///
/// // Levels past the end give the finest level available
/// assert_eq!(tree.level_spheres(7), tree.level_spheres(1));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SphereTree {
    level_count: usize,
    branching_factor: usize,
    levels: BTreeMap<usize, Vec<Sphere>>,
}

impl SphereTree {
    /// New tree with no levels stored
    ///
    /// Both the level count and branching factor must be at least 1.
    pub fn new(level_count: usize, branching_factor: usize) -> Result<Self> {
        if level_count == 0 || branching_factor == 0 {
            return Err(Error::InvalidHeader {
                levels: level_count,
                branching_factor,
            });
        }

        Ok(Self {
            level_count,
            branching_factor,
            levels: BTreeMap::new(),
        })
    }

    /// New tree from an explicit level mapping
    ///
    /// Levels missing from `levels` are treated as empty by every query.
    pub fn from_levels(
        level_count: usize,
        branching_factor: usize,
        levels: BTreeMap<usize, Vec<Sphere>>,
    ) -> Result<Self> {
        let mut tree = Self::new(level_count, branching_factor)?;
        tree.levels = levels;
        Ok(tree)
    }

    /// Number of levels including the root
    pub fn level_count(&self) -> usize {
        self.level_count
    }

    /// Nominal number of children per node
    pub fn branching_factor(&self) -> usize {
        self.branching_factor
    }

    /// Spheres stored for a level, in file order
    ///
    /// Requests beyond the last level are clamped to the finest level, and a
    /// level with no entry in the tree is an empty slice.
    pub fn level_spheres(&self, level: usize) -> &[Sphere] {
        let level = level.min(self.level_count - 1);
        self.levels
            .get(&level)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Parallel x, y, z, and radius columns for a level
    ///
    /// Follows the same clamping rules as
    /// [level_spheres()](SphereTree::level_spheres). Convenient for plotting
    /// libraries that take one array per component.
    ///
    /// ```rust
    /// # use spheretools_tree::{Sphere, SphereTree};
    /// # use std::collections::BTreeMap;
    /// let levels = BTreeMap::from([(0, vec![Sphere::new([1.0, 2.0, 3.0], 4.0)])]);
    /// let tree = SphereTree::from_levels(1, 8, levels).unwrap();
    ///
    /// let (x, y, z, r) = tree.xyzr(0);
    /// assert_eq!((x, y, z, r), (vec![1.0], vec![2.0], vec![3.0], vec![4.0]));
    /// ```
    pub fn xyzr(&self, level: usize) -> (Vec<f64>, Vec<f64>, Vec<f64>, Vec<f64>) {
        let spheres = self.level_spheres(level);
        (
            spheres.iter().map(Sphere::x).collect(),
            spheres.iter().map(Sphere::y).collect(),
            spheres.iter().map(Sphere::z).collect(),
            spheres.iter().map(|s| s.radius).collect(),
        )
    }

    /// Predicted sphere count for a level, `branching_factor^level`
    ///
    /// Saturates rather than overflowing for very deep trees.
    pub fn nominal_size(&self, level: usize) -> usize {
        u32::try_from(level).map_or(usize::MAX, |exp| {
            self.branching_factor.saturating_pow(exp)
        })
    }

    /// Iterator over every stored level and its spheres, in level order
    pub fn levels(&self) -> impl Iterator<Item = (usize, &[Sphere])> {
        self.levels.iter().map(|(l, s)| (*l, s.as_slice()))
    }

    /// Total number of spheres stored across all levels
    pub fn total_spheres(&self) -> usize {
        self.levels.values().map(Vec::len).sum()
    }

    /// Make sure a level has an entry, even if nothing is ever added to it
    pub(crate) fn insert_level(&mut self, level: usize) -> bool {
        let is_new = !self.levels.contains_key(&level);
        self.levels.entry(level).or_default();
        is_new
    }

    /// Append a sphere to the end of a level
    pub(crate) fn push(&mut self, level: usize, sphere: Sphere) {
        self.levels.entry(level).or_default().push(sphere);
    }
}

impl std::fmt::Display for SphereTree {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut s = "SphereTree {\n".to_string();
        s += &f!("    levels: {}\n", self.level_count);
        s += &f!("    branching factor: {}\n", self.branching_factor);
        for level in 0..self.level_count {
            s += &f!(
                "    level {level}: {} of {} spheres\n",
                self.level_spheres(level).len(),
                self.nominal_size(level)
            );
        }
        s += "}";

        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example() -> SphereTree {
        let levels = BTreeMap::from([
            (0, vec![Sphere::new([0.0, 0.0, 0.0], 1.0)]),
            (
                2,
                vec![
                    Sphere::new([1.0, 0.0, 0.0], 0.2),
                    Sphere::new([-1.0, 0.0, 0.0], 0.3),
                ],
            ),
        ]);
        SphereTree::from_levels(3, 2, levels).unwrap()
    }

    #[test]
    fn zero_dimensions_rejected() {
        assert!(matches!(
            SphereTree::new(0, 2),
            Err(Error::InvalidHeader { levels: 0, .. })
        ));
        assert!(matches!(
            SphereTree::new(2, 0),
            Err(Error::InvalidHeader {
                branching_factor: 0,
                ..
            })
        ));
    }

    #[test]
    fn missing_level_is_empty() {
        let tree = example();
        assert!(tree.level_spheres(1).is_empty());
        assert_eq!(tree.levels().count(), 2);
    }

    #[test]
    fn clamped_to_finest_level() {
        let tree = example();
        for level in 2..10 {
            assert_eq!(tree.level_spheres(level), tree.level_spheres(2));
        }
        assert_eq!(tree.level_spheres(usize::MAX).len(), 2);
    }

    #[test]
    fn repeated_queries_identical() {
        let tree = example();
        let first = tree.level_spheres(2).to_vec();
        let second = tree.level_spheres(2).to_vec();
        assert_eq!(first, second);
        assert_eq!(first[0].x(), 1.0);
        assert_eq!(first[1].x(), -1.0);
    }

    #[test]
    fn nominal_sizes() {
        let tree = example();
        assert_eq!(tree.nominal_size(0), 1);
        assert_eq!(tree.nominal_size(1), 2);
        assert_eq!(tree.nominal_size(2), 4);
        assert_eq!(tree.nominal_size(200), usize::MAX);
    }

    #[test]
    fn column_views() {
        let (x, y, z, r) = example().xyzr(5);
        assert_eq!(x, vec![1.0, -1.0]);
        assert_eq!(y, vec![0.0, 0.0]);
        assert_eq!(z, vec![0.0, 0.0]);
        assert_eq!(r, vec![0.2, 0.3]);
    }

    #[test]
    fn summary() {
        let tree = example();
        assert_eq!(tree.total_spheres(), 3);
        assert!(tree.to_string().contains("level 2: 2 of 4 spheres"));
    }
}
