// standard library
use std::io::Write;

// spheretools modules
use spheretools_tree::{Sphere, SphereTree};
use spheretools_utils::{f, SliceExt, ValueExt};

// external crates
use log::debug;
use rayon::prelude::*;

/// Timestep written to dumps unless told otherwise
pub const DEFAULT_TIMESTEP: u64 = 10000;

/// Box bounds written unless told otherwise, `[-1, 1]` on every axis
pub const DEFAULT_BOUNDS: [[f64; 2]; 3] = [[-1.0, 1.0]; 3];

// Literal marker lines, these are read by external tools and must not change
pub(crate) const TIMESTEP_ITEM: &str = "ITEM: TIMESTEP";
pub(crate) const COUNT_ITEM: &str = "ITEM: NUMBER OF ATOMS";
pub(crate) const BOUNDS_ITEM: &str = "ITEM: BOX BOUNDS ff ff ff";
pub(crate) const ATOMS_ITEM: &str = "ITEM: ATOMS id x y z radius";

/// Box bounds written to the `BOX BOUNDS` block of a dump
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoxBounds {
    /// Explicit `[min, max]` for the x, y, and z axes
    Fixed([[f64; 2]; 3]),
    /// Smallest box containing every sphere of the level
    ///
    /// Falls back to [DEFAULT_BOUNDS] for an empty level.
    Fit,
}

impl Default for BoxBounds {
    fn default() -> Self {
        Self::Fixed(DEFAULT_BOUNDS)
    }
}

impl BoxBounds {
    /// Concrete `[min, max]` pairs for a set of spheres
    ///
    /// ```rust
    /// # use spheretools_dump::BoxBounds;
    /// # use spheretools_tree::Sphere;
    /// let spheres = [
    ///     Sphere::new([1.0, 0.0, 0.0], 0.5),
    ///     Sphere::new([-1.0, 0.0, 2.0], 1.0),
    /// ];
    /// let bounds = BoxBounds::Fit.resolve(&spheres);
    /// assert_eq!(bounds, [[-2.0, 1.5], [-1.0, 1.0], [-0.5, 3.0]]);
    /// ```
    pub fn resolve(&self, spheres: &[Sphere]) -> [[f64; 2]; 3] {
        match self {
            Self::Fixed(bounds) => *bounds,
            Self::Fit => fit_bounds(spheres).unwrap_or(DEFAULT_BOUNDS),
        }
    }
}

/// Extent of the spheres along each axis, including radii
fn fit_bounds(spheres: &[Sphere]) -> Option<[[f64; 2]; 3]> {
    let mut bounds = DEFAULT_BOUNDS;
    for (axis, pair) in bounds.iter_mut().enumerate() {
        let lower: Vec<f64> = spheres.iter().map(|s| s.center[axis] - s.radius).collect();
        let upper: Vec<f64> = spheres.iter().map(|s| s.center[axis] + s.radius).collect();
        *pair = [lower.try_min().ok()?, upper.try_max().ok()?];
    }
    Some(bounds)
}

/// Writer for LIGGGHTS-style particle dumps
///
/// Each dump holds the spheres of a single tree level:
///
/// ```text
/// ITEM: TIMESTEP
/// <timestep>
/// ITEM: NUMBER OF ATOMS
/// <number of spheres>
/// ITEM: BOX BOUNDS ff ff ff
/// <xmin> <xmax>
/// <ymin> <ymax>
/// <zmin> <zmax>
/// ITEM: ATOMS id x y z radius
/// <id> <x> <y> <z> <radius>
/// etc ...
/// ```
///
/// Identifiers start at 1 and follow the order of the spheres given, so the
/// same level always produces the same ids. Real values are written in
/// scientific notation with 9 significant figures.
///
/// ```rust
/// # use spheretools_dump::{BoxBounds, DumpWriter};
/// # use spheretools_tree::Sphere;
/// let mut writer = DumpWriter::new();
/// writer.set_timestep(0);
/// writer.set_bounds(BoxBounds::Fit);
///
/// let dump = writer.export_level(&[Sphere::new([0.0, 0.0, 0.0], 0.5)]);
/// assert!(dump.starts_with("ITEM: TIMESTEP\n0\nITEM: NUMBER OF ATOMS\n1\n"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DumpWriter {
    timestep: u64,
    bounds: BoxBounds,
}

impl Default for DumpWriter {
    fn default() -> Self {
        Self {
            timestep: DEFAULT_TIMESTEP,
            bounds: BoxBounds::default(),
        }
    }
}

impl DumpWriter {
    /// Just calls Default::default(), nothing special to be initialised
    pub fn new() -> Self {
        Default::default()
    }

    /// Set the value written under `ITEM: TIMESTEP`
    pub fn set_timestep(&mut self, timestep: u64) {
        self.timestep = timestep;
    }

    /// Set the box bounds written under `ITEM: BOX BOUNDS`
    pub fn set_bounds(&mut self, bounds: BoxBounds) {
        self.bounds = bounds;
    }

    /// Dump text for a sequence of spheres
    pub fn export_level(&self, spheres: &[Sphere]) -> String {
        let mut s = self.header(spheres);
        for (i, sphere) in spheres.iter().enumerate() {
            s += &record(i + 1, sphere);
        }
        s
    }

    /// Write the dump for a sequence of spheres to any writer
    ///
    /// Errors from the writer are returned unchanged.
    pub fn write_level<W: Write>(&self, mut writer: W, spheres: &[Sphere]) -> std::io::Result<()> {
        writer.write_all(self.header(spheres).as_bytes())?;
        for (i, sphere) in spheres.iter().enumerate() {
            writer.write_all(record(i + 1, sphere).as_bytes())?;
        }
        Ok(())
    }

    /// One dump per level of a tree, in level order
    ///
    /// Levels `0..level_count` are all exported, so a level with no spheres
    /// still gets a dump with a count of zero. Levels are formatted in
    /// parallel.
    pub fn export_tree(&self, tree: &SphereTree) -> Vec<(usize, String)> {
        debug!("Exporting {} levels", tree.level_count());
        (0..tree.level_count())
            .into_par_iter()
            .map(|level| (level, self.export_level(tree.level_spheres(level))))
            .collect()
    }

    /// Marker lines, count, bounds, and column names
    fn header(&self, spheres: &[Sphere]) -> String {
        let mut s = f!("{TIMESTEP_ITEM}\n{}\n", self.timestep);
        s += &f!("{COUNT_ITEM}\n{}\n", spheres.len());
        s += &f!("{BOUNDS_ITEM}\n");
        for [min, max] in self.bounds.resolve(spheres) {
            s += &f!("{} {}\n", min.sci(8, 2), max.sci(8, 2));
        }
        s += &f!("{ATOMS_ITEM}\n");
        s
    }
}

/// Single `id x y z radius` line
fn record(id: usize, sphere: &Sphere) -> String {
    f!(
        "{id} {} {} {} {}\n",
        sphere.x().sci(8, 2),
        sphere.y().sci(8, 2),
        sphere.z().sci(8, 2),
        sphere.radius.sci(8, 2)
    )
}

/// Dump text for a sequence of spheres with default bounds
///
/// ```rust
/// # use spheretools_dump::export_level;
/// let dump = export_level(&[], 10000);
/// assert_eq!(dump.lines().count(), 9);
/// assert_eq!(dump.lines().nth(3), Some("0"));
/// ```
pub fn export_level(spheres: &[Sphere], timestep: u64) -> String {
    let mut writer = DumpWriter::new();
    writer.set_timestep(timestep);
    writer.export_level(spheres)
}

/// Write the dump for a sequence of spheres with default bounds
pub fn write_level<W: Write>(writer: W, spheres: &[Sphere], timestep: u64) -> std::io::Result<()> {
    let mut dump = DumpWriter::new();
    dump.set_timestep(timestep);
    dump.write_level(writer, spheres)
}

/// One dump per tree level with the default timestep and bounds
///
/// ```rust, no_run
/// # use spheretools_dump::export_tree;
/// # use spheretools_tree::read_yaml;
/// let tree = read_yaml("./bunny-grid.yml").unwrap();
/// for (level, dump) in export_tree(&tree) {
///     std::fs::write(format!("./bunny-grid-level-{level}.liggghts"), dump).unwrap();
/// }
/// ```
pub fn export_tree(tree: &SphereTree) -> Vec<(usize, String)> {
    DumpWriter::new().export_tree(tree)
}
