//! Parsers and logic for reading sphere-tree files
//!
//! All functions are re-exported to the crate root for easy access.
//!
//! # Quickstart
//!
//! The simplest methods for reading sphere-trees are the convenience
//! functions:
//!
//! ```rust, no_run
//! # use spheretools_tree::{read_sph, read_sphere_tree, read_yaml, RadiusPolicy};
//! // Format inferred from the file extension, default options
//! let tree = read_sphere_tree("/path/to/bunny-grid.yml").unwrap();
//!
//! // Legacy flat files need an explicit radius policy
//! let tree = read_sph("/path/to/bunny-grid.sph", RadiusPolicy::Clamp).unwrap();
//!
//! // Structured documents always drop pruned spheres
//! let tree = read_yaml("/path/to/bunny-grid.yml").unwrap();
//! ```
//!
//! Under the hood these initialise a [SphereTreeReader], which is public for
//! finer control over scaling and malformed records.
//!
//! ```rust, no_run
//! # use spheretools_tree::{RecordPolicy, SphereTreeReader};
//! let mut reader = SphereTreeReader::new();
//! reader.set_record_policy(RecordPolicy::Skip); // warn instead of failing
//! reader.set_scale(0.001).unwrap(); // mm to m
//!
//! let tree = reader.parse("/path/to/bunny-grid.sph").unwrap();
//! ```
//!
//! # Formatting notes
//!
//! **Legacy files stop at the first line that is not a record**
//!
//! > Any line without exactly five fields ends the sphere data. This is not an
//! > error, the tree simply has fewer spheres than predicted.
//!
//! **Legacy levels come from record positions**
//!
//! > Level `L` takes the next `branching_factor^L` records. Records dropped
//! > under [RadiusPolicy::Drop](crate::RadiusPolicy::Drop) still use up
//! > their slot. Data after the last level is ignored with a warning.
//!
//! **Structured documents can omit levels**
//!
//! > Levels missing from `data` are absent from the tree and read as empty.

// reader modules
mod legacy;
mod parsers;
mod sphere_reader;
mod structured;

// re-exports for clean API + documentation
#[doc(inline)]
pub use sphere_reader::SphereTreeReader;

// library imports
use crate::error::Result;
use crate::format::{Format, RadiusPolicy};
use crate::tree::SphereTree;
use std::path::Path;

/// Read a sphere-tree file of either format
///
/// The format is inferred from the extension, see
/// [Format::from_path()](crate::Format::from_path). Default reader options
/// are used.
///
/// - `path` - Path to the sphere-tree file, can be [&str], [String], [Path], etc...
///
/// Example
/// ```rust, no_run
/// # use spheretools_tree::{read_sphere_tree, SphereTree};
/// let tree: SphereTree = read_sphere_tree("path/to/bunny-grid.sph").unwrap();
/// ```
pub fn read_sphere_tree<P: AsRef<Path>>(path: P) -> Result<SphereTree> {
    SphereTreeReader::new().parse(path)
}

/// Read a legacy flat sphere-tree file
///
/// - `path` - Path to the sphere-tree file, can be [&str], [String], [Path], etc...
/// - `policy` - How to handle pruned spheres with a radius <= 0
///
/// Example
/// ```rust, no_run
/// # use spheretools_tree::{read_sph, RadiusPolicy, SphereTree};
/// let tree: SphereTree = read_sph("path/to/bunny-grid.sph", RadiusPolicy::Drop).unwrap();
/// ```
pub fn read_sph<P: AsRef<Path>>(path: P, policy: RadiusPolicy) -> Result<SphereTree> {
    let mut reader = SphereTreeReader::new();
    reader.set_radius_policy(policy);
    reader.parse_format(path, Format::Legacy)
}

/// Read a structured sphere-tree document
///
/// - `path` - Path to the sphere-tree file, can be [&str], [String], [Path], etc...
///
/// Example
/// ```rust, no_run
/// # use spheretools_tree::{read_yaml, SphereTree};
/// let tree: SphereTree = read_yaml("path/to/bunny-grid.yml").unwrap();
/// ```
pub fn read_yaml<P: AsRef<Path>>(path: P) -> Result<SphereTree> {
    SphereTreeReader::new().parse_format(path, Format::Structured)
}
