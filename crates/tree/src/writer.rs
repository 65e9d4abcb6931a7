//! Write operations for [SphereTree] data

// standard library
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

// crate modules
use crate::error::{Error, Result};
use crate::sphere::Sphere;
use crate::tree::SphereTree;

// external crates
use log::debug;
use serde::Serialize;

/// Record written for every unused slot of a legacy level
const PLACEHOLDER: &str = "0 0 0 -1 1";

/// Upper limit on records in a legacy file, placeholders included
pub const MAX_RECORDS: usize = 1 << 24;

/// Write a [SphereTree] to a legacy flat `.sph` file
///
/// Every level is written to its nominal size, `branching_factor^level`.
/// Slots without a sphere are padded with a placeholder of radius `-1` so
/// that the level of every record is preserved when the file is read back.
///
/// A level holding more spheres than its nominal size can not be represented
/// and fails with [Error::LevelOverflow]. A layout needing more than
/// [MAX_RECORDS] records in total fails with [Error::TooManyRecords] before
/// anything is written.
///
/// ```rust, no_run
/// # use spheretools_tree::{read_yaml, write_sph};
/// let tree = read_yaml("./bunny-grid.yml").unwrap();
/// write_sph(&tree, "./bunny-grid.sph").unwrap();
/// ```
pub fn write_sph<P: AsRef<Path>>(tree: &SphereTree, path: P) -> Result<()> {
    let mut writer = init_writer(path)?;
    write_legacy(tree, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Write the legacy flat format to any writer
///
/// See [write_sph()] for details.
pub fn write_legacy<W: Write>(tree: &SphereTree, mut writer: W) -> Result<()> {
    let mut total = 0usize;
    for level in 0..tree.level_count() {
        total = total.saturating_add(tree.nominal_size(level));
        if total > MAX_RECORDS {
            break;
        }
    }
    if total > MAX_RECORDS {
        return Err(Error::TooManyRecords {
            found: total,
            maximum: MAX_RECORDS,
        });
    }

    writeln!(writer, "{} {}", tree.level_count(), tree.branching_factor())?;

    for level in 0..tree.level_count() {
        let spheres = tree.level_spheres(level);
        let nominal = tree.nominal_size(level);

        if spheres.len() > nominal {
            return Err(Error::LevelOverflow {
                level,
                expected: nominal,
                found: spheres.len(),
            });
        }

        for s in spheres {
            writeln!(writer, "{} {} {} {} 1", s.x(), s.y(), s.z(), s.radius)?;
        }

        let padding = nominal - spheres.len();
        if padding > 0 {
            debug!("Padding level {level} with {padding} placeholders");
        }
        for _ in 0..padding {
            writeln!(writer, "{PLACEHOLDER}")?;
        }
    }

    Ok(())
}

/// Write a [SphereTree] to a structured `.yml` document
///
/// Only levels stored in the tree are written, so a level that was absent
/// when parsed stays absent.
///
/// ```rust, no_run
/// # use spheretools_tree::{read_sph, write_yaml, RadiusPolicy};
/// let tree = read_sph("./bunny-grid.sph", RadiusPolicy::Drop).unwrap();
/// write_yaml(&tree, "./bunny-grid.yml").unwrap();
/// ```
pub fn write_yaml<P: AsRef<Path>>(tree: &SphereTree, path: P) -> Result<()> {
    let mut writer = init_writer(path)?;
    write_structured(tree, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Write the structured format to any writer
pub fn write_structured<W: Write>(tree: &SphereTree, writer: W) -> Result<()> {
    let document = Document {
        levels: tree.level_count(),
        degree: tree.branching_factor(),
        data: tree
            .levels()
            .map(|(level, spheres)| LevelRecord { level, spheres })
            .collect(),
    };

    serde_yaml::to_writer(writer, &document)?;
    Ok(())
}

/// Write [SphereTree] data to a JSON file
///
/// A direct serialisation of the model for inspection or analysis by other
/// tools.
///
/// ```rust, no_run
/// # use spheretools_tree::{read_sphere_tree, write_json};
/// let tree = read_sphere_tree("./bunny-grid.yml").unwrap();
/// write_json(&tree, "./bunny-grid.json").unwrap();
/// ```
pub fn write_json<P: AsRef<Path>>(tree: &SphereTree, path: P) -> Result<()> {
    let writer = init_writer(path)?;
    serde_json::to_writer_pretty(writer, tree)?;
    Ok(())
}

/// Layout of the structured document
#[derive(Serialize)]
struct Document<'a> {
    levels: usize,
    degree: usize,
    data: Vec<LevelRecord<'a>>,
}

#[derive(Serialize)]
struct LevelRecord<'a> {
    level: usize,
    spheres: &'a [Sphere],
}

/// Initialise a writer from anything that can be turned into a path
fn init_writer<P: AsRef<Path>>(path: P) -> Result<BufWriter<File>> {
    let file = File::create(path)?;
    Ok(BufWriter::new(file))
}
