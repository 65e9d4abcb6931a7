// crate modules
use crate::error::{Error, Result};
use crate::format::{Format, RadiusPolicy, RecordPolicy};
use crate::tree::SphereTree;

// standard library
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

// external crates
use log::debug;

/// A configurable reader for both sphere-tree encodings
///
/// Options only change how records are interpreted, the same reader can be
/// used for any number of files.
///
/// Notes:
///
/// - The radius policy applies to the legacy flat format only, structured
///   documents always discard spheres with a radius <= 0
/// - Any scale factor is applied to centres and radii as they are read
/// - Malformed records are fatal unless [RecordPolicy::Skip] is set
///
/// Minimal Example:
/// ```rust, no_run
/// # use spheretools_tree::{RadiusPolicy, SphereTreeReader};
/// let mut reader = SphereTreeReader::new();
/// reader.set_radius_policy(RadiusPolicy::Clamp);
/// let tree = reader.parse("path/to/bunny-grid.sph").unwrap();
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SphereTreeReader {
    /// Handling of pruned spheres in legacy files
    pub(crate) radius_policy: RadiusPolicy,
    /// Handling of records that fail to parse
    pub(crate) record_policy: RecordPolicy,
    /// Multiplier for every length read from the file
    pub(crate) scale: f64,
}

impl Default for SphereTreeReader {
    fn default() -> Self {
        Self {
            radius_policy: RadiusPolicy::Drop,
            record_policy: RecordPolicy::Strict,
            scale: 1.0,
        }
    }
}

// ! ------------------------------------------------------------------------
// !                                Public API
// ! ------------------------------------------------------------------------

/// High level methods
impl SphereTreeReader {
    /// Just calls Default::default(), nothing special to be initialised
    pub fn new() -> Self {
        Default::default()
    }

    /// Parse a sphere-tree file, guessing the format from its extension
    ///
    /// See [Format::from_path()] for the rules.
    pub fn parse<P: AsRef<Path>>(&self, path: P) -> Result<SphereTree> {
        let format = Format::from_path(&path);
        self.parse_format(path, format)
    }

    /// Parse a sphere-tree file in a known format
    pub fn parse_format<P: AsRef<Path>>(&self, path: P, format: Format) -> Result<SphereTree> {
        debug!("Reading {} as {format} format", path.as_ref().display());
        let reader = BufReader::new(File::open(path)?);
        match format {
            Format::Legacy => self.read_legacy(reader),
            Format::Structured => self.read_structured(reader),
        }
    }

    /// Parse legacy flat data from any buffered reader
    pub fn read_legacy<R: BufRead>(&self, reader: R) -> Result<SphereTree> {
        self.extract_legacy(reader)
    }

    /// Parse a structured document from any reader
    pub fn read_structured<R: Read>(&self, mut reader: R) -> Result<SphereTree> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        self.extract_structured(&text)
    }

    /// Parse legacy flat data held in memory
    pub fn parse_legacy_str(&self, text: &str) -> Result<SphereTree> {
        self.extract_legacy(text.as_bytes())
    }

    /// Parse a structured document held in memory
    pub fn parse_structured_str(&self, text: &str) -> Result<SphereTree> {
        self.extract_structured(text)
    }

    /// Choose how legacy records with a radius <= 0 are handled
    pub fn set_radius_policy(&mut self, policy: RadiusPolicy) {
        self.radius_policy = policy;
    }

    /// Choose whether malformed records are fatal or skipped
    pub fn set_record_policy(&mut self, policy: RecordPolicy) {
        self.record_policy = policy;
    }

    /// Multiply every centre coordinate and radius by `scale` on load
    ///
    /// Fails with [Error::InvalidScale] unless `scale` is finite and positive.
    pub fn set_scale(&mut self, scale: f64) -> Result<()> {
        if !(scale.is_finite() && scale > 0.0) {
            return Err(Error::InvalidScale(scale));
        }
        self.scale = scale;
        Ok(())
    }
}
