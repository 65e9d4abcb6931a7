// standard library
use std::path::Path;
use std::str::FromStr;

// crate modules
use crate::error::Error;
use crate::sphere::Sphere;

/// Sphere-tree file encodings
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Legacy flat positional text (`.sph`)
    ///
    /// A header with the level count and branching factor, then one sphere
    /// per line in level order. The fifth field is ignored.
    ///
    /// ```text
    /// 3 2
    /// 0.0 0.0 0.0 1.0 1
    /// 0.5 0.0 0.0 0.6 1
    /// -0.5 0.0 0.0 0.6 1
    /// etc ...
    /// ```
    #[default]
    Legacy,
    /// Structured hierarchical YAML document (`.yml`)
    ///
    /// ```text
    /// levels: 2
    /// degree: 8
    /// data:
    ///     - level: 0
    ///       spheres: [
    ///         {center: [0.0, 0.0, 0.0], radius: 1.0}
    ///       ]
    /// etc ...
    /// ```
    Structured,
}

impl Format {
    /// Guess the encoding from a file extension
    ///
    /// `.yml` and `.yaml` are structured documents, anything else is assumed
    /// to be the legacy flat format.
    ///
    /// ```rust
    /// # use spheretools_tree::Format;
    /// assert_eq!(Format::from_path("bunny-grid.yml"), Format::Structured);
    /// assert_eq!(Format::from_path("bunny-grid.sph"), Format::Legacy);
    /// assert_eq!(Format::from_path("no_extension"), Format::Legacy);
    /// ```
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        match path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .as_deref()
        {
            Some("yml" | "yaml") => Self::Structured,
            _ => Self::Legacy,
        }
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sph" | "legacy" => Ok(Self::Legacy),
            "yml" | "yaml" | "structured" => Ok(Self::Structured),
            _ => Err(Error::UnknownFormat(s.to_string())),
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Legacy => write!(f, "legacy"),
            Self::Structured => write!(f, "structured"),
        }
    }
}

/// Treatment of non-positive radii in the legacy flat format
///
/// Generators mark pruned nodes with a radius <= 0. Older tools kept these
/// as zero-radius placeholders, newer ones throw them away. Neither can be
/// inferred from the file, so the caller decides.
///
/// | Policy  | Negative radius               | Zero radius |
/// | ------- | ----------------------------- | ----------- |
/// | `Clamp` | set to 0.0 and kept           | kept        |
/// | `Drop`  | discarded                     | discarded   |
///
/// A NaN radius is treated as pruned, so `Drop` discards it and `Clamp`
/// keeps it unchanged.
///
/// A discarded record still uses up its slot when assigning records to
/// levels.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum RadiusPolicy {
    /// Keep every record, negative radii become 0.0
    Clamp,
    /// Discard records with a radius <= 0.0
    #[default]
    Drop,
}

impl RadiusPolicy {
    /// The sphere to store under this policy, if any
    ///
    /// ```rust
    /// # use spheretools_tree::{RadiusPolicy, Sphere};
    /// let pruned = Sphere::new([1.0, 0.0, 0.0], -0.2);
    /// assert_eq!(RadiusPolicy::Clamp.apply(pruned).unwrap().radius, 0.0);
    /// assert_eq!(RadiusPolicy::Drop.apply(pruned), None);
    /// ```
    pub fn apply(&self, sphere: Sphere) -> Option<Sphere> {
        match self {
            Self::Clamp if sphere.radius < 0.0 => Some(Sphere {
                radius: 0.0,
                ..sphere
            }),
            Self::Clamp => Some(sphere),
            Self::Drop if sphere.is_pruned() => None,
            Self::Drop => Some(sphere),
        }
    }
}

/// Treatment of records that can not be read
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum RecordPolicy {
    /// Fail the whole parse on the first malformed record
    #[default]
    Strict,
    /// Log a warning and carry on without the record
    Skip,
}
