//! Result and Error types for the sphere-tree module

/// Type alias for `Result<T, tree::Error>`
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for the `spheretools-tree` crate
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Underlying file I/O error
    #[error("failure in file I/O")]
    IOError(#[from] std::io::Error),

    /// Failure to (de)serialise a YAML document
    #[error("failed serde YAML operation")]
    YamlError(#[from] serde_yaml::Error),

    /// Failure to serialise to a JSON string
    #[error("failed serde JSON operation")]
    JSONError(#[from] serde_json::Error),

    /// Header line or fields are absent or not numeric
    #[error("missing sphere-tree header ({reason})")]
    MissingHeader { reason: String },

    /// Header is numeric but does not describe a usable tree
    #[error("invalid sphere-tree header (levels {levels}, branching factor {branching_factor})")]
    InvalidHeader {
        levels: usize,
        branching_factor: usize,
    },

    /// A data line or record has the wrong shape or non-numeric fields
    #[error("malformed record at {location}: \"{text}\" ({reason})")]
    MalformedRecord {
        location: Location,
        text: String,
        reason: String,
    },

    /// More spheres in a level than the legacy layout has slots for
    #[error("level {level} holds {found} spheres (expected at most {expected})")]
    LevelOverflow {
        level: usize,
        expected: usize,
        found: usize,
    },

    /// Total placeholder-padded record count is beyond what can be written
    #[error("legacy layout needs {found} records (at most {maximum} supported)")]
    TooManyRecords { found: usize, maximum: usize },

    /// Scale factor is not a finite positive number
    #[error("scale factor {0} is not finite and positive")]
    InvalidScale(f64),

    #[error("format \"{0}\" is unknown")]
    UnknownFormat(String),
}

/// Where a malformed record was found in the source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    /// 1-based line number of a legacy flat file
    Line(usize),
    /// The `data` field of a structured document
    Data,
    /// Index of an entry in the `data` sequence
    Entry(usize),
    /// Sphere index within a `data` entry
    Sphere { entry: usize, index: usize },
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Line(n) => write!(f, "line {n}"),
            Self::Data => write!(f, "data field"),
            Self::Entry(n) => write!(f, "data entry {n}"),
            Self::Sphere { entry, index } => write!(f, "data entry {entry}, sphere {index}"),
        }
    }
}
