//! Bounding-sphere tree model and file parsing
#![doc = include_str!("../readme.md")]

// Split into subfiles for development, but anything important is re-exported
mod error;
mod format;
mod sphere;
mod tree;
mod writer;

pub mod reader;

// inline anything important for a nice public API
#[doc(inline)]
pub use reader::{read_sph, read_sphere_tree, read_yaml, SphereTreeReader};

#[doc(inline)]
pub use format::{Format, RadiusPolicy, RecordPolicy};

#[doc(inline)]
pub use sphere::Sphere;

#[doc(inline)]
pub use tree::SphereTree;

#[doc(inline)]
pub use writer::{MAX_RECORDS, write_json, write_legacy, write_sph, write_structured, write_yaml};

#[doc(inline)]
pub use error::{Error, Location, Result};
