//! Particle dump export for sphere-tree levels
#![doc = include_str!("../readme.md")]

// Split into subfiles for development, but anything important is re-exported
mod dump;
mod error;
mod reader;

#[doc(inline)]
pub use dump::{
    export_level, export_tree, write_level, BoxBounds, DumpWriter, DEFAULT_BOUNDS,
    DEFAULT_TIMESTEP,
};

#[doc(inline)]
pub use reader::{read_dump, read_dump_file, Dump, DumpRecord};

#[doc(inline)]
pub use error::{Error, Result};
