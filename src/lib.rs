//! `spheretools` is a small modular toolkit for reading, querying, and
//! exporting bounding-sphere trees
//!
#![doc = include_str!("../readme.md")]
#![deny(missing_docs, missing_debug_implementations)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

// Re-exports of toolkit crates.
#[doc(inline)]
pub use spheretools_tree as tree;

#[doc(inline)]
pub use spheretools_utils as utils;

#[cfg(feature = "dump")]
#[cfg_attr(docsrs, doc(cfg(feature = "dump")))]
#[doc(inline)]
pub use spheretools_dump as dump;
