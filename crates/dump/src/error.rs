//! Result and Error types for the dump module

/// Type alias for `Result<T, dump::Error>`
pub type Result<T> = core::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
/// The error type for `spheretools-dump`
pub enum Error {
    /// Underlying I/O error from the output sink
    #[error("failure in file I/O")]
    IOError(#[from] std::io::Error),

    /// Dump text that does not follow the expected layout
    #[error("malformed dump at line {line}: \"{text}\"")]
    MalformedDump { line: usize, text: String },
}
