//! Main crate error.

/// The crate's error type.
///
/// Routing operations are best-effort and infallible; this only covers the conversions at the
/// edges of the crate.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The string is not a valid hexadecimal identifier.
    #[error("invalid identifier: {0:?}")]
    InvalidId(String),
}

/// A [`Result`](std::result::Result) alias with the crate's [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;
