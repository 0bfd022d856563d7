//! The error type surfaced by the cache API.

/// An error from a cache operation.
///
/// The cache is strictly best-effort: tier failures, corrupt durable entries
/// and background refresh failures are all contained internally and manifest
/// only as a degraded hit rate. The two things that do surface are a fetch
/// function failing on the synchronous miss path and a value that cannot be
/// (de)serialized on that same path. In both cases the original error is
/// available via [`std::error::Error::source()`].
///
/// # Example
///
/// ```
/// use cachette::Error;
///
/// let error = Error::from_message("fetch failed");
/// ```
#[ohno::error]
pub struct Error {}

impl Error {
    /// Creates a new error from any type that can be converted to an error.
    pub fn from_message(cause: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::caused_by(cause)
    }
}

/// A specialized [`Result`] type for cache operations.
pub type Result<T> = std::result::Result<T, Error>;
