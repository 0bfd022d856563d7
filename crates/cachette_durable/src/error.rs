//! Error types for durable store operations.

/// An error from a durable store operation.
///
/// This is an opaque error type wrapping whatever the underlying store reported.
/// It never crosses the tier boundary: [`DurableTier`](crate::DurableTier)
/// absorbs every `StoreError`, degrading reads to misses and writes to no-ops.
///
/// # Example
///
/// ```
/// use cachette_durable::StoreError;
///
/// let error = StoreError::from_message("disk quota exceeded");
/// ```
#[ohno::error]
pub struct StoreError {}

impl StoreError {
    /// Creates a new error from any type that can be converted to an error.
    pub fn from_message(cause: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::caused_by(cause)
    }
}

/// A specialized [`Result`] type for durable store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
