//! Error types for codec operations.
//!
//! Every failure produced by the codec algebra is a [`CodecError`]. Most of
//! the time an error travels inside a [`DataResult`](crate::DataResult)
//! rather than a plain `Result`, so that callers can keep a partially decoded
//! value next to the failure.
//!
//! # Example
//!
//! ```
//! use na_codec::{CodecError, DataResult};
//!
//! let result: DataResult<i32> = DataResult::error(CodecError::MissingKey("age".into()));
//! match result.result() {
//!     Err(CodecError::MissingKey(key)) => assert_eq!(key, "age"),
//!     other => panic!("unexpected: {other:?}"),
//! }
//! ```

use thiserror::Error;

/// All failure shapes produced by codecs, bridges, builders and cursors.
///
/// # Variants
///
/// - [`TypeMismatch`](CodecError::TypeMismatch) - A node was not of the requested shape
/// - [`MissingKey`](CodecError::MissingKey) - A required map key was absent
/// - [`UnknownDiscriminator`](CodecError::UnknownDiscriminator) - No sub-codec registered for a type tag
/// - [`Aggregate`](CodecError::Aggregate) - Several independent sub-results failed together
/// - [`Range`](CodecError::Range) - A numeric value fell outside its declared bounds
/// - [`Merge`](CodecError::Merge) - A value could not be merged into an existing node
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CodecError {
    /// A typed accessor was called on a node of the wrong shape.
    #[error("expected {expected}, got {actual}")]
    TypeMismatch {
        expected: &'static str,
        actual: String,
    },

    /// A required map key was absent.
    #[error("missing required key: {0}")]
    MissingKey(String),

    /// The dispatch codec found no target for a decoded discriminator.
    #[error("unknown discriminator: {0}")]
    UnknownDiscriminator(String),

    /// Several independent sub-results failed.
    ///
    /// Produced when a combinator enumerates multiple elements or fields and
    /// at least one of them fails. Each inner error carries the rendered raw
    /// input it failed on.
    #[error("{}", fmt_aggregate(.0))]
    Aggregate(Vec<CodecError>),

    /// A numeric value fell outside its declared bounds.
    #[error("value {value} out of range [{min}, {max}]")]
    Range {
        value: String,
        min: String,
        max: String,
    },

    /// A value could not be merged into an existing node of another shape.
    #[error("merge failed: {0}")]
    Merge(String),

    /// A free-form error raised by an `xmap` or `map_result` hook.
    #[error("{0}")]
    Message(String),
}

impl CodecError {
    /// Builds a [`TypeMismatch`](CodecError::TypeMismatch) from the actual
    /// node, rendered with its `Debug` form.
    pub fn type_mismatch(expected: &'static str, actual: &impl std::fmt::Debug) -> Self {
        CodecError::TypeMismatch {
            expected,
            actual: format!("{actual:?}"),
        }
    }

    /// Collapses a list of failures into one error.
    ///
    /// Nested aggregates are flattened, and a single-element list collapses
    /// to the element itself, so the result never wraps one error in another.
    pub fn aggregate(errors: Vec<CodecError>) -> Self {
        let mut flat = Vec::with_capacity(errors.len());
        for error in errors {
            match error {
                CodecError::Aggregate(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        match flat.pop() {
            Some(only) if flat.is_empty() => only,
            Some(last) => {
                flat.push(last);
                CodecError::Aggregate(flat)
            }
            None => CodecError::Aggregate(flat),
        }
    }

    /// Joins this error with another into an aggregate.
    pub fn join(self, other: CodecError) -> Self {
        CodecError::aggregate(vec![self, other])
    }
}

fn fmt_aggregate(errors: &[CodecError]) -> String {
    if errors.is_empty() {
        return "aggregate failure".to_string();
    }
    let rendered: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
    format!("{} failure(s): {}", errors.len(), rendered.join("; "))
}
