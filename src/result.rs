//! The result channel: success or error with a partial value, plus a
//! lifecycle tag.
//!
//! [`DataResult`] is the outcome type used everywhere a codec operation must
//! support soft failure. Unlike `std::result::Result`, an error outcome may
//! still carry a partially decoded value, and every outcome carries a
//! [`Lifecycle`] describing the stability of the data that produced it.
//! Lifecycles combine monotonically when results compose.
//!
//! Results are immutable. Combinators produce new results and never mutate
//! in place, so a `DataResult` can be shared freely.
//!
//! # Example
//!
//! ```
//! use na_codec::{DataResult, Lifecycle};
//!
//! let a = DataResult::success_with(1, Lifecycle::Experimental);
//! let b = DataResult::success(2);
//! let both = a.and(b);
//! assert_eq!(both.lifecycle(), Lifecycle::Experimental);
//! assert_eq!(both.result().unwrap(), (1, 2));
//! ```

use crate::CodecError;

/// Stability tag carried by every [`DataResult`].
///
/// `Experimental` absorbs any combination; between two `Deprecated` tags the
/// smaller version wins; any other combination is `Stable`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Lifecycle {
    #[default]
    Stable,
    Experimental,
    /// Deprecated since the given data version.
    Deprecated(u32),
}

impl Lifecycle {
    /// Combines two lifecycles monotonically.
    #[inline]
    pub fn join(self, other: Lifecycle) -> Lifecycle {
        match (self, other) {
            (Lifecycle::Experimental, _) | (_, Lifecycle::Experimental) => Lifecycle::Experimental,
            (Lifecycle::Deprecated(a), Lifecycle::Deprecated(b)) => {
                Lifecycle::Deprecated(a.min(b))
            }
            _ => Lifecycle::Stable,
        }
    }
}

/// Success, or an error with an optional partially decoded value.
///
/// The error message of an `Error` outcome is always non-empty (guaranteed by
/// the [`CodecError`] display forms).
#[derive(Debug, Clone, PartialEq)]
pub enum DataResult<R> {
    Success {
        value: R,
        lifecycle: Lifecycle,
    },
    Error {
        error: CodecError,
        partial: Option<R>,
        lifecycle: Lifecycle,
    },
}

impl<R> DataResult<R> {
    /// A stable success.
    #[inline]
    pub fn success(value: R) -> Self {
        DataResult::Success {
            value,
            lifecycle: Lifecycle::Stable,
        }
    }

    /// A success with an explicit lifecycle.
    #[inline]
    pub fn success_with(value: R, lifecycle: Lifecycle) -> Self {
        DataResult::Success { value, lifecycle }
    }

    /// A stable error with no partial value.
    #[inline]
    pub fn error(error: CodecError) -> Self {
        DataResult::Error {
            error,
            partial: None,
            lifecycle: Lifecycle::Stable,
        }
    }

    /// An error that still carries a partially decoded value.
    #[inline]
    pub fn error_with_partial(error: CodecError, partial: R) -> Self {
        DataResult::Error {
            error,
            partial: Some(partial),
            lifecycle: Lifecycle::Stable,
        }
    }

    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self, DataResult::Success { .. })
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        matches!(self, DataResult::Error { .. })
    }

    /// The lifecycle of this outcome.
    #[inline]
    pub fn lifecycle(&self) -> Lifecycle {
        match self {
            DataResult::Success { lifecycle, .. } => *lifecycle,
            DataResult::Error { lifecycle, .. } => *lifecycle,
        }
    }

    /// The error of this outcome, if any.
    #[inline]
    pub fn as_error(&self) -> Option<&CodecError> {
        match self {
            DataResult::Success { .. } => None,
            DataResult::Error { error, .. } => Some(error),
        }
    }

    /// Maps the success value. The partial value of an error maps too.
    pub fn map<B>(self, f: impl FnOnce(R) -> B) -> DataResult<B> {
        match self {
            DataResult::Success { value, lifecycle } => DataResult::Success {
                value: f(value),
                lifecycle,
            },
            DataResult::Error {
                error,
                partial,
                lifecycle,
            } => DataResult::Error {
                error,
                partial: partial.map(f),
                lifecycle,
            },
        }
    }

    /// Replaces the error, leaving value, partial and lifecycle untouched.
    pub fn map_error(self, f: impl FnOnce(CodecError) -> CodecError) -> DataResult<R> {
        match self {
            success @ DataResult::Success { .. } => success,
            DataResult::Error {
                error,
                partial,
                lifecycle,
            } => DataResult::Error {
                error: f(error),
                partial,
                lifecycle,
            },
        }
    }

    /// Monadic bind. Lifecycles of both steps join.
    ///
    /// On error, the continuation still runs against the partial value if one
    /// is present, so partial data survives a chain of decodes. The original
    /// error is kept.
    pub fn and_then<B>(self, f: impl FnOnce(R) -> DataResult<B>) -> DataResult<B> {
        match self {
            DataResult::Success { value, lifecycle } => f(value).with_lifecycle(lifecycle),
            DataResult::Error {
                error,
                partial,
                lifecycle,
            } => {
                let (partial, lifecycle) = match partial.map(f) {
                    Some(DataResult::Success {
                        value,
                        lifecycle: inner,
                    }) => (Some(value), lifecycle.join(inner)),
                    Some(DataResult::Error {
                        partial,
                        lifecycle: inner,
                        ..
                    }) => (partial, lifecycle.join(inner)),
                    None => (None, lifecycle),
                };
                DataResult::Error {
                    error,
                    partial,
                    lifecycle,
                }
            }
        }
    }

    /// Pairs two independent results.
    ///
    /// Both errors are kept and aggregated. The partial pair survives only
    /// when both sides carried a value (success or partial).
    pub fn and<B>(self, other: DataResult<B>) -> DataResult<(R, B)> {
        let lifecycle = self.lifecycle().join(other.lifecycle());
        match (self, other) {
            (
                DataResult::Success { value: a, .. },
                DataResult::Success { value: b, .. },
            ) => DataResult::Success {
                value: (a, b),
                lifecycle,
            },
            (
                DataResult::Error {
                    error, partial: a, ..
                },
                DataResult::Success { value: b, .. },
            ) => DataResult::Error {
                error,
                partial: a.map(|a| (a, b)),
                lifecycle,
            },
            (
                DataResult::Success { value: a, .. },
                DataResult::Error {
                    error, partial: b, ..
                },
            ) => DataResult::Error {
                error,
                partial: b.map(|b| (a, b)),
                lifecycle,
            },
            (
                DataResult::Error {
                    error: ea,
                    partial: a,
                    ..
                },
                DataResult::Error {
                    error: eb,
                    partial: b,
                    ..
                },
            ) => DataResult::Error {
                error: ea.join(eb),
                partial: a.zip(b),
                lifecycle,
            },
        }
    }

    /// Joins the given lifecycle into this outcome.
    pub fn with_lifecycle(self, other: Lifecycle) -> Self {
        self.set_lifecycle_inner(|current| current.join(other))
    }

    /// Overwrites the lifecycle of this outcome.
    pub fn set_lifecycle(self, lifecycle: Lifecycle) -> Self {
        self.set_lifecycle_inner(|_| lifecycle)
    }

    fn set_lifecycle_inner(self, f: impl FnOnce(Lifecycle) -> Lifecycle) -> Self {
        match self {
            DataResult::Success { value, lifecycle } => DataResult::Success {
                value,
                lifecycle: f(lifecycle),
            },
            DataResult::Error {
                error,
                partial,
                lifecycle,
            } => DataResult::Error {
                error,
                partial,
                lifecycle: f(lifecycle),
            },
        }
    }

    /// Attaches a partial value to an error outcome. Successes pass through.
    pub fn set_partial(self, value: R) -> Self {
        match self {
            success @ DataResult::Success { .. } => success,
            DataResult::Error {
                error, lifecycle, ..
            } => DataResult::Error {
                error,
                partial: Some(value),
                lifecycle,
            },
        }
    }

    /// Recovers an error outcome into a success when a partial value is
    /// present, reporting the swallowed error to `on_error`.
    pub fn promote_partial(self, on_error: impl FnOnce(&CodecError)) -> DataResult<R> {
        match self {
            success @ DataResult::Success { .. } => success,
            DataResult::Error {
                error,
                partial,
                lifecycle,
            } => {
                on_error(&error);
                match partial {
                    Some(value) => DataResult::Success { value, lifecycle },
                    None => DataResult::Error {
                        error,
                        partial: None,
                        lifecycle,
                    },
                }
            }
        }
    }

    /// Collapses into a plain `Result`, dropping partial value and lifecycle.
    pub fn result(self) -> Result<R, CodecError> {
        match self {
            DataResult::Success { value, .. } => Ok(value),
            DataResult::Error { error, .. } => Err(error),
        }
    }

    /// The success value, if any.
    #[inline]
    pub fn ok(self) -> Option<R> {
        self.result().ok()
    }

    /// The success value, or the given default on any error.
    #[inline]
    pub fn unwrap_or(self, default: R) -> R {
        match self {
            DataResult::Success { value, .. } => value,
            DataResult::Error { .. } => default,
        }
    }

    /// The success value, or the supplier's value on any error.
    #[inline]
    pub fn unwrap_or_else(self, f: impl FnOnce() -> R) -> R {
        match self {
            DataResult::Success { value, .. } => value,
            DataResult::Error { .. } => f(),
        }
    }
}
