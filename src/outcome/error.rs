//! Diagnostics for misuse of the unchecked unwrapping operations.
//!
//! Calling [`Outcome::unwrap_success`](super::Outcome::unwrap_success) on a
//! failure (or [`Outcome::unwrap_failure`](super::Outcome::unwrap_failure) on a
//! success) is an invariant violation. The calling code path is aborted with a
//! panic whose message is rendered by [`UnwrapError`].

use std::fmt;

use thiserror::Error;

/// Which variant an unchecked unwrap expected to find.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum UnwrapErrorKind {
    /// A success payload was requested from a `Failure`.
    #[error("called `Outcome::unwrap_success()` on a `Failure` value")]
    ExpectedSuccess,
    /// A failure payload was requested from a `Success`.
    #[error("called `Outcome::unwrap_failure()` on a `Success` value")]
    ExpectedFailure,
}

/// The diagnostic produced when an unchecked unwrap hits the wrong variant.
///
/// The payload that was actually present is kept in its `Debug` rendering.
///
/// # Examples
///
/// ```rust
/// use okerr::outcome::{UnwrapError, UnwrapErrorKind};
///
/// let error = UnwrapError::new(UnwrapErrorKind::ExpectedSuccess, &"timeout", Some("loading config"));
/// assert_eq!(
///     error.to_string(),
///     "loading config: called `Outcome::unwrap_success()` on a `Failure` value: \"timeout\""
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnwrapError {
    /// The diagnostic without a caller-supplied label.
    #[error("{kind}: {payload}")]
    Bare {
        /// The variant that was expected.
        kind: UnwrapErrorKind,
        /// `Debug` rendering of the payload that was found instead.
        payload: String,
    },
    /// The diagnostic labelled with caller-supplied context.
    #[error("{context}: {kind}: {payload}")]
    WithContext {
        /// The variant that was expected.
        kind: UnwrapErrorKind,
        /// `Debug` rendering of the payload that was found instead.
        payload: String,
        /// The caller-supplied label.
        context: String,
    },
}

impl UnwrapError {
    /// Builds the diagnostic from the unexpected payload and optional context.
    pub fn new<P: fmt::Debug + ?Sized>(
        kind: UnwrapErrorKind,
        payload: &P,
        context: Option<&str>,
    ) -> Self {
        let payload = format!("{payload:?}");
        match context {
            Some(context) => Self::WithContext {
                kind,
                payload,
                context: context.to_string(),
            },
            None => Self::Bare { kind, payload },
        }
    }

    /// Returns which variant was expected.
    pub const fn kind(&self) -> UnwrapErrorKind {
        match self {
            Self::Bare { kind, .. } | Self::WithContext { kind, .. } => *kind,
        }
    }

    /// Returns the `Debug` rendering of the payload that was found.
    pub fn payload(&self) -> &str {
        match self {
            Self::Bare { payload, .. } | Self::WithContext { payload, .. } => payload,
        }
    }

    /// Returns the caller-supplied label, if any.
    pub fn context(&self) -> Option<&str> {
        match self {
            Self::Bare { .. } => None,
            Self::WithContext { context, .. } => Some(context),
        }
    }
}

/// Aborts the current code path with the given diagnostic.
#[cold]
#[track_caller]
pub(crate) fn raise(error: UnwrapError) -> ! {
    tracing::error!(kind = ?error.kind(), "{error}");
    panic!("{error}")
}
