//! Outcome type - a typed value that is either a success or a failure.
//!
//! This module provides the `Outcome<T, E>` type, which represents the result
//! of an operation that either produced a `Success(T)` or a `Failure(E)`.
//! Failures are ordinary values: they travel through every combinator until
//! a terminal operation (`fold`, `unwrap_or`, ...) consumes them.
//!
//! # Examples
//!
//! ```rust
//! use okerr::outcome::{Outcome, err, ok};
//!
//! fn parse(input: &str) -> Outcome<i32, String> {
//!     input.parse::<i32>().map_err(|error| error.to_string()).into()
//! }
//!
//! let doubled = parse("21").map(|n| n * 2);
//! assert_eq!(doubled, ok(42));
//!
//! let failed = parse("x").and_then(|n| ok(n + 1));
//! assert!(failed.is_failure());
//!
//! let rendered = failed.fold(|n| n.to_string(), |error| format!("error: {error}"));
//! assert!(rendered.starts_with("error:"));
//!
//! let recovered: Outcome<i32, ()> = err::<i32, _>("boom").or_else(|_| ok(0));
//! assert_eq!(recovered, ok(0));
//! ```

mod combine;
mod error;
mod fault;

pub use combine::{OutcomeTuple, combine, combine_with_all_errors};
pub use error::{UnwrapError, UnwrapErrorKind};
pub use fault::{Fault, from_throwable, from_throwable_with};

use std::fmt;

#[cfg(feature = "async")]
use std::future::Future;

use error::raise;

#[cfg(feature = "async")]
use crate::async_outcome::{AsyncOutcome, IntoAsyncOutcome, err_async};

/// A value that is either a success or a failure.
///
/// `Outcome<T, E>` is a closed sum type: exactly one of `Success(T)` or
/// `Failure(E)` is active. Every combinator consumes the outcome and returns
/// a new one; nothing is mutated in place.
///
/// # Type Parameters
///
/// * `T` - The success payload.
/// * `E` - The failure payload.
///
/// # Examples
///
/// ```rust
/// use okerr::outcome::Outcome;
///
/// let success: Outcome<i32, String> = Outcome::Success(1);
/// let failure: Outcome<i32, String> = Outcome::Failure("nope".to_string());
///
/// assert_eq!(success.map(|n| n + 1), Outcome::Success(2));
/// assert_eq!(failure.map(|n| n + 1), Outcome::Failure("nope".to_string()));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[must_use = "this `Outcome` may be a `Failure`, which should be handled"]
pub enum Outcome<T, E> {
    /// The success variant, holding the success payload.
    Success(T),
    /// The failure variant, holding the failure payload.
    Failure(E),
}

/// Wraps a value in `Outcome::Success`.
///
/// # Examples
///
/// ```rust
/// use okerr::outcome::{Outcome, ok};
///
/// let value: Outcome<i32, String> = ok(42);
/// assert_eq!(value, Outcome::Success(42));
/// ```
#[inline]
pub const fn ok<T, E>(value: T) -> Outcome<T, E> {
    Outcome::Success(value)
}

/// Wraps an error in `Outcome::Failure`.
///
/// # Examples
///
/// ```rust
/// use okerr::outcome::{Outcome, err};
///
/// let value: Outcome<i32, &str> = err("boom");
/// assert_eq!(value, Outcome::Failure("boom"));
/// ```
#[inline]
pub const fn err<T, E>(error: E) -> Outcome<T, E> {
    Outcome::Failure(error)
}

impl<T, E> Outcome<T, E> {
    // =========================================================================
    // Variant Checking
    // =========================================================================

    /// Returns `true` if this is a `Success`.
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns `true` if this is a `Failure`.
    #[inline]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    // =========================================================================
    // Value Extraction
    // =========================================================================

    /// Converts into an `Option<T>`, discarding any failure.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use okerr::outcome::{Outcome, err, ok};
    ///
    /// assert_eq!(ok::<i32, ()>(1).success(), Some(1));
    /// assert_eq!(err::<i32, ()>(()).success(), None);
    /// ```
    #[inline]
    pub fn success(self) -> Option<T> {
        match self {
            Self::Success(value) => Some(value),
            Self::Failure(_) => None,
        }
    }

    /// Converts into an `Option<E>`, discarding any success.
    #[inline]
    pub fn failure(self) -> Option<E> {
        match self {
            Self::Success(_) => None,
            Self::Failure(error) => Some(error),
        }
    }

    /// Borrows both payloads, producing an `Outcome<&T, &E>`.
    #[inline]
    pub const fn as_ref(&self) -> Outcome<&T, &E> {
        match self {
            Self::Success(value) => Outcome::Success(value),
            Self::Failure(error) => Outcome::Failure(error),
        }
    }

    // =========================================================================
    // Transformation
    // =========================================================================

    /// Transforms the success payload, leaving a failure untouched.
    ///
    /// `function` is never invoked on a `Failure`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use okerr::outcome::{Outcome, err, ok};
    ///
    /// assert_eq!(ok::<i32, &str>(20).map(|n| n + 1), ok(21));
    /// assert_eq!(err::<i32, &str>("x").map(|n| n + 1), err("x"));
    /// ```
    #[inline]
    pub fn map<U, F>(self, function: F) -> Outcome<U, E>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Success(value) => Outcome::Success(function(value)),
            Self::Failure(error) => Outcome::Failure(error),
        }
    }

    /// Transforms the failure payload, leaving a success untouched.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use okerr::outcome::{err, ok, Outcome};
    ///
    /// let failure: Outcome<i32, &str> = err("bad");
    /// assert_eq!(failure.map_err(str::len), err(3));
    ///
    /// let success: Outcome<i32, &str> = ok(1);
    /// assert_eq!(success.map_err(str::len), ok(1));
    /// ```
    #[inline]
    pub fn map_err<E2, F>(self, function: F) -> Outcome<T, E2>
    where
        F: FnOnce(E) -> E2,
    {
        match self {
            Self::Success(value) => Outcome::Success(value),
            Self::Failure(error) => Outcome::Failure(function(error)),
        }
    }

    /// Chains a computation that may itself fail.
    ///
    /// On `Success(v)` this returns `function(v)` directly; on `Failure(e)` it
    /// returns `Failure(e)` without invoking `function`. A chain of `and_then`
    /// calls therefore stops at the first failure and carries it unchanged to
    /// the end.
    ///
    /// The error type stays fixed along the chain. Widen it with
    /// `map_err(Into::into)` where two error types meet.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use okerr::outcome::{Outcome, err, ok};
    ///
    /// fn half(n: i32) -> Outcome<i32, String> {
    ///     if n % 2 == 0 { ok(n / 2) } else { err(format!("{n} is odd")) }
    /// }
    ///
    /// assert_eq!(ok(20).and_then(half).and_then(half), ok(5));
    /// assert_eq!(ok(20).and_then(half).and_then(half).and_then(half), err("5 is odd".to_string()));
    /// ```
    #[inline]
    pub fn and_then<U, F>(self, function: F) -> Outcome<U, E>
    where
        F: FnOnce(T) -> Outcome<U, E>,
    {
        match self {
            Self::Success(value) => function(value),
            Self::Failure(error) => Outcome::Failure(error),
        }
    }

    /// Recovers from a failure.
    ///
    /// On `Failure(e)` this returns `function(e)`, which may recover into a
    /// success or produce a failure of a new type. A success passes through
    /// and `function` is not invoked.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use okerr::outcome::{Outcome, err, ok};
    ///
    /// let recovered: Outcome<i32, String> = err::<i32, i32>(404).or_else(|code| {
    ///     if code == 404 { ok(0) } else { err(format!("status {code}")) }
    /// });
    /// assert_eq!(recovered, ok(0));
    /// ```
    #[inline]
    pub fn or_else<E2, F>(self, function: F) -> Outcome<T, E2>
    where
        F: FnOnce(E) -> Outcome<T, E2>,
    {
        match self {
            Self::Success(value) => Outcome::Success(value),
            Self::Failure(error) => function(error),
        }
    }

    // =========================================================================
    // Terminal Operations
    // =========================================================================

    /// Consumes the outcome by invoking exactly one of the two callbacks.
    ///
    /// The callback's return value is returned as is, without wrapping.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use okerr::outcome::{Outcome, ok};
    ///
    /// let value: Outcome<i32, String> = ok(3);
    /// let message = value.fold(|n| format!("got {n}"), |error| format!("failed: {error}"));
    /// assert_eq!(message, "got 3");
    /// ```
    #[doc(alias = "match")]
    #[inline]
    pub fn fold<A, S, F>(self, on_success: S, on_failure: F) -> A
    where
        S: FnOnce(T) -> A,
        F: FnOnce(E) -> A,
    {
        match self {
            Self::Success(value) => on_success(value),
            Self::Failure(error) => on_failure(error),
        }
    }

    /// Returns the success payload, or `default` on failure.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use okerr::outcome::{err, ok};
    ///
    /// assert_eq!(ok::<i32, &str>(7).unwrap_or(0), 7);
    /// assert_eq!(err::<i32, &str>("x").unwrap_or(0), 0);
    /// ```
    #[inline]
    pub fn unwrap_or(self, default: T) -> T {
        match self {
            Self::Success(value) => value,
            Self::Failure(_) => default,
        }
    }

    /// Returns the success payload, or computes one from the failure.
    #[inline]
    pub fn unwrap_or_else<F>(self, function: F) -> T
    where
        F: FnOnce(E) -> T,
    {
        match self {
            Self::Success(value) => value,
            Self::Failure(error) => function(error),
        }
    }

    /// Converts into a standard library `Result`.
    #[inline]
    pub fn into_result(self) -> Result<T, E> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Failure(error) => Err(error),
        }
    }
}

// =============================================================================
// Unchecked Unwrapping
// =============================================================================

impl<T, E: fmt::Debug> Outcome<T, E> {
    /// Returns the success payload.
    ///
    /// Meant for tests and top-level boundaries, not for chained logic.
    ///
    /// # Panics
    ///
    /// Panics with an [`UnwrapError`] diagnostic if this is a `Failure`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use okerr::outcome::ok;
    ///
    /// assert_eq!(ok::<i32, ()>(5).unwrap_success(), 5);
    /// ```
    #[track_caller]
    pub fn unwrap_success(self) -> T {
        match self {
            Self::Success(value) => value,
            Self::Failure(error) => {
                raise(UnwrapError::new(UnwrapErrorKind::ExpectedSuccess, &error, None))
            }
        }
    }

    /// Returns the success payload, labelling the diagnostic with `context`.
    ///
    /// # Panics
    ///
    /// Panics with an [`UnwrapError`] diagnostic that includes `context` if
    /// this is a `Failure`.
    #[track_caller]
    pub fn expect_success(self, context: &str) -> T {
        match self {
            Self::Success(value) => value,
            Self::Failure(error) => raise(UnwrapError::new(
                UnwrapErrorKind::ExpectedSuccess,
                &error,
                Some(context),
            )),
        }
    }
}

impl<T: fmt::Debug, E> Outcome<T, E> {
    /// Returns the failure payload.
    ///
    /// # Panics
    ///
    /// Panics with an [`UnwrapError`] diagnostic if this is a `Success`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use okerr::outcome::err;
    ///
    /// assert_eq!(err::<i32, &str>("bad").unwrap_failure(), "bad");
    /// ```
    #[track_caller]
    pub fn unwrap_failure(self) -> E {
        match self {
            Self::Success(value) => {
                raise(UnwrapError::new(UnwrapErrorKind::ExpectedFailure, &value, None))
            }
            Self::Failure(error) => error,
        }
    }

    /// Returns the failure payload, labelling the diagnostic with `context`.
    ///
    /// # Panics
    ///
    /// Panics with an [`UnwrapError`] diagnostic that includes `context` if
    /// this is a `Success`.
    #[track_caller]
    pub fn expect_failure(self, context: &str) -> E {
        match self {
            Self::Success(value) => raise(UnwrapError::new(
                UnwrapErrorKind::ExpectedFailure,
                &value,
                Some(context),
            )),
            Self::Failure(error) => error,
        }
    }
}

// =============================================================================
// Bridges to AsyncOutcome
// =============================================================================

#[cfg(feature = "async")]
impl<T, E: Send + 'static> Outcome<T, E> {
    /// Chains an asynchronous computation onto this outcome.
    ///
    /// On `Success(v)` this returns `function(v)` as an [`AsyncOutcome`]; on
    /// `Failure(e)` it returns an already-settled failure without invoking
    /// `function`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use okerr::async_outcome::ok_async;
    /// use okerr::outcome::{Outcome, ok};
    ///
    /// let chained = ok::<i32, String>(1).async_and_then(|n| ok_async(n + 1));
    /// assert_eq!(futures::executor::block_on(chained), Outcome::Success(2));
    /// ```
    pub fn async_and_then<U, R, F>(self, function: F) -> AsyncOutcome<U, E>
    where
        F: FnOnce(T) -> R,
        R: IntoAsyncOutcome<U, E>,
        U: Send + 'static,
    {
        match self {
            Self::Success(value) => function(value).into_async_outcome(),
            Self::Failure(error) => err_async(error),
        }
    }

    /// Maps the success payload through an asynchronous function.
    ///
    /// The future returned by `function` is assumed not to panic; see
    /// [`AsyncOutcome::from_safe_future`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use okerr::outcome::{Outcome, ok};
    ///
    /// let mapped = ok::<i32, String>(20).async_map(|n| async move { n + 22 });
    /// assert_eq!(futures::executor::block_on(mapped), Outcome::Success(42));
    /// ```
    pub fn async_map<U, F, Fut>(self, function: F) -> AsyncOutcome<U, E>
    where
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = U> + Send + 'static,
        U: Send + 'static,
    {
        match self {
            Self::Success(value) => AsyncOutcome::from_safe_future(function(value)),
            Self::Failure(error) => err_async(error),
        }
    }
}

// =============================================================================
// Display Implementation
// =============================================================================

impl<T: fmt::Display, E: fmt::Display> fmt::Display for Outcome<T, E> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success(value) => write!(formatter, "Success({value})"),
            Self::Failure(error) => write!(formatter, "Failure({error})"),
        }
    }
}

// =============================================================================
// From Implementations
// =============================================================================

impl<T, E> From<Result<T, E>> for Outcome<T, E> {
    /// Converts a `Result`: `Ok(v)` becomes `Success(v)` and `Err(e)` becomes
    /// `Failure(e)`.
    #[inline]
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::Success(value),
            Err(error) => Self::Failure(error),
        }
    }
}

impl<T, E> From<Outcome<T, E>> for Result<T, E> {
    #[inline]
    fn from(outcome: Outcome<T, E>) -> Self {
        outcome.into_result()
    }
}

static_assertions::assert_impl_all!(Outcome<i32, String>: Send, Sync, Clone);
