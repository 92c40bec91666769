//! Absorbing panics into the `Outcome` model.
//!
//! A panic is the Rust counterpart of a raised fault. [`from_throwable`] and
//! [`from_throwable_with`] wrap a function so that a normal return becomes a
//! `Success` and a panic becomes a `Failure`, carrying the caught [`Fault`]
//! either unmodified or converted by a caller-supplied function.
//!
//! Panics can only be caught when the binary unwinds. Under
//! `panic = "abort"` the process terminates before any conversion happens.
//!
//! # Examples
//!
//! ```rust
//! use okerr::outcome::{Outcome, from_throwable_with};
//!
//! let divide = from_throwable_with(
//!     |(numerator, denominator): (i32, i32)| numerator / denominator,
//!     |fault| fault.message().unwrap_or("unknown panic").to_string(),
//! );
//!
//! assert_eq!(divide((10, 2)), Outcome::Success(5));
//! assert!(divide((1, 0)).failure().is_some_and(|message| message.contains("divide by zero")));
//! ```

use std::any::Any;
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};

use super::Outcome;

/// The payload of a caught panic.
///
/// Panic payloads are usually a `&'static str` or a `String`; [`Fault::message`]
/// recovers either. Any other payload type is kept opaque and can be recovered
/// with [`Fault::into_payload`] or re-raised with [`Fault::resume`].
pub struct Fault {
    payload: Box<dyn Any + Send>,
}

impl Fault {
    /// Wraps a raw panic payload.
    pub fn new(payload: Box<dyn Any + Send>) -> Self {
        Self { payload }
    }

    /// Returns the panic message if the payload is a string.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use okerr::outcome::Fault;
    ///
    /// let fault = Fault::new(Box::new("boom"));
    /// assert_eq!(fault.message(), Some("boom"));
    ///
    /// let opaque = Fault::new(Box::new(42_u8));
    /// assert_eq!(opaque.message(), None);
    /// ```
    pub fn message(&self) -> Option<&str> {
        self.payload
            .downcast_ref::<&str>()
            .copied()
            .or_else(|| self.payload.downcast_ref::<String>().map(String::as_str))
    }

    /// Returns the raw panic payload.
    pub fn into_payload(self) -> Box<dyn Any + Send> {
        self.payload
    }

    /// Re-raises the original panic.
    pub fn resume(self) -> ! {
        std::panic::resume_unwind(self.payload)
    }
}

impl From<Box<dyn Any + Send>> for Fault {
    fn from(payload: Box<dyn Any + Send>) -> Self {
        Self::new(payload)
    }
}

impl fmt::Debug for Fault {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.message() {
            Some(message) => formatter.debug_tuple("Fault").field(&message).finish(),
            None => formatter.write_str("Fault(<opaque>)"),
        }
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.message().unwrap_or("unknown panic"))
    }
}

impl std::error::Error for Fault {}

static_assertions::assert_impl_all!(Fault: Send);
static_assertions::assert_not_impl_any!(Fault: Sync);

/// Wraps `function` so that a panic becomes a `Failure` holding the [`Fault`].
///
/// The returned function takes the same argument as `function`. Use a tuple
/// for several arguments and `()` for none.
///
/// # Examples
///
/// ```rust
/// use okerr::outcome::from_throwable;
///
/// let parse = from_throwable(|input: &str| input.parse::<u8>().unwrap());
///
/// assert_eq!(parse("7").success(), Some(7));
/// assert!(parse("seven").is_failure());
/// ```
pub fn from_throwable<A, T, F>(function: F) -> impl Fn(A) -> Outcome<T, Fault>
where
    F: Fn(A) -> T,
{
    from_throwable_with(function, std::convert::identity)
}

/// Wraps `function` so that a panic becomes a `Failure` built by
/// `error_function`.
///
/// A normal return is wrapped in `Success` unchanged.
pub fn from_throwable_with<A, T, E, F, G>(function: F, error_function: G) -> impl Fn(A) -> Outcome<T, E>
where
    F: Fn(A) -> T,
    G: Fn(Fault) -> E,
{
    move |argument| match catch_unwind(AssertUnwindSafe(|| function(argument))) {
        Ok(value) => Outcome::Success(value),
        Err(payload) => {
            let fault = Fault::new(payload);
            tracing::debug!(%fault, "captured panic as failure");
            Outcome::Failure(error_function(fault))
        }
    }
}
