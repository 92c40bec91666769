//! # okerr
//!
//! Typed success/failure values for Rust, with a matching asynchronous form.
//!
//! ## Overview
//!
//! An operation that can fail returns an [`Outcome`] instead of panicking.
//! The same combinator algebra is available on pending computations through
//! `AsyncOutcome`, and many outcomes can be aggregated into one:
//!
//! - **Outcome**: `Outcome<T, E>` with `map`, `map_err`, `and_then`,
//!   `or_else`, `fold` and the unwrapping family
//! - **Fault capture**: turn a panicking function into one returning
//!   `Outcome` with [`from_throwable`]
//! - **Async Outcome**: `AsyncOutcome<T, E>`, an awaitable wrapper whose
//!   callbacks may return plain, `Result` or pending outcomes
//! - **Aggregation**: fail-fast [`combine`] and error-collecting
//!   [`combine_with_all_errors`], each with a concurrent form
//!
//! ## Feature Flags
//!
//! - `async` (default): `AsyncOutcome`, concurrent aggregation and the async
//!   bridges on `Outcome`
//! - `serde`: `Serialize`/`Deserialize` for `Outcome`
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use okerr::prelude::*;
//!
//! fn parse_port(input: &str) -> Outcome<u16, String> {
//!     input.parse::<u16>().map_err(|error| error.to_string()).into()
//! }
//!
//! let ports = combine(["80", "443"].map(parse_port));
//! assert_eq!(ports, ok(vec![80, 443]));
//!
//! let problems = combine_with_all_errors(["80", "x", "70000"].map(parse_port));
//! assert_eq!(problems.failure().map(|errors| errors.len()), Some(2));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports every public type, trait and constructor.
///
/// # Usage
///
/// ```rust
/// use okerr::prelude::*;
/// ```
pub mod prelude {
    pub use crate::outcome::*;

    #[cfg(feature = "async")]
    pub use crate::async_outcome::*;
}

pub mod outcome;

#[cfg(feature = "async")]
pub mod async_outcome;

pub use outcome::{Outcome, combine, combine_with_all_errors, err, from_throwable, ok};

#[cfg(feature = "async")]
pub use async_outcome::{AsyncOutcome, combine_async, combine_async_with_all_errors, err_async, ok_async};
