//! `AsyncOutcome` - a pending computation that settles to an [`Outcome`].
//!
//! `AsyncOutcome<T, E>` owns exactly one future producing `Outcome<T, E>` and
//! offers the same combinator surface as [`Outcome`], adapted so that every
//! step may itself be asynchronous. It implements `Future` directly via
//! `pin_project_lite`, so it can be awaited without unwrapping first:
//!
//! ```rust
//! use okerr::async_outcome::ok_async;
//! use okerr::outcome::Outcome;
//!
//! let settled = futures::executor::block_on(ok_async::<i32, String>(42));
//! assert_eq!(settled, Outcome::Success(42));
//! ```
//!
//! # Evaluation Semantics
//!
//! Futures are lazy: the wrapped computation starts the first time the
//! `AsyncOutcome` (or an aggregate holding it) is polled. Chaining
//! combinators never starts it and never runs it twice.
//!
//! An `AsyncOutcome` built from an already-known outcome (`ok_async`,
//! `err_async`, `From<Outcome>`) is *settled*. Combinators applied to a
//! settled value run their callback immediately and return another settled
//! value without boxing. Callbacks should therefore be free of side effects
//! that must wait for the await point; use [`AsyncOutcome::new`] for those.
//!
//! # Faults
//!
//! A panic inside the wrapped future or inside a callback is never turned
//! into a `Failure`. It propagates out of `poll` like any other panic, unless
//! the computation was built with [`AsyncOutcome::from_unwinding`].
//!
//! # Examples
//!
//! ```rust
//! use okerr::async_outcome::{AsyncOutcome, from_future};
//! use okerr::outcome::{Outcome, err, ok};
//!
//! async fn fetch(id: u32) -> Result<String, std::io::Error> {
//!     if id == 0 {
//!         Err(std::io::Error::other("not found"))
//!     } else {
//!         Ok(format!("user-{id}"))
//!     }
//! }
//!
//! let name = from_future(fetch(7), |error| error.to_string())
//!     .map(|name| name.to_uppercase())
//!     .and_then(|name| if name.is_empty() { err("empty".to_string()) } else { ok(name) });
//! assert_eq!(futures::executor::block_on(name), Outcome::Success("USER-7".to_string()));
//!
//! let missing: AsyncOutcome<String, String> = from_future(fetch(0), |error| error.to_string());
//! let fallback = futures::executor::block_on(missing.unwrap_or("anonymous".to_string()));
//! assert_eq!(fallback, "anonymous");
//! ```

mod combine;

pub use combine::{AsyncOutcomeTuple, combine_async, combine_async_with_all_errors};

use std::fmt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::future::{BoxFuture, FutureExt, Shared};
use pin_project_lite::pin_project;

use crate::outcome::{Fault, Outcome};

// =============================================================================
// AsyncOutcome Struct Definition
// =============================================================================

pin_project! {
    /// A pending computation that settles to an `Outcome<T, E>`.
    ///
    /// Awaiting an `AsyncOutcome<T, E>` yields the `Outcome<T, E>`.
    ///
    /// # Type Parameters
    ///
    /// - `T`: The success payload.
    /// - `E`: The failure payload.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use okerr::async_outcome::{AsyncOutcome, ok_async};
    /// use okerr::outcome::{Outcome, ok};
    ///
    /// let chained: AsyncOutcome<i32, String> = ok_async(10)
    ///     .map(|n| n * 2)
    ///     .and_then(|n| ok(n + 1));
    /// assert_eq!(futures::executor::block_on(chained), Outcome::Success(21));
    /// ```
    #[must_use = "futures do nothing unless you `.await` or poll them"]
    pub struct AsyncOutcome<T, E> {
        #[pin]
        state: AsyncOutcomeState<T, E>,
    }
}

pin_project! {
    /// Internal state machine for `AsyncOutcome`.
    ///
    /// - `Settled` -> `Consumed` (on first poll)
    /// - `Pending` -> `Consumed` (when the inner future completes)
    #[project = AsyncOutcomeStateProj]
    enum AsyncOutcomeState<T, E> {
        /// An outcome that is already known.
        Settled {
            outcome: Option<Outcome<T, E>>,
        },
        /// A computation that has not settled yet.
        Pending {
            #[pin]
            future: BoxFuture<'static, Outcome<T, E>>,
        },
        /// The outcome has been handed out.
        Consumed,
    }
}

// =============================================================================
// Future Implementation
// =============================================================================

impl<T, E> Future for AsyncOutcome<T, E> {
    type Output = Outcome<T, E>;

    fn poll(self: Pin<&mut Self>, context: &mut Context<'_>) -> Poll<Self::Output> {
        let mut this = self.project();

        match this.state.as_mut().project() {
            AsyncOutcomeStateProj::Settled { outcome } => {
                let Some(outcome) = outcome.take() else {
                    panic!("AsyncOutcome polled after its outcome was taken");
                };
                this.state.set(AsyncOutcomeState::Consumed);
                Poll::Ready(outcome)
            }
            AsyncOutcomeStateProj::Pending { future } => match future.poll(context) {
                Poll::Ready(outcome) => {
                    this.state.set(AsyncOutcomeState::Consumed);
                    Poll::Ready(outcome)
                }
                Poll::Pending => Poll::Pending,
            },
            AsyncOutcomeStateProj::Consumed => {
                panic!(
                    "AsyncOutcome polled after completion. \
                     Futures should not be polled after returning Poll::Ready."
                );
            }
        }
    }
}

// =============================================================================
// Constructors
// =============================================================================

impl<T, E> AsyncOutcome<T, E> {
    const fn settled(outcome: Outcome<T, E>) -> Self {
        Self {
            state: AsyncOutcomeState::Settled {
                outcome: Some(outcome),
            },
        }
    }

    /// Splits off the settled outcome, if there is one.
    fn into_settled(self) -> Result<Outcome<T, E>, Self> {
        match self {
            Self {
                state: AsyncOutcomeState::Settled {
                    outcome: Some(outcome),
                },
            } => Ok(outcome),
            other => Err(other),
        }
    }
}

impl<T: Send + 'static, E: Send + 'static> AsyncOutcome<T, E> {
    /// Wraps a future that already produces an `Outcome`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use okerr::async_outcome::AsyncOutcome;
    /// use okerr::outcome::{Outcome, ok};
    ///
    /// let pending = AsyncOutcome::new(async { ok::<i32, String>(1) });
    /// assert_eq!(futures::executor::block_on(pending), Outcome::Success(1));
    /// ```
    pub fn new<Fut>(future: Fut) -> Self
    where
        Fut: Future<Output = Outcome<T, E>> + Send + 'static,
    {
        Self {
            state: AsyncOutcomeState::Pending {
                future: future.boxed(),
            },
        }
    }

    /// Lifts a future that is not expected to fail into a success.
    ///
    /// A panic inside `future` is not converted: it propagates to whoever
    /// polls the returned `AsyncOutcome`.
    pub fn from_safe_future<Fut>(future: Fut) -> Self
    where
        Fut: Future<Output = T> + Send + 'static,
    {
        Self::new(future.map(Outcome::Success))
    }

    /// Lifts a fallible future, converting its error with `error_function`.
    ///
    /// `Ok(v)` settles to `Success(v)` and `Err(x)` to
    /// `Failure(error_function(x))`. Panics stay unmanaged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use okerr::async_outcome::AsyncOutcome;
    /// use okerr::outcome::Outcome;
    ///
    /// let rejected = AsyncOutcome::from_future(async { Err::<i32, _>(404) }, |status| format!("status {status}"));
    /// assert_eq!(
    ///     futures::executor::block_on(rejected),
    ///     Outcome::Failure("status 404".to_string())
    /// );
    /// ```
    pub fn from_future<Fut, X, F>(future: Fut, error_function: F) -> Self
    where
        Fut: Future<Output = Result<T, X>> + Send + 'static,
        F: FnOnce(X) -> E + Send + 'static,
    {
        Self::new(async move {
            match future.await {
                Ok(value) => Outcome::Success(value),
                Err(rejection) => {
                    tracing::trace!("pending computation returned an error; converting to failure");
                    Outcome::Failure(error_function(rejection))
                }
            }
        })
    }

    /// Lifts a future, converting a panic raised while polling it into a
    /// failure built by `error_function`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use okerr::async_outcome::AsyncOutcome;
    /// use okerr::outcome::Outcome;
    ///
    /// let guarded = AsyncOutcome::from_unwinding(
    ///     async { if true { panic!("lost connection") } else { 1 } },
    ///     |fault| fault.to_string(),
    /// );
    /// assert_eq!(
    ///     futures::executor::block_on(guarded),
    ///     Outcome::Failure("lost connection".to_string())
    /// );
    /// ```
    pub fn from_unwinding<Fut, F>(future: Fut, error_function: F) -> Self
    where
        Fut: Future<Output = T> + Send + 'static,
        F: FnOnce(Fault) -> E + Send + 'static,
    {
        Self::new(async move {
            match AssertUnwindSafe(future).catch_unwind().await {
                Ok(value) => Outcome::Success(value),
                Err(payload) => {
                    let fault = Fault::new(payload);
                    tracing::debug!(%fault, "captured panic in pending computation as failure");
                    Outcome::Failure(error_function(fault))
                }
            }
        })
    }
}

/// Creates an `AsyncOutcome` that is already settled to `Success(value)`.
pub const fn ok_async<T, E>(value: T) -> AsyncOutcome<T, E> {
    AsyncOutcome::settled(Outcome::Success(value))
}

/// Creates an `AsyncOutcome` that is already settled to `Failure(error)`.
pub const fn err_async<T, E>(error: E) -> AsyncOutcome<T, E> {
    AsyncOutcome::settled(Outcome::Failure(error))
}

/// Lifts a fallible future. See [`AsyncOutcome::from_future`].
pub fn from_future<T, E, X, Fut, F>(future: Fut, error_function: F) -> AsyncOutcome<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
    Fut: Future<Output = Result<T, X>> + Send + 'static,
    F: FnOnce(X) -> E + Send + 'static,
{
    AsyncOutcome::from_future(future, error_function)
}

/// Lifts a future that is not expected to fail. See
/// [`AsyncOutcome::from_safe_future`].
pub fn from_safe_future<T, E, Fut>(future: Fut) -> AsyncOutcome<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
    Fut: Future<Output = T> + Send + 'static,
{
    AsyncOutcome::from_safe_future(future)
}

impl<T, E> From<Outcome<T, E>> for AsyncOutcome<T, E> {
    fn from(outcome: Outcome<T, E>) -> Self {
        Self::settled(outcome)
    }
}

// =============================================================================
// Normalization of Callback Results
// =============================================================================

/// Anything a chaining callback may return.
///
/// `and_then` and `or_else` accept callbacks returning a plain [`Outcome`],
/// a standard `Result` or another `AsyncOutcome`. Each is normalized to an
/// `AsyncOutcome` and awaited in place, so chains never nest.
pub trait IntoAsyncOutcome<T, E> {
    /// Converts into an `AsyncOutcome`.
    fn into_async_outcome(self) -> AsyncOutcome<T, E>;
}

impl<T, E> IntoAsyncOutcome<T, E> for AsyncOutcome<T, E> {
    fn into_async_outcome(self) -> Self {
        self
    }
}

impl<T, E> IntoAsyncOutcome<T, E> for Outcome<T, E> {
    fn into_async_outcome(self) -> AsyncOutcome<T, E> {
        AsyncOutcome::settled(self)
    }
}

impl<T, E> IntoAsyncOutcome<T, E> for Result<T, E> {
    fn into_async_outcome(self) -> AsyncOutcome<T, E> {
        AsyncOutcome::settled(self.into())
    }
}

// =============================================================================
// Combinators
// =============================================================================

impl<T: Send + 'static, E: Send + 'static> AsyncOutcome<T, E> {
    /// Transforms the success payload once the computation settles.
    pub fn map<U, F>(self, function: F) -> AsyncOutcome<U, E>
    where
        F: FnOnce(T) -> U + Send + 'static,
        U: Send + 'static,
    {
        match self.into_settled() {
            Ok(outcome) => AsyncOutcome::settled(outcome.map(function)),
            Err(pending) => AsyncOutcome::new(async move { pending.await.map(function) }),
        }
    }

    /// Transforms the success payload with an asynchronous function.
    ///
    /// The returned `AsyncOutcome` settles only after the future produced by
    /// `function` has completed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use okerr::async_outcome::ok_async;
    /// use okerr::outcome::Outcome;
    ///
    /// let mapped = ok_async::<i32, String>(4).map_async(|n| async move { n * n });
    /// assert_eq!(futures::executor::block_on(mapped), Outcome::Success(16));
    /// ```
    pub fn map_async<U, F, Fut>(self, function: F) -> AsyncOutcome<U, E>
    where
        F: FnOnce(T) -> Fut + Send + 'static,
        Fut: Future<Output = U> + Send + 'static,
        U: Send + 'static,
    {
        AsyncOutcome::new(async move {
            match self.await {
                Outcome::Success(value) => Outcome::Success(function(value).await),
                Outcome::Failure(error) => Outcome::Failure(error),
            }
        })
    }

    /// Transforms the failure payload once the computation settles.
    pub fn map_err<E2, F>(self, function: F) -> AsyncOutcome<T, E2>
    where
        F: FnOnce(E) -> E2 + Send + 'static,
        E2: Send + 'static,
    {
        match self.into_settled() {
            Ok(outcome) => AsyncOutcome::settled(outcome.map_err(function)),
            Err(pending) => AsyncOutcome::new(async move { pending.await.map_err(function) }),
        }
    }

    /// Transforms the failure payload with an asynchronous function.
    pub fn map_err_async<E2, F, Fut>(self, function: F) -> AsyncOutcome<T, E2>
    where
        F: FnOnce(E) -> Fut + Send + 'static,
        Fut: Future<Output = E2> + Send + 'static,
        E2: Send + 'static,
    {
        AsyncOutcome::new(async move {
            match self.await {
                Outcome::Success(value) => Outcome::Success(value),
                Outcome::Failure(error) => Outcome::Failure(function(error).await),
            }
        })
    }

    /// Chains a computation that may fail, synchronously or not.
    ///
    /// `function` may return an [`Outcome`], a `Result` or an
    /// `AsyncOutcome`; an asynchronous result is adopted directly instead of
    /// being nested. On failure, `function` is not invoked.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use okerr::async_outcome::{AsyncOutcome, ok_async};
    /// use okerr::outcome::{Outcome, ok};
    ///
    /// let chained: AsyncOutcome<i32, String> = ok_async(1)
    ///     .and_then(|n| ok(n + 1))
    ///     .and_then(|n| ok_async(n * 10));
    /// assert_eq!(futures::executor::block_on(chained), Outcome::Success(20));
    /// ```
    pub fn and_then<U, R, F>(self, function: F) -> AsyncOutcome<U, E>
    where
        F: FnOnce(T) -> R + Send + 'static,
        R: IntoAsyncOutcome<U, E>,
        U: Send + 'static,
    {
        match self.into_settled() {
            Ok(Outcome::Success(value)) => function(value).into_async_outcome(),
            Ok(Outcome::Failure(error)) => AsyncOutcome::settled(Outcome::Failure(error)),
            Err(pending) => AsyncOutcome::new(async move {
                match pending.await {
                    Outcome::Success(value) => {
                        let next = function(value).into_async_outcome();
                        next.await
                    }
                    Outcome::Failure(error) => Outcome::Failure(error),
                }
            }),
        }
    }

    /// Recovers from a failure, synchronously or not.
    ///
    /// On success, `function` is not invoked and the payload passes through.
    pub fn or_else<E2, R, F>(self, function: F) -> AsyncOutcome<T, E2>
    where
        F: FnOnce(E) -> R + Send + 'static,
        R: IntoAsyncOutcome<T, E2>,
        E2: Send + 'static,
    {
        match self.into_settled() {
            Ok(Outcome::Success(value)) => AsyncOutcome::settled(Outcome::Success(value)),
            Ok(Outcome::Failure(error)) => function(error).into_async_outcome(),
            Err(pending) => AsyncOutcome::new(async move {
                match pending.await {
                    Outcome::Success(value) => Outcome::Success(value),
                    Outcome::Failure(error) => {
                        let recovery = function(error).into_async_outcome();
                        recovery.await
                    }
                }
            }),
        }
    }

    // =========================================================================
    // Terminal Operations
    // =========================================================================

    /// Waits for the outcome, then invokes exactly one of the callbacks.
    #[doc(alias = "match")]
    pub async fn fold<A, S, F>(self, on_success: S, on_failure: F) -> A
    where
        S: FnOnce(T) -> A,
        F: FnOnce(E) -> A,
    {
        self.await.fold(on_success, on_failure)
    }

    /// Waits for the outcome and returns the success payload or `default`.
    pub async fn unwrap_or(self, default: T) -> T {
        self.await.unwrap_or(default)
    }

    /// Waits for the outcome and converts it into a standard `Result`.
    pub async fn into_result(self) -> Result<T, E> {
        self.await.into_result()
    }

    /// Turns this computation into one that several consumers can await.
    ///
    /// Each clone of the returned future observes the same outcome; the
    /// underlying computation still runs once. Wrap a clone with
    /// [`AsyncOutcome::new`] to keep chaining.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use okerr::async_outcome::{AsyncOutcome, ok_async};
    /// use okerr::outcome::Outcome;
    ///
    /// let shared = ok_async::<i32, String>(3).shared();
    /// let doubled = AsyncOutcome::new(shared.clone()).map(|n| n * 2);
    ///
    /// assert_eq!(futures::executor::block_on(doubled), Outcome::Success(6));
    /// assert_eq!(futures::executor::block_on(shared), Outcome::Success(3));
    /// ```
    pub fn shared(self) -> Shared<Self>
    where
        T: Clone,
        E: Clone,
    {
        FutureExt::shared(self)
    }
}

impl<T, E> fmt::Debug for AsyncOutcome<T, E> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match &self.state {
            AsyncOutcomeState::Settled { outcome: Some(_) } => "<settled>",
            AsyncOutcomeState::Pending { .. } => "<pending>",
            AsyncOutcomeState::Settled { outcome: None } | AsyncOutcomeState::Consumed => "<consumed>",
        };
        write!(formatter, "AsyncOutcome({state})")
    }
}

static_assertions::assert_impl_all!(AsyncOutcome<i32, String>: Send);
static_assertions::assert_not_impl_any!(AsyncOutcome<i32, String>: Sync);
