//! Concurrent aggregation of pending outcomes.
//!
//! Every element is driven concurrently on the polling task; once all of
//! them have settled, the matching synchronous reducer from
//! [`crate::outcome`] folds the settled outcomes in their original order.
//! The order in which the elements complete does not matter.
//!
//! A panic in any element propagates out of the aggregate and bypasses both
//! policies.

use futures::future::join_all;

use super::AsyncOutcome;
use crate::outcome::{OutcomeTuple, combine, combine_with_all_errors};

/// Awaits every element concurrently, then applies fail-fast aggregation.
///
/// All elements run to completion even when an early one fails; only the
/// folding step short-circuits.
///
/// # Examples
///
/// ```rust
/// use okerr::async_outcome::{combine_async, err_async, ok_async};
/// use okerr::outcome::Outcome;
///
/// let combined = combine_async(vec![ok_async(1), err_async("x"), ok_async(3)]);
/// assert_eq!(futures::executor::block_on(combined), Outcome::Failure("x"));
/// ```
pub fn combine_async<T, E, I>(outcomes: I) -> AsyncOutcome<Vec<T>, E>
where
    I: IntoIterator<Item = AsyncOutcome<T, E>>,
    T: Send + 'static,
    E: Send + 'static,
{
    let pending: Vec<AsyncOutcome<T, E>> = outcomes.into_iter().collect();
    AsyncOutcome::new(async move {
        tracing::trace!(count = pending.len(), "awaiting outcomes concurrently");
        combine(join_all(pending).await)
    })
}

/// Awaits every element concurrently, then collects every failure.
///
/// # Examples
///
/// ```rust
/// use okerr::async_outcome::{combine_async_with_all_errors, err_async, ok_async};
/// use okerr::outcome::Outcome;
///
/// let combined = combine_async_with_all_errors(vec![ok_async(1), err_async("x"), err_async("y")]);
/// assert_eq!(futures::executor::block_on(combined), Outcome::Failure(vec!["x", "y"]));
/// ```
pub fn combine_async_with_all_errors<T, E, I>(outcomes: I) -> AsyncOutcome<Vec<T>, Vec<E>>
where
    I: IntoIterator<Item = AsyncOutcome<T, E>>,
    T: Send + 'static,
    E: Send + 'static,
{
    let pending: Vec<AsyncOutcome<T, E>> = outcomes.into_iter().collect();
    AsyncOutcome::new(async move {
        tracing::trace!(count = pending.len(), "awaiting outcomes concurrently");
        combine_with_all_errors(join_all(pending).await)
    })
}

/// Concurrent aggregation over a tuple of pending outcomes.
///
/// Implemented for tuples of 2 to 8 elements sharing one error type. The
/// elements are driven with `futures::join!` and then folded by
/// [`OutcomeTuple`].
///
/// # Examples
///
/// ```rust
/// use okerr::async_outcome::{AsyncOutcome, AsyncOutcomeTuple, ok_async};
/// use okerr::outcome::Outcome;
///
/// let name: AsyncOutcome<&str, String> = ok_async("ada");
/// let age: AsyncOutcome<u8, String> = ok_async(36);
/// let both = (name, age).combine();
/// assert_eq!(futures::executor::block_on(both), Outcome::Success(("ada", 36)));
/// ```
pub trait AsyncOutcomeTuple {
    /// The tuple of success payloads.
    type Values;
    /// The shared failure payload.
    type Error;

    /// Concurrent fail-fast aggregation, as [`combine_async`].
    fn combine(self) -> AsyncOutcome<Self::Values, Self::Error>;

    /// Concurrent error-collecting aggregation, as
    /// [`combine_async_with_all_errors`].
    fn combine_with_all_errors(self) -> AsyncOutcome<Self::Values, Vec<Self::Error>>;
}

macro_rules! impl_async_outcome_tuple {
    ($($value:ident $element:ident),+) => {
        impl<$($value,)+ E> AsyncOutcomeTuple for ($(AsyncOutcome<$value, E>,)+)
        where
            $($value: Send + 'static,)+
            E: Send + 'static,
        {
            type Values = ($($value,)+);
            type Error = E;

            fn combine(self) -> AsyncOutcome<Self::Values, E> {
                let ($($element,)+) = self;
                AsyncOutcome::new(async move {
                    OutcomeTuple::combine(futures::join!($($element),+))
                })
            }

            fn combine_with_all_errors(self) -> AsyncOutcome<Self::Values, Vec<E>> {
                let ($($element,)+) = self;
                AsyncOutcome::new(async move {
                    OutcomeTuple::combine_with_all_errors(futures::join!($($element),+))
                })
            }
        }
    };
}

impl_async_outcome_tuple!(A a, B b);
impl_async_outcome_tuple!(A a, B b, C c);
impl_async_outcome_tuple!(A a, B b, C c, D d);
impl_async_outcome_tuple!(A a, B b, C c, D d, F f);
impl_async_outcome_tuple!(A a, B b, C c, D d, F f, G g);
impl_async_outcome_tuple!(A a, B b, C c, D d, F f, G g, H h);
impl_async_outcome_tuple!(A a, B b, C c, D d, F f, G g, H h, I i);
