//! Aggregation of many outcomes into one.
//!
//! Two policies are provided:
//!
//! - [`combine`]: fail-fast. The first failure wins and the rest of the
//!   sequence is not inspected.
//! - [`combine_with_all_errors`]: error-collecting. Every element is
//!   inspected and every failure payload is kept, in order.
//!
//! Both return the success payloads in their original order when nothing
//! failed. [`OutcomeTuple`] offers the same two policies over tuples whose
//! elements have different success types.

use super::Outcome;

/// Combines outcomes, stopping at the first failure.
///
/// The iterator is not advanced past the first `Failure`. An empty input
/// yields `Success(vec![])`.
///
/// # Examples
///
/// ```rust
/// use okerr::outcome::{combine, err, ok, Outcome};
///
/// let all: Vec<Outcome<i32, &str>> = vec![ok(1), ok(2), ok(3)];
/// assert_eq!(combine(all), ok(vec![1, 2, 3]));
///
/// let some: Vec<Outcome<i32, &str>> = vec![ok(1), err("x"), err("y")];
/// assert_eq!(combine(some), err("x"));
/// ```
pub fn combine<T, E, I>(outcomes: I) -> Outcome<Vec<T>, E>
where
    I: IntoIterator<Item = Outcome<T, E>>,
{
    let outcomes = outcomes.into_iter();
    let mut values = Vec::with_capacity(outcomes.size_hint().0);
    for outcome in outcomes {
        match outcome {
            Outcome::Success(value) => values.push(value),
            Outcome::Failure(error) => return Outcome::Failure(error),
        }
    }
    Outcome::Success(values)
}

/// Combines outcomes, collecting every failure.
///
/// Returns the success payloads in order when every element succeeded;
/// otherwise returns all failure payloads in their original relative order.
/// Successes interleaved with failures are dropped.
///
/// # Examples
///
/// ```rust
/// use okerr::outcome::{combine_with_all_errors, err, ok, Outcome};
///
/// let mixed: Vec<Outcome<i32, &str>> = vec![ok(1), err("x"), err("y")];
/// assert_eq!(combine_with_all_errors(mixed), err(vec!["x", "y"]));
///
/// let clean: Vec<Outcome<i32, &str>> = vec![ok(1), ok(2)];
/// assert_eq!(combine_with_all_errors(clean), ok(vec![1, 2]));
/// ```
pub fn combine_with_all_errors<T, E, I>(outcomes: I) -> Outcome<Vec<T>, Vec<E>>
where
    I: IntoIterator<Item = Outcome<T, E>>,
{
    outcomes
        .into_iter()
        .fold(Outcome::Success(Vec::new()), |accumulated, outcome| {
            match (accumulated, outcome) {
                (Outcome::Success(mut values), Outcome::Success(value)) => {
                    values.push(value);
                    Outcome::Success(values)
                }
                (Outcome::Success(_), Outcome::Failure(error)) => Outcome::Failure(vec![error]),
                (Outcome::Failure(errors), Outcome::Success(_)) => Outcome::Failure(errors),
                (Outcome::Failure(mut errors), Outcome::Failure(error)) => {
                    errors.push(error);
                    Outcome::Failure(errors)
                }
            }
        })
}

/// Collecting follows the fail-fast policy of [`combine`] into any
/// container.
///
/// ```rust
/// use okerr::outcome::{ok, Outcome};
///
/// let collected: Outcome<Vec<i32>, String> = (1..=3).map(ok).collect();
/// assert_eq!(collected, ok(vec![1, 2, 3]));
/// ```
impl<T, E, V> FromIterator<Outcome<T, E>> for Outcome<V, E>
where
    V: FromIterator<T>,
{
    fn from_iter<I: IntoIterator<Item = Outcome<T, E>>>(iter: I) -> Self {
        iter.into_iter()
            .map(Outcome::into_result)
            .collect::<Result<V, E>>()
            .into()
    }
}

// =============================================================================
// Heterogeneous Aggregation
// =============================================================================

/// Aggregation over a tuple of outcomes sharing one error type.
///
/// Implemented for tuples of 2 to 8 elements. The success payloads may all
/// differ in type; they are returned as a tuple in the same positions.
///
/// # Examples
///
/// ```rust
/// use okerr::outcome::{err, ok, Outcome, OutcomeTuple};
///
/// let user: Outcome<&str, String> = ok("ada");
/// let age: Outcome<u8, String> = ok(36);
/// assert_eq!((user, age).combine(), ok(("ada", 36)));
///
/// let user: Outcome<&str, String> = err("no user".to_string());
/// let age: Outcome<u8, String> = err("no age".to_string());
/// assert_eq!(
///     (user, age).combine_with_all_errors(),
///     err(vec!["no user".to_string(), "no age".to_string()])
/// );
/// ```
pub trait OutcomeTuple {
    /// The tuple of success payloads.
    type Values;
    /// The shared failure payload.
    type Error;

    /// Fail-fast aggregation, as [`combine`].
    fn combine(self) -> Outcome<Self::Values, Self::Error>;

    /// Error-collecting aggregation, as [`combine_with_all_errors`].
    fn combine_with_all_errors(self) -> Outcome<Self::Values, Vec<Self::Error>>;
}

macro_rules! impl_outcome_tuple {
    ($($value:ident $element:ident),+) => {
        impl<$($value,)+ E> OutcomeTuple for ($(Outcome<$value, E>,)+) {
            type Values = ($($value,)+);
            type Error = E;

            fn combine(self) -> Outcome<Self::Values, E> {
                let ($($element,)+) = self;
                $(
                    let $element = match $element {
                        Outcome::Success(value) => value,
                        Outcome::Failure(error) => return Outcome::Failure(error),
                    };
                )+
                Outcome::Success(($($element,)+))
            }

            fn combine_with_all_errors(self) -> Outcome<Self::Values, Vec<E>> {
                let ($($element,)+) = self;
                let mut errors = Vec::new();
                $(
                    let $element = match $element {
                        Outcome::Success(value) => Some(value),
                        Outcome::Failure(error) => {
                            errors.push(error);
                            None
                        }
                    };
                )+
                match ($($element,)+) {
                    ($(Some($element),)+) => Outcome::Success(($($element,)+)),
                    _ => Outcome::Failure(errors),
                }
            }
        }
    };
}

impl_outcome_tuple!(A a, B b);
impl_outcome_tuple!(A a, B b, C c);
impl_outcome_tuple!(A a, B b, C c, D d);
impl_outcome_tuple!(A a, B b, C c, D d, F f);
impl_outcome_tuple!(A a, B b, C c, D d, F f, G g);
impl_outcome_tuple!(A a, B b, C c, D d, F f, G g, H h);
impl_outcome_tuple!(A a, B b, C c, D d, F f, G g, H h, I i);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::{err, ok};
    use rstest::rstest;

    #[rstest]
    fn test_combine_empty_is_success() {
        let empty: Vec<Outcome<i32, String>> = Vec::new();
        assert_eq!(combine(empty), ok(Vec::new()));
    }

    #[rstest]
    fn test_combine_with_all_errors_empty_is_success() {
        let empty: Vec<Outcome<i32, String>> = Vec::new();
        assert_eq!(combine_with_all_errors(empty), ok(Vec::new()));
    }

    #[rstest]
    fn test_combine_stops_consuming_at_first_failure() {
        let mut inspected = 0;
        let outcomes = [ok(1), err("first"), ok(3), err("second")]
            .into_iter()
            .inspect(|_| inspected += 1);

        assert_eq!(combine(outcomes), err("first"));
        assert_eq!(inspected, 2);
    }

    #[rstest]
    fn test_combine_with_all_errors_inspects_everything() {
        let mut inspected = 0;
        let outcomes = [err("a"), ok(2), err("b"), ok(4)]
            .into_iter()
            .inspect(|_| inspected += 1);

        assert_eq!(combine_with_all_errors(outcomes), err(vec!["a", "b"]));
        assert_eq!(inspected, 4);
    }

    #[rstest]
    fn test_eight_element_tuple() {
        let tuple: (
            Outcome<u8, ()>,
            Outcome<u16, ()>,
            Outcome<u32, ()>,
            Outcome<u64, ()>,
            Outcome<i8, ()>,
            Outcome<i16, ()>,
            Outcome<i32, ()>,
            Outcome<i64, ()>,
        ) = (ok(1), ok(2), ok(3), ok(4), ok(5), ok(6), ok(7), ok(8));

        assert_eq!(tuple.combine(), ok((1, 2, 3, 4, 5, 6, 7, 8)));
    }
}
