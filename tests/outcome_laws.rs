//! Property-based tests for the `Outcome` functor and monad laws.
//!
//! - Functor Identity: `m.map(id) == m`
//! - Functor Composition: `m.map(f).map(g) == m.map(|x| g(f(x)))`
//! - Left Identity: `ok(a).and_then(f) == f(a)`
//! - Right Identity: `m.and_then(ok) == m`
//! - Associativity: `m.and_then(f).and_then(g) == m.and_then(|x| f(x).and_then(g))`

use okerr::outcome::{Outcome, err, ok};
use proptest::prelude::*;

fn outcome_strategy() -> impl Strategy<Value = Outcome<i32, String>> {
    prop_oneof![
        any::<i32>().prop_map(ok::<i32, String>),
        "[a-z]{0,8}".prop_map(err::<i32, String>),
    ]
}

fn checked_double(n: i32) -> Outcome<i32, String> {
    n.checked_mul(2)
        .map_or_else(|| err(format!("{n} overflows")), ok)
}

fn non_negative(n: i32) -> Outcome<i32, String> {
    if n >= 0 { ok(n) } else { err(format!("{n} is negative")) }
}

// =============================================================================
// Functor Laws
// =============================================================================

proptest! {
    #[test]
    fn prop_functor_identity(outcome in outcome_strategy()) {
        prop_assert_eq!(outcome.clone().map(|x| x), outcome);
    }

    #[test]
    fn prop_functor_composition(outcome in outcome_strategy()) {
        let function1 = |n: i32| n.wrapping_add(1);
        let function2 = |n: i32| n.wrapping_mul(3);

        let left = outcome.clone().map(function1).map(function2);
        let right = outcome.map(|n| function2(function1(n)));

        prop_assert_eq!(left, right);
    }

    #[test]
    fn prop_map_err_identity(outcome in outcome_strategy()) {
        prop_assert_eq!(outcome.clone().map_err(|e| e), outcome);
    }
}

// =============================================================================
// Monad Laws
// =============================================================================

proptest! {
    #[test]
    fn prop_monad_left_identity(value: i32) {
        prop_assert_eq!(ok(value).and_then(checked_double), checked_double(value));
    }

    #[test]
    fn prop_monad_right_identity(outcome in outcome_strategy()) {
        prop_assert_eq!(outcome.clone().and_then(ok), outcome);
    }

    #[test]
    fn prop_monad_associativity(outcome in outcome_strategy()) {
        let left = outcome.clone().and_then(checked_double).and_then(non_negative);
        let right = outcome.and_then(|n| checked_double(n).and_then(non_negative));

        prop_assert_eq!(left, right);
    }

    #[test]
    fn prop_or_else_mirrors_and_then(outcome in outcome_strategy()) {
        let recovered: Outcome<i32, String> = outcome.clone().or_else(err);
        prop_assert_eq!(recovered, outcome);
    }
}

// =============================================================================
// Round Trips
// =============================================================================

proptest! {
    #[test]
    fn prop_result_round_trip(outcome in outcome_strategy()) {
        let back: Outcome<i32, String> = outcome.clone().into_result().into();
        prop_assert_eq!(back, outcome);
    }

    #[test]
    fn prop_fold_agrees_with_unwrap_or(outcome in outcome_strategy(), default: i32) {
        let folded = outcome.clone().fold(|n| n, |_| default);
        prop_assert_eq!(folded, outcome.unwrap_or(default));
    }
}
