#![cfg(feature = "async")]
//! Integration tests for `AsyncOutcome<T, E>`.
//!
//! Covers construction from futures, the combinator surface, flattening of
//! callbacks that return other outcomes and propagation of panics.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use okerr::async_outcome::{AsyncOutcome, err_async, from_future, from_safe_future, ok_async};
use okerr::outcome::{Outcome, err, ok};
use rstest::rstest;

async fn lookup(id: u32) -> Result<String, std::io::Error> {
    tokio::task::yield_now().await;
    if id == 0 {
        Err(std::io::Error::new(std::io::ErrorKind::NotFound, "no such id"))
    } else {
        Ok(format!("user-{id}"))
    }
}

// =============================================================================
// Construction
// =============================================================================

#[rstest]
#[tokio::test]
async fn from_future_ok_becomes_success() {
    let name = from_future(lookup(3), |error| error.kind());
    assert_eq!(name.await, ok("user-3".to_string()));
}

#[rstest]
#[tokio::test]
async fn from_future_err_goes_through_error_function() {
    let name = from_future(lookup(0), |error| error.kind());
    assert_eq!(name.await, err(std::io::ErrorKind::NotFound));
}

#[rstest]
#[tokio::test]
async fn from_safe_future_becomes_success() {
    let value: AsyncOutcome<u64, String> = from_safe_future(async {
        tokio::time::sleep(Duration::from_millis(1)).await;
        7
    });
    assert_eq!(value.await, ok(7));
}

#[rstest]
#[tokio::test]
async fn from_safe_future_panic_propagates() {
    let handle = tokio::spawn(async {
        let value: AsyncOutcome<u64, String> =
            from_safe_future(async { panic!("storage offline") });
        value.await
    });

    let joined = handle.await;
    assert!(joined.is_err_and(|error| error.is_panic()));
}

#[rstest]
#[tokio::test]
async fn from_unwinding_captures_panic() {
    let guarded: AsyncOutcome<u64, String> = AsyncOutcome::from_unwinding(
        async {
            tokio::task::yield_now().await;
            panic!("storage offline")
        },
        |fault| fault.to_string(),
    );

    assert_eq!(guarded.await, err("storage offline".to_string()));
}

#[rstest]
#[tokio::test]
async fn from_outcome_is_settled() {
    let settled: AsyncOutcome<i32, String> = ok(5).into();
    assert_eq!(settled.await, ok(5));
}

#[rstest]
#[tokio::test]
async fn futures_are_lazy_until_polled() {
    let started = Arc::new(AtomicUsize::new(0));
    let flag = Arc::clone(&started);

    let pending: AsyncOutcome<i32, String> = AsyncOutcome::new(async move {
        flag.fetch_add(1, Ordering::SeqCst);
        ok::<i32, String>(1)
    })
    .map(|n| n + 1)
    .and_then(|n| ok(n * 10));

    assert_eq!(started.load(Ordering::SeqCst), 0);
    assert_eq!(pending.await, ok(20));
    assert_eq!(started.load(Ordering::SeqCst), 1);
}

// =============================================================================
// map / map_err
// =============================================================================

#[rstest]
#[tokio::test]
async fn map_transforms_pending_success() {
    let mapped = from_future(lookup(9), |error| error.to_string()).map(|name| name.len());
    assert_eq!(mapped.await, ok(6));
}

#[rstest]
#[tokio::test]
async fn map_async_awaits_inner_future() {
    let mapped = ok_async::<u32, String>(2).map_async(|id| async move { lookup(id).await.is_ok() });
    assert_eq!(mapped.await, ok(true));
}

#[rstest]
#[tokio::test]
async fn map_skips_failure_without_calling() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);

    let mapped = from_future(lookup(0), |error| error.kind()).map(move |name| {
        counter.fetch_add(1, Ordering::SeqCst);
        name
    });

    assert_eq!(mapped.await, err(std::io::ErrorKind::NotFound));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[rstest]
#[tokio::test]
async fn map_err_transforms_failure() {
    let mapped = err_async::<i32, &str>("bad").map_err(str::len);
    assert_eq!(mapped.await, err(3));
}

#[rstest]
#[tokio::test]
async fn map_err_async_awaits_inner_future() {
    let mapped = err_async::<i32, u32>(0).map_err_async(|id| async move {
        lookup(id).await.err().map(|error| error.kind())
    });
    assert_eq!(mapped.await, err(Some(std::io::ErrorKind::NotFound)));
}

// =============================================================================
// and_then / or_else
// =============================================================================

#[rstest]
#[tokio::test]
async fn and_then_accepts_sync_and_async_callbacks_alike() {
    let through_sync: AsyncOutcome<i32, String> = ok_async(4).and_then(|n| ok(n + 1));
    let through_async: AsyncOutcome<i32, String> = ok_async(4).and_then(|n| ok_async(n + 1));
    let through_pending: AsyncOutcome<i32, String> =
        ok_async(4).and_then(|n| AsyncOutcome::new(async move { ok(n + 1) }));

    assert_eq!(through_sync.await, ok(5));
    assert_eq!(through_async.await, ok(5));
    assert_eq!(through_pending.await, ok(5));
}

#[rstest]
#[tokio::test]
async fn and_then_adopts_failure_from_callback() {
    let chained = ok_async::<u32, String>(0)
        .and_then(|id| from_future(lookup(id), |error| error.to_string()))
        .map(|name| name.to_uppercase());

    assert_eq!(chained.await, err("no such id".to_string()));
}

#[rstest]
#[tokio::test]
async fn and_then_skips_failure_without_calling() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);

    let chained = from_future(lookup(0), |error| error.to_string()).and_then(move |name| {
        counter.fetch_add(1, Ordering::SeqCst);
        ok(name)
    });

    assert_eq!(chained.await, err("no such id".to_string()));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[rstest]
#[tokio::test]
async fn or_else_recovers_with_pending_outcome() {
    let recovered: AsyncOutcome<String, ()> = from_future(lookup(0), |error| error.to_string())
        .or_else(|_| from_future(lookup(1), |_| ()));

    assert_eq!(recovered.await, ok("user-1".to_string()));
}

#[rstest]
#[tokio::test]
async fn or_else_skips_success_without_calling() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);

    let recovered: AsyncOutcome<String, String> =
        from_future(lookup(2), |error| error.to_string()).or_else(move |error| {
            counter.fetch_add(1, Ordering::SeqCst);
            err(error)
        });

    assert_eq!(recovered.await, ok("user-2".to_string()));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

// =============================================================================
// Bridges from Outcome
// =============================================================================

#[rstest]
#[tokio::test]
async fn async_and_then_from_sync_outcome() {
    let chained = ok::<u32, String>(5)
        .async_and_then(|id| from_future(lookup(id), |error| error.to_string()));
    assert_eq!(chained.await, ok("user-5".to_string()));
}

#[rstest]
#[tokio::test]
async fn async_map_skips_failure() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);

    let mapped = err::<u32, &str>("nope").async_map(move |n| {
        counter.fetch_add(1, Ordering::SeqCst);
        async move { n + 1 }
    });

    assert_eq!(mapped.await, err("nope"));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

// =============================================================================
// Terminal Operations
// =============================================================================

#[rstest]
#[tokio::test]
async fn fold_returns_callback_value() {
    let described = from_future(lookup(0), |error| error.kind())
        .fold(|name| format!("found {name}"), |kind| format!("failed: {kind:?}"))
        .await;
    assert_eq!(described, "failed: NotFound");
}

#[rstest]
#[tokio::test]
async fn unwrap_or_keeps_falsy_default() {
    let value = err_async::<i32, String>("gone".to_string()).unwrap_or(0).await;
    assert_eq!(value, 0);
}

#[rstest]
#[tokio::test]
async fn into_result_converts() {
    let result = ok_async::<i32, String>(1).into_result().await;
    assert_eq!(result, Ok(1));
}

#[rstest]
#[tokio::test]
async fn shared_runs_once_for_many_consumers() {
    let runs = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&runs);

    let shared = AsyncOutcome::<i32, String>::new(async move {
        counter.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        ok(21)
    })
    .shared();

    let doubled = AsyncOutcome::new(shared.clone()).map(|n| n * 2);
    let (first, second) = tokio::join!(doubled, shared);

    assert_eq!(first, ok(42));
    assert_eq!(second, Outcome::Success(21));
    assert_eq!(runs.load(Ordering::SeqCst), 1);
}
