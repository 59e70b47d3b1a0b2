//! Mutual exclusion and release behaviour of the engine guard

mod common;

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::thread;

use common::CountingEngine;
use embassy_futures::block_on;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_time::Duration;
use pacer_core::render::EngineState;
use pacer_core::TickCounter;
use pacer_runtime::{Guard, GuardError};

type TestGuard<T> = Guard<CriticalSectionRawMutex, T>;

#[test]
fn test_at_most_one_holder_under_stress() {
    const THREADS: u32 = 4;
    const ROUNDS: u32 = 2_000;

    let guard = Arc::new(TestGuard::new(0u64));
    let holders = Arc::new(AtomicU32::new(0));
    let violations = Arc::new(AtomicU32::new(0));

    let workers: Vec<_> = (0..THREADS)
        .map(|_| {
            let guard = guard.clone();
            let holders = holders.clone();
            let violations = violations.clone();
            thread::spawn(move || {
                for _ in 0..ROUNDS {
                    block_on(async {
                        let mut held = guard.acquire().await;
                        if holders.fetch_add(1, Ordering::SeqCst) != 0 {
                            violations.fetch_add(1, Ordering::SeqCst);
                        }
                        *held += 1;
                        thread::yield_now();
                        holders.fetch_sub(1, Ordering::SeqCst);
                    });
                }
            })
        })
        .collect();

    for worker in workers {
        worker.join().unwrap();
    }

    assert_eq!(violations.load(Ordering::SeqCst), 0);
    assert_eq!(*guard.try_acquire().unwrap(), (THREADS * ROUNDS) as u64);
}

#[test]
fn test_ticks_survive_concurrent_rendering() {
    const FIRES: u32 = 20_000;

    let counter = Arc::new(TickCounter::new());
    let guard = Arc::new(TestGuard::new(EngineState::new(
        CountingEngine::default(),
        &counter,
        0,
    )));

    let ticker = {
        let counter = counter.clone();
        thread::spawn(move || {
            for _ in 0..FIRES {
                counter.advance(10);
            }
        })
    };

    let renderer = {
        let counter = counter.clone();
        let guard = guard.clone();
        thread::spawn(move || {
            for _ in 0..500 {
                block_on(async {
                    guard.acquire().await.service(&counter);
                });
            }
        })
    };

    ticker.join().unwrap();
    renderer.join().unwrap();

    let mut state = guard.try_acquire().unwrap();
    state.service(&counter);
    assert_eq!(counter.fires(), FIRES);
    assert_eq!(state.consumed_ms(), FIRES as u64 * 10);
    assert_eq!(state.engine().clock_ms, FIRES as u64 * 10);
}

#[test]
fn test_try_acquire_reports_busy() {
    let guard = TestGuard::new(());
    let held = guard.try_acquire().unwrap();
    assert!(matches!(guard.try_acquire(), Err(GuardError::Busy)));
    drop(held);
    assert!(guard.try_acquire().is_ok());
}

#[test]
fn test_acquire_within_times_out_then_succeeds() {
    let guard = TestGuard::new(5u32);

    block_on(async {
        let held = guard.acquire().await;
        let attempt = guard
            .acquire_within(Some(Duration::from_millis(20)))
            .await;
        assert!(matches!(attempt, Err(GuardError::Timeout)));
        drop(held);

        let value = guard
            .with(Some(Duration::from_millis(20)), |v| {
                *v += 1;
                *v
            })
            .await;
        assert_eq!(value, Ok(6));
    });
}

#[test]
fn test_release_on_early_return() {
    let guard = TestGuard::new(0u32);

    fn bump_if_small(value: &mut u32) -> Result<(), ()> {
        if *value > 0 {
            return Err(());
        }
        *value += 1;
        Ok(())
    }

    block_on(async {
        assert_eq!(guard.with(None, bump_if_small).await, Ok(Ok(())));
        assert_eq!(guard.with(None, bump_if_small).await, Ok(Err(())));
    });

    assert!(guard.try_acquire().is_ok());
}
