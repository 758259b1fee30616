use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::Barrier;

use crate::states::{StateError, WatchState};

#[tokio::test]
async fn update_and_snapshot() {
    let state = WatchState::new(1u32);
    let handle = state.clone();

    handle.update(2);
    assert_eq!(state.get_current(), 2);
}

#[tokio::test]
async fn watcher_sees_changes_after_creation() {
    let state = WatchState::new("idle".to_string());
    let mut watcher = state.watch();
    assert_eq!(watcher.borrow(), "idle");

    state.update("busy".to_string());
    assert_eq!(watcher.changed().await.unwrap(), "busy");
}

#[tokio::test]
async fn wait_for_returns_immediately_when_satisfied() {
    let state = WatchState::new(10u32);
    let value = state.watch().wait_for(|v| *v >= 10).await.unwrap();
    assert_eq!(value, 10);
}

#[tokio::test]
async fn closed_state_reports_error() {
    let state = WatchState::new(0u8);
    let mut watcher = state.watch();
    drop(state);

    assert!(matches!(watcher.changed().await, Err(StateError::Closed(_))));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_writers_reach_final_value() {
    const WRITERS: usize = 8;
    const PER_WRITER: usize = 100;

    let state = WatchState::new(0usize);
    let counter = Arc::new(AtomicUsize::new(0));
    let barrier = Arc::new(Barrier::new(WRITERS));
    let mut watcher = state.watch();

    let mut tasks = Vec::new();
    for _ in 0..WRITERS {
        let state = state.clone();
        let counter = Arc::clone(&counter);
        let barrier = Arc::clone(&barrier);
        tasks.push(tokio::spawn(async move {
            barrier.wait().await;
            for _ in 0..PER_WRITER {
                let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
                if n == WRITERS * PER_WRITER {
                    state.update(n);
                }
            }
        }));
    }

    let last = watcher
        .wait_for(|v| *v == WRITERS * PER_WRITER)
        .await
        .unwrap();
    for task in tasks {
        task.await.unwrap();
    }
    assert_eq!(last, WRITERS * PER_WRITER);
}
