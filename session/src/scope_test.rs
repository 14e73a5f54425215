use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use super::*;

#[tokio::test]
async fn dropping_scope_cancels_pending_tasks() {
    let touched = Arc::new(AtomicBool::new(false));
    let scope = TaskScope::new();

    let flag = touched.clone();
    let handle = scope.spawn(async move {
        tokio::time::sleep(Duration::from_secs(30)).await;
        flag.store(true, Ordering::SeqCst);
    });
    assert_eq!(scope.live(), 1);

    drop(scope);
    let err = handle.await.expect_err("task should be cancelled");
    assert!(err.is_cancelled());
    assert!(!touched.load(Ordering::SeqCst));
}

#[tokio::test]
async fn finished_tasks_return_their_output() {
    let scope = TaskScope::new();
    let value = scope.spawn(async { 7 }).await.expect("join");
    assert_eq!(value, 7);
}

#[tokio::test]
async fn task_guard_aborts_on_drop() {
    let (tx, rx) = tokio::sync::oneshot::channel::<()>();
    let guard = TaskGuard::spawn(async move {
        let _tx = tx;
        std::future::pending::<()>().await;
    });
    assert!(!guard.is_finished());

    drop(guard);
    // The sender is dropped with the aborted task.
    assert!(rx.await.is_err());
}
