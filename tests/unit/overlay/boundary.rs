use super::*;
use std::sync::{Arc, mpsc};

#[test]
fn passes_successful_renders_through() {
    let mut b = ErrorBoundary::new(3);
    let out = b.render("panel", || Ok(7));
    assert_eq!(out.rendered(), Some(7));
    assert!(!b.is_tripped());
}

#[test]
fn contains_errors_and_reports_them() {
    let (tx, rx) = mpsc::channel();
    let mut b = ErrorBoundary::new(3);
    b.set_on_error(Box::new(move |err: &OverlayError, ctx: &ErrorContext| {
        let _ = tx.send((err.to_string(), ctx.clone()));
    }));

    let out: BoundaryOutcome<()> = b.render("panel", || Err(OverlayError::render("bad svg")));
    let BoundaryOutcome::Fallback(fb) = out else {
        panic!("expected fallback");
    };
    assert!(fb.can_reload);
    assert!(fb.can_retry());
    assert!(fb.message.contains("bad svg"));

    let (msg, ctx) = rx.try_recv().unwrap();
    assert!(msg.contains("render error: bad svg"));
    assert_eq!(
        ctx,
        ErrorContext {
            component: "panel".to_owned(),
            attempt: 1
        }
    );
}

#[test]
fn contains_panics() {
    let mut b = ErrorBoundary::new(1);
    let out: BoundaryOutcome<()> = b.render("panel", || panic!("kaboom"));
    assert!(out.is_fallback());
    assert!(b.failure().unwrap().contains("kaboom"));
}

#[test]
fn tripped_boundary_does_not_rerun_content() {
    let mut b = ErrorBoundary::new(3);
    let _ = b.render::<()>("panel", || Err(OverlayError::render("x")));

    let calls = Arc::new(std::sync::atomic::AtomicUsize::new(0));
    let c = Arc::clone(&calls);
    let out = b.render("panel", move || {
        c.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        Ok(())
    });
    assert!(out.is_fallback());
    assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 0);
}

#[test]
fn retries_are_bounded_then_reload_restores_budget() {
    let mut b = ErrorBoundary::new(3);
    assert_eq!(b.retry(), RetryOutcome::NotTripped);

    for expected_left in [2, 1, 0] {
        let _ = b.render::<()>("panel", || Err(OverlayError::render("x")));
        assert_eq!(
            b.retry(),
            RetryOutcome::Retrying {
                remaining: expected_left
            }
        );
    }

    let out = b.render::<()>("panel", || Err(OverlayError::render("x")));
    let BoundaryOutcome::Fallback(fb) = out else {
        panic!("expected fallback");
    };
    assert!(!fb.can_retry());
    assert!(fb.can_reload);
    assert_eq!(b.retry(), RetryOutcome::ReloadRequired);

    b.reload();
    assert!(!b.is_tripped());
    assert_eq!(b.retries_left(), 3);
    assert_eq!(b.render("panel", || Ok(1)).rendered(), Some(1));
}
