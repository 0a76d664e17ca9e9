use super::*;

#[test]
fn pops_in_due_then_scheduling_order() {
    let mut arena = TimerArena::new();
    arena.schedule(Millis(30), "c");
    arena.schedule(Millis(10), "a");
    arena.schedule(Millis(10), "b");

    assert_eq!(arena.next_due(), Some(Millis(10)));
    assert_eq!(arena.pop_due(Millis(5)), None);

    let mut fired = Vec::new();
    while let Some((_, t)) = arena.pop_due(Millis(100)) {
        fired.push(t);
    }
    assert_eq!(fired, vec!["a", "b", "c"]);
    assert!(arena.is_empty());
}

#[test]
fn cancel_single_task() {
    let mut arena = TimerArena::new();
    let a = arena.schedule(Millis(10), 1);
    let b = arena.schedule(Millis(20), 2);

    assert!(arena.cancel(a));
    assert!(!arena.cancel(a));
    assert!(!arena.is_live(a));
    assert!(arena.is_live(b));
    assert_eq!(arena.pop_due(Millis(100)), Some((Millis(20), 2)));
}

#[test]
fn cancel_all_invalidates_old_handles() {
    let mut arena = TimerArena::new();
    let old = arena.schedule(Millis(10), 1);
    assert_eq!(arena.cancel_all(), 1);
    assert_eq!(arena.generation(), 1);

    // Same due time, same payload: the old handle still must not resurrect it.
    let fresh = arena.schedule(Millis(10), 1);
    assert!(!arena.is_live(old));
    assert!(!arena.cancel(old));
    assert!(arena.is_live(fresh));
    assert_eq!(fresh.generation(), 1);
    assert_eq!(fresh.due(), Millis(10));
}

#[test]
fn cancel_all_on_empty_arena_is_harmless() {
    let mut arena: TimerArena<()> = TimerArena::new();
    assert_eq!(arena.cancel_all(), 0);
    assert_eq!(arena.cancel_all(), 0);
    assert!(arena.is_empty());
    assert_eq!(arena.next_due(), None);
}
