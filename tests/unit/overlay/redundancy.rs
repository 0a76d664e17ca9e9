use super::*;
use crate::overlay::boundary::ErrorContext;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

fn overlay() -> RedundancyOverlay {
    RedundancyOverlay::new(&OverlayConfig::default()).unwrap()
}

fn frame(o: &mut RedundancyOverlay, at: u64) -> OverlayFrame {
    o.frame(Millis(at)).rendered().expect("frame rendered")
}

#[test]
fn default_stats_describe_two_n_plus_one() {
    let s = RedundancyStats::default();
    assert_eq!(s.data_center_need_mw, 300);
    assert_eq!(s.active.capacity_mw + s.standby.capacity_mw, 1100);
    assert_eq!(s.total_capacity_mw, 1200);
    assert_eq!(s.redundancy_ratio_pct, 400);

    let lines = s.lines().unwrap();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0].from, "Quảng Trạch");
    assert_eq!(lines[0].to, "Sub 01");
    assert_eq!(lines[0].role, LineRole::Active);
    assert_eq!(lines[3].from, "Đà Nẵng");
    assert_eq!(lines[3].role, LineRole::Standby);
}

#[test]
fn zero_duration_config_fails_before_opening() {
    let mut cfg = OverlayConfig::default();
    cfg.reveal.duration_ms = Some(0);
    let err = RedundancyOverlay::new(&cfg).unwrap_err();
    assert!(matches!(err, OverlayError::Configuration(_)));
}

#[test]
fn content_reveals_in_phases() {
    let mut o = overlay();
    assert!(frame(&mut o, 0).is_empty());
    assert_eq!(o.content_builds(), 0);

    o.open(Millis(1000), None);
    let f = frame(&mut o, 1100);
    assert_eq!(f.phase, RevealPhase::Idle);
    assert!(f.is_empty());
    assert_eq!(f.close_label, "Close redundancy visualization");
    assert_eq!(f.back_label, "Back to Main");

    let f = frame(&mut o, 1250);
    assert_eq!(f.phase, RevealPhase::LinesVisible);
    assert_eq!(f.lines.len(), 4);
    assert!(f.substations.is_empty());

    let f = frame(&mut o, 1750);
    assert_eq!(f.substations, vec!["Sub 01".to_owned(), "Sub 02".to_owned()]);
    assert!(!f.connections);

    let f = frame(&mut o, 2250);
    assert!(f.connections);
    assert!(f.info_panel.is_none());

    let f = frame(&mut o, 2500);
    assert_eq!(f.phase, RevealPhase::InfoPanelVisible);
    assert_eq!(f.info_panel, Some(RedundancyStats::default()));
}

#[test]
fn content_is_built_once() {
    let mut o = overlay();
    o.open(Millis(0), None);
    frame(&mut o, 10);
    o.close();
    o.open(Millis(100), None);
    frame(&mut o, 2000);
    assert_eq!(o.content_builds(), 1);
}

#[test]
fn close_restores_focus_and_fires_callback_once() {
    let closes = Arc::new(AtomicUsize::new(0));
    let c = Arc::clone(&closes);
    let mut o = overlay().on_close(move || {
        c.fetch_add(1, Ordering::SeqCst);
    });

    let origin = FocusTarget::Control("redundancy-toggle".to_owned());
    o.open(Millis(0), Some(origin.clone()));
    assert!(o.is_open());
    o.tick(Millis(800));
    assert_eq!(o.phase(), RevealPhase::MarkersVisible);

    assert_eq!(o.close(), Some(origin));
    assert!(!o.is_open());
    assert_eq!(o.phase(), RevealPhase::Idle);
    assert_eq!(o.close(), None);
    assert_eq!(closes.load(Ordering::SeqCst), 1);

    assert!(o.tick(Millis(10_000)).is_empty());
}

#[test]
fn escape_closes_other_keys_do_not() {
    let mut o = overlay();
    o.open(Millis(0), Some(FocusTarget::Hotspot("hue-dc".to_owned())));
    assert_eq!(o.handle_key(Key::Enter), None);
    assert!(o.is_open());
    assert_eq!(
        o.handle_key(Key::Escape),
        Some(FocusTarget::Hotspot("hue-dc".to_owned()))
    );
    assert!(!o.is_open());
}

#[test]
fn reopening_restarts_the_reveal() {
    let mut o = overlay();
    o.open(Millis(0), None);
    o.tick(Millis(1600));
    assert!(o.sequencer().info_panel_shown());

    o.open(Millis(2000), None);
    assert_eq!(o.phase(), RevealPhase::Idle);
    let events = o.tick(Millis(3600));
    assert_eq!(events.len(), 4);
    assert!(events.iter().all(|e| e.at >= Millis(2000)));
}

#[test]
fn render_failure_is_contained_and_overlay_stays_closable() {
    let reported = Arc::new(AtomicUsize::new(0));
    let r = Arc::clone(&reported);
    let mut bad = RedundancyStats::default();
    bad.standby.sources.push("nowhere".to_owned());

    let mut o = overlay()
        .with_stats(bad)
        .on_error(Box::new(move |_: &OverlayError, ctx: &ErrorContext| {
            assert_eq!(ctx.component, "redundancy-overlay");
            r.fetch_add(1, Ordering::SeqCst);
        }));

    o.open(Millis(0), Some(FocusTarget::Control("toggle".to_owned())));
    let out = o.frame(Millis(100));
    let BoundaryOutcome::Fallback(fb) = out else {
        panic!("expected fallback");
    };
    assert!(fb.message.contains("nowhere"));
    assert!(fb.can_reload);
    assert_eq!(reported.load(Ordering::SeqCst), 1);

    // Tripped: later frames reuse the fallback without reporting again.
    assert!(o.frame(Millis(200)).is_fallback());
    assert_eq!(reported.load(Ordering::SeqCst), 1);

    assert_eq!(
        o.handle_key(Key::Escape),
        Some(FocusTarget::Control("toggle".to_owned()))
    );
}

#[test]
fn reload_rebuilds_content() {
    let mut o = overlay();
    o.open(Millis(0), None);
    frame(&mut o, 0);
    o.reload();
    frame(&mut o, 5);
    assert_eq!(o.content_builds(), 2);
    assert_eq!(o.retry(), RetryOutcome::NotTripped);
}
