use super::*;
use crate::foundation::core::Point;
use crate::hotspot::model::{HotspotKind, HotspotMetadata};

fn instant() -> MapViewport {
    MapViewport::new(ViewportOpts {
        transition_ms: 0,
        ..ViewportOpts::default()
    })
    .unwrap()
}

fn hotspot_at(x: f64, y: f64) -> Hotspot {
    Hotspot {
        id: "dc-01".to_owned(),
        name: "Data Center 01".to_owned(),
        kind: HotspotKind::Datacenter,
        position: Point::new(x, y),
        description: None,
        metadata: HotspotMetadata::default(),
    }
}

#[test]
fn zoom_is_clamped_to_limits() {
    let mut v = instant();
    v.zoom(10.0, Vec2::ZERO, Millis(0));
    assert_eq!(v.sample(Millis(0)).zoom, 3.0);
    assert!(v.is_at_max_zoom(Millis(0)));

    v.zoom(-10.0, Vec2::ZERO, Millis(1));
    assert_eq!(v.sample(Millis(1)).zoom, 0.5);
    assert!(v.is_at_min_zoom(Millis(1)));
    assert!(!v.can_pan(Millis(1)));
}

#[test]
fn pan_is_bounded_by_zoom() {
    let mut v = instant();
    v.pan(Vec2::new(500.0, -500.0), Millis(0));
    assert_eq!(v.sample(Millis(0)).pan, Vec2::ZERO);

    v.zoom(1.0, Vec2::ZERO, Millis(0));
    v.pan(Vec2::new(500.0, -500.0), Millis(0));
    assert_eq!(v.sample(Millis(0)).pan, Vec2::new(200.0, -200.0));
}

#[test]
fn rotation_requires_opt_in() {
    let mut v = instant();
    v.rotate(45.0, Millis(0));
    assert_eq!(v.sample(Millis(0)).rotation, 0.0);

    let mut v = MapViewport::new(ViewportOpts {
        transition_ms: 0,
        enable_rotation: true,
        ..ViewportOpts::default()
    })
    .unwrap();
    v.rotate(45.0, Millis(0));
    assert_eq!(v.sample(Millis(0)).rotation, 45.0);
}

#[test]
fn transitions_ease_from_current_state() {
    let mut v = MapViewport::new(ViewportOpts::default()).unwrap();
    v.zoom(1.0, Vec2::ZERO, Millis(1000));

    assert_eq!(v.sample(Millis(1000)).zoom, 1.0);
    assert_eq!(v.sample(Millis(1150)).zoom, 1.5);
    assert!(v.is_animating(Millis(1150)));
    assert_eq!(v.sample(Millis(1300)).zoom, 2.0);
    assert!(!v.is_animating(Millis(1300)));
}

#[test]
fn new_change_mid_flight_starts_from_sampled_state() {
    let mut v = MapViewport::new(ViewportOpts::default()).unwrap();
    v.zoom(1.0, Vec2::ZERO, Millis(0));
    let mid = v.sample(Millis(150));
    v.reset_view(Millis(150));
    assert_eq!(v.sample(Millis(150)), mid);
    assert_eq!(v.target(), ViewState::default());
    assert_eq!(v.sample(Millis(450)), ViewState::default());
}

#[test]
fn zoom_to_hotspot_centres_it() {
    let dims = ImageDims::new(1200.0, 800.0).unwrap();
    let mut v = instant();
    v.zoom_to_hotspot(&hotspot_at(500.0, 450.0), dims, Millis(0));
    let s = v.sample(Millis(0));
    assert_eq!(s.zoom, 2.0);
    assert_eq!(s.pan, Vec2::new(100.0, -50.0));
    assert_eq!(
        v.css_transform(Millis(0)),
        "scale(2) translate(100px, -50px) rotate(0deg)"
    );
}

#[test]
fn rejects_inverted_limits() {
    let err = MapViewport::new(ViewportOpts {
        min_zoom: 4.0,
        max_zoom: 2.0,
        ..ViewportOpts::default()
    })
    .unwrap_err();
    assert!(matches!(err, OverlayError::Configuration(_)));
}
