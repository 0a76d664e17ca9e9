use super::*;
use crate::foundation::core::Point;
use crate::hotspot::model::{Hotspot, HotspotKind, HotspotMetadata};

fn catalog(ids: &[&str]) -> HotspotCatalog {
    ids.iter()
        .map(|id| Hotspot {
            id: (*id).to_owned(),
            name: id.to_uppercase(),
            kind: HotspotKind::Substation,
            position: Point::new(10.0, 10.0),
            description: None,
            metadata: HotspotMetadata::default(),
        })
        .collect()
}

fn state() -> DisclosureState {
    DisclosureState::new(&catalog(&["a", "b", "c"]))
}

#[test]
fn second_activation_closes_first_panel() {
    let mut s = state();
    s.activate("a").unwrap();
    let effect = s.activate("b").unwrap();

    assert_eq!(
        effect,
        DisclosureEffect::DetailOpened {
            id: "b".to_owned(),
            replaced: Some("a".to_owned()),
        }
    );
    assert!(!s.is_detail_open("a"));
    assert!(s.is_detail_open("b"));
}

#[test]
fn disabled_hotspot_never_changes_state() {
    let mut s = state();
    s.hover("a").unwrap();
    s.activate("a").unwrap();
    s.set_disabled("c", true).unwrap();

    assert_eq!(s.hover("c").unwrap(), DisclosureEffect::Unchanged);
    assert_eq!(s.activate("c").unwrap(), DisclosureEffect::Unchanged);
    assert_eq!(
        s.key("c", Key::Enter).unwrap(),
        DisclosureEffect::Unchanged
    );
    assert_eq!(s.hovered(), Some("a"));
    assert_eq!(s.open_detail(), Some("a"));
    assert!(!s.is_tooltip_visible("c"));
}

#[test]
fn disabled_hotspots_leave_tab_order() {
    let mut s = state();
    s.set_disabled("b", true).unwrap();
    assert_eq!(s.tab_order(), vec!["a", "c"]);
    assert_eq!(s.focus_next(Some("a"), false), Some("c"));
    assert_eq!(s.focus_next(Some("c"), false), Some("a"));
    assert_eq!(s.focus_next(Some("a"), true), Some("c"));
    assert_eq!(s.focus_next(None, true), Some("c"));

    s.set_disabled("b", false).unwrap();
    assert_eq!(s.tab_order(), vec!["a", "b", "c"]);
}

#[test]
fn single_tooltip_at_a_time() {
    let mut s = state();
    s.hover("a").unwrap();
    let effect = s.hover("b").unwrap();
    assert_eq!(
        effect,
        DisclosureEffect::HoverChanged {
            from: Some("a".to_owned()),
            to: Some("b".to_owned()),
        }
    );
    assert!(!s.is_tooltip_visible("a"));
    assert!(s.is_tooltip_visible("b"));

    // Leaving a hotspot that is no longer hovered must not clear the current hover.
    assert_eq!(s.unhover("a").unwrap(), DisclosureEffect::Unchanged);
    assert_eq!(s.hovered(), Some("b"));
    s.unhover("b").unwrap();
    assert_eq!(s.hovered(), None);
}

#[test]
fn tooltips_can_be_disabled_per_page() {
    let mut s = state();
    s.set_tooltips_enabled(false);
    s.hover("a").unwrap();
    assert_eq!(s.hovered(), Some("a"));
    assert!(!s.is_tooltip_visible("a"));
}

#[test]
fn disabling_the_hovered_hotspot_clears_hover() {
    let mut s = state();
    s.hover("b").unwrap();
    s.set_disabled("b", true).unwrap();
    assert_eq!(s.hovered(), None);
}

#[test]
fn dismiss_restores_focus_to_opener() {
    let mut s = state();
    s.key("b", Key::Space).unwrap();
    assert_eq!(
        s.dismiss(),
        DisclosureEffect::DetailClosed {
            id: "b".to_owned(),
            restore_focus: FocusTarget::Hotspot("b".to_owned()),
        }
    );
    assert_eq!(s.dismiss(), DisclosureEffect::Unchanged);

    s.apply(DisclosureCommand::Activate {
        id: "c".to_owned(),
        opener: Some(FocusTarget::Control("legend".to_owned())),
    })
    .unwrap();
    let closed = s
        .apply(DisclosureCommand::Key {
            id: "c".to_owned(),
            key: Key::Escape,
        })
        .unwrap();
    assert_eq!(
        closed,
        DisclosureEffect::DetailClosed {
            id: "c".to_owned(),
            restore_focus: FocusTarget::Control("legend".to_owned()),
        }
    );
}

#[test]
fn open_detail_always_references_known_hotspot() {
    let mut s = state();
    assert!(matches!(
        s.activate("ghost"),
        Err(OverlayError::Validation(_))
    ));
    assert!(s.apply(DisclosureCommand::Hover("ghost".to_owned())).is_err());
    assert_eq!(s.open_detail(), None);
    assert_eq!(s.hovered(), None);
}

#[test]
fn reactivating_open_panel_is_a_no_op() {
    let mut s = state();
    s.activate("a").unwrap();
    assert_eq!(s.activate("a").unwrap(), DisclosureEffect::Unchanged);
    assert_eq!(s.key("a", Key::Tab).unwrap(), DisclosureEffect::Unchanged);
    assert!(s.is_detail_open("a"));
}
