use super::*;
use serde_json::json;

fn sub01() -> Value {
    json!({
        "id": "sub-01",
        "name": "Substation 01",
        "type": "substation",
        "position": { "x": 410, "y": 220 },
        "description": "500kV primary feed",
        "metadata": { "voltage": "500kV", "status": "operational" }
    })
}

#[test]
fn drops_record_missing_position_and_keeps_the_rest() {
    let doc = json!({
        "hotspots": [
            sub01(),
            { "id": "dc-01", "name": "Data Center 01", "type": "datacenter" }
        ]
    });

    let out = load_hotspots(&doc).unwrap();
    assert_eq!(out.catalog.len(), 1);
    assert!(out.catalog.contains("sub-01"));
    assert!(!out.catalog.contains("dc-01"));

    assert_eq!(out.rejected.len(), 1);
    let err = &out.rejected[0];
    assert_eq!(err.record_id.as_deref(), Some("dc-01"));
    assert_eq!(err.field, "position");
    assert_eq!(err.index, 1);
    let msg = err.to_string();
    assert!(msg.contains("$.hotspots[1].position"), "{msg}");
    assert!(msg.contains("dc-01"), "{msg}");
}

#[test]
fn reports_each_missing_required_field() {
    let doc = json!([
        { "name": "no id", "type": "other", "position": { "x": 1, "y": 1 } },
        { "id": "a", "type": "other", "position": { "x": 1, "y": 1 } },
        { "id": "b", "name": "B", "position": { "x": 1, "y": 1 } },
        { "id": "c", "name": "C", "type": "other", "position": { "x": "1", "y": 1 } },
        { "id": "d", "name": "D", "type": "other", "position": { "x": 1, "y": -4 } },
        "not an object"
    ]);

    let out = load_hotspots(&doc).unwrap();
    assert!(out.catalog.is_empty());
    let fields: Vec<_> = out
        .rejected
        .iter()
        .map(|e| (e.record_id.as_deref(), e.field.as_str()))
        .collect();
    assert_eq!(
        fields,
        vec![
            (None, "id"),
            (Some("a"), "name"),
            (Some("b"), "type"),
            (Some("c"), "position.x"),
            (Some("d"), "position.y"),
            (None, ""),
        ]
    );
}

#[test]
fn duplicate_ids_keep_the_first_record() {
    let mut dup = sub01();
    dup["name"] = json!("Imposter");
    let out = load_hotspots(&json!({ "hotspots": [sub01(), dup] })).unwrap();
    assert_eq!(out.catalog.len(), 1);
    assert_eq!(out.catalog.get("sub-01").unwrap().name, "Substation 01");
    assert_eq!(out.rejected[0].message, "duplicate hotspot id");
}

#[test]
fn absent_or_null_metadata_is_empty() {
    let doc = json!([
        { "id": "a", "name": "A", "type": "powerplant", "position": { "x": 0, "y": 0 } },
        { "id": "b", "name": "B", "type": "powerplant", "position": { "x": 0, "y": 0 }, "metadata": null }
    ]);
    let out = load_hotspots(&doc).unwrap();
    assert!(out.rejected.is_empty());
    for h in out.catalog.iter() {
        assert!(h.metadata.is_empty());
        assert!(h.metadata.rows().is_empty());
        assert_eq!(h.description, None);
    }
}

#[test]
fn unknown_tags_degrade_gracefully() {
    let doc = json!([{
        "id": "x",
        "name": "X",
        "type": "windfarm",
        "position": { "x": 5.5, "y": 6 },
        "metadata": { "status": "decommissioned", "capacity": 120, "voltage": ["bad"] }
    }]);
    let out = load_hotspots(&doc).unwrap();
    let h = out.catalog.get("x").unwrap();
    assert_eq!(h.kind, HotspotKind::Other);
    assert_eq!(h.position, Point::new(5.5, 6.0));
    assert_eq!(h.metadata.status, None);
    assert_eq!(h.metadata.capacity.as_deref(), Some("120"));
    assert_eq!(h.metadata.voltage, None);
}

#[test]
fn wrong_document_shape_is_a_validation_error() {
    assert!(matches!(
        load_hotspots(&json!({ "items": [] })),
        Err(OverlayError::Validation(_))
    ));
    assert!(matches!(
        load_hotspots(&json!(42)),
        Err(OverlayError::Validation(_))
    ));
    assert!(matches!(
        load_hotspots_str("{ nope"),
        Err(OverlayError::Serde(_))
    ));
}

#[test]
fn catalog_preserves_fixture_order() {
    let doc = json!([
        { "id": "z", "name": "Z", "type": "other", "position": { "x": 0, "y": 0 } },
        { "id": "a", "name": "A", "type": "other", "position": { "x": 0, "y": 0 } }
    ]);
    let out = load_hotspots(&doc).unwrap();
    let ids: Vec<_> = out.catalog.iter().map(|h| h.id.as_str()).collect();
    assert_eq!(ids, vec!["z", "a"]);
}

#[test]
fn record_errors_convert_to_validation_errors() {
    let doc = json!([{ "id": "sub-02", "name": "S", "type": "substation" }]);
    let mut out = load_hotspots(&doc).unwrap();
    let err: OverlayError = out.rejected.remove(0).into();
    let OverlayError::Validation(msg) = err else {
        panic!("expected validation error");
    };
    assert_eq!(
        msg,
        "$.hotspots[0].position (hotspot 'sub-02'): missing required field"
    );
}
