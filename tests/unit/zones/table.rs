use super::*;

#[test]
fn reference_table_matches_face_layout() {
    let t = ZoneTable::reference();
    assert_eq!(t.len(), 14);
    assert_eq!(t.canvas(), Canvas::new(480, 640));

    let names: Vec<&str> = t.zones().iter().map(|z| z.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "leftEye1",
            "leftEye2",
            "leftEye3",
            "leftEye4",
            "leftEye5",
            "leftEye6",
            "rightEye1",
            "rightEye2",
            "rightEye3",
            "rightEye4",
            "rightEye5",
            "rightEye6",
            "nose",
            "mouth",
        ]
    );

    assert_eq!(t.get("leftEye5"), Some(&Zone::new("leftEye5", 90, 136, 40, 40)));
    assert_eq!(
        t.get("rightEye3"),
        Some(&Zone::new("rightEye3", 370, 96, 40, 40))
    );
    assert_eq!(t.get("nose"), Some(&Zone::new("nose", 168, 256, 144, 128)));
    assert_eq!(t.get("mouth"), Some(&Zone::new("mouth", 120, 384, 240, 128)));
    assert_eq!(t.get("chin"), None);
}

#[test]
fn reference_table_passes_its_own_validation() {
    let t = ZoneTable::reference();
    let rebuilt = ZoneTable::new(t.canvas(), t.zones().to_vec()).unwrap();
    assert_eq!(rebuilt, t);
}

#[test]
fn rejects_out_of_bounds_zone() {
    let err = ZoneTable::new(Canvas::new(100, 100), vec![Zone::new("a", 90, 0, 20, 10)])
        .unwrap_err();
    assert!(err.to_string().contains("exceeds"));
}

#[test]
fn rejects_duplicate_and_degenerate_zones() {
    let dup = ZoneTable::new(
        Canvas::new(100, 100),
        vec![Zone::new("a", 0, 0, 10, 10), Zone::new("a", 10, 0, 10, 10)],
    );
    assert!(dup.is_err());

    let flat = ZoneTable::new(Canvas::new(100, 100), vec![Zone::new("a", 0, 0, 0, 10)]);
    assert!(flat.is_err());

    let unnamed = ZoneTable::new(Canvas::new(100, 100), vec![Zone::new(" ", 0, 0, 1, 1)]);
    assert!(unnamed.is_err());
}

#[test]
fn deserialization_runs_validation() {
    let ok = r#"{"canvas":{"width":10,"height":10},"zones":[{"name":"a","x":0,"y":0,"width":5,"height":5}]}"#;
    let t: ZoneTable = serde_json::from_str(ok).unwrap();
    assert_eq!(t.len(), 1);

    let bad = r#"{"canvas":{"width":10,"height":10},"zones":[{"name":"a","x":8,"y":0,"width":5,"height":5}]}"#;
    assert!(serde_json::from_str::<ZoneTable>(bad).is_err());
}

#[test]
fn serialized_table_round_trips() {
    let t = ZoneTable::reference();
    let json = serde_json::to_string(&t).unwrap();
    let back: ZoneTable = serde_json::from_str(&json).unwrap();
    assert_eq!(back, t);
}
