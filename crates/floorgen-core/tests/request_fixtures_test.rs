use floorgen_core::{ArrangementType, Error, LayoutRequest};
use std::fs;
use std::path::{Path, PathBuf};

fn fixtures_dir(kind: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .and_then(|p| p.parent())
        .expect("expected crates/<name> layout")
        .join("fixtures")
        .join("requests")
        .join(kind)
}

fn load(kind: &str, name: &str) -> Result<LayoutRequest, Error> {
    let path = fixtures_dir(kind).join(name);
    let text = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("read {}: {e}", path.display()));
    LayoutRequest::from_json_str(&text)
}

#[test]
fn every_valid_fixture_parses_and_validates() {
    let mut seen = 0;
    for entry in fs::read_dir(fixtures_dir("valid")).expect("valid fixtures dir") {
        let path = entry.expect("dir entry").path();
        if path.extension().is_none_or(|e| e != "json") {
            continue;
        }
        let text = fs::read_to_string(&path).expect("read fixture");
        let req = LayoutRequest::from_json_str(&text)
            .unwrap_or_else(|e| panic!("{}: {e}", path.display()));
        req.validate().expect("validated request stays valid");
        seen += 1;
    }
    assert!(seen >= 4, "expected the valid fixtures, found {seen}");
}

#[test]
fn every_invalid_fixture_is_rejected() {
    for entry in fs::read_dir(fixtures_dir("invalid")).expect("invalid fixtures dir") {
        let path = entry.expect("dir entry").path();
        let text = fs::read_to_string(&path).expect("read fixture");
        assert!(
            LayoutRequest::from_json_str(&text).is_err(),
            "{} should be rejected",
            path.display()
        );
    }
}

#[test]
fn scenario_a_fixture_matches_builder() {
    let req = load("valid", "scenario_a_tb.json").unwrap();
    let built = LayoutRequest::new(ArrangementType::BothTopBottom, 1000.0, 10, 0.2)
        .with_unit_spacing(0.5)
        .with_balcony_depth(1.5);
    assert_eq!(req, built);
}

#[test]
fn lowercase_code_is_accepted() {
    let req = load("valid", "top_only.json").unwrap();
    assert_eq!(req.arrangement, ArrangementType::Top);
}

#[test]
fn rejection_kinds_name_the_offending_field() {
    let err = load("invalid", "two_sided_single_unit.json").unwrap_err();
    assert!(matches!(err, Error::InvalidParameter { name: "total_units", .. }));

    let err = load("invalid", "zero_public_ratio.json").unwrap_err();
    assert!(matches!(err, Error::InvalidParameter { name: "public_ratio", .. }));

    let err = load("invalid", "negative_spacing.json").unwrap_err();
    assert!(matches!(err, Error::InvalidParameter { name: "unit_spacing", .. }));

    let err = load("invalid", "unknown_arrangement.json").unwrap_err();
    match err {
        Error::UnsupportedArrangement { code } => assert_eq!(code, "X"),
        other => panic!("unexpected error: {other}"),
    }

    let err = load("invalid", "missing_units.json").unwrap_err();
    assert!(matches!(err, Error::Json(_)));
}
