use floorgen::render::{
    FloorPlanRenderer, HeadlessError, LayoutOptions, SvgLabels, SvgRenderOptions, layout,
    layout_json_sync, render_svg, render_svg_sync, sanitize_svg_id,
};
use floorgen::{ArrangementType, LayoutRequest};

fn scenario_a() -> LayoutRequest {
    LayoutRequest::new(ArrangementType::BothTopBottom, 1000.0, 10, 0.2)
        .with_unit_spacing(0.5)
        .with_balcony_depth(1.5)
}

#[test]
fn sanitize_svg_id_produces_stable_tokens() {
    assert_eq!(sanitize_svg_id("  tower A  "), "tower-A");
    assert_eq!(sanitize_svg_id("3rd floor"), "f-3rd-floor");
    assert_eq!(sanitize_svg_id(""), "f-untitled");
    assert_eq!(sanitize_svg_id("///"), "f-untitled");
    assert_eq!(sanitize_svg_id("plan_1.v2"), "plan_1-v2");
    assert_eq!(sanitize_svg_id("a:b#c"), "a-b-c");
}

#[test]
fn async_helpers_match_sync_output() {
    let req = scenario_a();
    let layout_opts = LayoutOptions::default();
    let svg_opts = SvgRenderOptions::default();

    let sync_svg = render_svg_sync(&req, &layout_opts, &svg_opts).expect("render ok");
    let async_svg = futures::executor::block_on(render_svg(&req, &layout_opts, &svg_opts))
        .expect("render ok");
    assert_eq!(sync_svg, async_svg);

    let plan = futures::executor::block_on(layout(&req, &layout_opts)).expect("layout ok");
    assert_eq!(plan.placements.len(), 10);
}

#[test]
fn renderer_uses_sanitized_diagram_id() {
    let renderer = FloorPlanRenderer::new();
    let svg = renderer
        .render_svg_sync_with_diagram_id(&scenario_a(), "block 7")
        .expect("render ok");
    let doc = roxmltree::Document::parse(&svg).expect("valid xml");
    assert_eq!(doc.root_element().attribute("id"), Some("block-7"));
    assert!(
        doc.descendants()
            .any(|n| n.attribute("id") == Some("block-7-unit-10"))
    );
}

#[test]
fn renderer_applies_localized_labels() {
    let renderer = FloorPlanRenderer::new().with_labels(SvgLabels::zh_tw());
    let svg = renderer.render_svg_sync(&scenario_a()).expect("render ok");
    assert!(svg.contains("核心筒"));
    assert!(svg.contains("上下兩側"));
}

#[test]
fn wire_document_lays_out_and_serializes() {
    let text = r#"{
        "building_area_m2": 600,
        "arrangement_type": "LR",
        "total_units": 5,
        "public_ratio": 0.25,
        "balcony_depth": 1.0,
        "unit_spacing": 0.5
    }"#;
    let plan = layout_json_sync(text, &LayoutOptions::default()).expect("layout ok");
    let json = serde_json::to_value(&plan).expect("serialize");
    let placements = json["placements"].as_array().expect("placements array");
    assert_eq!(placements.len(), 5);
    assert_eq!(placements[0]["side"], "left");
    assert_eq!(placements[4]["side"], "right");
}

#[test]
fn request_errors_are_classified() {
    let renderer = FloorPlanRenderer::new();

    let err = renderer
        .render_json_svg_sync(
            r#"{"building_area_m2": 500, "arrangement_type": "X", "total_units": 4,
                "public_ratio": 0.2, "balcony_depth": 1, "unit_spacing": 0.5}"#,
        )
        .unwrap_err();
    assert!(err.is_request_error());
    assert!(matches!(
        err,
        HeadlessError::Request(floorgen::Error::UnsupportedArrangement { .. })
    ));

    let lonely = LayoutRequest::new(ArrangementType::BothLeftRight, 500.0, 1, 0.2);
    let err = renderer.render_svg_sync(&lonely).unwrap_err();
    assert!(err.is_request_error());

    let svg = SvgRenderOptions {
        pixels_per_metre: f64::NAN,
        ..SvgRenderOptions::default()
    };
    let err = render_svg_sync(&scenario_a(), &LayoutOptions::default(), &svg).unwrap_err();
    assert!(!err.is_request_error());
}
