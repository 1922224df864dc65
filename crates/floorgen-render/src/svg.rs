//! SVG output for [`FloorPlanLayout`](crate::model::FloorPlanLayout).

mod floor_plan;
mod util;

use floorgen_core::ArrangementType;

pub use floor_plan::render_floor_plan_svg;

/// Converts an arbitrary string into a conservative SVG `id` token suitable for embedding
/// multiple floor plans in the same document.
///
/// The root `<svg id="...">` value prefixes internal ids like `<id>-unit-3` and scopes the
/// embedded stylesheet (`#<id> .unit`), so it must be both a valid XML attribute value and a
/// plain CSS identifier.
///
/// This helper:
/// - trims whitespace
/// - replaces anything other than ASCII letters, digits, `-` and `_` with `-`
/// - ensures the id starts with an ASCII letter by prefixing `f-` when needed
pub fn sanitize_svg_id(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return "f-untitled".to_string();
    }

    let mut out = String::with_capacity(raw.len() + 4);
    for ch in raw.chars() {
        let ok = ch.is_ascii_alphanumeric() || ch == '-' || ch == '_';
        out.push(if ok { ch } else { '-' });
    }

    let starts_ok = out.chars().next().is_some_and(|c| c.is_ascii_alphabetic());
    if !starts_ok {
        out.insert_str(0, "f-");
    }

    while out.contains("--") {
        out = out.replace("--", "-");
    }
    let out = out.trim_matches('-');
    if out.is_empty() || out == "f" {
        return "f-untitled".to_string();
    }
    out.to_string()
}

/// Fill and stroke colors for the three drawn categories.
#[derive(Debug, Clone)]
pub struct SvgPalette {
    pub core_fill: String,
    pub unit_fill: String,
    pub balcony_fill: String,
    pub stroke: String,
    pub background: String,
}

impl Default for SvgPalette {
    fn default() -> Self {
        Self {
            core_fill: "#f08080".to_string(),
            unit_fill: "#add8e6".to_string(),
            balcony_fill: "#90ee90".to_string(),
            stroke: "#000000".to_string(),
            background: "white".to_string(),
        }
    }
}

/// User-visible strings. [`SvgLabels::zh_tw`] gives the Traditional Chinese set.
#[derive(Debug, Clone)]
pub struct SvgLabels {
    pub title: String,
    pub arrangement: String,
    /// Names for [`ArrangementType::ALL`], in order. Missing entries use
    /// [`ArrangementType::label`].
    pub arrangement_names: Vec<String>,
    pub core: String,
    pub unit_prefix: String,
    pub unit_legend: String,
    pub balcony: String,
    pub width_axis: String,
    pub length_axis: String,
    pub units_caption: String,
    pub public_area_caption: String,
    pub display_area_unit: String,
}

impl Default for SvgLabels {
    fn default() -> Self {
        Self {
            title: "Floor plan layout".to_string(),
            arrangement: "arrangement".to_string(),
            arrangement_names: Vec::new(),
            core: "Core".to_string(),
            unit_prefix: "Unit ".to_string(),
            unit_legend: "Residential unit".to_string(),
            balcony: "Balcony".to_string(),
            width_axis: "width (m)".to_string(),
            length_axis: "length (m)".to_string(),
            units_caption: "units".to_string(),
            public_area_caption: "public area".to_string(),
            display_area_unit: "ping".to_string(),
        }
    }
}

impl SvgLabels {
    pub fn zh_tw() -> Self {
        Self {
            title: "建物平面配置圖".to_string(),
            arrangement: "排列型態".to_string(),
            arrangement_names: ["僅左側", "僅右側", "僅上側", "僅下側", "左右兩側", "上下兩側"]
                .into_iter()
                .map(str::to_string)
                .collect(),
            core: "核心筒".to_string(),
            unit_prefix: "戶".to_string(),
            unit_legend: "住戶單元".to_string(),
            balcony: "陽台".to_string(),
            width_axis: "寬度 (公尺)".to_string(),
            length_axis: "長度 (公尺)".to_string(),
            units_caption: "戶".to_string(),
            public_area_caption: "公共面積".to_string(),
            display_area_unit: "坪".to_string(),
        }
    }

    pub fn arrangement_name(&self, arrangement: ArrangementType) -> &str {
        ArrangementType::ALL
            .iter()
            .position(|a| *a == arrangement)
            .and_then(|i| self.arrangement_names.get(i))
            .map(String::as_str)
            .unwrap_or_else(|| arrangement.label())
    }
}

#[derive(Debug, Clone)]
pub struct SvgRenderOptions {
    /// Root `<svg id>`; also prefixes internal ids. Defaults to `floorgen`. Passed through
    /// [`sanitize_svg_id`] before use.
    pub diagram_id: Option<String>,
    /// Drawing scale. Default `20` px per metre.
    pub pixels_per_metre: f64,
    pub font_family: String,
    pub font_size: f64,
    pub show_axes: bool,
    pub palette: SvgPalette,
    pub labels: SvgLabels,
}

impl Default for SvgRenderOptions {
    fn default() -> Self {
        Self {
            diagram_id: None,
            pixels_per_metre: 20.0,
            font_family: "sans-serif".to_string(),
            font_size: 12.0,
            show_axes: true,
            palette: SvgPalette::default(),
            labels: SvgLabels::default(),
        }
    }
}

