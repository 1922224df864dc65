use super::util::{escape_xml, fmt, fmt_area, nice_tick_step};
use super::{SvgRenderOptions, sanitize_svg_id};
use crate::model::{Bounds, FloorPlanLayout, Rect};
use crate::text::{TextMeasurer, TextStyle};
use crate::{Error, Result};
use std::fmt::Write as _;

const OUTER_MARGIN: f64 = 16.0;
const LEGEND_GAP: f64 = 24.0;
const LEGEND_PADDING: f64 = 8.0;
const SWATCH: f64 = 14.0;
const TICK_LEN: f64 = 4.0;
const MAX_TICKS: u32 = 8;
const MIN_LABEL_FONT: f64 = 4.0;

/// Maps envelope-local metres (y up) to SVG pixels (y down).
#[derive(Debug, Clone, Copy)]
struct Frame {
    bounds: Bounds,
    scale: f64,
    plot_x: f64,
    plot_y: f64,
}

impl Frame {
    fn x(&self, x: f64) -> f64 {
        self.plot_x + (x - self.bounds.min_x) * self.scale
    }

    fn y(&self, y: f64) -> f64 {
        self.plot_y + (self.bounds.max_y - y) * self.scale
    }

    fn plot_width(&self) -> f64 {
        self.bounds.width() * self.scale
    }

    fn plot_height(&self) -> f64 {
        self.bounds.height() * self.scale
    }

    fn rect_attrs(&self, r: &Rect) -> String {
        format!(
            r#"x="{}" y="{}" width="{}" height="{}""#,
            fmt(self.x(r.xmin)),
            fmt(self.y(r.ymax)),
            fmt(r.width() * self.scale),
            fmt(r.height() * self.scale)
        )
    }
}

fn render_failure(message: impl Into<String>) -> Error {
    Error::RenderFailure {
        message: message.into(),
    }
}

fn check_drawable(layout: &FloorPlanLayout, options: &SvgRenderOptions) -> Result<()> {
    if !(options.pixels_per_metre.is_finite() && options.pixels_per_metre > 0.0) {
        return Err(render_failure(format!(
            "pixels_per_metre must be positive, got {}",
            options.pixels_per_metre
        )));
    }
    if !(options.font_size.is_finite() && options.font_size > 0.0) {
        return Err(render_failure(format!(
            "font_size must be positive, got {}",
            options.font_size
        )));
    }
    if layout.placements.is_empty() {
        return Err(render_failure("layout has no units to draw"));
    }
    let b = &layout.bounds;
    let bounds_ok = [b.min_x, b.min_y, b.max_x, b.max_y]
        .iter()
        .all(|v| v.is_finite())
        && b.width() > 0.0
        && b.height() > 0.0;
    if !bounds_ok {
        return Err(render_failure(format!("degenerate drawing bounds: {b:?}")));
    }
    let all_finite = layout.envelope.rect().is_finite()
        && layout.core_rect().is_finite()
        && layout
            .placements
            .iter()
            .all(|p| p.rect.is_finite() && p.balcony_rect.is_finite());
    if !all_finite {
        return Err(render_failure("layout contains non-finite coordinates"));
    }
    Ok(())
}

/// Font size that fits `text` inside a `w` x `h` pixel box, never above `base`.
fn fitted_font_size(measurer: &dyn TextMeasurer, text: &str, base: f64, w: f64, h: f64) -> f64 {
    let m = measurer.measure(text, &TextStyle::sized(base));
    let mut size = base;
    if m.width > 0.0 && m.width > 0.9 * w {
        size = size.min(base * 0.9 * w / m.width);
    }
    if m.height > 0.0 && m.height > 0.9 * h {
        size = size.min(base * 0.9 * h / m.height);
    }
    size.max(MIN_LABEL_FONT)
}

fn ticks(min: f64, max: f64, step: f64) -> Vec<f64> {
    let first = (min / step).ceil() as i64;
    let last = (max / step).floor() as i64;
    (first..=last).map(|k| k as f64 * step).collect()
}

fn css(id: &str, options: &SvgRenderOptions) -> String {
    let p = &options.palette;
    format!(
        "#{id}{{font-family:{font};font-size:{size}px;}}\
#{id} .frame{{fill:none;stroke:#333333;stroke-width:1;}}\
#{id} .envelope{{fill:none;stroke:{stroke};stroke-width:1.5;}}\
#{id} .core{{fill:{core};stroke:{stroke};stroke-width:1;}}\
#{id} .unit{{fill:{unit};stroke:{stroke};stroke-width:1;}}\
#{id} .balcony{{fill:{balcony};stroke:{stroke};stroke-width:1;}}\
#{id} .tick{{stroke:#333333;stroke-width:1;}}\
#{id} text{{fill:#333333;}}\
#{id} .label{{text-anchor:middle;dominant-baseline:central;}}\
#{id} .title{{font-size:{title_size}px;text-anchor:middle;}}\
#{id} .legend-frame{{fill:white;stroke:#cccccc;stroke-width:1;}}",
        id = id,
        font = escape_xml(&options.font_family),
        size = fmt(options.font_size),
        title_size = fmt(options.font_size * 1.25),
        stroke = escape_xml(&p.stroke),
        core = escape_xml(&p.core_fill),
        unit = escape_xml(&p.unit_fill),
        balcony = escape_xml(&p.balcony_fill),
    )
}

pub fn render_floor_plan_svg(
    layout: &FloorPlanLayout,
    measurer: &dyn TextMeasurer,
    options: &SvgRenderOptions,
) -> Result<String> {
    check_drawable(layout, options)?;

    let labels = &options.labels;
    let font = options.font_size;
    let id = sanitize_svg_id(options.diagram_id.as_deref().unwrap_or("floorgen"));
    let req = &layout.request;

    let title = format!(
        "{} ({}: {})",
        labels.title,
        labels.arrangement,
        labels.arrangement_name(req.arrangement)
    );
    let summary = format!(
        "{} {}, {} m² ({} {}) each, {} {} m²",
        req.unit_count,
        labels.units_caption,
        fmt_area(layout.unit.target_area_m2),
        fmt_area(req.display_area(layout.unit.target_area_m2)),
        labels.display_area_unit,
        labels.public_area_caption,
        fmt_area(layout.unit.public_area_m2),
    );
    let title_m = measurer.measure(&title, &TextStyle::sized(font * 1.25));
    let summary_m = measurer.measure(&summary, &TextStyle::sized(font));
    let line_h = measurer.measure("0", &TextStyle::sized(font)).height;

    let b = layout.bounds;
    let x_ticks_step = nice_tick_step(b.width(), MAX_TICKS);
    let y_ticks_step = nice_tick_step(b.height(), MAX_TICKS);
    let x_ticks = ticks(b.min_x, b.max_x, x_ticks_step);
    let y_ticks = ticks(b.min_y, b.max_y, y_ticks_step);

    let (margin_left, margin_bottom) = if options.show_axes {
        let widest_tick = y_ticks
            .iter()
            .map(|v| measurer.measure(&fmt(*v), &TextStyle::sized(font)).width)
            .fold(0.0, f64::max);
        (
            OUTER_MARGIN + line_h + widest_tick + TICK_LEN + 6.0,
            OUTER_MARGIN + 2.0 * line_h + TICK_LEN + 6.0,
        )
    } else {
        (OUTER_MARGIN, OUTER_MARGIN)
    };
    let margin_top = OUTER_MARGIN + title_m.height + summary_m.height + 8.0;

    let frame = Frame {
        bounds: b,
        scale: options.pixels_per_metre,
        plot_x: margin_left,
        plot_y: margin_top,
    };

    let legend_entries = [
        ("core", labels.core.as_str()),
        ("unit", labels.unit_legend.as_str()),
        ("balcony", labels.balcony.as_str()),
    ];
    let legend_text_w = legend_entries
        .iter()
        .map(|(_, t)| measurer.measure(t, &TextStyle::sized(font)).width)
        .fold(0.0, f64::max);
    let legend_row_h = SWATCH.max(line_h) + 4.0;
    let legend_w = 2.0 * LEGEND_PADDING + SWATCH + 6.0 + legend_text_w;
    let legend_h = 2.0 * LEGEND_PADDING + legend_row_h * legend_entries.len() as f64;
    let legend_x = frame.plot_x + frame.plot_width() + LEGEND_GAP;
    let legend_y = frame.plot_y + (frame.plot_height() - legend_h).max(0.0) / 2.0;

    let width = (legend_x + legend_w + OUTER_MARGIN)
        .max(title_m.width.max(summary_m.width) + 2.0 * OUTER_MARGIN);
    let height = (frame.plot_y + frame.plot_height() + margin_bottom)
        .max(legend_y + legend_h + OUTER_MARGIN);

    let mut out = String::new();
    let _ = write!(
        &mut out,
        r#"<svg id="{id}" width="{w}" height="{h}" xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}" role="graphics-document document" aria-roledescription="floor-plan" aria-labelledby="chart-title-{id}">"#,
        id = id,
        w = fmt(width),
        h = fmt(height),
    );
    let _ = write!(
        &mut out,
        r#"<title id="chart-title-{id}">{text}</title>"#,
        id = id,
        text = escape_xml(&title)
    );
    let _ = write!(&mut out, "<style>{}</style>", css(&id, options));
    let _ = write!(
        &mut out,
        r#"<rect class="background" x="0" y="0" width="{w}" height="{h}" fill="{bg}"/>"#,
        w = fmt(width),
        h = fmt(height),
        bg = escape_xml(&options.palette.background)
    );

    let center_x = width / 2.0;
    let _ = write!(
        &mut out,
        r#"<text class="title" x="{x}" y="{y}">{text}</text>"#,
        x = fmt(center_x),
        y = fmt(OUTER_MARGIN + title_m.height * 0.8),
        text = escape_xml(&title)
    );
    let _ = write!(
        &mut out,
        r#"<text class="summary" x="{x}" y="{y}" style="text-anchor: middle;">{text}</text>"#,
        x = fmt(center_x),
        y = fmt(OUTER_MARGIN + title_m.height + summary_m.height * 0.8),
        text = escape_xml(&summary)
    );

    out.push_str(r#"<g class="plot">"#);
    let _ = write!(
        &mut out,
        r#"<rect class="frame" x="{x}" y="{y}" width="{w}" height="{h}"/>"#,
        x = fmt(frame.plot_x),
        y = fmt(frame.plot_y),
        w = fmt(frame.plot_width()),
        h = fmt(frame.plot_height())
    );

    if options.show_axes {
        render_axes(&mut out, &frame, &x_ticks, &y_ticks, line_h, options);
    }

    let _ = write!(
        &mut out,
        r#"<rect class="envelope" {}/>"#,
        frame.rect_attrs(&layout.envelope.rect())
    );

    let core = layout.core_rect();
    let (ccx, ccy) = core.center();
    let core_font = fitted_font_size(
        measurer,
        &labels.core,
        font,
        core.width() * frame.scale,
        core.height() * frame.scale,
    );
    let _ = write!(
        &mut out,
        r#"<g class="core-group"><rect class="core" {attrs}/><text class="label" x="{x}" y="{y}" style="font-size: {fs}px;">{text}</text></g>"#,
        attrs = frame.rect_attrs(&core),
        x = fmt(frame.x(ccx)),
        y = fmt(frame.y(ccy)),
        fs = fmt(core_font),
        text = escape_xml(&labels.core)
    );

    for p in &layout.placements {
        let label = format!("{}{}", labels.unit_prefix, p.unit_index);
        let (ux, uy) = p.rect.center();
        let fs = fitted_font_size(
            measurer,
            &label,
            font * 0.8,
            p.rect.width() * frame.scale,
            p.rect.height() * frame.scale,
        );
        let _ = write!(
            &mut out,
            r#"<g class="unit-group" id="{id}-unit-{n}" data-side="{side}"><rect class="unit" {attrs}/><text class="label" x="{x}" y="{y}" style="font-size: {fs}px;">{text}</text></g>"#,
            id = id,
            n = p.unit_index,
            side = p.side,
            attrs = frame.rect_attrs(&p.rect),
            x = fmt(frame.x(ux)),
            y = fmt(frame.y(uy)),
            fs = fmt(fs),
            text = escape_xml(&label)
        );
    }

    for p in &layout.placements {
        let _ = write!(
            &mut out,
            r#"<rect class="balcony" id="{id}-balcony-{n}" {attrs}/>"#,
            id = id,
            n = p.unit_index,
            attrs = frame.rect_attrs(&p.balcony_rect)
        );
    }
    out.push_str("</g>");

    let _ = write!(
        &mut out,
        r#"<g class="legend" transform="translate({x},{y})"><rect class="legend-frame" x="0" y="0" width="{w}" height="{h}"/>"#,
        x = fmt(legend_x),
        y = fmt(legend_y),
        w = fmt(legend_w),
        h = fmt(legend_h)
    );
    for (i, (class, text)) in legend_entries.iter().enumerate() {
        let row_y = LEGEND_PADDING + legend_row_h * i as f64;
        let _ = write!(
            &mut out,
            r#"<rect class="{class}" x="{x}" y="{y}" width="{s}" height="{s}"/><text x="{tx}" y="{ty}" style="dominant-baseline: central;">{text}</text>"#,
            class = class,
            x = fmt(LEGEND_PADDING),
            y = fmt(row_y + (legend_row_h - SWATCH) / 2.0),
            s = fmt(SWATCH),
            tx = fmt(LEGEND_PADDING + SWATCH + 6.0),
            ty = fmt(row_y + legend_row_h / 2.0),
            text = escape_xml(text)
        );
    }
    out.push_str("</g></svg>\n");

    tracing::debug!(
        units = layout.placements.len(),
        bytes = out.len(),
        "rendered floor plan svg"
    );
    Ok(out)
}

fn render_axes(
    out: &mut String,
    frame: &Frame,
    x_ticks: &[f64],
    y_ticks: &[f64],
    line_h: f64,
    options: &SvgRenderOptions,
) {
    let labels = &options.labels;
    let bottom = frame.plot_y + frame.plot_height();
    let left = frame.plot_x;

    out.push_str(r#"<g class="axis axis-x">"#);
    for v in x_ticks {
        let x = frame.x(*v);
        let _ = write!(
            out,
            r#"<line class="tick" x1="{x}" y1="{y1}" x2="{x}" y2="{y2}"/><text x="{x}" y="{ty}" style="text-anchor: middle;">{text}</text>"#,
            x = fmt(x),
            y1 = fmt(bottom),
            y2 = fmt(bottom + TICK_LEN),
            ty = fmt(bottom + TICK_LEN + line_h * 0.9),
            text = fmt(*v)
        );
    }
    let _ = write!(
        out,
        r#"<text class="axis-caption" x="{x}" y="{y}" style="text-anchor: middle;">{text}</text></g>"#,
        x = fmt(frame.plot_x + frame.plot_width() / 2.0),
        y = fmt(bottom + TICK_LEN + line_h * 1.9 + 4.0),
        text = escape_xml(&labels.width_axis)
    );

    out.push_str(r#"<g class="axis axis-y">"#);
    for v in y_ticks {
        let y = frame.y(*v);
        let _ = write!(
            out,
            r#"<line class="tick" x1="{x1}" y1="{y}" x2="{x2}" y2="{y}"/><text x="{tx}" y="{y}" style="text-anchor: end; dominant-baseline: central;">{text}</text>"#,
            x1 = fmt(left - TICK_LEN),
            x2 = fmt(left),
            y = fmt(y),
            tx = fmt(left - TICK_LEN - 2.0),
            text = fmt(*v)
        );
    }
    let cy = frame.plot_y + frame.plot_height() / 2.0;
    let cx = OUTER_MARGIN + line_h / 2.0;
    let _ = write!(
        out,
        r#"<text class="axis-caption" x="{x}" y="{y}" transform="rotate(-90,{x},{y})" style="text-anchor: middle; dominant-baseline: central;">{text}</text></g>"#,
        x = fmt(cx),
        y = fmt(cy),
        text = escape_xml(&labels.length_axis)
    );
}
