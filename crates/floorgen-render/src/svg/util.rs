// Shared SVG formatting helpers.

use std::fmt::Write as _;

pub(super) fn fmt(v: f64) -> String {
    let mut out = String::new();
    fmt_into(&mut out, v);
    out
}

pub(super) fn fmt_into(out: &mut String, v: f64) {
    // Coordinates are emitted with at most 3 fractional digits; `-0` and float noise collapse to
    // `0` so identical layouts serialize to identical bytes. Rounding stays in `f64` so large
    // coordinates keep their magnitude.
    if !v.is_finite() || v.abs() < 0.0005 {
        out.push('0');
        return;
    }

    // Past 1e15 an `f64` has no fractional digits left to round.
    let r = if v.abs() < 1e15 {
        (v * 1000.0).round() / 1000.0
    } else {
        v
    };
    if r == 0.0 {
        out.push('0');
        return;
    }
    let _ = write!(out, "{r}");
}

/// Area captions: always two decimals.
pub(super) fn fmt_area(v: f64) -> String {
    format!("{v:.2}")
}

pub(super) fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    escape_xml_into(&mut out, text);
    out
}

pub(super) fn escape_xml_into(out: &mut String, text: &str) {
    let bytes = text.as_bytes();
    let mut start = 0usize;
    for (i, &b) in bytes.iter().enumerate() {
        let esc = match b {
            b'&' => Some("&amp;"),
            b'<' => Some("&lt;"),
            b'>' => Some("&gt;"),
            b'"' => Some("&quot;"),
            b'\'' => Some("&#39;"),
            _ => None,
        };
        let Some(esc) = esc else {
            continue;
        };
        if start < i {
            out.push_str(&text[start..i]);
        }
        out.push_str(esc);
        start = i + 1;
    }
    if start < text.len() {
        out.push_str(&text[start..]);
    }
}

/// Smallest `{1, 2, 5} * 10^k` step that keeps an axis of `span` at or under `max_ticks` ticks.
pub(super) fn nice_tick_step(span: f64, max_ticks: u32) -> f64 {
    if !(span.is_finite() && span > 0.0) {
        return 1.0;
    }
    let raw = span / f64::from(max_ticks.max(1));
    let magnitude = 10f64.powf(raw.log10().floor());
    [1.0, 2.0, 5.0, 10.0]
        .into_iter()
        .map(|m| m * magnitude)
        .find(|step| *step >= raw)
        .unwrap_or(10.0 * magnitude)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fmt_trims_and_rounds() {
        assert_eq!(fmt(12.0), "12");
        assert_eq!(fmt(12.5), "12.5");
        assert_eq!(fmt(1.23456), "1.235");
        assert_eq!(fmt(-0.0001), "0");
        assert_eq!(fmt(-3.25), "-3.25");
        assert_eq!(fmt(f64::NAN), "0");
    }

    #[test]
    fn fmt_keeps_large_magnitudes_distinct() {
        assert_eq!(fmt(1e16), "10000000000000000");
        assert_ne!(fmt(1e19), fmt(2e19));
        assert_ne!(fmt(-9.3e15), fmt(-9.4e15));
        assert_ne!(fmt(f64::MAX), "0");
    }

    #[test]
    fn escape_covers_markup_characters() {
        assert_eq!(escape_xml(r#"a<b>&"c'"#), "a&lt;b&gt;&amp;&quot;c&#39;");
        assert_eq!(escape_xml("核心筒"), "核心筒");
    }

    #[test]
    fn tick_steps_are_round_numbers() {
        assert_eq!(nice_tick_step(40.0, 8), 5.0);
        assert_eq!(nice_tick_step(9.0, 8), 2.0);
        assert_eq!(nice_tick_step(160.0, 8), 20.0);
        assert_eq!(nice_tick_step(0.0, 8), 1.0);
    }
}
