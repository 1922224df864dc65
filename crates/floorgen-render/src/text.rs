use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextStyle {
    pub font_family: Option<String>,
    pub font_size: f64,
    pub font_weight: Option<String>,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: None,
            font_size: 12.0,
            font_weight: None,
        }
    }
}

impl TextStyle {
    pub fn sized(font_size: f64) -> Self {
        Self {
            font_size,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
    pub line_count: usize,
}

/// Font handle used by the renderer to size labels and the legend.
///
/// Loading real font files is left to callers; they can wrap their font backend in this trait.
pub trait TextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics;
}

/// Font-free measurer: every terminal column is `char_width_factor` em wide.
///
/// Column widths come from `unicode-width`, so CJK labels measure as two columns per glyph.
#[derive(Debug, Clone, Default)]
pub struct DeterministicTextMeasurer {
    pub char_width_factor: f64,
    pub line_height_factor: f64,
}

impl DeterministicTextMeasurer {
    pub fn normalized_text_lines(text: &str) -> Vec<&str> {
        text.split('\n').collect()
    }
}

impl TextMeasurer for DeterministicTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        let char_width_factor = if self.char_width_factor == 0.0 {
            0.6
        } else {
            self.char_width_factor
        };
        let line_height_factor = if self.line_height_factor == 0.0 {
            1.2
        } else {
            self.line_height_factor
        };

        let lines = Self::normalized_text_lines(text);
        let font_size = style.font_size.max(1.0);
        let max_cols = lines.iter().map(|l| l.width()).max().unwrap_or(0);

        let width = max_cols as f64 * font_size * char_width_factor;
        let height = lines.len() as f64 * font_size * line_height_factor;
        TextMetrics {
            width,
            height,
            line_count: lines.len(),
        }
    }
}
