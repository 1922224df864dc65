#![forbid(unsafe_code)]

use crate::render::{HeadlessError, LayoutOptions, SvgRenderOptions};
use floorgen_core::LayoutRequest;

#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    #[error(transparent)]
    Headless(#[from] HeadlessError),
    #[error("failed to parse SVG")]
    SvgParse,
    #[error("invalid raster scale {0}")]
    Scale(f32),
    #[error("failed to allocate pixmap for raster rendering")]
    PixmapAlloc,
    #[error("failed to encode PNG")]
    PngEncode,
    #[error("invalid background color `{0}`")]
    Background(String),
    #[error("JPG rendering requires an opaque background color (e.g. white)")]
    JpegOpaqueBackgroundRequired,
    #[error("failed to encode JPG")]
    JpegEncode,
    #[error("failed to convert SVG to PDF")]
    PdfConvert,
}

impl RasterError {
    pub fn is_request_error(&self) -> bool {
        match self {
            Self::Headless(err) => err.is_request_error(),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, RasterError>;

#[derive(Debug, Clone)]
pub struct RasterOptions {
    pub scale: f32,
    pub background: Option<String>,
    pub jpeg_quality: u8,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            scale: 1.0,
            background: None,
            jpeg_quality: 90,
        }
    }
}

pub fn render_png_sync(
    request: &LayoutRequest,
    layout_options: &LayoutOptions,
    svg_options: &SvgRenderOptions,
    raster: &RasterOptions,
) -> Result<Vec<u8>> {
    let svg = super::render_svg_sync(request, layout_options, svg_options)?;
    svg_to_png(&svg, raster)
}

pub fn render_jpeg_sync(
    request: &LayoutRequest,
    layout_options: &LayoutOptions,
    svg_options: &SvgRenderOptions,
    raster: &RasterOptions,
) -> Result<Vec<u8>> {
    let svg = super::render_svg_sync(request, layout_options, svg_options)?;
    svg_to_jpeg(&svg, raster)
}

pub fn render_pdf_sync(
    request: &LayoutRequest,
    layout_options: &LayoutOptions,
    svg_options: &SvgRenderOptions,
) -> Result<Vec<u8>> {
    let svg = super::render_svg_sync(request, layout_options, svg_options)?;
    svg_to_pdf(&svg)
}

pub fn svg_to_png(svg: &str, options: &RasterOptions) -> Result<Vec<u8>> {
    let background = match options.background.as_deref() {
        Some(bg) => Some(parse_color(bg)?),
        None => None,
    };
    let pixmap = svg_to_pixmap(svg, options.scale, background)?;
    pixmap.encode_png().map_err(|_| RasterError::PngEncode)
}

pub fn svg_to_jpeg(svg: &str, options: &RasterOptions) -> Result<Vec<u8>> {
    let color = parse_color(options.background.as_deref().unwrap_or("white"))?;
    if color.alpha() != 1.0 {
        return Err(RasterError::JpegOpaqueBackgroundRequired);
    }

    let pixmap = svg_to_pixmap(svg, options.scale, Some(color))?;
    let (w, h) = (pixmap.width(), pixmap.height());

    // Opaque fill means every alpha byte is 255.
    let rgb: Vec<u8> = pixmap
        .data()
        .chunks_exact(4)
        .flat_map(|px| [px[0], px[1], px[2]])
        .collect();

    let mut out = Vec::new();
    let mut enc =
        image::codecs::jpeg::JpegEncoder::new_with_quality(&mut out, options.jpeg_quality);
    enc.encode(&rgb, w, h, image::ExtendedColorType::Rgb8)
        .map_err(|_| RasterError::JpegEncode)?;
    Ok(out)
}

pub fn svg_to_pdf(svg: &str) -> Result<Vec<u8>> {
    let mut opt = svg2pdf::usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();
    opt.font_family = "Arial".to_string();

    let tree = svg2pdf::usvg::Tree::from_str(svg, &opt).map_err(|_| RasterError::SvgParse)?;

    svg2pdf::to_pdf(
        &tree,
        svg2pdf::ConversionOptions::default(),
        svg2pdf::PageOptions::default(),
    )
    .map_err(|_| RasterError::PdfConvert)
}

fn svg_to_pixmap(
    svg: &str,
    scale: f32,
    background: Option<tiny_skia::Color>,
) -> Result<tiny_skia::Pixmap> {
    if !(scale.is_finite() && scale > 0.0) {
        return Err(RasterError::Scale(scale));
    }

    let mut opt = usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();
    opt.font_family = "Arial".to_string();

    let tree = usvg::Tree::from_str(svg, &opt).map_err(|_| RasterError::SvgParse)?;

    // Floor plan documents always carry a `0 0 w h` viewBox, so the tree size is the canvas.
    let size = tree.size();
    let width_px = (size.width() * scale).ceil().max(1.0) as u32;
    let height_px = (size.height() * scale).ceil().max(1.0) as u32;

    let mut pixmap = tiny_skia::Pixmap::new(width_px, height_px).ok_or(RasterError::PixmapAlloc)?;
    if let Some(color) = background {
        pixmap.fill(color);
    }

    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    Ok(pixmap)
}

fn parse_color(text: &str) -> Result<tiny_skia::Color> {
    parse_tiny_skia_color(text).ok_or_else(|| RasterError::Background(text.to_string()))
}

fn parse_tiny_skia_color(text: &str) -> Option<tiny_skia::Color> {
    let s = text.trim().to_ascii_lowercase();
    match s.as_str() {
        "transparent" => return Some(tiny_skia::Color::from_rgba8(0, 0, 0, 0)),
        "white" => return Some(tiny_skia::Color::WHITE),
        "black" => return Some(tiny_skia::Color::BLACK),
        _ => {}
    }

    let hex = s.strip_prefix('#')?;
    let nibble = |c: u8| (c as char).to_digit(16).map(|v| v as u8);
    let bytes = hex.as_bytes();
    let channels: Vec<u8> = match bytes.len() {
        3 | 4 => bytes
            .iter()
            .map(|c| nibble(*c).map(|v| (v << 4) | v))
            .collect::<Option<_>>()?,
        6 | 8 => bytes
            .chunks_exact(2)
            .map(|p| Some((nibble(p[0])? << 4) | nibble(p[1])?))
            .collect::<Option<_>>()?,
        _ => return None,
    };
    let alpha = channels.get(3).copied().unwrap_or(255);
    Some(tiny_skia::Color::from_rgba8(
        channels[0],
        channels[1],
        channels[2],
        alpha,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10" viewBox="0 0 10 10"><rect width="10" height="10" fill="black"/></svg>"#;

    #[test]
    fn svg_to_png_produces_png_signature() {
        let bytes = svg_to_png(SQUARE, &RasterOptions::default()).unwrap();
        assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"));
    }

    #[test]
    fn svg_to_jpeg_produces_jpeg_signature() {
        let bytes = svg_to_jpeg(SQUARE, &RasterOptions::default()).unwrap();
        assert!(bytes.starts_with(&[0xff, 0xd8]));
    }

    #[test]
    fn svg_to_pdf_produces_pdf_signature() {
        let bytes = svg_to_pdf(SQUARE).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn jpeg_rejects_transparent_background() {
        let opts = RasterOptions {
            background: Some("transparent".to_string()),
            ..RasterOptions::default()
        };
        assert!(matches!(
            svg_to_jpeg(SQUARE, &opts),
            Err(RasterError::JpegOpaqueBackgroundRequired)
        ));
    }

    #[test]
    fn unknown_background_is_reported() {
        let opts = RasterOptions {
            background: Some("#12".to_string()),
            ..RasterOptions::default()
        };
        assert!(matches!(
            svg_to_png(SQUARE, &opts),
            Err(RasterError::Background(_))
        ));
    }

    #[test]
    fn parses_short_and_long_hex_colors() {
        let short = parse_tiny_skia_color("#fff").unwrap();
        let long = parse_tiny_skia_color("#FFFFFF80").unwrap();
        assert_eq!(short.to_color_u8().red(), 255);
        assert_eq!(long.to_color_u8().alpha(), 0x80);
        assert!(parse_tiny_skia_color("#ggg").is_none());
    }

    #[test]
    fn non_positive_scale_is_rejected() {
        let opts = RasterOptions {
            scale: 0.0,
            ..RasterOptions::default()
        };
        assert!(matches!(
            svg_to_png(SQUARE, &opts),
            Err(RasterError::Scale(_))
        ));
    }
}
