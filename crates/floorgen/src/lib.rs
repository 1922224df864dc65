#![forbid(unsafe_code)]

//! `floorgen` derives building floor plans (core, envelope, units, balconies) from a handful of
//! numeric parameters and renders them headlessly.
//!
//! # Features
//!
//! - `render`: enable layout + SVG rendering (`floorgen::render`)
//! - `raster`: enable PNG/JPG/PDF output via pure-Rust SVG rasterization/conversion

pub use floorgen_core::*;

#[cfg(feature = "render")]
pub mod render {
    pub use floorgen_render::model::{
        Bounds, CoreFootprint, CorePosition, Envelope, FloorPlanLayout, Rect, UnitMetrics,
        UnitPlacement,
    };
    pub use floorgen_render::svg::{SvgLabels, SvgPalette, SvgRenderOptions, sanitize_svg_id};
    pub use floorgen_render::text::{DeterministicTextMeasurer, TextMeasurer, TextStyle};
    pub use floorgen_render::{LayoutOptions, layout_request};

    #[cfg(feature = "raster")]
    pub mod raster;

    #[derive(Debug, thiserror::Error)]
    pub enum HeadlessError {
        #[error(transparent)]
        Request(#[from] floorgen_core::Error),
        #[error(transparent)]
        Render(#[from] floorgen_render::Error),
    }

    impl HeadlessError {
        /// True when the request was rejected (bad parameter or unknown arrangement) rather than
        /// the drawing step failing. HTTP front ends map this to 400 vs 500.
        pub fn is_request_error(&self) -> bool {
            match self {
                Self::Request(_) => true,
                Self::Render(err) => err.is_request_error(),
            }
        }
    }

    pub type Result<T> = std::result::Result<T, HeadlessError>;

    /// Synchronous layout helper (executor-free).
    pub fn layout_sync(
        request: &floorgen_core::LayoutRequest,
        layout_options: &LayoutOptions,
    ) -> Result<FloorPlanLayout> {
        Ok(floorgen_render::layout_request(request, layout_options)?)
    }

    /// Parses a wire-format request document and lays it out.
    pub fn layout_json_sync(text: &str, layout_options: &LayoutOptions) -> Result<FloorPlanLayout> {
        let request = floorgen_core::LayoutRequest::from_json_str(text)?;
        layout_sync(&request, layout_options)
    }

    pub async fn layout(
        request: &floorgen_core::LayoutRequest,
        layout_options: &LayoutOptions,
    ) -> Result<FloorPlanLayout> {
        layout_sync(request, layout_options)
    }

    pub fn render_layout_svg(
        layout: &FloorPlanLayout,
        measurer: &dyn TextMeasurer,
        svg_options: &SvgRenderOptions,
    ) -> Result<String> {
        Ok(floorgen_render::svg::render_floor_plan_svg(
            layout,
            measurer,
            svg_options,
        )?)
    }

    /// Synchronous SVG render helper (executor-free).
    pub fn render_svg_sync(
        request: &floorgen_core::LayoutRequest,
        layout_options: &LayoutOptions,
        svg_options: &SvgRenderOptions,
    ) -> Result<String> {
        let layout = layout_sync(request, layout_options)?;
        render_layout_svg(&layout, layout_options.text_measurer.as_ref(), svg_options)
    }

    /// Runtime-agnostic async wrapper. The work is CPU-bound; callers that must keep an event
    /// loop responsive should move it onto their own blocking pool.
    pub async fn render_svg(
        request: &floorgen_core::LayoutRequest,
        layout_options: &LayoutOptions,
        svg_options: &SvgRenderOptions,
    ) -> Result<String> {
        render_svg_sync(request, layout_options, svg_options)
    }

    /// Convenience wrapper that bundles the layout and SVG options for repeated renders.
    ///
    /// It stays runtime-agnostic: all work is CPU-bound and does not perform I/O.
    #[derive(Clone, Default)]
    pub struct FloorPlanRenderer {
        pub layout: LayoutOptions,
        pub svg: SvgRenderOptions,
    }

    impl FloorPlanRenderer {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_constants(mut self, constants: floorgen_core::LayoutConstants) -> Self {
            self.layout.constants = constants;
            self
        }

        pub fn with_labels(mut self, labels: SvgLabels) -> Self {
            self.svg.labels = labels;
            self
        }

        pub fn layout_sync(&self, request: &floorgen_core::LayoutRequest) -> Result<FloorPlanLayout> {
            layout_sync(request, &self.layout)
        }

        pub fn render_svg_sync(&self, request: &floorgen_core::LayoutRequest) -> Result<String> {
            render_svg_sync(request, &self.layout, &self.svg)
        }

        pub fn render_json_svg_sync(&self, text: &str) -> Result<String> {
            let request = floorgen_core::LayoutRequest::from_json_str(text)?;
            self.render_svg_sync(&request)
        }

        pub fn render_svg_sync_with_diagram_id(
            &self,
            request: &floorgen_core::LayoutRequest,
            diagram_id: &str,
        ) -> Result<String> {
            let mut svg = self.svg.clone();
            svg.diagram_id = Some(sanitize_svg_id(diagram_id));
            render_svg_sync(request, &self.layout, &svg)
        }

        pub async fn render_svg(&self, request: &floorgen_core::LayoutRequest) -> Result<String> {
            self.render_svg_sync(request)
        }

        #[cfg(feature = "raster")]
        pub fn render_png_sync(
            &self,
            request: &floorgen_core::LayoutRequest,
            raster: &raster::RasterOptions,
        ) -> raster::Result<Vec<u8>> {
            raster::render_png_sync(request, &self.layout, &self.svg, raster)
        }

        #[cfg(feature = "raster")]
        pub fn render_jpeg_sync(
            &self,
            request: &floorgen_core::LayoutRequest,
            raster: &raster::RasterOptions,
        ) -> raster::Result<Vec<u8>> {
            raster::render_jpeg_sync(request, &self.layout, &self.svg, raster)
        }

        #[cfg(feature = "raster")]
        pub fn render_pdf_sync(&self, request: &floorgen_core::LayoutRequest) -> raster::Result<Vec<u8>> {
            raster::render_pdf_sync(request, &self.layout, &self.svg)
        }
    }
}
