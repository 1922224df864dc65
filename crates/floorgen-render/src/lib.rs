#![forbid(unsafe_code)]

pub mod layout;
pub mod model;
pub mod svg;
pub mod text;

use crate::model::FloorPlanLayout;
use crate::text::{DeterministicTextMeasurer, TextMeasurer};
use floorgen_core::{LayoutConstants, LayoutRequest};
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Request(#[from] floorgen_core::Error),
    #[error("render failure: {message}")]
    RenderFailure { message: String },
}

impl Error {
    /// True for failures caused by the request itself (bad parameter, unknown arrangement),
    /// false for failures of the rendering step.
    pub fn is_request_error(&self) -> bool {
        matches!(self, Self::Request(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Clone)]
pub struct LayoutOptions {
    pub text_measurer: Arc<dyn TextMeasurer + Send + Sync>,
    pub constants: LayoutConstants,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            text_measurer: Arc::new(DeterministicTextMeasurer::default()),
            constants: LayoutConstants::default(),
        }
    }
}

impl std::fmt::Debug for LayoutOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutOptions")
            .field("constants", &self.constants)
            .finish_non_exhaustive()
    }
}

impl LayoutOptions {
    pub fn with_constants(mut self, constants: LayoutConstants) -> Self {
        self.constants = constants;
        self
    }
}

pub fn layout_request(request: &LayoutRequest, options: &LayoutOptions) -> Result<FloorPlanLayout> {
    layout::layout_floor_plan(request, &options.constants)
}
