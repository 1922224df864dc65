#![forbid(unsafe_code)]

//! Floor-plan request model (headless).
//!
//! Design goals:
//! - requests are validated once, with typed errors, before any geometry is computed
//! - every tunable of the layout formulas is a named value with a documented default
//! - no I/O and no shared state

pub mod arrangement;
pub mod config;
pub mod error;
pub mod request;

pub use arrangement::{ArrangementType, Side};
pub use config::{DEFAULT_M2_TO_PING, LayoutConstants};
pub use error::{Error, Result};
pub use request::{LayoutRequest, RawLayoutRequest};
