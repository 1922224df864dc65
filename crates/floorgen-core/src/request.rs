use crate::arrangement::ArrangementType;
use crate::config::{DEFAULT_M2_TO_PING, non_negative, positive};
use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};

/// Request document as it arrives on the wire.
///
/// Field names follow the public request contract. Values are not trusted: convert with
/// [`LayoutRequest::try_from`] to get a validated request.
///
/// `total_units` accepts JSON integers and whole-number floats (`10.0`); fractional counts are
/// rejected rather than truncated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawLayoutRequest {
    pub building_area_m2: f64,
    pub arrangement_type: String,
    #[serde(deserialize_with = "whole_number")]
    pub total_units: i64,
    pub public_ratio: f64,
    pub balcony_depth: f64,
    pub unit_spacing: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub m2_to_ping: Option<f64>,
}

fn whole_number<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Count {
        Int(i64),
        Float(f64),
    }

    // Whole floats beyond this magnitude cannot round-trip through `i64`.
    const LIMIT: f64 = 9_007_199_254_740_992.0;
    match Count::deserialize(deserializer)? {
        Count::Int(n) => Ok(n),
        Count::Float(f) if f.is_finite() && f.fract() == 0.0 && f.abs() <= LIMIT => Ok(f as i64),
        Count::Float(f) => Err(serde::de::Error::custom(format!(
            "expected a whole number, got {f}"
        ))),
    }
}

/// Validated building parameters for one layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutRequest {
    pub total_area_m2: f64,
    pub unit_count: u32,
    pub public_ratio: f64,
    pub arrangement: ArrangementType,
    pub unit_spacing: f64,
    pub balcony_depth: f64,
    /// Multiplier from square metres to the display area unit. Never used by geometry.
    pub area_unit_conversion: f64,
}

impl LayoutRequest {
    /// Request with zero spacing, no balconies, and the default display conversion.
    ///
    /// The result is not validated; layout entry points call [`LayoutRequest::validate`].
    pub fn new(
        arrangement: ArrangementType,
        total_area_m2: f64,
        unit_count: u32,
        public_ratio: f64,
    ) -> Self {
        Self {
            total_area_m2,
            unit_count,
            public_ratio,
            arrangement,
            unit_spacing: 0.0,
            balcony_depth: 0.0,
            area_unit_conversion: DEFAULT_M2_TO_PING,
        }
    }

    pub fn with_unit_spacing(mut self, unit_spacing: f64) -> Self {
        self.unit_spacing = unit_spacing;
        self
    }

    pub fn with_balcony_depth(mut self, balcony_depth: f64) -> Self {
        self.balcony_depth = balcony_depth;
        self
    }

    pub fn with_area_unit_conversion(mut self, factor: f64) -> Self {
        self.area_unit_conversion = factor;
        self
    }

    /// Parses and validates a wire-format request document.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let raw: RawLayoutRequest = serde_json::from_str(text)?;
        Self::try_from(raw)
    }

    pub fn from_json_value(value: serde_json::Value) -> Result<Self> {
        let raw: RawLayoutRequest = serde_json::from_value(value)?;
        Self::try_from(raw)
    }

    pub fn validate(&self) -> Result<()> {
        positive("building_area_m2", self.total_area_m2)?;
        if self.unit_count == 0 {
            return Err(Error::invalid("total_units", "must be greater than 0"));
        }
        if self.arrangement.is_two_sided() && self.unit_count < 2 {
            return Err(Error::invalid(
                "total_units",
                format!(
                    "arrangement {} places units on two sides and needs at least 2 units, got {}",
                    self.arrangement, self.unit_count
                ),
            ));
        }
        if !(self.public_ratio.is_finite() && self.public_ratio > 0.0 && self.public_ratio < 1.0) {
            return Err(Error::invalid(
                "public_ratio",
                format!("must be strictly between 0 and 1, got {}", self.public_ratio),
            ));
        }
        non_negative("unit_spacing", self.unit_spacing)?;
        non_negative("balcony_depth", self.balcony_depth)?;
        positive("m2_to_ping", self.area_unit_conversion)?;
        Ok(())
    }

    pub fn public_area_m2(&self) -> f64 {
        self.total_area_m2 * self.public_ratio
    }

    pub fn net_unit_area_m2(&self) -> f64 {
        self.total_area_m2 * (1.0 - self.public_ratio)
    }

    /// Converts an area in square metres to the display unit.
    pub fn display_area(&self, area_m2: f64) -> f64 {
        area_m2 * self.area_unit_conversion
    }
}

impl TryFrom<RawLayoutRequest> for LayoutRequest {
    type Error = Error;

    fn try_from(raw: RawLayoutRequest) -> Result<Self> {
        let arrangement: ArrangementType = raw.arrangement_type.parse().inspect_err(|_| {
            tracing::debug!(code = %raw.arrangement_type, "rejected arrangement code");
        })?;

        if raw.total_units <= 0 {
            return Err(Error::invalid(
                "total_units",
                format!("must be greater than 0, got {}", raw.total_units),
            ));
        }
        let unit_count = u32::try_from(raw.total_units).map_err(|_| {
            Error::invalid(
                "total_units",
                format!("too large: {}", raw.total_units),
            )
        })?;

        let req = Self {
            total_area_m2: raw.building_area_m2,
            unit_count,
            public_ratio: raw.public_ratio,
            arrangement,
            unit_spacing: raw.unit_spacing,
            balcony_depth: raw.balcony_depth,
            area_unit_conversion: raw.m2_to_ping.unwrap_or(DEFAULT_M2_TO_PING),
        };
        req.validate()?;
        Ok(req)
    }
}
