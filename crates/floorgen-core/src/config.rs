//! Tunable constants of the layout formulas.
//!
//! Each value has a documented default matching the reference layouts. Partial JSON objects are
//! accepted; missing keys fall back to the defaults.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Square metres to ping (Taiwanese floor-area unit). Display only.
pub const DEFAULT_M2_TO_PING: f64 = 0.3025;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConstants {
    /// Width:height ratio shared by every unit. Default `1.3`.
    pub unit_aspect_ratio: f64,
    /// Fraction of a side unit's height trimmed from each end of its balcony. Default `0.1`.
    pub balcony_inset_fraction: f64,
    /// Fixed clearance added per side to the envelope of two-sided arrangements, in metres.
    /// Default `2.0`; it does not scale with unit spacing.
    pub two_sided_clearance: f64,
    /// Minimum core cross dimension for single-side arrangements, as a fraction of the unit
    /// dimension facing the core. Default `0.3`.
    pub single_side_core_floor: f64,
    /// Same floor for two-sided arrangements. Default `0.8`.
    pub two_sided_core_floor: f64,
    /// Margin around the drawn geometry, in metres. Default `1.0`.
    pub frame_padding: f64,
}

impl Default for LayoutConstants {
    fn default() -> Self {
        Self {
            unit_aspect_ratio: 1.3,
            balcony_inset_fraction: 0.1,
            two_sided_clearance: 2.0,
            single_side_core_floor: 0.3,
            two_sided_core_floor: 0.8,
            frame_padding: 1.0,
        }
    }
}

impl LayoutConstants {
    pub fn from_json_str(text: &str) -> Result<Self> {
        let constants: Self = serde_json::from_str(text)?;
        constants.validate()?;
        Ok(constants)
    }

    pub fn validate(&self) -> Result<()> {
        positive("unitAspectRatio", self.unit_aspect_ratio)?;
        if !(self.balcony_inset_fraction.is_finite()
            && (0.0..0.5).contains(&self.balcony_inset_fraction))
        {
            return Err(Error::invalid(
                "balconyInsetFraction",
                format!(
                    "must be in [0, 0.5), got {}",
                    self.balcony_inset_fraction
                ),
            ));
        }
        non_negative("twoSidedClearance", self.two_sided_clearance)?;
        positive("singleSideCoreFloor", self.single_side_core_floor)?;
        positive("twoSidedCoreFloor", self.two_sided_core_floor)?;
        non_negative("framePadding", self.frame_padding)?;
        Ok(())
    }
}

pub(crate) fn positive(name: &'static str, v: f64) -> Result<()> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(Error::invalid(name, format!("must be greater than 0, got {v}")))
    }
}

pub(crate) fn non_negative(name: &'static str, v: f64) -> Result<()> {
    if v.is_finite() && v >= 0.0 {
        Ok(())
    } else {
        Err(Error::invalid(name, format!("must be 0 or greater, got {v}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let c = LayoutConstants::from_json_str(r#"{"unitAspectRatio": 1.5}"#).unwrap();
        assert_eq!(c.unit_aspect_ratio, 1.5);
        assert_eq!(c.two_sided_clearance, 2.0);
        assert_eq!(c.balcony_inset_fraction, 0.1);
    }

    #[test]
    fn rejects_inset_that_swallows_the_balcony() {
        let err = LayoutConstants::from_json_str(r#"{"balconyInsetFraction": 0.5}"#).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidParameter {
                name: "balconyInsetFraction",
                ..
            }
        ));
    }

    #[test]
    fn defaults_validate() {
        LayoutConstants::default().validate().unwrap();
    }
}
