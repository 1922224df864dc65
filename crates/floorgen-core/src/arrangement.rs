//! Arrangement codes and the sides of the core that units are tiled along.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Which side(s) of the core the residential units are tiled along.
///
/// The set is closed: every layout formula is keyed by one of these six variants, and unknown
/// wire codes are rejected with [`Error::UnsupportedArrangement`] before any geometry runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArrangementType {
    #[serde(rename = "L")]
    Left,
    #[serde(rename = "R")]
    Right,
    #[serde(rename = "T")]
    Top,
    #[serde(rename = "B")]
    Bottom,
    #[serde(rename = "LR")]
    BothLeftRight,
    #[serde(rename = "TB")]
    BothTopBottom,
}

impl ArrangementType {
    pub const ALL: [ArrangementType; 6] = [
        Self::Left,
        Self::Right,
        Self::Top,
        Self::Bottom,
        Self::BothLeftRight,
        Self::BothTopBottom,
    ];

    /// Wire code used by request documents (`"L"`, `"R"`, `"T"`, `"B"`, `"LR"`, `"TB"`).
    pub fn code(self) -> &'static str {
        match self {
            Self::Left => "L",
            Self::Right => "R",
            Self::Top => "T",
            Self::Bottom => "B",
            Self::BothLeftRight => "LR",
            Self::BothTopBottom => "TB",
        }
    }

    /// Human-readable name, used in rendered titles.
    pub fn label(self) -> &'static str {
        match self {
            Self::Left => "left side only",
            Self::Right => "right side only",
            Self::Top => "top side only",
            Self::Bottom => "bottom side only",
            Self::BothLeftRight => "left and right sides",
            Self::BothTopBottom => "top and bottom sides",
        }
    }

    pub fn is_two_sided(self) -> bool {
        matches!(self, Self::BothLeftRight | Self::BothTopBottom)
    }

    /// Sides in fill order. Two-sided arrangements fill the first side before the second.
    pub fn sides(self) -> (Side, Option<Side>) {
        match self {
            Self::Left => (Side::Left, None),
            Self::Right => (Side::Right, None),
            Self::Top => (Side::Top, None),
            Self::Bottom => (Side::Bottom, None),
            Self::BothLeftRight => (Side::Left, Some(Side::Right)),
            Self::BothTopBottom => (Side::Bottom, Some(Side::Top)),
        }
    }

    /// Number of units tiled along the first side.
    ///
    /// Odd counts on two-sided arrangements put the extra unit on the first side.
    pub fn first_side_count(self, unit_count: u32) -> u32 {
        if self.is_two_sided() {
            unit_count.div_ceil(2)
        } else {
            unit_count
        }
    }
}

impl std::fmt::Display for ArrangementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ArrangementType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let code = s.trim();
        Self::ALL
            .into_iter()
            .find(|a| a.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| Error::UnsupportedArrangement {
                code: s.to_string(),
            })
    }
}

/// Face of the core a unit is attached to.
///
/// `Center` is the placement of a unit that no arrangement claims; the layout pipeline never
/// produces it for a validated request, but the balcony projector still gives it a defined
/// (degenerate) result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
    Center,
}

impl Side {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Center => "center",
        }
    }

    /// Units on left/right faces stack vertically; top/bottom faces stack horizontally.
    pub fn is_vertical_stack(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip_through_from_str() {
        for a in ArrangementType::ALL {
            assert_eq!(a.code().parse::<ArrangementType>().unwrap(), a);
        }
        assert_eq!(
            " lr ".parse::<ArrangementType>().unwrap(),
            ArrangementType::BothLeftRight
        );
    }

    #[test]
    fn unknown_code_is_unsupported() {
        let err = "X".parse::<ArrangementType>().unwrap_err();
        assert!(matches!(err, Error::UnsupportedArrangement { ref code } if code == "X"));
    }

    #[test]
    fn first_side_takes_the_odd_unit() {
        assert_eq!(ArrangementType::BothLeftRight.first_side_count(5), 3);
        assert_eq!(ArrangementType::BothTopBottom.first_side_count(10), 5);
        assert_eq!(ArrangementType::Left.first_side_count(5), 5);
    }

    #[test]
    fn serde_uses_wire_codes() {
        let json = serde_json::to_string(&ArrangementType::BothTopBottom).unwrap();
        assert_eq!(json, r#""TB""#);
        let side: Side = serde_json::from_str(r#""bottom""#).unwrap();
        assert_eq!(side, Side::Bottom);
    }
}
