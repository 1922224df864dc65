use crate::model::{CoreFootprint, CorePosition, Rect, UnitMetrics};
use floorgen_core::{ArrangementType, Side};

/// Side a 1-based unit index is attached to, and its 0-based slot along that side.
pub fn assign_side(arrangement: ArrangementType, unit_count: u32, unit_index: u32) -> (Side, u32) {
    let first_count = arrangement.first_side_count(unit_count);
    match arrangement.sides() {
        (first, Some(_)) if unit_index <= first_count => (first, unit_index - 1),
        (_, Some(second)) => (second, unit_index - first_count - 1),
        (only, None) => (only, unit_index - 1),
    }
}

/// Rectangle of the unit in slot `slot` on `side`, tiled outward from the core face.
///
/// Each slot advances by `dimension + spacing`, so consecutive slots never overlap.
pub fn unit_rect(
    side: Side,
    slot: u32,
    unit: &UnitMetrics,
    core_position: CorePosition,
    core: CoreFootprint,
    spacing: f64,
) -> Rect {
    let (uw, uh) = (unit.width, unit.height);
    let (cx0, cy0) = (core_position.x0, core_position.y0);
    let (cx1, cy1) = (cx0 + core.width, cy0 + core.length);
    let slot = f64::from(slot);

    let (xmin, ymin) = match side {
        Side::Left => (cx0 - uw - spacing, cy0 + slot * (uh + spacing) + spacing),
        Side::Right => (cx1 + spacing, cy0 + slot * (uh + spacing) + spacing),
        Side::Top => (cx0 + slot * (uw + spacing) + spacing, cy1 + spacing),
        Side::Bottom => (cx0 + slot * (uw + spacing) + spacing, cy0 - uh - spacing),
        Side::Center => (0.0, 0.0),
    };
    Rect::from_origin(xmin, ymin, uw, uh)
}
