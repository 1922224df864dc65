//! Geometry pipeline: metrics -> core footprint -> envelope -> core position -> units ->
//! balconies. Every stage is a pure function of the earlier stages and the request.

pub mod balcony;
pub mod metrics;
pub mod placement;
pub mod strategy;

use crate::Result;
use crate::model::{Bounds, FloorPlanLayout, UnitPlacement};
use floorgen_core::{LayoutConstants, LayoutRequest};
use strategy::{StageInput, strategy_for};

pub use balcony::project_balcony;
pub use metrics::derive_unit_metrics;
pub use placement::{assign_side, unit_rect};

pub fn layout_floor_plan(
    request: &LayoutRequest,
    constants: &LayoutConstants,
) -> Result<FloorPlanLayout> {
    constants.validate()?;
    request.validate()?;

    let arrangement = request.arrangement;
    let unit = derive_unit_metrics(request, constants)?;
    let input = StageInput {
        unit,
        tiled_count: arrangement.first_side_count(request.unit_count),
        spacing: request.unit_spacing,
        balcony_depth: request.balcony_depth,
        constants: *constants,
    };

    let strategy = strategy_for(arrangement);
    let core = (strategy.footprint)(&input);
    let envelope = (strategy.envelope)(&input, core);
    let core_position = (strategy.position)(&input, envelope, core);

    tracing::debug!(
        %arrangement,
        unit_width = unit.width,
        unit_height = unit.height,
        core_width = core.width,
        core_length = core.length,
        envelope_width = envelope.width,
        envelope_length = envelope.length,
        "floor plan geometry"
    );
    if arrangement.is_two_sided() && request.unit_spacing > constants.two_sided_clearance {
        tracing::warn!(
            spacing = request.unit_spacing,
            clearance = constants.two_sided_clearance,
            "unit spacing exceeds the two-sided clearance; balconies extend past the envelope"
        );
    }

    let placements: Vec<UnitPlacement> = (1..=request.unit_count)
        .map(|unit_index| {
            let (side, slot) = assign_side(arrangement, request.unit_count, unit_index);
            let rect = unit_rect(side, slot, &unit, core_position, core, request.unit_spacing);
            let balcony_rect = project_balcony(
                side,
                &rect,
                request.balcony_depth,
                constants.balcony_inset_fraction,
            );
            UnitPlacement {
                unit_index,
                side,
                rect,
                balcony_rect,
            }
        })
        .collect();

    let core_rect = crate::model::Rect::from_origin(
        core_position.x0,
        core_position.y0,
        core.width,
        core.length,
    );
    let envelope_rect = envelope.rect();
    let drawn = [&envelope_rect, &core_rect].into_iter().chain(
        placements
            .iter()
            .flat_map(|p| [&p.rect, &p.balcony_rect]),
    );
    let bounds = Bounds::from_rects(drawn)
        .unwrap_or(Bounds {
            min_x: 0.0,
            min_y: 0.0,
            max_x: envelope.width,
            max_y: envelope.length,
        })
        .padded(constants.frame_padding);

    Ok(FloorPlanLayout {
        request: *request,
        unit,
        core,
        envelope,
        core_position,
        placements,
        bounds,
    })
}
