//! Per-arrangement formulas for the core footprint, the envelope, and the core position.
//!
//! Each [`ArrangementType`] maps to exactly one [`ArrangementStrategy`] row; the `match` in
//! [`strategy_for`] keeps the table exhaustive.

use crate::model::{CoreFootprint, CorePosition, Envelope, UnitMetrics};
use floorgen_core::{ArrangementType, LayoutConstants};

/// Everything the formulas read. Built once per layout.
#[derive(Debug, Clone, Copy)]
pub struct StageInput {
    pub unit: UnitMetrics,
    /// Units tiled along the core's longest run of faces (first side for two-sided layouts).
    pub tiled_count: u32,
    pub spacing: f64,
    pub balcony_depth: f64,
    pub constants: LayoutConstants,
}

#[derive(Clone, Copy)]
pub struct ArrangementStrategy {
    pub footprint: fn(&StageInput) -> CoreFootprint,
    pub envelope: fn(&StageInput, CoreFootprint) -> Envelope,
    pub position: fn(&StageInput, Envelope, CoreFootprint) -> CorePosition,
}

impl std::fmt::Debug for ArrangementStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArrangementStrategy").finish_non_exhaustive()
    }
}

static LEFT: ArrangementStrategy = ArrangementStrategy {
    footprint: single_vertical_core,
    envelope: single_vertical_envelope,
    position: hug_left,
};

static RIGHT: ArrangementStrategy = ArrangementStrategy {
    footprint: single_vertical_core,
    envelope: single_vertical_envelope,
    position: hug_right,
};

static TOP: ArrangementStrategy = ArrangementStrategy {
    footprint: single_horizontal_core,
    envelope: single_horizontal_envelope,
    position: hug_top,
};

static BOTTOM: ArrangementStrategy = ArrangementStrategy {
    footprint: single_horizontal_core,
    envelope: single_horizontal_envelope,
    position: hug_bottom,
};

static BOTH_LEFT_RIGHT: ArrangementStrategy = ArrangementStrategy {
    footprint: paired_vertical_core,
    envelope: paired_vertical_envelope,
    position: centered,
};

static BOTH_TOP_BOTTOM: ArrangementStrategy = ArrangementStrategy {
    footprint: paired_horizontal_core,
    envelope: paired_horizontal_envelope,
    position: centered,
};

pub fn strategy_for(arrangement: ArrangementType) -> &'static ArrangementStrategy {
    match arrangement {
        ArrangementType::Left => &LEFT,
        ArrangementType::Right => &RIGHT,
        ArrangementType::Top => &TOP,
        ArrangementType::Bottom => &BOTTOM,
        ArrangementType::BothLeftRight => &BOTH_LEFT_RIGHT,
        ArrangementType::BothTopBottom => &BOTH_TOP_BOTTOM,
    }
}

/// Length needed to front `count` units of depth `dim` separated by `sp`.
fn run_length(dim: f64, sp: f64, count: u32) -> f64 {
    (dim + sp) * f64::from(count) + sp
}

fn vertical_core(i: &StageInput, floor: f64) -> CoreFootprint {
    let length = run_length(i.unit.height, i.spacing, i.tiled_count);
    let width = f64::max(i.unit.width * floor, i.unit.public_area_m2 / length);
    CoreFootprint { width, length }
}

fn horizontal_core(i: &StageInput, floor: f64) -> CoreFootprint {
    let width = run_length(i.unit.width, i.spacing, i.tiled_count);
    let length = f64::max(i.unit.height * floor, i.unit.public_area_m2 / width);
    CoreFootprint { width, length }
}

fn single_vertical_core(i: &StageInput) -> CoreFootprint {
    vertical_core(i, i.constants.single_side_core_floor)
}

fn single_horizontal_core(i: &StageInput) -> CoreFootprint {
    horizontal_core(i, i.constants.single_side_core_floor)
}

fn paired_vertical_core(i: &StageInput) -> CoreFootprint {
    vertical_core(i, i.constants.two_sided_core_floor)
}

fn paired_horizontal_core(i: &StageInput) -> CoreFootprint {
    horizontal_core(i, i.constants.two_sided_core_floor)
}

fn single_vertical_envelope(i: &StageInput, core: CoreFootprint) -> Envelope {
    Envelope {
        width: core.width + i.unit.width + i.balcony_depth + 2.0 * i.spacing,
        length: core.length + 2.0 * i.spacing,
    }
}

fn single_horizontal_envelope(i: &StageInput, core: CoreFootprint) -> Envelope {
    Envelope {
        width: core.width + 2.0 * i.spacing,
        length: core.length + i.unit.height + i.balcony_depth + 2.0 * i.spacing,
    }
}

// The unit bands of two-sided layouts get a fixed clearance instead of the unit spacing.
fn paired_vertical_envelope(i: &StageInput, core: CoreFootprint) -> Envelope {
    let band = i.unit.width + i.balcony_depth + i.constants.two_sided_clearance;
    Envelope {
        width: core.width + 2.0 * band,
        length: core.length + 2.0 * i.spacing,
    }
}

fn paired_horizontal_envelope(i: &StageInput, core: CoreFootprint) -> Envelope {
    let band = i.unit.height + i.balcony_depth + i.constants.two_sided_clearance;
    Envelope {
        width: core.width + 2.0 * i.spacing,
        length: core.length + 2.0 * band,
    }
}

fn hug_left(i: &StageInput, env: Envelope, core: CoreFootprint) -> CorePosition {
    CorePosition {
        x0: i.spacing,
        y0: (env.length - core.length) / 2.0,
    }
}

fn hug_right(i: &StageInput, env: Envelope, core: CoreFootprint) -> CorePosition {
    CorePosition {
        x0: env.width - core.width - i.spacing,
        y0: (env.length - core.length) / 2.0,
    }
}

fn hug_top(i: &StageInput, env: Envelope, core: CoreFootprint) -> CorePosition {
    CorePosition {
        x0: (env.width - core.width) / 2.0,
        y0: env.length - core.length - i.spacing,
    }
}

fn hug_bottom(i: &StageInput, env: Envelope, core: CoreFootprint) -> CorePosition {
    CorePosition {
        x0: (env.width - core.width) / 2.0,
        y0: i.spacing,
    }
}

fn centered(_i: &StageInput, env: Envelope, core: CoreFootprint) -> CorePosition {
    CorePosition {
        x0: (env.width - core.width) / 2.0,
        y0: (env.length - core.length) / 2.0,
    }
}
