use crate::model::Rect;
use floorgen_core::Side;

/// Extrudes a balcony of `depth` from the unit's outward-facing edge.
///
/// Left/right balconies are shortened by `inset_fraction` of the unit height at each end so
/// they stay clear of neighbouring balconies' corners. `Center` units have no outward edge and
/// get [`Rect::ZERO`].
pub fn project_balcony(side: Side, unit: &Rect, depth: f64, inset_fraction: f64) -> Rect {
    let inset = inset_fraction * unit.height();
    match side {
        Side::Left => Rect::new(unit.xmin - depth, unit.xmin, unit.ymin + inset, unit.ymax - inset),
        Side::Right => Rect::new(unit.xmax, unit.xmax + depth, unit.ymin + inset, unit.ymax - inset),
        Side::Top => Rect::new(unit.xmin, unit.xmax, unit.ymax, unit.ymax + depth),
        Side::Bottom => Rect::new(unit.xmin, unit.xmax, unit.ymin - depth, unit.ymin),
        Side::Center => Rect::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNIT: Rect = Rect {
        xmin: 0.0,
        xmax: 4.0,
        ymin: 0.0,
        ymax: 10.0,
    };

    #[test]
    fn side_balconies_are_inset() {
        let b = project_balcony(Side::Left, &UNIT, 1.5, 0.1);
        assert_eq!(b, Rect::new(-1.5, 0.0, 1.0, 9.0));
        let b = project_balcony(Side::Right, &UNIT, 1.5, 0.1);
        assert_eq!(b, Rect::new(4.0, 5.5, 1.0, 9.0));
    }

    #[test]
    fn top_and_bottom_balconies_span_the_unit() {
        assert_eq!(
            project_balcony(Side::Top, &UNIT, 2.0, 0.1),
            Rect::new(0.0, 4.0, 10.0, 12.0)
        );
        assert_eq!(
            project_balcony(Side::Bottom, &UNIT, 2.0, 0.1),
            Rect::new(0.0, 4.0, -2.0, 0.0)
        );
    }

    #[test]
    fn center_is_degenerate() {
        assert_eq!(project_balcony(Side::Center, &UNIT, 2.0, 0.1), Rect::ZERO);
    }
}
