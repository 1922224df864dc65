use crate::Result;
use crate::model::UnitMetrics;
use floorgen_core::{Error as RequestError, LayoutConstants, LayoutRequest};

/// Per-unit target area and the unit rectangle at the configured aspect ratio.
pub fn derive_unit_metrics(
    request: &LayoutRequest,
    constants: &LayoutConstants,
) -> Result<UnitMetrics> {
    if request.unit_count == 0 {
        return Err(invalid("total_units", "must be greater than 0".to_string()));
    }
    let public_area_m2 = request.public_area_m2();
    let net = request.net_unit_area_m2();
    if !(public_area_m2.is_finite() && public_area_m2 > 0.0) {
        return Err(invalid(
            "public_ratio",
            format!("public area must be positive, got {public_area_m2}"),
        ));
    }
    if !(net.is_finite() && net > 0.0) {
        return Err(invalid(
            "public_ratio",
            format!("net unit area must be positive, got {net}"),
        ));
    }

    let target_area_m2 = net / f64::from(request.unit_count);
    let width = (target_area_m2 * constants.unit_aspect_ratio).sqrt();
    let height = target_area_m2 / width;

    Ok(UnitMetrics {
        target_area_m2,
        width,
        height,
        public_area_m2,
    })
}

fn invalid(name: &'static str, message: String) -> crate::Error {
    RequestError::InvalidParameter { name, message }.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use floorgen_core::ArrangementType;

    #[test]
    fn unit_area_and_aspect_follow_the_request() {
        let req = LayoutRequest::new(ArrangementType::BothTopBottom, 1000.0, 10, 0.2);
        let m = derive_unit_metrics(&req, &LayoutConstants::default()).unwrap();
        assert!((m.target_area_m2 - 80.0).abs() < 1e-9);
        assert!((m.width * m.height - 80.0).abs() < 1e-9);
        assert!((m.width / m.height - 1.3).abs() < 1e-9);
        assert!((m.public_area_m2 - 200.0).abs() < 1e-9);
    }

    #[test]
    fn non_positive_areas_are_rejected() {
        let req = LayoutRequest::new(ArrangementType::Left, 1000.0, 4, 1.0);
        assert!(derive_unit_metrics(&req, &LayoutConstants::default()).is_err());
        let req = LayoutRequest::new(ArrangementType::Left, -5.0, 4, 0.2);
        assert!(derive_unit_metrics(&req, &LayoutConstants::default()).is_err());
    }
}
