use floorgen_core::{LayoutRequest, Side};
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in the envelope-local frame (origin at the envelope's lower-left
/// corner, y growing upward).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        xmin: 0.0,
        xmax: 0.0,
        ymin: 0.0,
        ymax: 0.0,
    };

    pub fn new(xmin: f64, xmax: f64, ymin: f64, ymax: f64) -> Self {
        Self {
            xmin,
            xmax,
            ymin,
            ymax,
        }
    }

    pub fn from_origin(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(x, x + width, y, y + height)
    }

    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    pub fn center(&self) -> (f64, f64) {
        (
            (self.xmin + self.xmax) / 2.0,
            (self.ymin + self.ymax) / 2.0,
        )
    }

    pub fn is_finite(&self) -> bool {
        self.xmin.is_finite()
            && self.xmax.is_finite()
            && self.ymin.is_finite()
            && self.ymax.is_finite()
    }

    /// True when the interiors intersect. Rectangles that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.xmin < other.xmax
            && other.xmin < self.xmax
            && self.ymin < other.ymax
            && other.ymin < self.ymax
    }

    pub fn corners(&self) -> [(f64, f64); 2] {
        [(self.xmin, self.ymin), (self.xmax, self.ymax)]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn from_points(points: impl IntoIterator<Item = (f64, f64)>) -> Option<Self> {
        let mut it = points.into_iter();
        let (x0, y0) = it.next()?;
        let mut b = Self {
            min_x: x0,
            min_y: y0,
            max_x: x0,
            max_y: y0,
        };
        for (x, y) in it {
            b.min_x = b.min_x.min(x);
            b.min_y = b.min_y.min(y);
            b.max_x = b.max_x.max(x);
            b.max_y = b.max_y.max(y);
        }
        Some(b)
    }

    pub fn from_rects<'a>(rects: impl IntoIterator<Item = &'a Rect>) -> Option<Self> {
        Self::from_points(rects.into_iter().flat_map(|r| r.corners()))
    }

    pub fn padded(&self, pad: f64) -> Self {
        Self {
            min_x: self.min_x - pad,
            min_y: self.min_y - pad,
            max_x: self.max_x + pad,
            max_y: self.max_y + pad,
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn contains(&self, r: &Rect) -> bool {
        r.xmin >= self.min_x
            && r.xmax <= self.max_x
            && r.ymin >= self.min_y
            && r.ymax <= self.max_y
    }
}

/// Size shared by every unit of a layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitMetrics {
    pub target_area_m2: f64,
    pub width: f64,
    pub height: f64,
    /// Area reserved for the core, `total * public_ratio`.
    pub public_area_m2: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoreFootprint {
    pub width: f64,
    pub length: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub width: f64,
    pub length: f64,
}

impl Envelope {
    pub fn rect(&self) -> Rect {
        Rect::from_origin(0.0, 0.0, self.width, self.length)
    }
}

/// Lower-left corner of the core inside the envelope.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorePosition {
    pub x0: f64,
    pub y0: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitPlacement {
    /// 1-based.
    pub unit_index: u32,
    pub side: Side,
    pub rect: Rect,
    pub balcony_rect: Rect,
}

/// Complete geometric model of one floor: the only input of the SVG renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorPlanLayout {
    pub request: LayoutRequest,
    pub unit: UnitMetrics,
    pub core: CoreFootprint,
    pub envelope: Envelope,
    pub core_position: CorePosition,
    pub placements: Vec<UnitPlacement>,
    /// Envelope, core, units, and balconies, padded by the frame padding.
    pub bounds: Bounds,
}

impl FloorPlanLayout {
    pub fn core_rect(&self) -> Rect {
        Rect::from_origin(
            self.core_position.x0,
            self.core_position.y0,
            self.core.width,
            self.core.length,
        )
    }

    pub fn units_on(&self, side: Side) -> impl Iterator<Item = &UnitPlacement> {
        self.placements.iter().filter(move |p| p.side == side)
    }
}
