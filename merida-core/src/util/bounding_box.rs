use geo::{Coord, Rect};
use serde::{Deserialize, Serialize};

/// an axis-aligned box in the coordinates of whatever layer it filters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

impl BoundingBox {
    /// extent of the Mérida census blocks in the INEGI Lambert projection (EPSG:6372).
    pub const MERIDA_BLOCKS: BoundingBox = BoundingBox {
        xmin: 3764086.0,
        ymin: 1034675.0,
        xmax: 3792830.0,
        ymax: 1069982.0,
    };

    pub fn new(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Result<BoundingBox, String> {
        if !(xmin < xmax) {
            Err(format!(
                "bbox: xmin must be less than xmax, but found [{xmin},{xmax}]"
            ))
        } else if !(ymin < ymax) {
            Err(format!(
                "bbox: ymin must be less than ymax, but found [{ymin},{ymax}]"
            ))
        } else {
            Ok(BoundingBox {
                xmin,
                ymin,
                xmax,
                ymax,
            })
        }
    }

    pub fn rect(&self) -> Rect<f64> {
        Rect::new(
            Coord {
                x: self.xmin,
                y: self.ymin,
            },
            Coord {
                x: self.xmax,
                y: self.ymax,
            },
        )
    }

    /// true when the two boxes share at least one point, including touching edges.
    pub fn intersects_rect(&self, other: &Rect<f64>) -> bool {
        self.xmin <= other.max().x
            && other.min().x <= self.xmax
            && self.ymin <= other.max().y
            && other.min().y <= self.ymax
    }
}

impl std::fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{},{},{}", self.xmin, self.ymin, self.xmax, self.ymax)
    }
}
