use geo::{coord, Rect};
use serde::{Deserialize, Serialize};

/// longitude band that bounds the study area. stops and shapes outside of
/// it are dropped by the feed accessor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LongitudeWindow {
    pub west: f64,
    pub east: f64,
}

impl Default for LongitudeWindow {
    fn default() -> Self {
        Self {
            west: -89.8,
            east: -89.5,
        }
    }
}

impl LongitudeWindow {
    pub fn contains(&self, lon: f64) -> bool {
        self.west <= lon && lon <= self.east
    }

    /// the window as a rectangle spanning every latitude.
    pub fn rect(&self) -> Rect<f64> {
        Rect::new(
            coord! { x: self.west, y: -90.0 },
            coord! { x: self.east, y: 90.0 },
        )
    }
}

/// options controlling how a GTFS archive is turned into indicator tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedConfig {
    #[serde(default)]
    pub longitude_window: LongitudeWindow,
    /// character splitting the route id from the variant in a shape id,
    /// as in "104D1".
    #[serde(default = "default_shape_id_separator")]
    pub shape_id_separator: char,
}

fn default_shape_id_separator() -> char {
    'D'
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            longitude_window: LongitudeWindow::default(),
            shape_id_separator: default_shape_id_separator(),
        }
    }
}
