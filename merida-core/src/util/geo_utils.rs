use geo::{Geometry, MultiPolygon, Rect};
use rstar::primitives::Rectangle;
use rstar::AABB;

/// rstar rectangle covering a geo bounding box.
pub fn rectangle_from_rect(rect: &Rect<f64>) -> Rectangle<(f64, f64)> {
    Rectangle::from_corners(rect.min().x_y(), rect.max().x_y())
}

/// rstar query envelope covering a geo bounding box.
pub fn envelope_from_rect(rect: &Rect<f64>) -> AABB<(f64, f64)> {
    AABB::from_corners(rect.min().x_y(), rect.max().x_y())
}

/// coerces a polygonal geometry into a [`MultiPolygon`]. polygon layers in the
/// wild mix single and multi polygons, so both are accepted.
///
/// # Arguments
///
/// * `geometry` - geometry read from some layer
///
/// # Returns
///
/// * the multipolygon, or an error naming the offending geometry type
pub fn to_multipolygon(geometry: Geometry<f64>) -> Result<MultiPolygon<f64>, String> {
    match geometry {
        Geometry::Polygon(p) => Ok(MultiPolygon::new(vec![p])),
        Geometry::MultiPolygon(mp) => Ok(mp),
        Geometry::Rect(r) => Ok(MultiPolygon::new(vec![r.to_polygon()])),
        Geometry::Triangle(t) => Ok(MultiPolygon::new(vec![t.to_polygon()])),
        other => Err(format!(
            "expected polygonal geometry, found {}",
            geometry_type_name(&other)
        )),
    }
}

pub fn geometry_type_name(geometry: &Geometry<f64>) -> &'static str {
    match geometry {
        Geometry::Point(_) => "Point",
        Geometry::Line(_) => "Line",
        Geometry::LineString(_) => "LineString",
        Geometry::Polygon(_) => "Polygon",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::MultiPolygon(_) => "MultiPolygon",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        Geometry::Rect(_) => "Rect",
        Geometry::Triangle(_) => "Triangle",
    }
}
