use super::geo_utils;
use geo::{BoundingRect, Contains, Intersects, LineString, MultiPolygon, Point, Rect};
use rstar::primitives::GeomWithData;
use rstar::RTree;
use wkt::ToWkt;

/// envelope of one polygon, tagged with its position in the entry list.
type IndexedEnvelope = GeomWithData<rstar::primitives::Rectangle<(f64, f64)>, usize>;

/// a polygon layer stored in an R-tree.
pub struct PolygonalEntry<D> {
    pub geometry: MultiPolygon<f64>,
    pub data: D,
}

/// spatial index over a polygon layer. queries prune candidates by bounding
/// box and then run the exact predicate, so results match a brute-force scan
/// over every polygon. matches are returned in the order the polygons were
/// loaded, which keeps downstream aggregation independent of tree layout.
pub struct PolygonalRTree<D> {
    rtree: RTree<IndexedEnvelope>,
    entries: Vec<PolygonalEntry<D>>,
}

impl<D> PolygonalRTree<D> {
    pub fn new(data: Vec<(MultiPolygon<f64>, D)>) -> Result<PolygonalRTree<D>, String> {
        let mut envelopes = Vec::with_capacity(data.len());
        let mut entries = Vec::with_capacity(data.len());
        for (index, (geometry, data)) in data.into_iter().enumerate() {
            let rect = geometry.bounding_rect().ok_or_else(|| {
                format!(
                    "cannot get bounds of geometry at row {index}: '{}'",
                    geometry.wkt_string()
                )
            })?;
            envelopes.push(GeomWithData::new(
                geo_utils::rectangle_from_rect(&rect),
                index,
            ));
            entries.push(PolygonalEntry { geometry, data });
        }
        let rtree = RTree::bulk_load(envelopes);
        Ok(PolygonalRTree { rtree, entries })
    }

    /// polygons sharing at least one point with the line.
    pub fn intersecting_line(&self, line: &LineString<f64>) -> Vec<&PolygonalEntry<D>> {
        match line.bounding_rect() {
            None => vec![],
            Some(rect) => self.query(&rect, |g| g.intersects(line)),
        }
    }

    /// polygons sharing at least one point with the point, boundary included.
    pub fn intersecting_point(&self, point: &Point<f64>) -> Vec<&PolygonalEntry<D>> {
        self.query(&point.bounding_rect(), |g| g.intersects(point))
    }

    /// polygons with the point in their interior. a point on a polygon
    /// boundary is not contained.
    pub fn containing_point(&self, point: &Point<f64>) -> Vec<&PolygonalEntry<D>> {
        self.query(&point.bounding_rect(), |g| g.contains(point))
    }

    fn query<F>(&self, rect: &Rect<f64>, predicate: F) -> Vec<&PolygonalEntry<D>>
    where
        F: Fn(&MultiPolygon<f64>) -> bool,
    {
        let envelope = geo_utils::envelope_from_rect(rect);
        let mut indices = self
            .rtree
            .locate_in_envelope_intersecting(&envelope)
            .map(|candidate| candidate.data)
            .collect::<Vec<_>>();
        indices.sort_unstable();
        indices
            .into_iter()
            .filter_map(|idx| self.entries.get(idx))
            .filter(|entry| predicate(&entry.geometry))
            .collect()
    }
}
