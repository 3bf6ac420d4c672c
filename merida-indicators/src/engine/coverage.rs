//! census blocks whose walking isochrone is touched by at least one route.
use crate::IndicatorError;
use itertools::Itertools;
use kdam::tqdm;
use merida_core::model::{CensusBlock, IsochronePolygon, PopulationAttributes};
use merida_core::util::polygonal_rtree::PolygonalRTree;
use merida_gtfs::feed::FeedAccessor;
use std::collections::HashSet;

/// blocks served by the network, in census layer order.
#[derive(Debug, Clone, PartialEq)]
pub struct ServedBlocks {
    pub blocks: Vec<CensusBlock>,
}

impl ServedBlocks {
    /// population summed over the served blocks, per field.
    pub fn population(&self) -> PopulationAttributes {
        self.blocks.iter().map(|b| &b.population).sum()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

pub fn run(
    feed: &dyn FeedAccessor,
    isochrones: &[IsochronePolygon],
    blocks: &[CensusBlock],
) -> Result<ServedBlocks, IndicatorError> {
    let routes = feed.routes()?;
    let cvegeos = served_cvegeos(&routes, isochrones)?;
    let served = blocks
        .iter()
        .filter(|b| cvegeos.contains(b.cvegeo.as_str()))
        .cloned()
        .collect_vec();
    log::info!(
        "{} routes reach {} isochrones and {} of {} census blocks",
        routes.len(),
        cvegeos.len(),
        served.len(),
        blocks.len()
    );
    Ok(ServedBlocks { blocks: served })
}

/// CVEGEO codes of the isochrones intersected by any of the routes.
fn served_cvegeos<'a>(
    routes: &[merida_core::model::RouteGeometry],
    isochrones: &'a [IsochronePolygon],
) -> Result<HashSet<&'a str>, IndicatorError> {
    let rtree = PolygonalRTree::new(
        isochrones
            .iter()
            .map(|iso| (iso.geometry.clone(), iso.cvegeo.as_str()))
            .collect_vec(),
    )
    .map_err(|e| IndicatorError::SpatialIndexError(String::from("isochrones"), e))?;

    let route_iter = tqdm!(
        routes.iter(),
        total = routes.len(),
        desc = "routes x isochrones"
    );
    let mut cvegeos = HashSet::new();
    for route in route_iter {
        for entry in rtree.intersecting_line(&route.geometry) {
            cvegeos.insert(entry.data);
        }
    }
    eprintln!();
    Ok(cvegeos)
}

#[cfg(test)]
mod tests {
    use super::run;
    use geo::{line_string, polygon, LineString, MultiPolygon};
    use merida_core::model::{CensusBlock, IsochronePolygon, PopulationAttributes, RouteGeometry};
    use merida_gtfs::feed::InMemoryFeed;

    fn square(x0: f64, y0: f64, size: f64) -> MultiPolygon<f64> {
        MultiPolygon::new(vec![polygon![
            (x: x0, y: y0),
            (x: x0 + size, y: y0),
            (x: x0 + size, y: y0 + size),
            (x: x0, y: y0 + size),
            (x: x0, y: y0),
        ]])
    }

    fn block(cvegeo: &str, x0: f64, pobtot: u64) -> CensusBlock {
        CensusBlock {
            cvegeo: cvegeo.to_string(),
            geometry: square(x0, 0.0, 1.0),
            population: PopulationAttributes {
                pobtot,
                pobfem: pobtot / 2,
                ..Default::default()
            },
        }
    }

    fn iso(cvegeo: &str, x0: f64) -> IsochronePolygon {
        IsochronePolygon {
            cvegeo: cvegeo.to_string(),
            geometry: square(x0 - 0.25, -0.25, 1.5),
        }
    }

    fn route(route_id: i64, geometry: LineString<f64>) -> RouteGeometry {
        RouteGeometry {
            route_id,
            shape_id: format!("{route_id}D1"),
            geometry,
        }
    }

    fn blocks() -> Vec<CensusBlock> {
        vec![
            block("X", 0.0, 10),
            block("Y", 2.0, 20),
            block("Z", 4.0, 30),
            block("W", 6.0, 40),
        ]
    }

    fn isochrones() -> Vec<IsochronePolygon> {
        vec![iso("X", 0.0), iso("Y", 2.0), iso("Z", 4.0), iso("W", 6.0)]
    }

    #[test]
    fn test_union_across_routes() {
        // route A reaches X and Y, route B reaches Y and Z
        let feed = InMemoryFeed::new(
            vec![],
            vec![],
            vec![
                route(1, line_string![(x: 0.5, y: 0.5), (x: 2.5, y: 0.5)]),
                route(2, line_string![(x: 2.5, y: 0.6), (x: 4.5, y: 0.6)]),
            ],
        );
        let served = run(&feed, &isochrones(), &blocks()).expect("coverage");
        let ids = served
            .blocks
            .iter()
            .map(|b| b.cvegeo.as_str())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["X", "Y", "Z"]);
        let population = served.population();
        assert_eq!(population.pobtot, 60);
        assert_eq!(population.pobfem, 30);
    }

    #[test]
    fn test_no_routes_serves_nothing() {
        let feed = InMemoryFeed::default();
        let served = run(&feed, &isochrones(), &blocks()).expect("coverage");
        assert!(served.is_empty());
        assert_eq!(served.population(), PopulationAttributes::default());
    }

    #[test]
    fn test_isochrone_reach_beyond_block() {
        // passes 0.1 to the right of block X but inside its isochrone
        let feed = InMemoryFeed::new(
            vec![],
            vec![],
            vec![route(1, line_string![(x: 1.1, y: -1.0), (x: 1.1, y: 2.0)])],
        );
        let served = run(&feed, &isochrones(), &blocks()).expect("coverage");
        assert_eq!(served.len(), 1);
        assert_eq!(served.blocks[0].cvegeo, "X");
    }
}
