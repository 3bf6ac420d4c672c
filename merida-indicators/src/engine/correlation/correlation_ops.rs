use super::{pearson, CorrelationRow, SupplyDemandCorrelation, ZoneHourTable};
use crate::IndicatorError;
use itertools::Itertools;
use merida_core::model::{DemandZone, OdRecord};
use merida_core::util::polygonal_rtree::PolygonalRTree;
use merida_gtfs::feed::FeedAccessor;
use std::collections::{BTreeSet, HashMap, HashSet};

/// correlates transit supply with travel demand for every hour present in
/// the origin-destination data.
///
/// zones are the union of those with supply and those with demand. a zone
/// missing from one side reads as 0 on that side.
pub fn run(
    feed: &dyn FeedAccessor,
    zones: &[DemandZone],
    od: &[OdRecord],
) -> Result<SupplyDemandCorrelation, IndicatorError> {
    let supply = supply_by_zone_hour(feed, zones)?;
    let demand = demand_by_zone_hour(od);
    let universe = supply
        .zones()
        .chain(demand.zones())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect_vec();

    let rows = demand
        .hours()
        .map(|hora| {
            let x = supply.column(hora, &universe);
            let y = demand.column(hora, &universe);
            CorrelationRow {
                hora,
                correlacion: pearson(&x, &y),
            }
        })
        .collect_vec();

    let undefined = rows
        .iter()
        .filter(|r| r.correlacion.is_nan())
        .map(|r| r.hora)
        .collect_vec();
    if !undefined.is_empty() {
        log::warn!(
            "supply/demand correlation undefined for hours {undefined:?}: fewer than two zones or no variation"
        );
    }
    log::info!(
        "correlated supply and demand over {} zones and {} hours",
        universe.len(),
        rows.len()
    );
    Ok(SupplyDemandCorrelation {
        rows,
        supply,
        demand,
    })
}

/// distinct trips per zone and hour. a stop lying in several zones counts
/// for each of them.
pub fn supply_by_zone_hour(
    feed: &dyn FeedAccessor,
    zones: &[DemandZone],
) -> Result<ZoneHourTable, IndicatorError> {
    let rtree = PolygonalRTree::new(
        zones
            .iter()
            .map(|z| (z.geometry.clone(), z.zone_id))
            .collect_vec(),
    )
    .map_err(|e| IndicatorError::SpatialIndexError(String::from("demand zones"), e))?;

    let stops = feed.stops()?;
    let mut stop_zones: HashMap<i64, Vec<i64>> = HashMap::new();
    let mut n_overlapping = 0;
    for stop in stops.iter() {
        let matched = rtree
            .intersecting_point(&stop.geometry)
            .iter()
            .map(|entry| entry.data)
            .collect_vec();
        if matched.len() > 1 {
            n_overlapping += 1;
        }
        if !matched.is_empty() {
            stop_zones.entry(stop.stop_id).or_default().extend(matched);
        }
    }
    if n_overlapping > 0 {
        log::warn!("{n_overlapping} stops fall in more than one demand zone and count toward each");
    }
    log::info!(
        "{} of {} stops matched to {} demand zones",
        stop_zones.len(),
        stops.len(),
        zones.len()
    );

    let stop_times = feed.stop_times()?;
    let mut trips: HashMap<(i64, u32), HashSet<&str>> = HashMap::new();
    for st in stop_times.iter() {
        if let Some(zone_ids) = stop_zones.get(&st.stop_id) {
            for zone_id in zone_ids.iter() {
                trips
                    .entry((*zone_id, st.hour))
                    .or_default()
                    .insert(st.trip_id.as_str());
            }
        }
    }

    let mut table = ZoneHourTable::new();
    for ((zone_id, hour), trip_ids) in trips.into_iter() {
        table.add(zone_id, hour, trip_ids.len() as f64);
    }
    Ok(table)
}

/// trips originating per zone and hour, summed over destinations.
pub fn demand_by_zone_hour(od: &[OdRecord]) -> ZoneHourTable {
    let mut table = ZoneHourTable::new();
    for record in od.iter() {
        table.add(record.origin_zone, record.hour, record.trips);
    }
    table
}
