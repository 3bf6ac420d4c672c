use std::collections::{BTreeMap, BTreeSet};

/// a zone × hour-of-day table of counts. cells never set read as 0.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ZoneHourTable {
    cells: BTreeMap<i64, BTreeMap<u32, f64>>,
    hours: BTreeSet<u32>,
}

impl ZoneHourTable {
    pub fn new() -> ZoneHourTable {
        ZoneHourTable::default()
    }

    /// adds `value` to the cell, creating the zone row and hour column as needed.
    pub fn add(&mut self, zone: i64, hour: u32, value: f64) {
        *self.cells.entry(zone).or_default().entry(hour).or_insert(0.0) += value;
        self.hours.insert(hour);
    }

    pub fn get(&self, zone: i64, hour: u32) -> f64 {
        self.cells
            .get(&zone)
            .and_then(|row| row.get(&hour))
            .copied()
            .unwrap_or(0.0)
    }

    /// zones with at least one cell, ascending.
    pub fn zones(&self) -> impl Iterator<Item = i64> + '_ {
        self.cells.keys().copied()
    }

    /// hours with at least one cell, ascending.
    pub fn hours(&self) -> impl Iterator<Item = u32> + '_ {
        self.hours.iter().copied()
    }

    /// values of one hour for the given zones, in that order.
    pub fn column(&self, hour: u32, zones: &[i64]) -> Vec<f64> {
        zones.iter().map(|z| self.get(*z, hour)).collect()
    }

    /// values of one zone for the given hours, in that order.
    pub fn row(&self, zone: i64, hours: &[u32]) -> Vec<f64> {
        hours.iter().map(|h| self.get(zone, *h)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::ZoneHourTable;

    #[test]
    fn test_missing_cells_read_zero() {
        let mut table = ZoneHourTable::new();
        table.add(2, 8, 3.0);
        table.add(1, 9, 1.0);
        table.add(2, 8, 1.5);
        assert_eq!(table.get(2, 8), 4.5);
        assert_eq!(table.get(1, 8), 0.0);
        assert_eq!(table.zones().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(table.hours().collect::<Vec<_>>(), vec![8, 9]);
        assert_eq!(table.column(8, &[1, 2, 3]), vec![0.0, 4.5, 0.0]);
        assert_eq!(table.row(1, &[8, 9]), vec![0.0, 1.0]);
    }
}
