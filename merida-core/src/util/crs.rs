use geo::{Coord, Geometry, MapCoords};
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;

/// coordinate reference systems found in the input layers.
///
/// every spatial predicate in this workspace runs in WGS84, so layers in any
/// other system are reprojected with [`Crs::to_wgs84`] right after loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Crs {
    /// EPSG:4326, longitude/latitude in degrees
    #[default]
    #[serde(alias = "EPSG:4326")]
    Wgs84,
    /// EPSG:6372, "Mexico ITRF2008 / LCC", the projection of INEGI census layers
    #[serde(alias = "EPSG:6372")]
    MexicoItrf2008Lcc,
}

impl Crs {
    pub fn to_wgs84(&self, geometry: Geometry<f64>) -> Geometry<f64> {
        match self {
            Crs::Wgs84 => geometry,
            Crs::MexicoItrf2008Lcc => {
                let lcc = LambertConformalConic::mexico_itrf2008();
                geometry.map_coords(|c| lcc.inverse(c))
            }
        }
    }
}

impl std::fmt::Display for Crs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Crs::Wgs84 => write!(f, "EPSG:4326"),
            Crs::MexicoItrf2008Lcc => write!(f, "EPSG:6372"),
        }
    }
}

/// ellipsoidal Lambert Conformal Conic projection with two standard parallels,
/// following Snyder, "Map Projections: A Working Manual" (1987), pp. 107-109.
#[derive(Debug, Clone, Copy)]
pub struct LambertConformalConic {
    semi_major: f64,
    eccentricity: f64,
    lon0: f64,
    false_easting: f64,
    false_northing: f64,
    n: f64,
    big_f: f64,
    rho0: f64,
}

const MAX_LATITUDE_ITERATIONS: usize = 15;
const LATITUDE_TOLERANCE: f64 = 1e-12;

impl LambertConformalConic {
    /// parameters of EPSG:6372 on the GRS80 ellipsoid.
    pub fn mexico_itrf2008() -> LambertConformalConic {
        LambertConformalConic::new(
            6378137.0,
            298.257222101,
            17.5,
            29.5,
            12.0,
            -102.0,
            2500000.0,
            0.0,
        )
    }

    /// angles in degrees, distances in meters.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        semi_major: f64,
        inverse_flattening: f64,
        lat1: f64,
        lat2: f64,
        lat0: f64,
        lon0: f64,
        false_easting: f64,
        false_northing: f64,
    ) -> LambertConformalConic {
        let f = 1.0 / inverse_flattening;
        let e = (2.0 * f - f * f).sqrt();
        let (phi1, phi2, phi0) = (lat1.to_radians(), lat2.to_radians(), lat0.to_radians());
        let (m1, m2) = (m(e, phi1), m(e, phi2));
        let (t1, t2, t0) = (t(e, phi1), t(e, phi2), t(e, phi0));
        let n = if (phi1 - phi2).abs() < 1e-12 {
            phi1.sin()
        } else {
            (m1.ln() - m2.ln()) / (t1.ln() - t2.ln())
        };
        let big_f = m1 / (n * t1.powf(n));
        let rho0 = semi_major * big_f * t0.powf(n);
        LambertConformalConic {
            semi_major,
            eccentricity: e,
            lon0: lon0.to_radians(),
            false_easting,
            false_northing,
            n,
            big_f,
            rho0,
        }
    }

    /// longitude/latitude in degrees to projected x/y.
    pub fn forward(&self, lonlat: Coord<f64>) -> Coord<f64> {
        let phi = lonlat.y.to_radians();
        let rho = self.semi_major * self.big_f * t(self.eccentricity, phi).powf(self.n);
        let theta = self.n * (lonlat.x.to_radians() - self.lon0);
        Coord {
            x: self.false_easting + rho * theta.sin(),
            y: self.false_northing + self.rho0 - rho * theta.cos(),
        }
    }

    /// projected x/y to longitude/latitude in degrees.
    pub fn inverse(&self, xy: Coord<f64>) -> Coord<f64> {
        let sign = self.n.signum();
        let dx = xy.x - self.false_easting;
        let dy = self.rho0 - (xy.y - self.false_northing);
        let rho = sign * (dx * dx + dy * dy).sqrt();
        let theta = (sign * dx).atan2(sign * dy);
        let lon = theta / self.n + self.lon0;
        let lat = if rho == 0.0 {
            sign * FRAC_PI_2
        } else {
            let t = (rho / (self.semi_major * self.big_f)).powf(1.0 / self.n);
            self.latitude_from_t(t)
        };
        Coord {
            x: lon.to_degrees(),
            y: lat.to_degrees(),
        }
    }

    fn latitude_from_t(&self, t: f64) -> f64 {
        let e = self.eccentricity;
        let mut phi = FRAC_PI_2 - 2.0 * t.atan();
        for _ in 0..MAX_LATITUDE_ITERATIONS {
            let es = e * phi.sin();
            let next = FRAC_PI_2 - 2.0 * (t * ((1.0 - es) / (1.0 + es)).powf(e / 2.0)).atan();
            let done = (next - phi).abs() < LATITUDE_TOLERANCE;
            phi = next;
            if done {
                break;
            }
        }
        phi
    }
}

fn m(e: f64, phi: f64) -> f64 {
    phi.cos() / (1.0 - e * e * phi.sin().powi(2)).sqrt()
}

fn t(e: f64, phi: f64) -> f64 {
    let es = e * phi.sin();
    (std::f64::consts::FRAC_PI_4 - phi / 2.0).tan() / ((1.0 - es) / (1.0 + es)).powf(e / 2.0)
}

#[cfg(test)]
mod tests {
    use super::{Crs, LambertConformalConic};
    use crate::util::bounding_box::BoundingBox;
    use geo::{coord, Geometry, Point};

    #[test]
    fn test_origin_maps_to_false_origin() {
        let lcc = LambertConformalConic::mexico_itrf2008();
        let xy = lcc.forward(coord! { x: -102.0, y: 12.0 });
        assert!((xy.x - 2500000.0).abs() < 1e-6, "x was {}", xy.x);
        assert!(xy.y.abs() < 1e-6, "y was {}", xy.y);
    }

    #[test]
    fn test_merida_inside_block_extent() {
        let lcc = LambertConformalConic::mexico_itrf2008();
        let xy = lcc.forward(coord! { x: -89.62, y: 20.97 });
        let bbox = BoundingBox::MERIDA_BLOCKS;
        assert!(bbox.xmin <= xy.x && xy.x <= bbox.xmax, "x was {}", xy.x);
        assert!(bbox.ymin <= xy.y && xy.y <= bbox.ymax, "y was {}", xy.y);
    }

    #[test]
    fn test_inverse_recovers_lonlat() {
        let lcc = LambertConformalConic::mexico_itrf2008();
        for (lon, lat) in [(-89.62, 20.97), (-117.0, 32.5), (-92.1, 14.6), (-102.0, 12.0)] {
            let back = lcc.inverse(lcc.forward(coord! { x: lon, y: lat }));
            assert!((back.x - lon).abs() < 1e-9, "lon {lon} came back as {}", back.x);
            assert!((back.y - lat).abs() < 1e-9, "lat {lat} came back as {}", back.y);
        }
    }

    #[test]
    fn test_wgs84_is_identity() {
        let g = Geometry::Point(Point::new(3780084.97, 1050903.57));
        assert_eq!(Crs::Wgs84.to_wgs84(g.clone()), g);
        match Crs::MexicoItrf2008Lcc.to_wgs84(g) {
            Geometry::Point(p) => {
                assert!((p.x() - -89.62).abs() < 1e-6);
                assert!((p.y() - 20.97).abs() < 1e-6);
            }
            other => panic!("expected point, found {other:?}"),
        }
    }
}
