use super::LayerFeature;
use geo::{BoundingRect, Geometry, Intersects};
use geojson::GeoJson;
use merida_core::util::{bounding_box::BoundingBox, crs::Crs};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::{collections::HashMap, path::Path, str::FromStr};
use wkt::TryFromWkt;

/// placeholder in a layer file name replaced by the walking-time budget.
pub const WALKING_TIME_PLACEHOLDER: &str = "{t}";

/// source of a polygon layer.
///
/// every variant carries the CRS its coordinates are written in and an
/// optional bounding box, expressed in that same CRS, that the feature
/// geometry itself (not only its envelope) must intersect to be kept. features are reprojected to WGS84 after filtering.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum LayerSource {
    /// a GeoJSON FeatureCollection
    #[serde(rename = "geojson")]
    GeoJson {
        file: String,
        #[serde(default)]
        crs: Crs,
        #[serde(default)]
        bbox: Option<BoundingBox>,
    },
    /// a CSV file with one WKT geometry column, other columns become attributes
    Csv {
        file: String,
        #[serde(default = "default_geometry_column")]
        geometry_column: String,
        #[serde(default)]
        crs: Crs,
        #[serde(default)]
        bbox: Option<BoundingBox>,
    },
    /// an ESRI shapefile with polygon shapes and its .dbf attribute table
    Shapefile {
        file: String,
        #[serde(default)]
        crs: Crs,
        #[serde(default)]
        bbox: Option<BoundingBox>,
    },
}

fn default_geometry_column() -> String {
    String::from("geometry")
}

impl LayerSource {
    pub fn file(&self) -> &str {
        match self {
            LayerSource::GeoJson { file, .. } => file,
            LayerSource::Csv { file, .. } => file,
            LayerSource::Shapefile { file, .. } => file,
        }
    }

    pub fn crs(&self) -> Crs {
        match self {
            LayerSource::GeoJson { crs, .. } => *crs,
            LayerSource::Csv { crs, .. } => *crs,
            LayerSource::Shapefile { crs, .. } => *crs,
        }
    }

    pub fn bbox(&self) -> Option<BoundingBox> {
        match self {
            LayerSource::GeoJson { bbox, .. } => *bbox,
            LayerSource::Csv { bbox, .. } => *bbox,
            LayerSource::Shapefile { bbox, .. } => *bbox,
        }
    }

    /// copy of this source with `{t}` in the file name replaced by the
    /// walking-time budget in minutes.
    pub fn with_walking_time(&self, minutes: u32) -> LayerSource {
        let replace = |f: &String| f.replace(WALKING_TIME_PLACEHOLDER, &minutes.to_string());
        match self {
            LayerSource::GeoJson { file, crs, bbox } => LayerSource::GeoJson {
                file: replace(file),
                crs: *crs,
                bbox: *bbox,
            },
            LayerSource::Csv {
                file,
                geometry_column,
                crs,
                bbox,
            } => LayerSource::Csv {
                file: replace(file),
                geometry_column: geometry_column.clone(),
                crs: *crs,
                bbox: *bbox,
            },
            LayerSource::Shapefile { file, crs, bbox } => LayerSource::Shapefile {
                file: replace(file),
                crs: *crs,
                bbox: *bbox,
            },
        }
    }

    /// reads every feature, applies the bounding box filter and reprojects
    /// the kept features to WGS84.
    pub fn read(&self) -> Result<Vec<LayerFeature>, String> {
        let features = match self {
            LayerSource::GeoJson { file, .. } => read_geojson(file)?,
            LayerSource::Csv {
                file,
                geometry_column,
                ..
            } => read_csv(file, geometry_column)?,
            LayerSource::Shapefile { file, .. } => read_shapefile(file)?,
        };
        let n_read = features.len();
        let crs = self.crs();
        let kept = features
            .into_iter()
            .filter(|f| match self.bbox() {
                None => true,
                Some(bbox) => {
                    let envelope_hit = f
                        .geometry
                        .bounding_rect()
                        .map(|r| bbox.intersects_rect(&r))
                        .unwrap_or(false);
                    envelope_hit && f.geometry.intersects(&bbox.rect())
                }
            })
            .map(|f| LayerFeature::new(crs.to_wgs84(f.geometry), f.attributes))
            .collect::<Vec<_>>();
        log::info!(
            "read {} of {n_read} features from {} ({crs})",
            kept.len(),
            self.file()
        );
        Ok(kept)
    }
}

fn read_geojson(file: &str) -> Result<Vec<LayerFeature>, String> {
    let contents =
        std::fs::read_to_string(file).map_err(|e| format!("unable to load file {file}: {e}"))?;
    let dataset = GeoJson::from_str(&contents)
        .map_err(|e| format!("failed to read file {file} as GeoJSON: {e}"))?;
    let feature_collection = match dataset {
        GeoJson::FeatureCollection(fc) => Ok(fc),
        GeoJson::Geometry(_) => Err(format!(
            "GeoJSON layer must be a FeatureCollection but found single 'Geometry' in file {file}"
        )),
        GeoJson::Feature(_) => Err(format!(
            "GeoJSON layer must be a FeatureCollection but found single 'Feature' in file {file}"
        )),
    }?;
    feature_collection
        .features
        .into_iter()
        .enumerate()
        .map(|(idx, feature)| {
            let geom = feature
                .geometry
                .ok_or_else(|| format!("feature {idx} has no geometry"))?;
            let geometry: Geometry<f64> = geom
                .try_into()
                .map_err(|e| format!("failed to decode geometry for feature {idx}: {e}"))?;
            let attributes = feature.properties.unwrap_or_default();
            Ok(LayerFeature::new(geometry, attributes))
        })
        .collect()
}

fn read_csv(file: &str, geometry_column: &str) -> Result<Vec<LayerFeature>, String> {
    let mut reader = csv::Reader::from_path(Path::new(file)).map_err(|e| e.to_string())?;
    let headers = reader.headers().map_err(|e| e.to_string())?.clone();
    let header_lookup = headers
        .iter()
        .enumerate()
        .map(|(i, s)| (s, i))
        .collect::<HashMap<_, _>>();
    let geometry_idx = *header_lookup
        .get(geometry_column)
        .ok_or_else(|| format!("file missing {geometry_column} column"))?;

    reader
        .records()
        .enumerate()
        .map(|(idx, r)| {
            let row = r.map_err(|e| e.to_string())?;
            let geometry_str = row
                .get(geometry_idx)
                .ok_or_else(|| format!("row {idx} missing geometry index"))?;
            let geometry: Geometry<f64> = Geometry::try_from_wkt_str(geometry_str)
                .map_err(|e| format!("row {idx} has invalid WKT geometry: {e}"))?;
            let attributes = headers
                .iter()
                .zip(row.iter())
                .enumerate()
                .filter(|(i, _)| *i != geometry_idx)
                .map(|(_, (k, v))| (k.to_string(), Value::String(v.to_string())))
                .collect::<Map<_, _>>();
            Ok(LayerFeature::new(geometry, attributes))
        })
        .collect()
}

fn read_shapefile(file: &str) -> Result<Vec<LayerFeature>, String> {
    let rows = shapefile::read(file).map_err(|e| format!("failed reading '{file}': {e}"))?;

    let mut processed = vec![];
    for (idx, (shape, record)) in rows.into_iter().enumerate() {
        let geometry = match shape {
            shapefile::Shape::Polygon(generic_polygon) => {
                let mp: geo::MultiPolygon<f64> = generic_polygon.try_into().map_err(|e| {
                    format!("failed to convert shapefile polygon at row {idx}: {e}")
                })?;
                Geometry::MultiPolygon(mp)
            }
            shapefile::Shape::PolygonM(generic_polygon) => {
                let mp: geo::MultiPolygon<f64> = generic_polygon.try_into().map_err(|e| {
                    format!("failed to convert shapefile polygon at row {idx}: {e}")
                })?;
                Geometry::MultiPolygon(mp)
            }
            _ => {
                return Err(format!(
                    "unexpected shape type {} found at row {}, must be polygonal",
                    shape.shapetype(),
                    idx
                ))
            }
        };
        let mut attributes = Map::new();
        for (name, value) in record {
            attributes.insert(name, field_value_to_json(value));
        }
        processed.push(LayerFeature::new(geometry, attributes));
    }
    Ok(processed)
}

fn field_value_to_json(value: shapefile::dbase::FieldValue) -> Value {
    use shapefile::dbase::FieldValue;
    let number = |f: f64| Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null);
    match value {
        FieldValue::Character(Some(s)) => Value::String(s),
        FieldValue::Numeric(Some(n)) => number(n),
        FieldValue::Float(Some(n)) => number(f64::from(n)),
        FieldValue::Integer(i) => Value::from(i),
        FieldValue::Double(d) => number(d),
        FieldValue::Logical(Some(b)) => Value::Bool(b),
        _ => Value::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::LayerSource;
    use merida_core::util::{bounding_box::BoundingBox, crs::Crs};
    use std::fs;
    use std::path::PathBuf;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join("merida-indicators-layer-source");
        fs::create_dir_all(&dir).expect("temp dir");
        let path = dir.join(name);
        fs::write(&path, contents).expect("write temp file");
        path
    }

    #[test]
    fn test_deserialize_tagged_source() {
        let source: LayerSource = serde_json::from_str(
            r#"{"type": "csv", "file": "iso_{t}.csv", "crs": "EPSG:6372", "bbox": {"xmin": 0.0, "ymin": 0.0, "xmax": 1.0, "ymax": 1.0}}"#,
        )
        .expect("valid source");
        assert_eq!(source.crs(), Crs::MexicoItrf2008Lcc);
        assert!(source.bbox().is_some());
        let resolved = source.with_walking_time(5);
        assert_eq!(resolved.file(), "iso_5.csv");
        match resolved {
            LayerSource::Csv {
                geometry_column, ..
            } => assert_eq!(geometry_column, "geometry"),
            other => panic!("expected csv source, found {other:?}"),
        }
    }

    #[test]
    fn test_read_geojson_layer() {
        let path = temp_file(
            "zones.geojson",
            r#"{"type": "FeatureCollection", "features": [
                {"type": "Feature", "properties": {"ID": 1},
                 "geometry": {"type": "Polygon", "coordinates": [[[0,0],[1,0],[1,1],[0,1],[0,0]]]}},
                {"type": "Feature", "properties": {"ID": 2},
                 "geometry": {"type": "Polygon", "coordinates": [[[5,5],[6,5],[6,6],[5,6],[5,5]]]}}
            ]}"#,
        );
        let source = LayerSource::GeoJson {
            file: path.to_string_lossy().to_string(),
            crs: Crs::Wgs84,
            bbox: Some(BoundingBox::new(-1.0, -1.0, 2.0, 2.0).expect("valid bbox")),
        };
        let features = source.read().expect("readable layer");
        assert_eq!(features.len(), 1);
        assert_eq!(features[0].attribute_i64("ID"), Ok(1));
    }

    #[test]
    fn test_read_csv_layer_reprojects() {
        let path = temp_file(
            "blocks.csv",
            "CVEGEO,POBTOT,geometry\n\
             310500001,12,\"POLYGON((3780000 1050800,3780200 1050800,3780200 1051000,3780000 1051000,3780000 1050800))\"\n",
        );
        let source = LayerSource::Csv {
            file: path.to_string_lossy().to_string(),
            geometry_column: String::from("geometry"),
            crs: Crs::MexicoItrf2008Lcc,
            bbox: Some(BoundingBox::MERIDA_BLOCKS),
        };
        let features = source.read().expect("readable layer");
        assert_eq!(features.len(), 1);
        assert_eq!(
            features[0].attribute_string("CVEGEO"),
            Ok(String::from("310500001"))
        );
        assert!(features[0].attribute("geometry").is_none());
        let rect = geo::BoundingRect::bounding_rect(&features[0].geometry).expect("bounds");
        assert!(rect.min().x > -89.7 && rect.max().x < -89.5);
        assert!(rect.min().y > 20.9 && rect.max().y < 21.1);
    }

    #[test]
    fn test_bbox_filter_tests_geometry_not_envelope() {
        // the triangle's envelope covers the box, the triangle does not
        let path = temp_file(
            "triangle.csv",
            "id,geometry\n\
             1,\"POLYGON((0 0,10 0,0 10,0 0))\"\n\
             2,\"POLYGON((7 7,10 7,10 10,7 10,7 7))\"\n",
        );
        let source = LayerSource::Csv {
            file: path.to_string_lossy().to_string(),
            geometry_column: String::from("geometry"),
            crs: Crs::Wgs84,
            bbox: Some(BoundingBox::new(8.0, 8.0, 9.0, 9.0).expect("valid bbox")),
        };
        let features = source.read().expect("readable layer");
        assert_eq!(features.len(), 1);
        assert_eq!(features[0].attribute_string("id"), Ok(String::from("2")));
    }

    #[test]
    fn test_missing_file_fails() {
        let source = LayerSource::Shapefile {
            file: String::from("/nonexistent/manzanas.shp"),
            crs: Crs::MexicoItrf2008Lcc,
            bbox: None,
        };
        assert!(source.read().is_err());
    }
}
