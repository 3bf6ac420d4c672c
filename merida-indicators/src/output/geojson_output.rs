use crate::engine::coverage::ServedBlocks;
use crate::engine::wait_time::BlockWaitTime;
use crate::layer::CVEGEO_COLUMN;
use crate::IndicatorError;
use geo::MultiPolygon;
use geojson::{Feature, FeatureCollection, JsonObject};
use merida_core::model::PopulationField;
use serde_json::Value;
use std::io::BufWriter;
use std::path::Path;

fn feature(geometry: &MultiPolygon<f64>, properties: JsonObject) -> Feature {
    let geometry = geojson::Geometry::from(&geo::Geometry::MultiPolygon(geometry.clone()));
    Feature {
        bbox: None,
        geometry: Some(geometry),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

fn write_collection(features: Vec<Feature>, path: &Path) -> Result<(), IndicatorError> {
    let n_features = features.len();
    let collection = FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    };
    let file = std::fs::File::create(path).map_err(|e| {
        IndicatorError::OutputWriteError(path.to_string_lossy().to_string(), e.to_string())
    })?;
    serde_json::to_writer(BufWriter::new(file), &collection).map_err(|e| {
        IndicatorError::OutputWriteError(path.to_string_lossy().to_string(), e.to_string())
    })?;
    log::info!("wrote {n_features} features to {}", path.display());
    Ok(())
}

/// served census blocks with their CVEGEO and population fields.
pub fn write_served_blocks(served: &ServedBlocks, path: &Path) -> Result<(), IndicatorError> {
    let features = served
        .blocks
        .iter()
        .map(|block| {
            let mut properties = JsonObject::new();
            properties.insert(
                String::from(CVEGEO_COLUMN),
                Value::String(block.cvegeo.clone()),
            );
            for field in PopulationField::ALL {
                properties.insert(
                    field.column_name().to_string(),
                    Value::from(block.population.get(field)),
                );
            }
            feature(&block.geometry, properties)
        })
        .collect();
    write_collection(features, path)
}

/// census blocks with the mean wait at the stops in their isochrone, null
/// when undefined.
pub fn write_wait_times(rows: &[BlockWaitTime], path: &Path) -> Result<(), IndicatorError> {
    let features = rows
        .iter()
        .map(|row| {
            let mut properties = JsonObject::new();
            properties.insert(
                String::from(CVEGEO_COLUMN),
                Value::String(row.cvegeo.clone()),
            );
            let mean_time = row
                .mean_time
                .and_then(serde_json::Number::from_f64)
                .map(Value::Number)
                .unwrap_or(Value::Null);
            properties.insert(String::from("mean_time"), mean_time);
            feature(&row.geometry, properties)
        })
        .collect();
    write_collection(features, path)
}

#[cfg(test)]
mod tests {
    use super::{write_served_blocks, write_wait_times};
    use crate::engine::coverage::ServedBlocks;
    use crate::engine::wait_time::BlockWaitTime;
    use geo::{polygon, MultiPolygon};
    use geojson::GeoJson;
    use merida_core::model::{CensusBlock, PopulationAttributes};
    use std::fs;
    use std::str::FromStr;

    fn unit_square() -> MultiPolygon<f64> {
        MultiPolygon::new(vec![polygon![
            (x: 0.0, y: 0.0),
            (x: 1.0, y: 0.0),
            (x: 1.0, y: 1.0),
            (x: 0.0, y: 1.0),
            (x: 0.0, y: 0.0),
        ]])
    }

    fn read_back(name: &str, write: impl FnOnce(&std::path::Path)) -> geojson::FeatureCollection {
        let dir = std::env::temp_dir().join("merida-indicators-geojson-output");
        fs::create_dir_all(&dir).expect("temp dir");
        let path = dir.join(name);
        write(&path);
        let text = fs::read_to_string(&path).expect("read back");
        match GeoJson::from_str(&text).expect("valid geojson") {
            GeoJson::FeatureCollection(fc) => fc,
            other => panic!("expected feature collection, found {other:?}"),
        }
    }

    #[test]
    fn test_write_served_blocks() {
        let served = ServedBlocks {
            blocks: vec![CensusBlock {
                cvegeo: String::from("3105000010234001"),
                geometry: unit_square(),
                population: PopulationAttributes {
                    pobtot: 12,
                    p_cd_t: 1,
                    ..Default::default()
                },
            }],
        };
        let fc = read_back("served.geojson", |p| {
            write_served_blocks(&served, p).expect("write")
        });
        assert_eq!(fc.features.len(), 1);
        let props = fc.features[0].properties.as_ref().expect("properties");
        assert_eq!(props["CVEGEO"], "3105000010234001");
        assert_eq!(props["POBTOT"], 12);
        assert_eq!(props["P_CD_T"], 1);
        assert_eq!(props["POBFEM"], 0);
    }

    #[test]
    fn test_write_wait_times_with_null() {
        let rows = vec![
            BlockWaitTime {
                cvegeo: String::from("A"),
                mean_time: Some(12.5),
                geometry: unit_square(),
            },
            BlockWaitTime {
                cvegeo: String::from("B"),
                mean_time: None,
                geometry: unit_square(),
            },
        ];
        let fc = read_back("wait.geojson", |p| write_wait_times(&rows, p).expect("write"));
        let first = fc.features[0].properties.as_ref().expect("properties");
        let second = fc.features[1].properties.as_ref().expect("properties");
        assert_eq!(first["mean_time"], 12.5);
        assert!(second["mean_time"].is_null());
    }
}
