use super::{LayerFeature, LayerSource};
use crate::IndicatorError;
use merida_core::model::{
    CensusBlock, DemandZone, IsochronePolygon, PopulationAttributes, PopulationField,
    PopulationValue,
};
use merida_core::util::geo_utils;
use serde_json::Value;

pub const CVEGEO_COLUMN: &str = "CVEGEO";

/// reads the origin-destination zoning, identified by the integer `id_column`.
pub fn read_demand_zones(
    source: &LayerSource,
    id_column: &str,
) -> Result<Vec<DemandZone>, IndicatorError> {
    read_features(source)?
        .into_iter()
        .enumerate()
        .map(|(idx, f)| {
            let zone_id = f
                .attribute_i64(id_column)
                .map_err(|e| layer_error(source, idx, e))?;
            let geometry =
                geo_utils::to_multipolygon(f.geometry).map_err(|e| layer_error(source, idx, e))?;
            Ok(DemandZone { zone_id, geometry })
        })
        .collect()
}

/// reads the walking isochrones computed for `walking_time` minutes.
pub fn read_isochrones(
    source: &LayerSource,
    walking_time: u32,
) -> Result<Vec<IsochronePolygon>, IndicatorError> {
    let source = source.with_walking_time(walking_time);
    read_features(&source)?
        .into_iter()
        .enumerate()
        .map(|(idx, f)| {
            let cvegeo = f
                .attribute_string(CVEGEO_COLUMN)
                .map_err(|e| layer_error(&source, idx, e))?;
            let geometry =
                geo_utils::to_multipolygon(f.geometry).map_err(|e| layer_error(&source, idx, e))?;
            Ok(IsochronePolygon { cvegeo, geometry })
        })
        .collect()
}

/// reads census blocks with their population columns normalized to counts.
pub fn read_census_blocks(source: &LayerSource) -> Result<Vec<CensusBlock>, IndicatorError> {
    read_features(source)?
        .into_iter()
        .enumerate()
        .map(|(idx, f)| {
            let cvegeo = f
                .attribute_string(CVEGEO_COLUMN)
                .map_err(|e| layer_error(source, idx, e))?;
            let population = population_attributes(&f).map_err(|e| layer_error(source, idx, e))?;
            let geometry =
                geo_utils::to_multipolygon(f.geometry).map_err(|e| layer_error(source, idx, e))?;
            Ok(CensusBlock {
                cvegeo,
                geometry,
                population,
            })
        })
        .collect()
}

fn population_attributes(feature: &LayerFeature) -> Result<PopulationAttributes, String> {
    let mut population = PopulationAttributes::default();
    for field in PopulationField::ALL {
        let value = match feature.attribute(field.column_name()) {
            None if field.is_required() => {
                return Err(format!("required column {field} is missing"));
            }
            None => PopulationValue::Missing,
            Some(v) => population_value(v),
        };
        population.set(field, value.normalize());
    }
    Ok(population)
}

/// numeric text, as read from CSV layers, counts as a number so that "12.0"
/// reads as 12 like its numeric counterpart.
fn population_value(value: &Value) -> PopulationValue {
    match value {
        Value::String(s) => match s.trim().parse::<f64>() {
            Ok(n) => PopulationValue::Number(n),
            Err(_) => PopulationValue::Text(s.clone()),
        },
        other => PopulationValue::from(other),
    }
}

fn read_features(source: &LayerSource) -> Result<Vec<LayerFeature>, IndicatorError> {
    source
        .read()
        .map_err(|e| IndicatorError::LayerReadError(source.file().to_string(), e))
}

fn layer_error(source: &LayerSource, idx: usize, message: String) -> IndicatorError {
    IndicatorError::LayerReadError(
        source.file().to_string(),
        format!("feature {idx}: {message}"),
    )
}

#[cfg(test)]
mod tests {
    use super::{population_attributes, read_census_blocks, read_isochrones};
    use crate::layer::{LayerFeature, LayerSource};
    use crate::IndicatorError;
    use geo::{Geometry, Point};
    use merida_core::util::crs::Crs;
    use serde_json::json;
    use std::fs;

    fn feature(attributes: serde_json::Value) -> LayerFeature {
        match attributes {
            serde_json::Value::Object(map) => {
                LayerFeature::new(Geometry::Point(Point::new(0.0, 0.0)), map)
            }
            other => panic!("expected object, found {other}"),
        }
    }

    #[test]
    fn test_population_attributes_normalized() {
        let f = feature(json!({
            "POBTOT": "25", "POBFEM": 13.0, "POB0_14": "*", "P_60YMAS": -3, "P_CD_T": null
        }));
        let p = population_attributes(&f).expect("POBTOT present");
        assert_eq!(p.pobtot, 25);
        assert_eq!(p.pobfem, 13);
        assert_eq!(p.pob0_14, 0);
        assert_eq!(p.p_60ymas, 0);
        assert_eq!(p.p_cd_t, 0);
    }

    #[test]
    fn test_optional_columns_default_to_zero() {
        let p = population_attributes(&feature(json!({"POBTOT": 7}))).expect("POBTOT present");
        assert_eq!(p.pobtot, 7);
        assert_eq!(p.pobfem, 0);
        assert!(population_attributes(&feature(json!({"POBFEM": 7}))).is_err());
    }

    #[test]
    fn test_read_isochrones_with_placeholder() {
        let dir = std::env::temp_dir().join("merida-indicators-layer-ops");
        fs::create_dir_all(&dir).expect("temp dir");
        fs::write(
            dir.join("iso_5.csv"),
            "CVEGEO,geometry\nA,\"POLYGON((0 0,1 0,1 1,0 1,0 0))\"\n",
        )
        .expect("write");
        let source = LayerSource::Csv {
            file: dir.join("iso_{t}.csv").to_string_lossy().to_string(),
            geometry_column: String::from("geometry"),
            crs: Crs::Wgs84,
            bbox: None,
        };
        let isochrones = read_isochrones(&source, 5).expect("readable");
        assert_eq!(isochrones.len(), 1);
        assert_eq!(isochrones[0].cvegeo, "A");
        assert!(read_isochrones(&source, 10).is_err());
    }

    #[test]
    fn test_point_geometry_rejected() {
        let dir = std::env::temp_dir().join("merida-indicators-layer-ops");
        fs::create_dir_all(&dir).expect("temp dir");
        let path = dir.join("bad_blocks.csv");
        fs::write(&path, "CVEGEO,POBTOT,geometry\nA,3,POINT(0 0)\n").expect("write");
        let source = LayerSource::Csv {
            file: path.to_string_lossy().to_string(),
            geometry_column: String::from("geometry"),
            crs: Crs::Wgs84,
            bbox: None,
        };
        match read_census_blocks(&source) {
            Err(IndicatorError::LayerReadError(file, msg)) => {
                assert!(file.ends_with("bad_blocks.csv"));
                assert!(msg.starts_with("feature 0"), "message was {msg}");
            }
            other => panic!("expected layer read error, found {other:?}"),
        }
    }
}
