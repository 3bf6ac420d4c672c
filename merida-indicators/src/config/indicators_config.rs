use crate::layer::LayerSource;
use crate::scenario::Scenario;
use crate::IndicatorError;
use merida_core::util::{bounding_box::BoundingBox, crs::Crs};
use merida_gtfs::feed::FeedConfig;
use serde::{Deserialize, Serialize};

/// inputs and options of an indicator run. defaults follow the layout of
/// the Mérida study data directory.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(default)]
pub struct IndicatorsConfig {
    /// GTFS archive of the current network
    pub base_feed: String,
    /// GTFS archive of the network with the intervention
    pub treatment_feed: String,
    /// origin-destination zoning
    pub zones: LayerSource,
    pub zone_id_column: String,
    /// origin-destination matrix CSV
    pub od_file: String,
    /// walking isochrones, `{t}` in the file name is replaced by `walking_time`
    pub isochrones: LayerSource,
    pub census_blocks: LayerSource,
    /// walking time budget of the isochrones, in minutes
    pub walking_time: u32,
    pub feed: FeedConfig,
    pub output_directory: String,
    pub overwrite: bool,
    /// run base and treatment concurrently
    pub parallelize: bool,
}

impl Default for IndicatorsConfig {
    fn default() -> Self {
        Self {
            base_feed: String::from("datos/GTFS/gtfs-merida.zip"),
            treatment_feed: String::from("datos/GTFS/gtfs-merida-treatment.zip"),
            zones: LayerSource::GeoJson {
                file: String::from("datos/od_celular/zonificacion.geojson"),
                crs: Crs::Wgs84,
                bbox: None,
            },
            zone_id_column: String::from("ID"),
            od_file: String::from("datos/od_celular/Matriz_OD_Movilidad_Merida.csv"),
            isochrones: LayerSource::GeoJson {
                file: String::from("datos/isocronas/{t}_minutos_pob.geojson"),
                crs: Crs::Wgs84,
                bbox: None,
            },
            census_blocks: LayerSource::Shapefile {
                file: String::from(
                    "datos/31_Manzanas_INV2020_shp/INV2020_IND_PVEU_MZA_31.shp",
                ),
                crs: Crs::MexicoItrf2008Lcc,
                bbox: Some(BoundingBox::MERIDA_BLOCKS),
            },
            walking_time: 5,
            feed: FeedConfig::default(),
            output_directory: String::from("datos/calculos_gtfs"),
            overwrite: false,
            parallelize: true,
        }
    }
}

impl IndicatorsConfig {
    pub fn feed_path(&self, scenario: Scenario) -> &str {
        match scenario {
            Scenario::Base => &self.base_feed,
            Scenario::Treatment => &self.treatment_feed,
        }
    }

    pub fn validate(&self) -> Result<(), IndicatorError> {
        if self.walking_time == 0 {
            return Err(IndicatorError::ConfigurationError(String::from(
                "walking_time must be a positive number of minutes",
            )));
        }
        let window = &self.feed.longitude_window;
        if !(window.west < window.east) {
            return Err(IndicatorError::ConfigurationError(format!(
                "longitude window west bound {} must be less than east bound {}",
                window.west, window.east
            )));
        }
        Ok(())
    }
}

impl TryFrom<&String> for IndicatorsConfig {
    type Error = IndicatorError;

    fn try_from(f: &String) -> Result<Self, Self::Error> {
        let config: IndicatorsConfig = if f.ends_with(".toml") {
            let s = std::fs::read_to_string(f).map_err(|e| {
                IndicatorError::ConfigurationError(format!("failure reading {f}: {e}"))
            })?;
            toml::from_str(&s).map_err(|e| {
                IndicatorError::ConfigurationError(format!("failure decoding {f}: {e}"))
            })?
        } else if f.ends_with(".json") {
            let s = std::fs::read_to_string(f).map_err(|e| {
                IndicatorError::ConfigurationError(format!("failure reading {f}: {e}"))
            })?;
            serde_json::from_str(&s).map_err(|e| {
                IndicatorError::ConfigurationError(format!("failure decoding {f}: {e}"))
            })?
        } else {
            return Err(IndicatorError::ConfigurationError(format!(
                "unsupported file type: {f}"
            )));
        };
        config.validate()?;
        Ok(config)
    }
}
