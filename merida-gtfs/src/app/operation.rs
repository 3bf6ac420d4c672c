//! feed inspection scripts: hourly activity and route shapes of a single
//! GTFS archive, after the study-area filters the indicators apply.
use crate::feed::{FeedAccessor, FeedConfig, FeedError, GtfsFeed, LongitudeWindow};
use crate::summary;
use clap::Subcommand;
use merida_core::util::fs_utils;
use serde::{Deserialize, Serialize};
use std::path::Path;
use wkt::ToWkt;

#[derive(Debug, Clone, Serialize, Deserialize, Subcommand)]
pub enum GtfsOperation {
    /// count trips, departures and stops per hour of day
    Summary {
        /// GTFS archive (zip or directory)
        #[arg(long)]
        feed: String,
        #[arg(long, default_value_t = String::from("feed_time_series.csv"))]
        output_file: String,
        #[arg(long, default_value_t = false)]
        overwrite: bool,
    },
    /// write the route shapes inside the study area as WKT
    Shapes {
        /// GTFS archive (zip or directory)
        #[arg(long)]
        feed: String,
        #[arg(long, default_value_t = String::from("shapes.csv"))]
        output_file: String,
        #[arg(long, default_value_t = false)]
        overwrite: bool,
        /// western bound of the study area, in degrees
        #[arg(long, default_value_t = -89.8, allow_hyphen_values = true)]
        west: f64,
        /// eastern bound of the study area, in degrees
        #[arg(long, default_value_t = -89.5, allow_hyphen_values = true)]
        east: f64,
        #[arg(long, default_value_t = 'D')]
        shape_id_separator: char,
    },
}

#[derive(Serialize)]
struct ShapeRow<'a> {
    shape_id: &'a str,
    route_id: i64,
    geometry: String,
}

impl GtfsOperation {
    pub fn run(&self) -> Result<(), FeedError> {
        match self {
            GtfsOperation::Summary {
                feed,
                output_file,
                overwrite,
            } => {
                let feed = GtfsFeed::new(feed, FeedConfig::default())?;
                let rows = summary::summarize(&feed)?;
                summary::write_summary(&rows, Path::new(output_file), *overwrite)
            }
            GtfsOperation::Shapes {
                feed,
                output_file,
                overwrite,
                west,
                east,
                shape_id_separator,
            } => {
                let config = FeedConfig {
                    longitude_window: LongitudeWindow {
                        west: *west,
                        east: *east,
                    },
                    shape_id_separator: *shape_id_separator,
                };
                let feed = GtfsFeed::new(feed, config)?;
                write_shapes(&feed, output_file, *overwrite)
            }
        }
    }
}

fn write_shapes(feed: &dyn FeedAccessor, output_file: &str, overwrite: bool) -> Result<(), FeedError> {
    let filepath = fs_utils::output_path(Path::new(""), output_file, overwrite)
        .map_err(FeedError::OtherError)?;
    let routes = feed.routes()?;
    let mut writer = csv::Writer::from_path(&filepath)
        .map_err(|e| FeedError::CsvWriteError(output_file.to_string(), e))?;
    for route in routes.iter() {
        let row = ShapeRow {
            shape_id: &route.shape_id,
            route_id: route.route_id,
            geometry: route.geometry.wkt_string(),
        };
        writer
            .serialize(row)
            .map_err(|e| FeedError::CsvWriteError(output_file.to_string(), e))?;
    }
    writer
        .flush()
        .map_err(|e| FeedError::CsvWriteError(output_file.to_string(), csv::Error::from(e)))?;
    log::info!("wrote {} shapes to {output_file}", routes.len());
    Ok(())
}
