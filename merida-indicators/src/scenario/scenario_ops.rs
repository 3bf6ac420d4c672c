use super::Scenario;
use crate::config::IndicatorsConfig;
use crate::engine::correlation::{self, SupplyDemandCorrelation};
use crate::engine::coverage::{self, ServedBlocks};
use crate::engine::wait_time::{self, BlockWaitTime};
use crate::layer;
use crate::output::{self, ImpactSummary, OutputFile, ScenarioIndicators};
use crate::IndicatorError;
use itertools::Itertools;
use merida_core::model::{CensusBlock, DemandZone, IsochronePolygon, OdRecord};
use merida_gtfs::feed::{FeedAccessor, GtfsFeed, InMemoryFeed};
use merida_gtfs::summary::{self, FeedSummaryRow};
use std::path::Path;

/// read-only datasets used by both scenarios.
#[derive(Debug, Clone)]
pub struct SharedInputs {
    pub zones: Vec<DemandZone>,
    pub od: Vec<OdRecord>,
    pub isochrones: Vec<IsochronePolygon>,
    pub blocks: Vec<CensusBlock>,
}

impl SharedInputs {
    pub fn load(config: &IndicatorsConfig) -> Result<SharedInputs, IndicatorError> {
        let zones = layer::read_demand_zones(&config.zones, &config.zone_id_column)?;
        let od = layer::read_od_records(&config.od_file)?;
        let isochrones = layer::read_isochrones(&config.isochrones, config.walking_time)?;
        let blocks = layer::read_census_blocks(&config.census_blocks)?;
        log::info!(
            "loaded {} zones, {} OD records, {} isochrones ({} min), {} census blocks",
            zones.len(),
            od.len(),
            isochrones.len(),
            config.walking_time,
            blocks.len()
        );
        Ok(SharedInputs {
            zones,
            od,
            isochrones,
            blocks,
        })
    }
}

/// every indicator computed for one scenario.
#[derive(Debug, Clone)]
pub struct ScenarioResult {
    pub scenario: Scenario,
    pub correlation: SupplyDemandCorrelation,
    pub served: ServedBlocks,
    pub wait_times: Vec<BlockWaitTime>,
    pub feed_summary: Vec<FeedSummaryRow>,
}

impl ScenarioResult {
    pub fn indicators(&self) -> ScenarioIndicators {
        ScenarioIndicators {
            population_served: self.served.population(),
            served_blocks: self.served.len(),
            mean_wait_time: wait_time::mean_block_wait_time(&self.wait_times),
            blocks_with_wait_time: self.wait_times.len(),
            mean_correlation: self.correlation.mean_correlation(),
        }
    }

    pub fn write(&self, directory: &Path, overwrite: bool) -> Result<(), IndicatorError> {
        let path = |file: OutputFile| file.path(directory, self.scenario, overwrite);
        output::write_correlation(&self.correlation.rows, &path(OutputFile::Correlation)?)?;
        output::write_zone_hour_table(&self.correlation.supply, &path(OutputFile::SupplyTable)?)?;
        output::write_zone_hour_table(&self.correlation.demand, &path(OutputFile::DemandTable)?)?;
        output::write_feed_summary(&self.feed_summary, &path(OutputFile::FeedTimeSeries)?)?;
        output::write_served_blocks(&self.served, &path(OutputFile::ServedBlocks)?)?;
        output::write_wait_times(&self.wait_times, &path(OutputFile::WaitTime)?)?;
        Ok(())
    }
}

/// runs the three engines and the feed summary against one feed.
pub fn run_scenario(
    scenario: Scenario,
    feed: &dyn FeedAccessor,
    inputs: &SharedInputs,
) -> Result<ScenarioResult, IndicatorError> {
    log::info!("computing indicators for the {scenario} scenario");
    let correlation = correlation::run(feed, &inputs.zones, &inputs.od)?;
    let served = coverage::run(feed, &inputs.isochrones, &inputs.blocks)?;
    let wait_times = wait_time::run(feed, &inputs.isochrones, &inputs.blocks)?;
    let feed_summary = summary::summarize(feed)?;
    Ok(ScenarioResult {
        scenario,
        correlation,
        served,
        wait_times,
        feed_summary,
    })
}

/// subdirectory of the output directory that holds a run's files until all
/// of them are written.
pub const STAGING_DIRECTORY: &str = ".staging";

/// computes base and treatment indicators and writes every output. nothing
/// is written unless both scenarios succeed, and outputs only replace the
/// files in the output directory once the whole set is on disk.
pub fn run(config: &IndicatorsConfig) -> Result<ImpactSummary, IndicatorError> {
    config.validate()?;
    let output_directory = Path::new(&config.output_directory);
    std::fs::create_dir_all(output_directory).map_err(|e| {
        IndicatorError::OutputWriteError(config.output_directory.clone(), e.to_string())
    })?;
    output::check_outputs(output_directory, &Scenario::ALL, config.overwrite)?;

    let inputs = SharedInputs::load(config)?;
    let run_one = |scenario: Scenario| -> Result<ScenarioResult, IndicatorError> {
        let gtfs = GtfsFeed::new(config.feed_path(scenario), config.feed.clone())?;
        let feed = InMemoryFeed::materialize(&gtfs)?;
        log::info!(
            "{scenario} feed {}: {} stops, {} stop times, {} route shapes in the study area",
            gtfs.source(),
            feed.stops.len(),
            feed.stop_times.len(),
            feed.routes.len()
        );
        run_scenario(scenario, &feed, &inputs)
    };
    let (base, treatment) = if config.parallelize {
        rayon::join(|| run_one(Scenario::Base), || run_one(Scenario::Treatment))
    } else {
        (run_one(Scenario::Base), run_one(Scenario::Treatment))
    };
    let (base, treatment) = (base?, treatment?);

    let impact = ImpactSummary::new(config.walking_time, base.indicators(), treatment.indicators());
    let filenames = Scenario::ALL
        .iter()
        .flat_map(|s| OutputFile::ALL.iter().map(move |f| f.filename(*s)))
        .chain(std::iter::once(String::from(output::IMPACT_SUMMARY_FILENAME)))
        .collect_vec();
    write_staged(output_directory, &filenames, |staging| {
        base.write(staging, false)?;
        treatment.write(staging, false)?;
        output::write_impact_summary(&impact, &staging.join(output::IMPACT_SUMMARY_FILENAME))
    })?;
    log::info!(
        "wrote {} files to {}",
        filenames.len(),
        output_directory.to_string_lossy()
    );
    log_impact(&impact);
    Ok(impact)
}

/// runs `write` against a fresh staging directory inside `directory`, then
/// moves `filenames` from it into `directory`. when `write` fails nothing is
/// moved and the staging directory is removed.
fn write_staged<F>(directory: &Path, filenames: &[String], write: F) -> Result<(), IndicatorError>
where
    F: FnOnce(&Path) -> Result<(), IndicatorError>,
{
    let staging = directory.join(STAGING_DIRECTORY);
    let write_err = |path: &Path, e: std::io::Error| {
        IndicatorError::OutputWriteError(path.to_string_lossy().to_string(), e.to_string())
    };
    if staging.exists() {
        std::fs::remove_dir_all(&staging).map_err(|e| write_err(&staging, e))?;
    }
    std::fs::create_dir_all(&staging).map_err(|e| write_err(&staging, e))?;
    if let Err(e) = write(&staging) {
        if let Err(cleanup) = std::fs::remove_dir_all(&staging) {
            log::warn!(
                "unable to remove staging directory {}: {cleanup}",
                staging.to_string_lossy()
            );
        }
        return Err(e);
    }
    for filename in filenames.iter() {
        let target = directory.join(filename);
        std::fs::rename(staging.join(filename), &target).map_err(|e| write_err(&target, e))?;
    }
    std::fs::remove_dir_all(&staging).map_err(|e| write_err(&staging, e))?;
    Ok(())
}

fn log_impact(impact: &ImpactSummary) {
    let t = impact.walking_time;
    log::info!(
        "population served at {t} minutes: base {}, treatment {}",
        impact.base.population_served.pobtot,
        impact.treatment.population_served.pobtot
    );
    log::info!(
        "mean wait at stops within {t} minutes: base {:?}, treatment {:?}",
        impact.base.mean_wait_time,
        impact.treatment.mean_wait_time
    );
    log::info!(
        "mean supply/demand correlation: base {:?}, treatment {:?}",
        impact.base.mean_correlation,
        impact.treatment.mean_correlation
    );
}
