use merida_gtfs::feed::FeedError;

#[derive(thiserror::Error, Debug)]
pub enum IndicatorError {
    #[error(transparent)]
    FeedError(#[from] FeedError),
    #[error("invalid configuration: {0}")]
    ConfigurationError(String),
    #[error("failure reading layer {0}: {1}")]
    LayerReadError(String, String),
    #[error("failure reading origin-destination file {0}: {1}")]
    OdReadError(String, String),
    #[error("arrival time {seconds}s of trip '{trip_id}' at stop {stop_id} is not a time of day")]
    InvalidArrivalTime {
        trip_id: String,
        stop_id: i64,
        seconds: u32,
    },
    #[error("failure building spatial index over {0}: {1}")]
    SpatialIndexError(String, String),
    #[error("{0}")]
    OutputExists(String),
    #[error("failure writing to file {0}: {1}")]
    OutputWriteError(String, String),
}
