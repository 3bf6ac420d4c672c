#[derive(thiserror::Error, Debug)]
pub enum FeedError {
    #[error("Failed to parse gtfs bundle file into `Gtfs` struct: {0}")]
    BundleReadError(#[from] gtfs_structures::Error),
    #[error("{kind} id '{id}' is not an integer")]
    InvalidIdentifier { kind: &'static str, id: String },
    #[error("Missing both arrival and departure times: {0}")]
    MissingAllStopTimesError(String),
    #[error("failure writing to file {0}: {1}")]
    CsvWriteError(String, csv::Error),
    #[error("{0}")]
    OtherError(String),
}
