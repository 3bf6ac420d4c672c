mod gtfs_app;
mod operation;

pub use gtfs_app::GtfsApp;
pub use operation::GtfsOperation;
