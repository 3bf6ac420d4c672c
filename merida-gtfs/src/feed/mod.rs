mod feed_accessor;
mod feed_config;
mod feed_error;
mod gtfs_feed;
mod in_memory_feed;

pub use feed_accessor::FeedAccessor;
pub use feed_config::{FeedConfig, LongitudeWindow};
pub use feed_error::FeedError;
pub use gtfs_feed::GtfsFeed;
pub use in_memory_feed::InMemoryFeed;
