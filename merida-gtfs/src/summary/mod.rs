mod feed_summary;

pub use feed_summary::{summarize, write_summary, FeedSummaryRow};
