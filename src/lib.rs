pub mod cleaner;
pub mod config;
pub mod delay_manager;
pub mod input_loader;
pub mod logger;
pub mod records;
pub mod report_writer;
pub mod search_client;

// Exporting types for convenience
pub use cleaner::RankKey;
pub use config::{RedditCredentials, RunConfig};
pub use records::{ResultAccumulator, SearchResultRecord};
pub use report_writer::SchemaVariant;
pub use search_client::{RawPost, RedditClient, TimeRange};
