pub mod api_client;
pub mod config_builder;
pub mod error;
pub mod executor;
pub mod file_ingestion;
#[cfg(test)]
mod mock_api;
pub mod normalize;
pub mod source_selector;
pub mod submission_tracker;
pub mod uploaded_file;

pub use api_client::SyncApiClient;
pub use config_builder::{build_source_config, parse_crawler_urls, SourceFields};
pub use error::{ConfigValidationError, FileIngestionError, SyncError, TransportError};
pub use executor::{prepare_submission, SyncExecutor};
pub use file_ingestion::{detect_file_type, parse_file, preview_file, ParsedFile};
pub use normalize::{normalize_record, normalize_records};
pub use source_selector::SourceSelector;
pub use submission_tracker::SubmissionTracker;
pub use uploaded_file::UploadedFile;
