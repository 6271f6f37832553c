pub mod history;
pub mod preview;
pub mod progress;
pub mod request;
pub mod response;

pub use history::{estimate_total, SyncHistoryItem, SyncHistoryPage, SyncHistoryResponse};
pub use preview::{FileType, PreviewData, PREVIEW_ROW_LIMIT};
pub use progress::SubmissionState;
pub use request::{NormalizedProduct, ProductSyncInput};
pub use response::{SyncResponse, SyncStatus};

use super::common::UseCaseMetadata;

/// UseCase u501: синхронизация товаров из источника данных
pub struct SyncProductsUseCase;

impl UseCaseMetadata for SyncProductsUseCase {
    fn usecase_index() -> &'static str {
        "u501"
    }

    fn usecase_name() -> &'static str {
        "sync_products"
    }

    fn display_name() -> &'static str {
        "Sync products"
    }

    fn description() -> &'static str {
        "Configure a data source and submit a product sync to the backend"
    }
}
