use super::{
    api_client::{SyncApiClient, SYNC_FAILED_MESSAGE},
    config_builder::{build_source_config, SourceFields},
    error::{ConfigValidationError, SyncError, TransportError},
    file_ingestion::parse_file,
    normalize::normalize_records,
    source_selector::SourceSelector,
    submission_tracker::SubmissionTracker,
    uploaded_file::UploadedFile,
};
use contracts::domain::a001_data_source::SourceType;
use contracts::shared::product_record::ProductRecord;
use contracts::usecases::common::UseCaseMetadata;
use contracts::usecases::u501_sync_products::{
    ProductSyncInput, SubmissionState, SyncHistoryPage, SyncProductsUseCase, SyncResponse,
};
use std::sync::{Arc, Mutex};
use tokio::task::{AbortHandle, JoinError};

/// Подготовить тело запроса синхронизации.
///
/// MANUAL_FILE_UPLOAD: файл разбирается и нормализуется.
/// SUPERSEARCH_API: записи передаются как есть.
/// Остальные источники данные не передают, backend забирает их сам.
pub fn prepare_submission(
    source: SourceType,
    fields: &SourceFields,
    file: Option<&UploadedFile>,
    records: Option<Vec<ProductRecord>>,
) -> Result<ProductSyncInput, SyncError> {
    let source_config = build_source_config(source, fields, file)?;

    let products = match source {
        SourceType::ManualFileUpload => {
            let file = file.ok_or(ConfigValidationError::FileRequired)?;
            let parsed = parse_file(file)?;
            if parsed.records.is_empty() {
                return Err(SyncError::EmptyDataset(file.name().to_string()));
            }
            let products: Vec<ProductRecord> = normalize_records(&parsed.records)
                .into_iter()
                .map(|p| p.into_record())
                .collect();
            tracing::info!(
                "Prepared {} products from {} ({})",
                products.len(),
                file.name(),
                parsed.file_type.as_str()
            );
            Some(products)
        }
        SourceType::SupersearchApi => match records {
            Some(records) if records.is_empty() => {
                return Err(SyncError::EmptyDataset("the supplied records".to_string()));
            }
            other => other,
        },
        _ => {
            if records.is_some() {
                tracing::warn!("Ignoring supplied records for server-pulled source {}", source);
            }
            None
        }
    };

    Ok(ProductSyncInput {
        source_config,
        products,
    })
}

struct InFlight {
    generation: u64,
    handle: AbortHandle,
}

/// Executor для UseCase синхронизации товаров.
///
/// Одновременно в полёте не больше одной отправки: новая отправка
/// прерывает предыдущую, результат прерванной не попадает в состояние.
pub struct SyncExecutor {
    api_client: Arc<SyncApiClient>,
    pub tracker: SubmissionTracker,
    in_flight: Mutex<Option<InFlight>>,
}

impl SyncExecutor {
    pub fn new(api_client: Arc<SyncApiClient>) -> Self {
        Self {
            api_client,
            tracker: SubmissionTracker::new(),
            in_flight: Mutex::new(None),
        }
    }

    pub fn state(&self) -> SubmissionState {
        self.tracker.state()
    }

    pub fn is_submitting(&self) -> bool {
        self.tracker.is_submitting()
    }

    /// Отправить текущую форму выбранного источника.
    ///
    /// Ошибки валидации и разбора файла возвращаются до сетевого вызова.
    pub async fn submit(
        &self,
        selector: &SourceSelector,
        records: Option<Vec<ProductRecord>>,
    ) -> Result<SyncResponse, SyncError> {
        let prepared = selector
            .active()
            .ok_or_else(|| SyncError::from(ConfigValidationError::SourceRequired))
            .and_then(|source| {
                prepare_submission(source, &selector.fields, selector.file(), records)
            });

        match prepared {
            Ok(input) => self.submit_input(input).await,
            Err(e) => {
                tracing::warn!("Sync submission rejected: {}", e);
                self.tracker.settle_idle();
                Err(e)
            }
        }
    }

    /// Отправить готовое тело запроса (фоновая задача с возможностью отмены)
    pub async fn submit_input(&self, input: ProductSyncInput) -> Result<SyncResponse, SyncError> {
        let source = input.source_config.source_type();
        let generation = self.tracker.begin(source);
        tracing::info!(
            "{}: submission #{} for {}",
            SyncProductsUseCase::full_name(),
            generation,
            source
        );

        let client = self.api_client.clone();
        let task = tokio::spawn(async move { client.sync_products(&input).await });
        self.track_in_flight(generation, task.abort_handle());

        let outcome = task.await;
        self.clear_in_flight(generation);
        self.settle(generation, outcome)
    }

    /// Записать результат отправки в состояние.
    ///
    /// Если отправку уже вытеснили или отменили, результат отбрасывается
    /// и вызывающий получает `Cancelled`, даже если запрос успел завершиться.
    fn settle(
        &self,
        generation: u64,
        outcome: Result<Result<SyncResponse, TransportError>, JoinError>,
    ) -> Result<SyncResponse, SyncError> {
        let (state, result) = match outcome {
            Ok(Ok(response)) => (
                SubmissionState::Success {
                    sync_id: response.sync_id.clone(),
                    status: response.status,
                    message: response.message.clone(),
                },
                Ok(response),
            ),
            Ok(Err(e)) => (
                SubmissionState::Failure {
                    message: e.message.clone(),
                },
                Err(SyncError::Transport(e)),
            ),
            Err(e) if e.is_cancelled() => {
                tracing::info!("Sync submission #{} cancelled", generation);
                return Err(SyncError::Cancelled);
            }
            Err(e) => {
                tracing::error!("Sync task failed: {}", e);
                (
                    SubmissionState::Failure {
                        message: SYNC_FAILED_MESSAGE.to_string(),
                    },
                    Err(SyncError::Transport(TransportError::network(
                        SYNC_FAILED_MESSAGE,
                        e.to_string(),
                    ))),
                )
            }
        };

        if !self.tracker.finish(generation, state) {
            tracing::info!(
                "Sync submission #{} completed after cancel, result dropped",
                generation
            );
            return Err(SyncError::Cancelled);
        }

        match &result {
            Ok(response) => tracing::info!(
                "Sync {} accepted with status {}",
                response.sync_id,
                response.status
            ),
            Err(e) => tracing::error!("Sync submission failed: {}", e),
        }
        result
    }

    /// Отменить отправку в полёте. Состояние возвращается в Idle.
    pub fn cancel(&self) -> bool {
        let in_flight = self.in_flight.lock().unwrap().take();
        match in_flight {
            Some(in_flight) => {
                in_flight.handle.abort();
                self.tracker.reset();
                tracing::info!("Sync submission #{} cancelled by user", in_flight.generation);
                true
            }
            None => false,
        }
    }

    /// История синхронизаций; состояние отправки не меняется
    pub async fn fetch_sync_history(
        &self,
        page: u32,
        size: u32,
    ) -> Result<SyncHistoryPage, SyncError> {
        Ok(self.api_client.fetch_sync_history(page, size).await?)
    }

    fn track_in_flight(&self, generation: u64, handle: AbortHandle) {
        let previous = self
            .in_flight
            .lock()
            .unwrap()
            .replace(InFlight { generation, handle });
        if let Some(previous) = previous {
            tracing::info!(
                "Submission #{} superseded by #{}",
                previous.generation,
                generation
            );
            previous.handle.abort();
        }
    }

    fn clear_in_flight(&self, generation: u64) {
        let mut in_flight = self.in_flight.lock().unwrap();
        if in_flight.as_ref().map(|f| f.generation) == Some(generation) {
            *in_flight = None;
        }
    }
}
