use contracts::domain::a001_data_source::connector::{find_connector, find_connector_by_code};
use contracts::domain::a001_data_source::{ConnectorDefinition, SourceConfig, SourceType, CONNECTORS};
use contracts::usecases::u501_sync_products::PreviewData;

use super::config_builder::{build_source_config, SourceFields};
use super::error::{ConfigValidationError, SyncError};
use super::file_ingestion::preview_file;
use super::uploaded_file::UploadedFile;

/// Выбор источника данных и состояние его формы.
///
/// Сетевых вызовов не делает; всё состояние локально для сессии.
#[derive(Debug, Clone, Default)]
pub struct SourceSelector {
    active: Option<SourceType>,
    pub fields: SourceFields,
    file: Option<UploadedFile>,
}

impl SourceSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Каталог доступных коннекторов
    pub fn catalog(&self) -> &'static [ConnectorDefinition] {
        CONNECTORS
    }

    /// Перейти к настройке коннектора. Ранее загруженный файл сбрасывается.
    pub fn select_source(&mut self, source: SourceType) -> Option<&'static ConnectorDefinition> {
        let connector = find_connector(source)?;
        if let Some(previous) = self.file.take() {
            tracing::debug!("Dropping uploaded file {} on source change", previous.name());
        }
        self.active = Some(source);
        tracing::info!("Configuring source {}", source);
        Some(connector)
    }

    /// То же по строковому id коннектора; неизвестный id не меняет состояние
    pub fn select_source_by_code(&mut self, code: &str) -> Option<&'static ConnectorDefinition> {
        let connector = find_connector_by_code(code)?;
        self.select_source(connector.id)
    }

    pub fn active(&self) -> Option<SourceType> {
        self.active
    }

    pub fn is_configuring(&self) -> bool {
        self.active.is_some()
    }

    pub fn set_file(&mut self, file: UploadedFile) {
        tracing::info!(
            "File selected: {} ({} bytes, {})",
            file.name(),
            file.size(),
            file.mime_type()
        );
        self.file = Some(file);
    }

    pub fn remove_file(&mut self) -> Option<UploadedFile> {
        self.file.take()
    }

    pub fn file(&self) -> Option<&UploadedFile> {
        self.file.as_ref()
    }

    /// Собрать конфигурацию из текущего состояния формы
    pub fn build_config(&self) -> Result<SourceConfig, ConfigValidationError> {
        let source = self.active.ok_or(ConfigValidationError::SourceRequired)?;
        build_source_config(source, &self.fields, self.file.as_ref())
    }

    /// Можно ли включить кнопку отправки
    pub fn can_submit(&self) -> bool {
        self.build_config().is_ok()
    }

    /// Предпросмотр выбранного файла. Состояние отправки не меняется.
    pub fn preview(&self) -> Result<PreviewData, SyncError> {
        let file = self.file.as_ref().ok_or(ConfigValidationError::FileRequired)?;
        Ok(preview_file(file)?)
    }
}
