use contracts::usecases::common::UseCaseError;
use thiserror::Error;

/// Ошибка валидации формы источника. Исправляется пользователем,
/// сетевой запрос не выполняется.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigValidationError {
    #[error("source required")]
    SourceRequired,

    #[error("file required")]
    FileRequired,

    #[error("URL list empty")]
    UrlListEmpty,

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("max depth must be a number from 1 to 10, got '{0}'")]
    InvalidMaxDepth(String),

    #[error("file URL required")]
    FileUrlRequired,

    #[error("username required")]
    UsernameRequired,

    #[error("password required")]
    PasswordRequired,

    #[error("host required")]
    HostRequired,

    #[error("invalid port: '{0}'")]
    InvalidPort(String),

    #[error("database name required")]
    DatabaseRequired,

    #[error("table name required")]
    TableNameRequired,

    #[error("sync interval required when auto sync is enabled")]
    SyncIntervalRequired,
}

impl ConfigValidationError {
    /// Имя поля формы, рядом с которым показывается ошибка
    pub fn field(&self) -> &'static str {
        match self {
            Self::SourceRequired => "source",
            Self::FileRequired => "file",
            Self::UrlListEmpty | Self::InvalidUrl(_) => "urls",
            Self::InvalidMaxDepth(_) => "max_depth",
            Self::FileUrlRequired => "file_url",
            Self::UsernameRequired => "username",
            Self::PasswordRequired => "password",
            Self::HostRequired => "host",
            Self::InvalidPort(_) => "port",
            Self::DatabaseRequired => "database",
            Self::TableNameRequired => "table_name",
            Self::SyncIntervalRequired => "sync_interval",
        }
    }
}

/// Ошибка чтения или разбора загруженного файла
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FileIngestionError {
    #[error("'{file}' is not valid JSON: {reason}")]
    InvalidJson { file: String, reason: String },

    #[error("'{file}' could not be parsed as delimited data: {reason}")]
    InvalidDelimited { file: String, reason: String },

    #[error("failed to read '{file}': {reason}")]
    ReadFailure { file: String, reason: String },
}

/// Ошибка обращения к Sync API (сеть или ответ не 2xx)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TransportError {
    /// HTTP статус, если ответ был получен
    pub status: Option<u16>,
    /// Сообщение для пользователя (из тела ответа или общее)
    pub message: String,
    /// Технические подробности для логов
    pub details: Option<String>,
}

impl TransportError {
    pub fn network(message: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
            details: Some(details.into()),
        }
    }

    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            message: message.into(),
            details: None,
        }
    }
}

/// Ошибки пайплайна синхронизации
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SyncError {
    #[error(transparent)]
    ConfigValidation(#[from] ConfigValidationError),

    #[error(transparent)]
    FileIngestion(#[from] FileIngestionError),

    #[error("no products found in {0}")]
    EmptyDataset(String),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("sync submission was cancelled")]
    Cancelled,
}

impl From<&SyncError> for UseCaseError {
    fn from(err: &SyncError) -> Self {
        match err {
            SyncError::ConfigValidation(e) => {
                UseCaseError::validation(e.to_string()).with_field(e.field())
            }
            SyncError::FileIngestion(e) => UseCaseError::file(e.to_string()),
            SyncError::EmptyDataset(_) => UseCaseError::validation(err.to_string()),
            SyncError::Transport(e) => {
                let out = UseCaseError::external(e.message.clone());
                match &e.details {
                    Some(details) => out.with_details(details.clone()),
                    None => out,
                }
            }
            SyncError::Cancelled => UseCaseError::cancelled(err.to_string()),
        }
    }
}

impl From<SyncError> for UseCaseError {
    fn from(err: SyncError) -> Self {
        UseCaseError::from(&err)
    }
}
