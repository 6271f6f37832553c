use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Enums
// ============================================================================

/// Тип источника данных (дискриминант `source` в конфигурации)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SourceType {
    ManualFileUpload,
    Crawler,
    SupersearchApi,
    HostedFile,
    SqlDatabase,
}

impl SourceType {
    /// Получить код источника (совпадает с представлением на проводе)
    pub fn code(&self) -> &'static str {
        match self {
            SourceType::ManualFileUpload => "MANUAL_FILE_UPLOAD",
            SourceType::Crawler => "CRAWLER",
            SourceType::SupersearchApi => "SUPERSEARCH_API",
            SourceType::HostedFile => "HOSTED_FILE",
            SourceType::SqlDatabase => "SQL_DATABASE",
        }
    }

    /// Получить все типы источников в порядке отображения
    pub fn all() -> Vec<SourceType> {
        vec![
            SourceType::ManualFileUpload,
            SourceType::HostedFile,
            SourceType::Crawler,
            SourceType::SupersearchApi,
            SourceType::SqlDatabase,
        ]
    }

    /// Парсинг из строки. Регистр не важен, `-` эквивалентен `_`
    pub fn from_code(code: &str) -> Option<Self> {
        let normalized = code.trim().replace('-', "_").to_ascii_uppercase();
        Self::all().into_iter().find(|s| s.code() == normalized)
    }

    /// Источник передаёт записи товаров в теле запроса синхронизации
    pub fn carries_products(&self) -> bool {
        matches!(self, SourceType::ManualFileUpload | SourceType::SupersearchApi)
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Интервал автосинхронизации
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SyncInterval {
    Daily,
    Weekly,
    Monthly,
}

impl SyncInterval {
    pub fn code(&self) -> &'static str {
        match self {
            SyncInterval::Daily => "DAILY",
            SyncInterval::Weekly => "WEEKLY",
            SyncInterval::Monthly => "MONTHLY",
        }
    }
}

/// Формат файла в конфигурации источника
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    Csv,
    Json,
}

impl FileFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileFormat::Csv => "csv",
            FileFormat::Json => "json",
        }
    }
}

impl Default for FileFormat {
    fn default() -> Self {
        Self::Csv
    }
}

/// Типы авторизации для файла по ссылке
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthType {
    Public,
    BasicAuth,
}

impl Default for AuthType {
    fn default() -> Self {
        Self::Public
    }
}

/// Поддерживаемые СУБД
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatabaseType {
    #[serde(rename = "POSTGRESQL")]
    Postgresql,
    #[serde(rename = "MYSQL")]
    Mysql,
    #[serde(rename = "MSSQL")]
    SqlServer,
}

impl Default for DatabaseType {
    fn default() -> Self {
        Self::Postgresql
    }
}

impl DatabaseType {
    /// Порт по умолчанию, подставляется если поле порта пустое
    pub fn default_port(&self) -> u16 {
        match self {
            DatabaseType::Postgresql => 5432,
            DatabaseType::Mysql => 3306,
            DatabaseType::SqlServer => 1433,
        }
    }
}

// ============================================================================
// Source settings
// ============================================================================

/// Параметры конкретного вида источника.
///
/// Внутренне тегированное перечисление: поле `source` выбирает вариант,
/// остальные поля принадлежат только этому варианту.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SourceSettings {
    ManualFileUpload {
        file_format: FileFormat,
    },
    Crawler {
        urls: Vec<String>,
        max_depth: u8,
    },
    SupersearchApi,
    HostedFile {
        file_url: String,
        file_format: FileFormat,
        auth_type: AuthType,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        username: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        password: Option<String>,
    },
    SqlDatabase {
        database_type: DatabaseType,
        host: String,
        port: u16,
        database: String,
        username: String,
        password: String,
        table_name: String,
    },
}

impl SourceSettings {
    pub fn source_type(&self) -> SourceType {
        match self {
            SourceSettings::ManualFileUpload { .. } => SourceType::ManualFileUpload,
            SourceSettings::Crawler { .. } => SourceType::Crawler,
            SourceSettings::SupersearchApi => SourceType::SupersearchApi,
            SourceSettings::HostedFile { .. } => SourceType::HostedFile,
            SourceSettings::SqlDatabase { .. } => SourceType::SqlDatabase,
        }
    }
}

/// Расписание синхронизации.
///
/// На проводе превращается в пару `auto_sync` / `sync_interval`;
/// интервал существует только вместе с автосинхронизацией.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncSchedule {
    #[default]
    Manual,
    Auto(SyncInterval),
}

impl SyncSchedule {
    pub fn auto_sync(&self) -> bool {
        matches!(self, SyncSchedule::Auto(_))
    }

    pub fn interval(&self) -> Option<SyncInterval> {
        match self {
            SyncSchedule::Manual => None,
            SyncSchedule::Auto(interval) => Some(*interval),
        }
    }
}

// ============================================================================
// Source config
// ============================================================================

/// Конфигурация источника данных, отправляемая в `POST /sync-products`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SourceConfigWire", into = "SourceConfigWire")]
pub struct SourceConfig {
    pub settings: SourceSettings,
    pub schedule: SyncSchedule,
}

impl SourceConfig {
    pub fn new(settings: SourceSettings, schedule: SyncSchedule) -> Self {
        Self { settings, schedule }
    }

    pub fn source_type(&self) -> SourceType {
        self.settings.source_type()
    }
}

#[derive(Serialize, Deserialize)]
struct SourceConfigWire {
    #[serde(flatten)]
    settings: SourceSettings,
    auto_sync: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sync_interval: Option<SyncInterval>,
}

impl From<SourceConfig> for SourceConfigWire {
    fn from(config: SourceConfig) -> Self {
        Self {
            settings: config.settings,
            auto_sync: config.schedule.auto_sync(),
            sync_interval: config.schedule.interval(),
        }
    }
}

impl TryFrom<SourceConfigWire> for SourceConfig {
    type Error = String;

    fn try_from(wire: SourceConfigWire) -> Result<Self, Self::Error> {
        let schedule = match (wire.auto_sync, wire.sync_interval) {
            (true, Some(interval)) => SyncSchedule::Auto(interval),
            (true, None) => return Err("auto_sync requires sync_interval".to_string()),
            (false, None) => SyncSchedule::Manual,
            (false, Some(_)) => {
                return Err("sync_interval must be absent when auto_sync is false".to_string())
            }
        };
        Ok(SourceConfig {
            settings: wire.settings,
            schedule,
        })
    }
}
