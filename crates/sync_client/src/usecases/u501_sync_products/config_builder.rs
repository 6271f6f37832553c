use contracts::domain::a001_data_source::{
    AuthType, DatabaseType, FileFormat, SourceConfig, SourceSettings, SourceType, SyncInterval,
    SyncSchedule,
};
use reqwest::Url;
use serde::{Deserialize, Serialize};

use super::error::ConfigValidationError;
use super::file_ingestion::detect_file_type;
use super::uploaded_file::UploadedFile;

/// Глубина обхода краулера, если поле не заполнено
pub const DEFAULT_MAX_DEPTH: u8 = 2;
pub const MAX_DEPTH_RANGE: std::ops::RangeInclusive<u8> = 1..=10;

/// Значения полей формы источника в том виде, в котором их держит UI.
///
/// Текстовые поля хранятся строками; списки выбора уже типизированы.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceFields {
    pub auto_sync: bool,
    pub sync_interval: Option<SyncInterval>,

    // Краулер
    /// Многострочный ввод, по одному URL на строку
    pub crawler_urls: String,
    pub max_depth: String,

    // Файл по ссылке
    pub file_url: String,
    pub file_format: FileFormat,
    pub auth_type: AuthType,
    pub username: String,
    pub password: String,

    // SQL
    pub database_type: DatabaseType,
    pub host: String,
    pub port: String,
    pub database: String,
    pub db_username: String,
    pub db_password: String,
    pub table_name: String,
}

/// Собрать конфигурацию источника из текущих значений формы.
///
/// Чистая функция: ничего не помнит о прошлых отправках.
pub fn build_source_config(
    source: SourceType,
    fields: &SourceFields,
    file: Option<&UploadedFile>,
) -> Result<SourceConfig, ConfigValidationError> {
    let schedule = build_schedule(fields)?;

    let settings = match source {
        SourceType::ManualFileUpload => {
            let file = file.ok_or(ConfigValidationError::FileRequired)?;
            SourceSettings::ManualFileUpload {
                file_format: detect_file_type(file).file_format(),
            }
        }
        SourceType::Crawler => build_crawler(fields)?,
        SourceType::SupersearchApi => SourceSettings::SupersearchApi,
        SourceType::HostedFile => build_hosted_file(fields)?,
        SourceType::SqlDatabase => build_sql_database(fields)?,
    };

    Ok(SourceConfig::new(settings, schedule))
}

/// Список URL краулера: по строкам, с обрезкой пробелов, без пустых строк
pub fn parse_crawler_urls(input: &str) -> Vec<String> {
    input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

fn build_schedule(fields: &SourceFields) -> Result<SyncSchedule, ConfigValidationError> {
    if !fields.auto_sync {
        // Интервал без автосинхронизации не отправляется
        return Ok(SyncSchedule::Manual);
    }
    fields
        .sync_interval
        .map(SyncSchedule::Auto)
        .ok_or(ConfigValidationError::SyncIntervalRequired)
}

fn build_crawler(fields: &SourceFields) -> Result<SourceSettings, ConfigValidationError> {
    let urls = parse_crawler_urls(&fields.crawler_urls);
    if urls.is_empty() {
        return Err(ConfigValidationError::UrlListEmpty);
    }
    if let Some(bad) = urls.iter().find(|url| !is_http_url(url)) {
        return Err(ConfigValidationError::InvalidUrl(bad.clone()));
    }

    let raw_depth = fields.max_depth.trim();
    let max_depth = if raw_depth.is_empty() {
        DEFAULT_MAX_DEPTH
    } else {
        raw_depth
            .parse::<u8>()
            .ok()
            .filter(|depth| MAX_DEPTH_RANGE.contains(depth))
            .ok_or_else(|| ConfigValidationError::InvalidMaxDepth(raw_depth.to_string()))?
    };

    Ok(SourceSettings::Crawler { urls, max_depth })
}

fn build_hosted_file(fields: &SourceFields) -> Result<SourceSettings, ConfigValidationError> {
    let file_url = fields.file_url.trim();
    if file_url.is_empty() {
        return Err(ConfigValidationError::FileUrlRequired);
    }
    if !is_http_url(file_url) {
        return Err(ConfigValidationError::InvalidUrl(file_url.to_string()));
    }

    let (username, password) = match fields.auth_type {
        AuthType::Public => (None, None),
        AuthType::BasicAuth => {
            let username = fields.username.trim();
            if username.is_empty() {
                return Err(ConfigValidationError::UsernameRequired);
            }
            if fields.password.is_empty() {
                return Err(ConfigValidationError::PasswordRequired);
            }
            (Some(username.to_string()), Some(fields.password.clone()))
        }
    };

    Ok(SourceSettings::HostedFile {
        file_url: file_url.to_string(),
        file_format: fields.file_format,
        auth_type: fields.auth_type,
        username,
        password,
    })
}

fn build_sql_database(fields: &SourceFields) -> Result<SourceSettings, ConfigValidationError> {
    let host = required(&fields.host, ConfigValidationError::HostRequired)?;
    let port = parse_port(&fields.port, fields.database_type)?;
    let database = required(&fields.database, ConfigValidationError::DatabaseRequired)?;
    let username = required(&fields.db_username, ConfigValidationError::UsernameRequired)?;
    if fields.db_password.is_empty() {
        return Err(ConfigValidationError::PasswordRequired);
    }
    let table_name = required(&fields.table_name, ConfigValidationError::TableNameRequired)?;

    Ok(SourceSettings::SqlDatabase {
        database_type: fields.database_type,
        host,
        port,
        database,
        username,
        password: fields.db_password.clone(),
        table_name,
    })
}

fn required(value: &str, err: ConfigValidationError) -> Result<String, ConfigValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(err)
    } else {
        Ok(trimmed.to_string())
    }
}

fn parse_port(raw: &str, database_type: DatabaseType) -> Result<u16, ConfigValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(database_type.default_port());
    }
    raw.parse::<u16>()
        .ok()
        .filter(|port| *port > 0)
        .ok_or_else(|| ConfigValidationError::InvalidPort(raw.to_string()))
}

/// Корректный абсолютный URL со схемой http/https и непустым хостом
fn is_http_url(value: &str) -> bool {
    match Url::parse(value) {
        Ok(url) => {
            matches!(url.scheme(), "http" | "https")
                && url.host_str().is_some_and(|host| !host.is_empty())
        }
        Err(_) => false,
    }
}
