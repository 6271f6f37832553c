use contracts::shared::product_record::ProductRecord;
use contracts::usecases::u501_sync_products::FileType;
use serde_json::Value;

use super::{detect_file_type, strip_bom};
use crate::usecases::u501_sync_products::error::FileIngestionError;
use crate::usecases::u501_sync_products::uploaded_file::UploadedFile;

/// Результат разбора файла
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedFile {
    pub file_type: FileType,
    /// Заголовок (CSV/TSV) или объединение ключей записей в порядке появления (JSON)
    pub headers: Vec<String>,
    pub records: Vec<ProductRecord>,
}

/// Разобрать файл целиком
pub fn parse_file(file: &UploadedFile) -> Result<ParsedFile, FileIngestionError> {
    let parsed = parse_with_limit(file, None)?;
    tracing::info!(
        "Parsed {} as {}: {} records, {} columns",
        file.name(),
        parsed.file_type.as_str(),
        parsed.records.len(),
        parsed.headers.len()
    );
    Ok(parsed)
}

/// Разобрать не более `limit` записей (для предпросмотра)
pub(crate) fn parse_with_limit(
    file: &UploadedFile,
    limit: Option<usize>,
) -> Result<ParsedFile, FileIngestionError> {
    let file_type = detect_file_type(file);
    match file_type.delimiter() {
        None => parse_json(file, limit),
        Some(delimiter) => parse_delimited(file, file_type, delimiter, limit),
    }
}

fn parse_json(file: &UploadedFile, limit: Option<usize>) -> Result<ParsedFile, FileIngestionError> {
    let invalid = |reason: String| FileIngestionError::InvalidJson {
        file: file.name().to_string(),
        reason,
    };

    let value: Value =
        serde_json::from_slice(strip_bom(file.content())).map_err(|e| invalid(e.to_string()))?;

    // Массив записей или одна запись
    let items = match value {
        Value::Array(items) => items,
        object @ Value::Object(_) => vec![object],
        other => {
            return Err(invalid(format!(
                "expected an object or an array of objects, got {}",
                json_kind(&other)
            )))
        }
    };

    let take = limit.unwrap_or(items.len());
    let mut headers: Vec<String> = Vec::new();
    let mut records = Vec::with_capacity(take.min(items.len()));

    for (idx, item) in items.into_iter().take(take).enumerate() {
        let map = match item {
            Value::Object(map) => map,
            other => {
                return Err(invalid(format!(
                    "element {} is {}, expected an object",
                    idx,
                    json_kind(&other)
                )))
            }
        };
        for key in map.keys() {
            if !headers.iter().any(|h| h == key) {
                headers.push(key.clone());
            }
        }
        records.push(ProductRecord::from_map(map));
    }

    Ok(ParsedFile {
        file_type: FileType::Json,
        headers,
        records,
    })
}

fn parse_delimited(
    file: &UploadedFile,
    file_type: FileType,
    delimiter: u8,
    limit: Option<usize>,
) -> Result<ParsedFile, FileIngestionError> {
    let invalid = |reason: String| FileIngestionError::InvalidDelimited {
        file: file.name().to_string(),
        reason,
    };

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(strip_bom(file.content()));

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| invalid(format!("failed to read header row: {}", e)))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut records = Vec::new();
    for result in reader.records() {
        if limit.is_some_and(|max| records.len() >= max) {
            break;
        }

        let row = result.map_err(|e| invalid(e.to_string()))?;

        // Пустые строки пропускаем
        if row.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }

        // Недостающие ячейки отсутствуют в записи, лишние игнорируются
        let mut record = ProductRecord::new();
        for (header, cell) in headers.iter().zip(row.iter()) {
            if header.is_empty() {
                continue;
            }
            record.insert(header.clone(), cell.to_string());
        }
        records.push(record);
    }

    Ok(ParsedFile {
        file_type,
        headers,
        records,
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
