use contracts::usecases::u501_sync_products::{PreviewData, PREVIEW_ROW_LIMIT};

use super::parser::parse_with_limit;
use crate::usecases::u501_sync_products::error::FileIngestionError;
use crate::usecases::u501_sync_products::uploaded_file::UploadedFile;

/// Предпросмотр файла: те же определение типа и парсинг, но не более
/// `PREVIEW_ROW_LIMIT` строк и без нормализации
pub fn preview_file(file: &UploadedFile) -> Result<PreviewData, FileIngestionError> {
    let parsed = parse_with_limit(file, Some(PREVIEW_ROW_LIMIT))?;
    tracing::debug!(
        "Preview of {}: {} rows, {} headers",
        file.name(),
        parsed.records.len(),
        parsed.headers.len()
    );
    Ok(PreviewData {
        file_type: parsed.file_type,
        headers: parsed.headers,
        rows: parsed.records,
    })
}
