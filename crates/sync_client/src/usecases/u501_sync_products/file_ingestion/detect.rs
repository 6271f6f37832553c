use contracts::usecases::u501_sync_products::FileType;

use super::strip_bom;
use crate::usecases::u501_sync_products::uploaded_file::UploadedFile;

/// Определить тип файла.
///
/// Порядок: расширение `json`/`tsv`/`csv`; иначе всё содержимое разбирается
/// как JSON; иначе табуляция в первой строке даёт `tsv`, всё остальное `csv`.
pub fn detect_file_type(file: &UploadedFile) -> FileType {
    if let Some(file_type) = file
        .extension()
        .and_then(|ext| FileType::from_extension(&ext))
    {
        tracing::debug!("{}: type {} by extension", file.name(), file_type.as_str());
        return file_type;
    }

    let content = strip_bom(file.content());
    if serde_json::from_slice::<serde_json::Value>(content).is_ok() {
        tracing::debug!("{}: content parses as JSON", file.name());
        return FileType::Json;
    }

    let first_line = content
        .split(|b| *b == b'\n')
        .next()
        .unwrap_or_default();
    let file_type = if first_line.contains(&b'\t') {
        FileType::Tsv
    } else {
        FileType::Csv
    };
    tracing::debug!("{}: sniffed type {}", file.name(), file_type.as_str());
    file_type
}
