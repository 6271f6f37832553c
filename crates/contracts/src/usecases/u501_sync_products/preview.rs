use serde::{Deserialize, Serialize};

use crate::domain::a001_data_source::FileFormat;
use crate::shared::product_record::ProductRecord;

/// Максимум строк в предпросмотре файла
pub const PREVIEW_ROW_LIMIT: usize = 10;

/// Обнаруженный тип загруженного файла
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Json,
    Csv,
    Tsv,
}

impl FileType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Json => "json",
            FileType::Csv => "csv",
            FileType::Tsv => "tsv",
        }
    }

    /// Тип по расширению файла (без точки, регистр не важен)
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "json" => Some(FileType::Json),
            "csv" => Some(FileType::Csv),
            "tsv" => Some(FileType::Tsv),
            _ => None,
        }
    }

    /// Разделитель для табличных форматов
    pub fn delimiter(&self) -> Option<u8> {
        match self {
            FileType::Json => None,
            FileType::Csv => Some(b','),
            FileType::Tsv => Some(b'\t'),
        }
    }

    /// Формат в конфигурации источника: TSV передаётся как табличный `csv`
    pub fn file_format(&self) -> FileFormat {
        match self {
            FileType::Json => FileFormat::Json,
            FileType::Csv | FileType::Tsv => FileFormat::Csv,
        }
    }
}

/// Предпросмотр файла: заголовки и не более `PREVIEW_ROW_LIMIT` строк
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewData {
    pub file_type: FileType,
    pub headers: Vec<String>,
    pub rows: Vec<ProductRecord>,
}
