//! Разбор загруженных файлов: определение формата, парсинг JSON / CSV / TSV
//! и предпросмотр первых строк.

pub mod detect;
pub mod parser;
pub mod preview;

pub use detect::detect_file_type;
pub use parser::{parse_file, ParsedFile};
pub use preview::preview_file;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Убрать UTF-8 BOM в начале содержимого
pub(crate) fn strip_bom(content: &[u8]) -> &[u8] {
    content.strip_prefix(UTF8_BOM).unwrap_or(content)
}
