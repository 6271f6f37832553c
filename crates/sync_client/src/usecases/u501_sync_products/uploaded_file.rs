use std::fmt;
use std::path::Path;

use super::error::FileIngestionError;

/// Файл, выбранный пользователем для загрузки.
///
/// Содержимое живёт только в памяти текущей сессии и никуда не сохраняется.
#[derive(Clone, PartialEq, Eq)]
pub struct UploadedFile {
    name: String,
    mime_type: String,
    content: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            content,
        }
    }

    /// Файл из текста, mime-тип определяется по расширению
    pub fn from_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        let name = name.into();
        let mime_type = guess_mime_type(&name);
        Self {
            name,
            mime_type,
            content: text.into().into_bytes(),
        }
    }

    /// Прочитать локальный файл
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, FileIngestionError> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let content = tokio::fs::read(path)
            .await
            .map_err(|e| FileIngestionError::ReadFailure {
                file: name.clone(),
                reason: e.to_string(),
            })?;

        tracing::debug!("Read {} ({} bytes)", path.display(), content.len());

        let mime_type = guess_mime_type(&name);
        Ok(Self {
            name,
            mime_type,
            content,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Размер в байтах
    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Расширение имени файла в нижнем регистре, без точки
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.name)
            .extension()
            .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
    }
}

impl fmt::Debug for UploadedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadedFile")
            .field("name", &self.name)
            .field("mime_type", &self.mime_type)
            .field("size", &self.size())
            .finish()
    }
}

fn guess_mime_type(name: &str) -> String {
    mime_guess::from_path(name)
        .first_or_octet_stream()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_from_text_metadata() {
        let file = UploadedFile::from_text("Products.CSV", "a,b\n1,2");
        assert_eq!(file.extension().as_deref(), Some("csv"));
        assert_eq!(file.mime_type(), "text/csv");
        assert_eq!(file.size(), 7);
    }

    #[test]
    fn test_no_extension() {
        let file = UploadedFile::from_text("export", "{}");
        assert_eq!(file.extension(), None);
        assert_eq!(file.mime_type(), "application/octet-stream");
    }

    #[test]
    fn test_mime_type_beyond_product_formats() {
        let tsv = UploadedFile::from_text("feed.tsv", "a\tb");
        assert_eq!(tsv.mime_type(), "text/tab-separated-values");

        let xlsx = UploadedFile::from_text("export.xlsx", "x");
        assert_eq!(
            xlsx.mime_type(),
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        );

        let xml = UploadedFile::from_text("catalog.xml", "x");
        assert!(xml.mime_type().contains("xml"));
    }

    #[tokio::test]
    async fn test_from_path_reads_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("feed.json");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(br#"[{"id":"1"}]"#).unwrap();

        let file = UploadedFile::from_path(&path).await.unwrap();
        assert_eq!(file.name(), "feed.json");
        assert_eq!(file.mime_type(), "application/json");
        assert_eq!(file.content(), br#"[{"id":"1"}]"#);
    }

    #[tokio::test]
    async fn test_from_path_missing_is_read_failure() {
        let dir = tempfile::tempdir().unwrap();
        let err = UploadedFile::from_path(dir.path().join("nope.csv"))
            .await
            .unwrap_err();
        assert!(matches!(err, FileIngestionError::ReadFailure { ref file, .. } if file == "nope.csv"));
    }
}
