use serde::Serialize;

use super::aggregate::SourceType;

/// Описание коннектора в каталоге источников
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConnectorDefinition {
    pub id: SourceType,
    pub title: &'static str,
    pub description: &'static str,
    /// Метка возможностей, например "Auto Sync"
    pub tag: Option<&'static str>,
}

pub const AUTO_SYNC_TAG: &str = "Auto Sync";

/// Каталог коннекторов в порядке отображения
pub const CONNECTORS: &[ConnectorDefinition] = &[
    ConnectorDefinition {
        id: SourceType::ManualFileUpload,
        title: "Upload File",
        description: "Upload a CSV, TSV or JSON file with your product catalog",
        tag: None,
    },
    ConnectorDefinition {
        id: SourceType::HostedFile,
        title: "Hosted File",
        description: "Sync products from a CSV or JSON file available by URL",
        tag: Some(AUTO_SYNC_TAG),
    },
    ConnectorDefinition {
        id: SourceType::Crawler,
        title: "Web Crawler",
        description: "Crawl your storefront pages and extract products",
        tag: Some(AUTO_SYNC_TAG),
    },
    ConnectorDefinition {
        id: SourceType::SupersearchApi,
        title: "API",
        description: "Push product records directly through the Sync API",
        tag: None,
    },
    ConnectorDefinition {
        id: SourceType::SqlDatabase,
        title: "SQL Database",
        description: "Read products from a table in PostgreSQL, MySQL or SQL Server",
        tag: Some(AUTO_SYNC_TAG),
    },
];

/// Найти коннектор по типу источника
pub fn find_connector(id: SourceType) -> Option<&'static ConnectorDefinition> {
    CONNECTORS.iter().find(|c| c.id == id)
}

/// Найти коннектор по строковому коду (`MANUAL_FILE_UPLOAD`, `crawler`, ...)
pub fn find_connector_by_code(code: &str) -> Option<&'static ConnectorDefinition> {
    SourceType::from_code(code).and_then(find_connector)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_covers_every_source() {
        for source in SourceType::all() {
            assert!(find_connector(source).is_some(), "missing {}", source);
        }
        assert_eq!(CONNECTORS.len(), SourceType::all().len());
    }

    #[test]
    fn test_lookup_by_code() {
        let connector = find_connector_by_code("hosted_file").unwrap();
        assert_eq!(connector.title, "Hosted File");
        assert_eq!(connector.tag, Some(AUTO_SYNC_TAG));
        assert!(find_connector_by_code("ftp").is_none());
    }
}
