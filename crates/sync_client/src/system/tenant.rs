/// Заголовок с идентификатором организации
pub const ORGANIZATION_HEADER: &str = "X-Organization-Id";
/// Заголовок с идентификатором каталога
pub const CATALOG_HEADER: &str = "X-Catalog-Id";

const ORGANIZATION_SEGMENTS: &[&str] = &["org", "orgs", "organization", "organizations"];
const CATALOG_SEGMENTS: &[&str] = &["catalog", "catalogs"];

/// Контекст арендатора, передаваемый в клиент извне.
///
/// Выбор организации/каталога хранит UI; ядро только превращает его
/// в заголовки каждого запроса.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TenantContext {
    pub organization_id: Option<String>,
    pub catalog_id: Option<String>,
}

impl TenantContext {
    /// Разбор пути консоли вида `/org/{org}/catalog/{catalog}/...`.
    ///
    /// Query и fragment отбрасываются, сегменты декодируются из percent-encoding.
    pub fn from_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<String> = path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| {
                urlencoding::decode(s)
                    .map(|decoded| decoded.into_owned())
                    .unwrap_or_else(|_| s.to_string())
            })
            .collect();

        let mut context = TenantContext::default();
        for pair in segments.windows(2) {
            let key = pair[0].to_ascii_lowercase();
            let value = pair[1].trim();
            if value.is_empty() {
                continue;
            }
            if context.organization_id.is_none() && ORGANIZATION_SEGMENTS.contains(&key.as_str())
            {
                context.organization_id = Some(value.to_string());
            } else if context.catalog_id.is_none() && CATALOG_SEGMENTS.contains(&key.as_str()) {
                context.catalog_id = Some(value.to_string());
            }
        }
        context
    }

    pub fn is_empty(&self) -> bool {
        self.organization_id.is_none() && self.catalog_id.is_none()
    }

    /// Заголовки арендатора для исходящего запроса
    pub fn headers(&self) -> Vec<(&'static str, String)> {
        let mut headers = Vec::new();
        if let Some(org) = &self.organization_id {
            headers.push((ORGANIZATION_HEADER, org.clone()));
        }
        if let Some(catalog) = &self.catalog_id {
            headers.push((CATALOG_HEADER, catalog.clone()));
        }
        headers
    }
}
