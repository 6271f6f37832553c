use contracts::usecases::u501_sync_products::{
    ProductSyncInput, SyncHistoryPage, SyncHistoryResponse, SyncResponse,
};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use super::error::TransportError;
use crate::shared::config::Config;
use crate::system::auth::{StaticTokenProvider, TokenProvider};
use crate::system::tenant::TenantContext;

pub const SYNC_FAILED_MESSAGE: &str = "Failed to sync products";
pub const HISTORY_FAILED_MESSAGE: &str = "Failed to fetch sync history";
pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// HTTP-клиент для Sync API backend
pub struct SyncApiClient {
    client: reqwest::Client,
    base_url: String,
    tenant: TenantContext,
    tokens: Arc<dyn TokenProvider>,
}

impl SyncApiClient {
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        tenant: TenantContext,
        tokens: Arc<dyn TokenProvider>,
    ) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .no_proxy()
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            tenant,
            tokens,
        })
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let tenant = TenantContext::from_path(&config.tenant.path);
        let tokens: Arc<dyn TokenProvider> =
            Arc::new(StaticTokenProvider::new(config.bearer_token()));
        Self::new(config.api.base_url.trim(), config.timeout(), tenant, tokens)
    }

    /// Отправить синхронизацию: `POST /sync-products`
    pub async fn sync_products(
        &self,
        input: &ProductSyncInput,
    ) -> Result<SyncResponse, TransportError> {
        let url = format!("{}/sync-products", self.base_url);
        tracing::info!(
            "Sync API: POST {} (source={}, products={})",
            url,
            input.source_config.source_type(),
            input.products.as_ref().map_or(0, Vec::len)
        );
        let request = self.client.post(&url).json(input);
        self.execute(request, "POST", &url, SYNC_FAILED_MESSAGE).await
    }

    /// История синхронизаций: `GET /sync-history?page={page}&size={size}`.
    ///
    /// Страницы нумеруются с 1.
    pub async fn fetch_sync_history(
        &self,
        page: u32,
        size: u32,
    ) -> Result<SyncHistoryPage, TransportError> {
        let page = page.max(1);
        let size = size.max(1);
        let url = format!("{}/sync-history", self.base_url);
        let request = self
            .client
            .get(&url)
            .query(&[("page", page), ("size", size)]);
        let response: SyncHistoryResponse = self
            .execute(request, "GET", &url, HISTORY_FAILED_MESSAGE)
            .await?;

        let history = response.into_page();
        tracing::info!(
            "Sync API: history page {} -> {} items, total {}{}",
            history.page,
            history.items.len(),
            history.total,
            if history.total_is_estimate { " (estimated)" } else { "" }
        );
        Ok(history)
    }

    /// Добавить заголовки арендатора, bearer-токен и id запроса, выполнить запрос
    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        method: &str,
        url: &str,
        fallback_message: &str,
    ) -> Result<T, TransportError> {
        let request_id = Uuid::new_v4().to_string();
        let mut request = request
            .header("Accept", "application/json")
            .header(REQUEST_ID_HEADER, &request_id);
        for (name, value) in self.tenant.headers() {
            request = request.header(name, value);
        }
        let token = self.tokens.access_token().await;
        if let Some(token) = &token {
            request = request.bearer_auth(token);
        }

        tracing::debug!(
            "{} {} (request_id={}, tenant={:?}, token={})",
            method,
            url,
            request_id,
            self.tenant,
            if token.is_some() { "***" } else { "NONE" }
        );

        let response = request.send().await.map_err(|e| {
            tracing::error!("{} {} failed (request_id={}): {}", method, url, request_id, e);
            TransportError::network(fallback_message, format!("{} {}: {}", method, url, e))
        })?;

        let status = response.status();
        tracing::info!(
            "Sync API response: {} for {} {} (request_id={})",
            status,
            method,
            url,
            request_id
        );

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message =
                backend_message(&body).unwrap_or_else(|| fallback_message.to_string());
            tracing::warn!("{} {} -> HTTP {}: {}", method, url, status, message);
            return Err(TransportError {
                status: Some(status.as_u16()),
                message,
                details: (!body.is_empty()).then_some(body),
            });
        }

        response.json::<T>().await.map_err(|e| {
            tracing::error!("Invalid response body from {} {}: {}", method, url, e);
            TransportError {
                status: Some(status.as_u16()),
                message: fallback_message.to_string(),
                details: Some(format!("invalid response body: {}", e)),
            }
        })
    }
}

/// Сообщение об ошибке из тела ответа backend: `message`, `detail` или `error`
fn backend_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["message", "detail", "error"]
        .iter()
        .filter_map(|key| value.get(key).and_then(|v| v.as_str()))
        .map(|s| s.trim().to_string())
        .find(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::u501_sync_products::mock_api::{MockApi, MockConfig};
    use contracts::domain::a001_data_source::{SourceConfig, SourceSettings, SyncSchedule};
    use contracts::usecases::u501_sync_products::SyncStatus;
    use serde_json::json;

    fn client(base_url: &str, tenant: TenantContext, token: Option<&str>) -> SyncApiClient {
        SyncApiClient::new(
            base_url,
            Duration::from_secs(5),
            tenant,
            Arc::new(StaticTokenProvider::new(token.map(str::to_string))),
        )
        .unwrap()
    }

    fn api_input() -> ProductSyncInput {
        ProductSyncInput {
            source_config: SourceConfig::new(SourceSettings::SupersearchApi, SyncSchedule::Manual),
            products: None,
        }
    }

    #[test]
    fn test_backend_message() {
        assert_eq!(
            backend_message(r#"{"message":"quota exceeded"}"#).as_deref(),
            Some("quota exceeded")
        );
        assert_eq!(
            backend_message(r#"{"detail":"Not authenticated"}"#).as_deref(),
            Some("Not authenticated")
        );
        assert_eq!(backend_message(r#"{"detail":[{"loc":["body"]}]}"#), None);
        assert_eq!(backend_message(r#"{"message":"  "}"#), None);
        assert_eq!(backend_message("<html>502</html>"), None);
    }

    #[tokio::test]
    async fn test_sync_products_sends_headers() {
        let mock = MockApi::start(MockConfig::default()).await;
        let tenant = TenantContext::from_path("/org/acme/catalog/main");
        let api = client(&format!("{}/", mock.base_url), tenant, Some("t0k"));

        let response = api.sync_products(&api_input()).await.unwrap();
        assert_eq!(response.sync_id, "sync-1");
        assert_eq!(response.status, SyncStatus::Processing);

        let requests = mock.requests();
        assert_eq!(requests.len(), 1);
        let headers = &requests[0].headers;
        assert_eq!(headers.get("x-organization-id").map(String::as_str), Some("acme"));
        assert_eq!(headers.get("x-catalog-id").map(String::as_str), Some("main"));
        assert_eq!(headers.get("authorization").map(String::as_str), Some("Bearer t0k"));
        assert!(headers.contains_key("x-request-id"));
        assert_eq!(requests[0].body["source_config"]["source"], "SUPERSEARCH_API");
    }

    #[tokio::test]
    async fn test_anonymous_request_has_no_authorization() {
        let mock = MockApi::start(MockConfig::default()).await;
        let api = client(&mock.base_url, TenantContext::default(), None);
        api.sync_products(&api_input()).await.unwrap();
        assert!(!mock.requests()[0].headers.contains_key("authorization"));
    }

    #[tokio::test]
    async fn test_error_status_uses_backend_message() {
        let mock = MockApi::start(MockConfig {
            sync_status: 429,
            sync_body: json!({ "message": "quota exceeded" }),
            ..MockConfig::default()
        })
        .await;
        let api = client(&mock.base_url, TenantContext::default(), None);

        let err = api.sync_products(&api_input()).await.unwrap_err();
        assert_eq!(err.status, Some(429));
        assert_eq!(err.message, "quota exceeded");
    }

    #[tokio::test]
    async fn test_error_status_without_message_falls_back() {
        let mock = MockApi::start(MockConfig {
            sync_status: 500,
            sync_body: json!({ "code": 17 }),
            ..MockConfig::default()
        })
        .await;
        let api = client(&mock.base_url, TenantContext::default(), None);

        let err = api.sync_products(&api_input()).await.unwrap_err();
        assert_eq!(err.status, Some(500));
        assert_eq!(err.message, SYNC_FAILED_MESSAGE);
    }

    #[tokio::test]
    async fn test_unparseable_success_body() {
        let mock = MockApi::start(MockConfig {
            sync_body: json!("accepted"),
            ..MockConfig::default()
        })
        .await;
        let api = client(&mock.base_url, TenantContext::default(), None);

        let err = api.sync_products(&api_input()).await.unwrap_err();
        assert_eq!(err.status, Some(200));
        assert_eq!(err.message, SYNC_FAILED_MESSAGE);
        assert!(err.details.unwrap().contains("invalid response body"));
    }

    #[tokio::test]
    async fn test_network_failure() {
        // Порт освобождается сразу после bind, соединение будет отклонено
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let api = client(&format!("http://{}", addr), TenantContext::default(), None);
        let err = api.sync_products(&api_input()).await.unwrap_err();
        assert_eq!(err.status, None);
        assert_eq!(err.message, SYNC_FAILED_MESSAGE);
        assert!(err.details.is_some());
    }

    #[tokio::test]
    async fn test_fetch_sync_history_estimates_total() {
        let item = json!({
            "id": "h1",
            "source": "MANUAL_FILE_UPLOAD",
            "status": "SUCCESS",
            "start_time": "2024-05-01T08:00:00Z",
            "end_time": "2024-05-01T08:01:00Z",
            "records_processed": 120,
            "next_run": null,
            "created_at": "2024-05-01T08:00:00Z",
            "updated_at": "2024-05-01T08:01:00Z"
        });
        let items: Vec<_> = (0..10).map(|_| item.clone()).collect();
        let mock = MockApi::start(MockConfig {
            history_body: json!({ "items": items, "page": 2, "size": 10, "has_more": true }),
            ..MockConfig::default()
        })
        .await;
        let api = client(&mock.base_url, TenantContext::from_path("/org/acme"), None);

        let page = api.fetch_sync_history(2, 10).await.unwrap();
        assert_eq!(page.items.len(), 10);
        assert_eq!(page.total, 30);
        assert!(page.total_is_estimate);
        assert_eq!(page.items[0].records_processed, Some(120));

        let requests = mock.requests();
        assert_eq!(requests[0].path, "/sync-history");
        assert_eq!(requests[0].query.as_deref(), Some("page=2&size=10"));
        assert_eq!(
            requests[0].headers.get("x-organization-id").map(String::as_str),
            Some("acme")
        );
    }

    #[tokio::test]
    async fn test_fetch_sync_history_last_page_is_exact() {
        let mock = MockApi::start(MockConfig {
            history_body: json!({ "items": [], "page": 3, "size": 10, "has_more": false }),
            ..MockConfig::default()
        })
        .await;
        let api = client(&mock.base_url, TenantContext::default(), None);
        let page = api.fetch_sync_history(3, 10).await.unwrap();
        assert_eq!(page.total, 20);
    }
}
