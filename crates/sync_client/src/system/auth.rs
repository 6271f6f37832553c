use async_trait::async_trait;

/// Источник bearer-токена.
///
/// Токен выдаёт внешний identity provider; ядру достаточно получить
/// актуальное значение перед каждым запросом.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn access_token(&self) -> Option<String>;
}

/// Фиксированный токен (из config.toml) или его отсутствие
#[derive(Debug, Clone, Default)]
pub struct StaticTokenProvider {
    token: Option<String>,
}

impl StaticTokenProvider {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: token.filter(|t| !t.trim().is_empty()),
        }
    }

    pub fn anonymous() -> Self {
        Self { token: None }
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn access_token(&self) -> Option<String> {
        self.token.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_blank_token_is_absent() {
        assert!(StaticTokenProvider::new(Some("  ".into())).access_token().await.is_none());
        assert!(StaticTokenProvider::anonymous().access_token().await.is_none());
        assert_eq!(
            StaticTokenProvider::new(Some("t0k".into())).access_token().await.as_deref(),
            Some("t0k")
        );
    }
}
