use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Статус синхронизации на стороне backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SyncStatus {
    Success,
    Processing,
    Failed,
}

impl SyncStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncStatus::Success => "SUCCESS",
            SyncStatus::Processing => "PROCESSING",
            SyncStatus::Failed => "FAILED",
        }
    }
}

impl std::fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Ответ на `POST /sync-products`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncResponse {
    pub sync_id: String,
    pub status: SyncStatus,
    #[serde(default)]
    pub message: String,
    pub timestamp: DateTime<Utc>,
}
