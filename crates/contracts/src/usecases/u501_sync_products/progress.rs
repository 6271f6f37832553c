use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::response::SyncStatus;
use crate::domain::a001_data_source::SourceType;

/// Состояние отправки синхронизации для привязки к UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SubmissionState {
    /// Ничего не отправляется, можно нажимать "Sync"
    Idle,
    /// Запрос в полёте, кнопка отправки заблокирована
    Submitting {
        source: SourceType,
        started_at: DateTime<Utc>,
    },
    /// Backend принял синхронизацию
    Success {
        sync_id: String,
        status: SyncStatus,
        message: String,
    },
    /// Ошибка транспорта или ответ не 2xx
    Failure { message: String },
}

impl Default for SubmissionState {
    fn default() -> Self {
        Self::Idle
    }
}

impl SubmissionState {
    pub fn is_submitting(&self) -> bool {
        matches!(self, SubmissionState::Submitting { .. })
    }

    /// Идентификатор синхронизации для сопоставления с историей
    pub fn sync_id(&self) -> Option<&str> {
        match self {
            SubmissionState::Success { sync_id, .. } => Some(sync_id),
            _ => None,
        }
    }
}
