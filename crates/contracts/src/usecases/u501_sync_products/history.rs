use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::response::SyncStatus;
use crate::domain::a001_data_source::SourceType;

/// Элемент истории синхронизаций
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncHistoryItem {
    pub id: String,
    pub source: SourceType,
    pub status: SyncStatus,
    pub start_time: DateTime<Utc>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub records_processed: Option<u64>,
    #[serde(default)]
    pub next_run: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Ответ `GET /sync-history` как его отдаёт backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncHistoryResponse {
    #[serde(default)]
    pub items: Vec<SyncHistoryItem>,
    pub page: u32,
    pub size: u32,
    #[serde(default)]
    pub has_more: bool,
    /// Точное количество, если backend его сообщает
    #[serde(default)]
    pub total: Option<u64>,
}

/// Страница истории для UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncHistoryPage {
    pub items: Vec<SyncHistoryItem>,
    pub page: u32,
    pub size: u32,
    pub has_more: bool,
    pub total: u64,
    /// `true`, если `total` посчитан по `has_more`, а не получен от backend
    pub total_is_estimate: bool,
}

/// Оценка общего количества записей, когда backend его не сообщает.
///
/// Смещение текущей страницы плюс полученные элементы; если есть ещё
/// страницы, добавляется ровно одна страница сверху. На последней странице
/// оценка совпадает с точным количеством.
pub fn estimate_total(page: u32, size: u32, items_len: usize, has_more: bool) -> u64 {
    let offset = u64::from(page.saturating_sub(1)) * u64::from(size);
    let extra = if has_more { u64::from(size) } else { 0 };
    offset + items_len as u64 + extra
}

impl SyncHistoryResponse {
    pub fn into_page(self) -> SyncHistoryPage {
        let (total, total_is_estimate) = match self.total {
            Some(total) => (total, false),
            None => (
                estimate_total(self.page, self.size, self.items.len(), self.has_more),
                true,
            ),
        };
        SyncHistoryPage {
            items: self.items,
            page: self.page,
            size: self.size,
            has_more: self.has_more,
            total,
            total_is_estimate,
        }
    }
}
