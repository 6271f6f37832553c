use contracts::domain::a001_data_source::SourceType;
use contracts::usecases::u501_sync_products::SubmissionState;
use std::sync::{Arc, RwLock};

/// Трекер состояния отправки (in-memory).
///
/// Каждая отправка получает номер поколения; результат устаревшей
/// (вытесненной или отменённой) отправки состояние не меняет.
#[derive(Clone)]
pub struct SubmissionTracker {
    inner: Arc<RwLock<TrackerInner>>,
}

struct TrackerInner {
    state: SubmissionState,
    generation: u64,
}

impl SubmissionTracker {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(TrackerInner {
                state: SubmissionState::Idle,
                generation: 0,
            })),
        }
    }

    pub fn state(&self) -> SubmissionState {
        self.inner.read().unwrap().state.clone()
    }

    pub fn is_submitting(&self) -> bool {
        self.inner.read().unwrap().state.is_submitting()
    }

    /// Начать отправку: Idle/Success/Failure -> Submitting. Возвращает поколение.
    pub fn begin(&self, source: SourceType) -> u64 {
        let mut inner = self.inner.write().unwrap();
        inner.generation += 1;
        inner.state = SubmissionState::Submitting {
            source,
            started_at: chrono::Utc::now(),
        };
        tracing::debug!("Submission #{} started for {}", inner.generation, source);
        inner.generation
    }

    /// Завершить отправку, если она всё ещё текущая
    pub fn finish(&self, generation: u64, state: SubmissionState) -> bool {
        let mut inner = self.inner.write().unwrap();
        if inner.generation != generation {
            tracing::debug!(
                "Ignoring result of superseded submission #{} (current #{})",
                generation,
                inner.generation
            );
            return false;
        }
        inner.state = state;
        true
    }

    /// Вернуться в Idle; результат отправки в полёте будет проигнорирован
    pub fn reset(&self) {
        let mut inner = self.inner.write().unwrap();
        inner.generation += 1;
        inner.state = SubmissionState::Idle;
    }

    /// Вернуться в Idle, только если сейчас ничего не отправляется
    pub fn settle_idle(&self) {
        let mut inner = self.inner.write().unwrap();
        if !inner.state.is_submitting() {
            inner.state = SubmissionState::Idle;
        }
    }
}

impl Default for SubmissionTracker {
    fn default() -> Self {
        Self::new()
    }
}
