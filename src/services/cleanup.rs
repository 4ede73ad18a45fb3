use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::info;

use crate::AppState;

/// Архивная зачистка: сеансы, начавшиеся давно, выводятся из оборота -
/// карта мест удаляется из хранилища, сеанс из справочника. Сами записи
/// броней остаются как история.
pub struct ArchiveService {
    state: Arc<AppState>,
}

impl ArchiveService {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    /// Один проход зачистки. Возвращает число заархивированных сеансов.
    pub async fn run_sweep(&self) -> usize {
        let retention = Duration::hours(self.state.config.store.retention_hours);
        let cutoff = Utc::now().naive_utc() - retention;

        let expired = self.state.catalog.started_before(cutoff).await;
        if expired.is_empty() {
            return 0;
        }

        info!("🧹 archiving {} expired schedules", expired.len());
        let mut archived = 0;
        for schedule_id in expired {
            self.state.store.remove(schedule_id).await;
            if self.state.catalog.remove_schedule(schedule_id).await {
                archived += 1;
            }
        }
        info!(
            "✅ sweep done: {} schedules archived, {} seat maps remain",
            archived,
            self.state.store.len().await
        );
        archived
    }
}
