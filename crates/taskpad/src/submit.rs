/// **Input**: A draft that has passed the validation gate, plus the store.
/// **Output**: The freshly appended `TaskRecord`.
/// **Position**: Submission pipeline between the form and the shared store.
use chrono::Local;
use tracing::info;

use crate::record::{TaskRecord, ValidDraft};
use crate::store::TaskStore;

/// Materializes a validated draft and commits it.
///
/// Captures the wall-clock timestamp, assigns a fresh identity, builds the
/// immutable record, and performs the single append. There is no I/O and no
/// failure mode here; everything that can go wrong is caught by the
/// validation gate before a [`ValidDraft`] exists.
pub async fn submit(store: &TaskStore, draft: ValidDraft) -> TaskRecord {
    let record = TaskRecord::from_draft(draft, Local::now());
    store.append(record.clone()).await;
    info!(id = %record.id, title = %record.title, "task appended");
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{TaskDraft, TaskStatus};
    use chrono::TimeZone;
    use std::collections::HashSet;

    fn valid_draft(title: &str) -> ValidDraft {
        TaskDraft {
            title: title.to_string(),
            description: "2% low-fat".to_string(),
            due_date: Local.with_ymd_and_hms(2026, 8, 9, 10, 0, 0).single(),
            tags: vec!["Usual".to_string()],
            status: Some(TaskStatus::Open),
        }
        .into_valid()
        .expect("draft is valid")
    }

    #[tokio::test]
    async fn submit_appends_exactly_one_record() {
        let store = TaskStore::new();
        let record = submit(&store, valid_draft("Buy milk")).await;

        let snapshot = store.snapshot().await;
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0], record);
        assert_eq!(record.title, "Buy milk");
        assert_eq!(record.status, TaskStatus::Open);
        assert_eq!(record.due_date, "2026-08-09 10:00");
        assert_eq!(record.tags, vec!["Usual".to_string()]);
    }

    #[tokio::test]
    async fn identifiers_are_pairwise_distinct() {
        let store = TaskStore::new();
        let mut ids = HashSet::new();
        for i in 0..50 {
            let record = submit(&store, valid_draft(&format!("task {i}"))).await;
            assert!(ids.insert(record.id), "duplicate id generated");
        }
        assert_eq!(store.len().await, 50);
    }
}
