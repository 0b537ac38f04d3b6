use std::sync::Arc;

use tokio::sync::Mutex;

use crate::record::TaskRecord;

/// The process-wide ordered collection of finalized tasks.
///
/// The entry form reads a snapshot once at mount and appends exactly one
/// record per successful submission; nothing in this crate removes or edits
/// records. The store is injected (`Arc<TaskStore>`) rather than reached
/// through a global.
#[derive(Debug, Default)]
pub struct TaskStore {
    records: Mutex<Vec<TaskRecord>>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store with an existing sequence, preserving its order.
    pub fn with_records(records: Vec<TaskRecord>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }

    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Appends one record to the end of the collection.
    pub async fn append(&self, record: TaskRecord) {
        self.records.lock().await.push(record);
    }

    /// Returns a copy of the current sequence, in insertion order.
    pub async fn snapshot(&self) -> Vec<TaskRecord> {
        self.records.lock().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.lock().await.is_empty()
    }
}
