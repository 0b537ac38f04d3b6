/*
[INPUT]:  Public API exports for the taskpad crate
[OUTPUT]: Module declarations and public re-exports
[POS]:    Crate root - library entry point
[UPDATE]: When adding new modules or public exports
*/

pub mod config;
pub mod record;
pub mod store;
pub mod submit;

// Re-export main types for convenience
pub use config::AppConfig;
pub use record::{FieldErrors, TaskDraft, TaskRecord, TaskStatus, ValidDraft};
pub use store::TaskStore;
