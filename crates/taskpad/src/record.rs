/*
[INPUT]:  Draft field values collected by the entry form
[OUTPUT]: Validated drafts and immutable task records
[POS]:    Domain layer - task data model and validation gate
[UPDATE]: When adding fields or changing validation rules
*/

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Maximum accepted title length, in characters.
pub const TITLE_MAX: usize = 100;
/// Maximum accepted description length, in characters.
pub const DESCRIPTION_MAX: usize = 1000;

pub const MSG_TITLE_REQUIRED: &str = "Please enter the title";
pub const MSG_DESCRIPTION_REQUIRED: &str = "Enter task description";
pub const MSG_DUE_DATE_REQUIRED: &str = "Please select the due date.";
pub const MSG_STATUS_REQUIRED: &str = "Please set your status.";

pub const CREATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Task status. Closed set, no free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TaskStatus {
    Open,
    Working,
    Done,
    Overdue,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::Open,
        TaskStatus::Working,
        TaskStatus::Done,
        TaskStatus::Overdue,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Open => "OPEN",
            TaskStatus::Working => "WORKING",
            TaskStatus::Done => "DONE",
            TaskStatus::Overdue => "OVERDUE",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The in-progress task being composed before submission.
///
/// Owned exclusively by the entry form; lives only while the form is open.
/// Tags are ordered and may contain duplicates.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub due_date: Option<DateTime<Local>>,
    pub tags: Vec<String>,
    pub status: Option<TaskStatus>,
}

impl Default for TaskDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            due_date: None,
            tags: Vec::new(),
            status: Some(TaskStatus::Open),
        }
    }
}

/// Per-field validation messages. None of these are fatal; they block
/// submission and are surfaced next to their field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldErrors {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub status: Option<String>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.due_date.is_none()
            && self.status.is_none()
    }
}

impl TaskDraft {
    /// Runs the validation gate without consuming the draft. Tags are
    /// optional; everything else is required.
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::default();

        if self.title.is_empty() {
            errors.title = Some(MSG_TITLE_REQUIRED.to_string());
        } else if self.title.chars().count() > TITLE_MAX {
            errors.title = Some(format!("Title must be at most {TITLE_MAX} characters"));
        }

        if self.description.is_empty() {
            errors.description = Some(MSG_DESCRIPTION_REQUIRED.to_string());
        } else if self.description.chars().count() > DESCRIPTION_MAX {
            errors.description = Some(format!(
                "Description must be at most {DESCRIPTION_MAX} characters"
            ));
        }

        if self.due_date.is_none() {
            errors.due_date = Some(MSG_DUE_DATE_REQUIRED.to_string());
        }

        if self.status.is_none() {
            errors.status = Some(MSG_STATUS_REQUIRED.to_string());
        }

        errors
    }

    /// Consumes the draft through the validation gate. The returned
    /// [`ValidDraft`] is the only input the submission pipeline accepts,
    /// so a record can never be built from an unvalidated draft.
    pub fn into_valid(self) -> Result<ValidDraft, FieldErrors> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(ValidDraft(self))
        } else {
            Err(errors)
        }
    }
}

/// A draft that has passed the validation gate. Constructed only by
/// [`TaskDraft::into_valid`].
#[derive(Debug, Clone)]
pub struct ValidDraft(TaskDraft);

impl ValidDraft {
    pub fn title(&self) -> &str {
        &self.0.title
    }

    pub fn description(&self) -> &str {
        &self.0.description
    }

    pub fn due_date(&self) -> DateTime<Local> {
        // Presence enforced by the gate.
        self.0.due_date.expect("validated draft has a due date")
    }

    pub fn tags(&self) -> &[String] {
        &self.0.tags
    }

    pub fn status(&self) -> TaskStatus {
        self.0.status.expect("validated draft has a status")
    }
}

/// The immutable, finalized task appended to the shared collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub id: String,
    pub created_at: String,
    pub title: String,
    pub description: String,
    pub due_date: String,
    pub tags: Vec<String>,
    pub status: TaskStatus,
}

impl TaskRecord {
    /// Materializes a validated draft: assigns a fresh identity, stamps the
    /// wall-clock creation time, and coerces the due date to its string form.
    pub fn from_draft(draft: ValidDraft, created_at: DateTime<Local>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: created_at.format(CREATED_AT_FORMAT).to_string(),
            title: draft.title().to_string(),
            description: draft.description().to_string(),
            due_date: draft.due_date().format(DUE_DATE_FORMAT).to_string(),
            tags: draft.tags().to_vec(),
            status: draft.status(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn filled_draft() -> TaskDraft {
        TaskDraft {
            title: "Buy milk".to_string(),
            description: "2% low-fat".to_string(),
            due_date: Local.with_ymd_and_hms(2026, 8, 9, 10, 0, 0).single(),
            tags: vec!["Usual".to_string()],
            status: Some(TaskStatus::Open),
        }
    }

    #[test]
    fn default_draft_starts_open() {
        let draft = TaskDraft::default();
        assert!(draft.title.is_empty());
        assert!(draft.description.is_empty());
        assert!(draft.due_date.is_none());
        assert!(draft.tags.is_empty());
        assert_eq!(draft.status, Some(TaskStatus::Open));
    }

    #[test]
    fn filled_draft_passes_the_gate() {
        assert!(filled_draft().validate().is_empty());
        assert!(filled_draft().into_valid().is_ok());
    }

    #[test]
    fn empty_title_is_rejected_with_message() {
        let mut draft = filled_draft();
        draft.title.clear();
        let errors = draft.validate();
        assert_eq!(errors.title.as_deref(), Some(MSG_TITLE_REQUIRED));
        assert!(errors.description.is_none());
        assert!(draft.into_valid().is_err());
    }

    #[test]
    fn empty_description_is_rejected_with_message() {
        let mut draft = filled_draft();
        draft.description.clear();
        let errors = draft.validate();
        assert_eq!(errors.description.as_deref(), Some(MSG_DESCRIPTION_REQUIRED));
    }

    #[test]
    fn missing_due_date_is_rejected_with_message() {
        let mut draft = filled_draft();
        draft.due_date = None;
        let errors = draft.validate();
        assert_eq!(errors.due_date.as_deref(), Some(MSG_DUE_DATE_REQUIRED));
    }

    #[test]
    fn missing_status_is_rejected_with_message() {
        let mut draft = filled_draft();
        draft.status = None;
        let errors = draft.validate();
        assert_eq!(errors.status.as_deref(), Some(MSG_STATUS_REQUIRED));
    }

    #[test]
    fn tags_are_optional_and_may_repeat() {
        let mut draft = filled_draft();
        draft.tags.clear();
        assert!(draft.validate().is_empty());

        draft.tags = vec!["Usual".to_string(), "Usual".to_string()];
        assert!(draft.validate().is_empty());
    }

    #[test]
    fn title_length_boundary() {
        let mut draft = filled_draft();
        draft.title = "a".repeat(TITLE_MAX);
        assert!(draft.validate().is_empty());

        draft.title.push('a');
        assert!(draft.validate().title.is_some());
    }

    #[test]
    fn description_length_boundary() {
        let mut draft = filled_draft();
        draft.description = "d".repeat(DESCRIPTION_MAX);
        assert!(draft.validate().is_empty());

        draft.description.push('d');
        assert!(draft.validate().description.is_some());
    }

    #[test]
    fn record_copies_draft_fields_and_stringifies_due_date() {
        let draft = filled_draft().into_valid().expect("valid");
        let stamp = Local.with_ymd_and_hms(2026, 8, 8, 9, 30, 0).single().unwrap();
        let record = TaskRecord::from_draft(draft, stamp);

        assert_eq!(record.title, "Buy milk");
        assert_eq!(record.description, "2% low-fat");
        assert_eq!(record.due_date, "2026-08-09 10:00");
        assert_eq!(record.tags, vec!["Usual".to_string()]);
        assert_eq!(record.status, TaskStatus::Open);
        assert_eq!(record.created_at, "2026-08-08 09:30:00");
        assert!(!record.id.is_empty());
    }

    #[test]
    fn status_serializes_uppercase() {
        let json = serde_json::to_string(&TaskStatus::Overdue).unwrap();
        assert_eq!(json, "\"OVERDUE\"");
        let back: TaskStatus = serde_json::from_str("\"WORKING\"").unwrap();
        assert_eq!(back, TaskStatus::Working);
    }
}
