/// **Input**: Shared task store, form input events, list selections.
/// **Output**: Mutated AppState for UI rendering plus store appends.
/// **Position**: TUI application state and input-handling coordinator.
/// **Update**: 2026-08-05 Route form outcomes through the submission pipeline.
/// **Update**: 2026-08-06 Arm the one-shot notice from config.
use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Local};
use ratatui::crossterm::event::KeyEvent;
use ratatui::widgets::ListState;
use tracing::debug;

use taskpad::config::AppConfig;
use taskpad::record::TaskRecord;
use taskpad::store::TaskStore;
use taskpad::submit;

use crate::ui::components::task_form::{FormOutcome, TaskForm};

/// Text of the transient confirmation shown once per successful submission.
pub const NOTICE_TASK_ADDED: &str = "Task added.";

/// Application mode - determines how keyboard input is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Normal mode - list navigation commands
    Normal,
    /// Insert mode - typing into the entry form
    Insert,
}

/// Main application state
#[derive(Debug)]
pub struct AppState {
    /// The injected shared collection; this core only ever appends to it.
    store: Arc<TaskStore>,
    pub config: AppConfig,
    /// Current input mode
    pub mode: AppMode,
    /// The entry form and its draft
    pub form: TaskForm,
    /// Local display copy of the record sequence, seeded at mount
    pub records: Vec<TaskRecord>,
    /// Task list selection
    pub list_state: ListState,
    /// One-shot success notice (text, ticks remaining)
    pub notice: Option<(String, u8)>,
    /// Ordinary status message
    pub status_message: Option<String>,
    /// Whether the help overlay is shown
    pub show_help: bool,
    /// Wall-clock time captured at the last event, used by the date picker
    pub now: DateTime<Local>,
}

impl AppState {
    pub async fn new(store: Arc<TaskStore>, config: AppConfig) -> Self {
        let records = store.snapshot().await;
        let mut list_state = ListState::default();
        if !records.is_empty() {
            list_state.select(Some(0));
        }
        let form = TaskForm::new(&config);
        Self {
            store,
            config,
            mode: AppMode::Normal,
            form,
            records,
            list_state,
            notice: None,
            status_message: Some("Press ? for help".to_string()),
            show_help: false,
            now: Local::now(),
        }
    }

    /// Focuses the entry form. This is the title field's activation event:
    /// the form expands here, before any text is typed.
    pub fn open_form(&mut self) {
        self.now = Local::now();
        self.mode = AppMode::Insert;
        self.form.activate(self.now);
        self.status_message = None;
    }

    /// Routes a key press to the form and acts on the outcome.
    pub async fn handle_form_key(&mut self, key: KeyEvent) -> Result<()> {
        self.now = Local::now();
        match self.form.handle_key(key, self.now) {
            FormOutcome::Submitted(valid) => {
                let record = submit::submit(&self.store, valid).await;
                self.refresh_records().await;
                self.select_record(&record.id);
                self.form.finish_submit();
                self.mode = AppMode::Normal;
                self.notice = Some((NOTICE_TASK_ADDED.to_string(), self.config.notice_ticks));
            }
            FormOutcome::Cancelled => {
                debug!("entry form cancelled");
                self.mode = AppMode::Normal;
            }
            FormOutcome::None => {}
        }
        Ok(())
    }

    /// Re-reads the shared sequence into the local display copy.
    pub async fn refresh_records(&mut self) {
        self.records = self.store.snapshot().await;
        if self.records.is_empty() {
            self.list_state.select(None);
        } else if self.list_state.selected().is_none() {
            self.list_state.select(Some(0));
        }
    }

    fn select_record(&mut self, id: &str) {
        if let Some(index) = self.records.iter().position(|record| record.id == id) {
            self.list_state.select(Some(index));
        }
    }

    pub fn move_selection(&mut self, delta: isize) {
        if self.records.is_empty() {
            self.list_state.select(None);
            return;
        }
        let current = self.list_state.selected().unwrap_or(0) as isize;
        let next = (current + delta).clamp(0, (self.records.len() - 1) as isize) as usize;
        self.list_state.select(Some(next));
    }

    /// Update on tick (called periodically)
    pub fn update_tick(&mut self) {
        self.now = Local::now();
        if let Some((_, ref mut ticks)) = self.notice {
            if *ticks > 0 {
                *ticks -= 1;
            } else {
                self.notice = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::components::task_form::{FormPhase, TaskField};
    use ratatui::crossterm::event::{KeyCode, KeyModifiers};
    use taskpad::record::{MSG_TITLE_REQUIRED, TaskStatus};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    async fn fresh_state() -> AppState {
        AppState::new(TaskStore::shared(), AppConfig::default()).await
    }

    async fn type_text(state: &mut AppState, text: &str) {
        for ch in text.chars() {
            state.handle_form_key(key(KeyCode::Char(ch))).await.unwrap();
        }
    }

    #[tokio::test]
    async fn mount_seeds_the_display_copy() {
        let store = Arc::new(TaskStore::with_records(Vec::new()));
        let state = AppState::new(store, AppConfig::default()).await;
        assert!(state.records.is_empty());
        assert_eq!(state.mode, AppMode::Normal);
        assert_eq!(state.form.phase(), FormPhase::Collapsed);
    }

    #[tokio::test]
    async fn buy_milk_scenario_appends_and_notifies() {
        let store = TaskStore::shared();
        let mut state = AppState::new(store.clone(), AppConfig::default()).await;

        state.open_form();
        assert_eq!(state.mode, AppMode::Insert);
        assert_eq!(state.form.phase(), FormPhase::Expanded);

        type_text(&mut state, "Buy milk").await;
        state.handle_form_key(key(KeyCode::Tab)).await.unwrap();
        type_text(&mut state, "2% low-fat").await;
        state.handle_form_key(key(KeyCode::Tab)).await.unwrap();
        // Due date: tomorrow at the earliest offered hour, comfortably
        // past the end-of-hour cutoff even if the clock rolls mid-test.
        state.handle_form_key(key(KeyCode::Right)).await.unwrap();
        state.handle_form_key(key(KeyCode::Enter)).await.unwrap();
        state.handle_form_key(key(KeyCode::Tab)).await.unwrap();
        // Tags: pick "Usual" (last preset).
        for _ in 0..3 {
            state.handle_form_key(key(KeyCode::Down)).await.unwrap();
        }
        state.handle_form_key(key(KeyCode::Enter)).await.unwrap();
        state.handle_form_key(key(KeyCode::Tab)).await.unwrap();
        // Status stays OPEN.
        state.handle_form_key(key(KeyCode::Tab)).await.unwrap();
        assert_eq!(state.form.focused, TaskField::Submit);
        state.handle_form_key(key(KeyCode::Enter)).await.unwrap();

        let snapshot = store.snapshot().await;
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].title, "Buy milk");
        assert_eq!(snapshot[0].status, TaskStatus::Open);
        assert_eq!(snapshot[0].tags, vec!["Usual".to_string()]);

        assert_eq!(
            state.notice.as_ref().map(|(text, _)| text.as_str()),
            Some(NOTICE_TASK_ADDED)
        );
        assert_eq!(state.mode, AppMode::Normal);
        assert_eq!(state.form.phase(), FormPhase::Collapsed);
        assert_eq!(state.records.len(), 1);
    }

    #[tokio::test]
    async fn empty_title_submit_is_blocked() {
        let store = TaskStore::shared();
        let mut state = AppState::new(store.clone(), AppConfig::default()).await;

        state.open_form();
        while state.form.focused != TaskField::Submit {
            state.handle_form_key(key(KeyCode::Tab)).await.unwrap();
        }
        state.handle_form_key(key(KeyCode::Enter)).await.unwrap();

        assert_eq!(store.len().await, 0);
        assert_eq!(state.mode, AppMode::Insert);
        assert_eq!(state.form.phase(), FormPhase::Expanded);
        assert_eq!(
            state.form.errors.title.as_deref(),
            Some(MSG_TITLE_REQUIRED)
        );
        assert!(state.notice.is_none());
    }

    #[tokio::test]
    async fn cancel_collapses_and_returns_to_normal() {
        let mut state = fresh_state().await;
        state.open_form();
        type_text(&mut state, "half").await;

        state.handle_form_key(key(KeyCode::Esc)).await.unwrap();
        assert_eq!(state.mode, AppMode::Normal);
        assert_eq!(state.form.phase(), FormPhase::Collapsed);
        assert!(state.form.draft.title.is_empty());
    }

    #[tokio::test]
    async fn notice_auto_dismisses_after_its_ticks() {
        let mut state = fresh_state().await;
        state.notice = Some((NOTICE_TASK_ADDED.to_string(), 2));

        state.update_tick();
        state.update_tick();
        assert!(state.notice.is_some());
        state.update_tick();
        assert!(state.notice.is_none());
    }

    #[tokio::test]
    async fn selection_clamps_to_the_record_range() {
        let mut state = fresh_state().await;
        state.move_selection(1);
        assert_eq!(state.list_state.selected(), None);

        state.records = vec![];
        state.refresh_records().await;
        assert_eq!(state.list_state.selected(), None);
    }
}
