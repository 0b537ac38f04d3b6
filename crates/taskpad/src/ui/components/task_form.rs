/// **Input**: `TaskDraft` domain model, keyboard events, wall-clock time.
/// **Output**: `TaskForm` state machine and `render` function for the entry
/// pane.
/// **Update**: Revisit when form fields or validation rules change.
use chrono::{DateTime, Local};
use ratatui::Frame;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use taskpad::config::AppConfig;
use taskpad::record::{
    DESCRIPTION_MAX, FieldErrors, TITLE_MAX, TaskDraft, TaskStatus, ValidDraft,
};

use super::date_picker::DueDatePicker;
use super::single_select::SingleSelect;
use super::tag_select::TagSelect;

pub const COLLAPSED_HEIGHT: u16 = 3;
pub const EXPANDED_HEIGHT: u16 = 20;

/// Progressive-disclosure phases of the entry form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    /// Only the title field is shown.
    Collapsed,
    /// All fields and the submit/cancel actions are shown.
    Expanded,
    /// A validated draft is being committed. Transient; ends in Collapsed.
    Submitting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskField {
    Title,
    Description,
    DueDate,
    Tags,
    Status,
    Submit,
    Cancel,
}

impl TaskField {
    pub fn next(self) -> Self {
        match self {
            TaskField::Title => TaskField::Description,
            TaskField::Description => TaskField::DueDate,
            TaskField::DueDate => TaskField::Tags,
            TaskField::Tags => TaskField::Status,
            TaskField::Status => TaskField::Submit,
            TaskField::Submit => TaskField::Cancel,
            TaskField::Cancel => TaskField::Title,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            TaskField::Title => TaskField::Cancel,
            TaskField::Description => TaskField::Title,
            TaskField::DueDate => TaskField::Description,
            TaskField::Tags => TaskField::DueDate,
            TaskField::Status => TaskField::Tags,
            TaskField::Submit => TaskField::Status,
            TaskField::Cancel => TaskField::Submit,
        }
    }
}

/// What a key press did to the form, as seen by the app loop.
#[derive(Debug, Clone)]
pub enum FormOutcome {
    None,
    /// The form was cancelled and has already reset itself.
    Cancelled,
    /// The draft passed the validation gate; hand it to the pipeline.
    Submitted(ValidDraft),
}

/// The entry form: one in-progress draft, its visibility phase, the focus
/// cursor, and per-field validation messages.
#[derive(Debug)]
pub struct TaskForm {
    pub draft: TaskDraft,
    phase: FormPhase,
    pub focused: TaskField,
    pub errors: FieldErrors,
    pub date_picker: DueDatePicker,
    pub tag_select: TagSelect,
    pub status_select: SingleSelect<TaskStatus>,
}

impl TaskForm {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            draft: TaskDraft::default(),
            phase: FormPhase::Collapsed,
            focused: TaskField::Title,
            errors: FieldErrors::default(),
            date_picker: DueDatePicker::new(config.picker_horizon_days),
            tag_select: TagSelect::new(config.preset_tags.clone()),
            status_select: SingleSelect::with_committed(
                TaskStatus::ALL.to_vec(),
                &TaskStatus::Open,
            ),
        }
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    /// Secondary fields are visible iff this is true.
    pub fn expanded(&self) -> bool {
        self.phase != FormPhase::Collapsed
    }

    pub fn height(&self) -> u16 {
        if self.expanded() {
            EXPANDED_HEIGHT
        } else {
            COLLAPSED_HEIGHT
        }
    }

    /// The title field gained focus. Expands the form on the first
    /// activation, whether or not any text follows; later activations are
    /// no-ops until a reset collapses the form again.
    pub fn activate(&mut self, now: DateTime<Local>) {
        if self.phase == FormPhase::Collapsed {
            self.phase = FormPhase::Expanded;
            self.date_picker.reset(now);
        }
        self.focused = TaskField::Title;
    }

    /// Returns the draft and every piece of presentation state to its
    /// initial value.
    pub fn reset(&mut self) {
        self.draft = TaskDraft::default();
        self.phase = FormPhase::Collapsed;
        self.focused = TaskField::Title;
        self.errors = FieldErrors::default();
        self.tag_select.reset();
        self.status_select = SingleSelect::with_committed(
            TaskStatus::ALL.to_vec(),
            &TaskStatus::Open,
        );
    }

    /// Marks the transient Submitting phase as finished and resets.
    pub fn finish_submit(&mut self) {
        self.reset();
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: DateTime<Local>) -> FormOutcome {
        if key.code == KeyCode::Esc {
            self.reset();
            return FormOutcome::Cancelled;
        }

        if !self.expanded() {
            // Only the title is reachable while collapsed.
            self.edit_title(key);
            return FormOutcome::None;
        }

        match key.code {
            KeyCode::Tab => {
                self.set_focus(self.focused.next(), now);
                return FormOutcome::None;
            }
            KeyCode::BackTab => {
                self.set_focus(self.focused.prev(), now);
                return FormOutcome::None;
            }
            _ => {}
        }

        match self.focused {
            TaskField::Title => match key.code {
                KeyCode::Enter | KeyCode::Down => self.set_focus(TaskField::Description, now),
                KeyCode::Up => self.set_focus(TaskField::Title.prev(), now),
                _ => self.edit_title(key),
            },
            TaskField::Description => match key.code {
                KeyCode::Down => self.set_focus(TaskField::DueDate, now),
                KeyCode::Up => self.set_focus(TaskField::Title, now),
                _ => self.edit_description(key),
            },
            TaskField::DueDate => {
                if let Some(slot) = self.date_picker.handle_key(key, now) {
                    self.draft.due_date = Some(slot);
                    self.errors.due_date = None;
                }
            }
            TaskField::Tags => {
                if self.tag_select.handle_key(key) {
                    self.draft.tags = self.tag_select.chosen().to_vec();
                }
            }
            TaskField::Status => {
                if let Some(status) = self.status_select.handle_key(key) {
                    self.draft.status = Some(status);
                    self.errors.status = None;
                }
            }
            TaskField::Submit => match key.code {
                KeyCode::Enter => return self.try_submit(),
                KeyCode::Right => self.set_focus(TaskField::Cancel, now),
                KeyCode::Up => self.set_focus(TaskField::Status, now),
                KeyCode::Down => self.set_focus(TaskField::Title, now),
                _ => {}
            },
            TaskField::Cancel => match key.code {
                KeyCode::Enter => {
                    self.reset();
                    return FormOutcome::Cancelled;
                }
                KeyCode::Left => self.set_focus(TaskField::Submit, now),
                KeyCode::Up => self.set_focus(TaskField::Status, now),
                KeyCode::Down => self.set_focus(TaskField::Title, now),
                _ => {}
            },
        }

        FormOutcome::None
    }

    fn try_submit(&mut self) -> FormOutcome {
        match self.draft.clone().into_valid() {
            Ok(valid) => {
                self.phase = FormPhase::Submitting;
                FormOutcome::Submitted(valid)
            }
            Err(errors) => {
                // Stay expanded; surface the messages, leave the draft alone.
                self.errors = errors;
                FormOutcome::None
            }
        }
    }

    fn set_focus(&mut self, field: TaskField, now: DateTime<Local>) {
        self.focused = field;
        if field == TaskField::DueDate && self.draft.due_date.is_none() {
            self.date_picker.reset(now);
        }
        if field == TaskField::Status {
            self.status_select.reset_cursor();
        }
    }

    fn edit_title(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('k') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.draft.title.clear();
                self.errors.title = None;
            }
            KeyCode::Char(ch)
                if !key.modifiers.contains(KeyModifiers::CONTROL)
                    && !key.modifiers.contains(KeyModifiers::ALT) =>
            {
                if self.draft.title.chars().count() < TITLE_MAX {
                    self.draft.title.push(ch);
                }
                self.errors.title = None;
            }
            KeyCode::Backspace => {
                self.draft.title.pop();
                self.errors.title = None;
            }
            _ => {}
        }
    }

    fn edit_description(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('k') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.draft.description.clear();
                self.errors.description = None;
            }
            KeyCode::Char(ch)
                if !key.modifiers.contains(KeyModifiers::CONTROL)
                    && !key.modifiers.contains(KeyModifiers::ALT) =>
            {
                if self.draft.description.chars().count() < DESCRIPTION_MAX {
                    self.draft.description.push(ch);
                }
                self.errors.description = None;
            }
            KeyCode::Enter => {
                if self.draft.description.chars().count() < DESCRIPTION_MAX {
                    self.draft.description.push('\n');
                }
                self.errors.description = None;
            }
            KeyCode::Backspace => {
                self.draft.description.pop();
                self.errors.description = None;
            }
            _ => {}
        }
    }
}

/// Render the entry form pane. Popups (date picker, tag picker, status
/// dropdown) are drawn on top by the caller so they can overlap the list.
pub fn render(frame: &mut Frame, area: Rect, form: &TaskForm, insert_mode: bool) {
    if !form.expanded() {
        render_title_field(frame, area, form, insert_mode);
        return;
    }

    let [title_area, description_area, due_area, tags_area, status_area, buttons_area] =
        Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .areas(area);

    render_title_field(frame, title_area, form, insert_mode);
    render_description_field(frame, description_area, form, insert_mode);

    let due_label = form
        .draft
        .due_date
        .map(|slot| slot.format(taskpad::record::DUE_DATE_FORMAT).to_string());
    render_value_field(
        frame,
        due_area,
        "Due Date",
        due_label.as_deref(),
        form.errors.due_date.as_deref(),
        insert_mode && form.focused == TaskField::DueDate,
    );

    let tags_label = if form.draft.tags.is_empty() {
        None
    } else {
        Some(form.draft.tags.join(", "))
    };
    render_value_field(
        frame,
        tags_area,
        "Tags",
        tags_label.as_deref(),
        None,
        insert_mode && form.focused == TaskField::Tags,
    );

    let status_label = form.draft.status.map(|status| status.as_str().to_string());
    render_value_field(
        frame,
        status_area,
        "Set Status",
        status_label.as_deref(),
        form.errors.status.as_deref(),
        insert_mode && form.focused == TaskField::Status,
    );

    render_buttons(frame, buttons_area, form, insert_mode);
}

fn field_border(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn render_title_field(frame: &mut Frame, area: Rect, form: &TaskForm, insert_mode: bool) {
    let focused = insert_mode && form.focused == TaskField::Title;
    let count = form.draft.title.chars().count();

    let mut block = Block::default()
        .title(" Title ")
        .borders(Borders::ALL)
        .border_style(field_border(focused))
        .title_bottom(
            Line::from(format!(" {count}/{TITLE_MAX} ")).right_aligned(),
        );
    if let Some(message) = form.errors.title.as_deref() {
        block = block.title_bottom(Line::from(Span::styled(
            format!(" {message} "),
            Style::default().fg(Color::Red),
        )));
    }
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let line = if form.draft.title.is_empty() && !focused {
        let placeholder = if form.expanded() {
            "Title"
        } else {
            "Title  (press i to add a task)"
        };
        Line::from(Span::styled(
            placeholder,
            Style::default().add_modifier(Modifier::DIM),
        ))
    } else {
        input_line(&form.draft.title, inner.width, focused)
    };
    frame.render_widget(Paragraph::new(line), inner);
}

fn render_description_field(frame: &mut Frame, area: Rect, form: &TaskForm, insert_mode: bool) {
    let focused = insert_mode && form.focused == TaskField::Description;
    let count = form.draft.description.chars().count();

    let mut block = Block::default()
        .title(" Description ")
        .borders(Borders::ALL)
        .border_style(field_border(focused))
        .title_bottom(
            Line::from(format!(" {count}/{DESCRIPTION_MAX} ")).right_aligned(),
        );
    if let Some(message) = form.errors.description.as_deref() {
        block = block.title_bottom(Line::from(Span::styled(
            format!(" {message} "),
            Style::default().fg(Color::Red),
        )));
    }
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = form
        .draft
        .description
        .split('\n')
        .map(|part| Line::from(part.to_string()))
        .collect();
    if focused {
        match lines.last_mut() {
            Some(last) => last.push_span(Span::styled("█", Style::default().fg(Color::Yellow))),
            None => lines.push(Line::from("█")),
        }
    } else if form.draft.description.is_empty() {
        lines = vec![Line::from(Span::styled(
            "Description",
            Style::default().add_modifier(Modifier::DIM),
        ))];
    }
    // Keep the cursor line visible when the text outgrows the box.
    let visible = inner.height as usize;
    let skip = lines.len().saturating_sub(visible);
    frame.render_widget(Paragraph::new(lines.split_off(skip)), inner);
}

fn render_value_field(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    value: Option<&str>,
    error: Option<&str>,
    focused: bool,
) {
    let mut block = Block::default()
        .title(format!(" {label} "))
        .borders(Borders::ALL)
        .border_style(field_border(focused));
    if let Some(message) = error {
        block = block.title_bottom(Line::from(Span::styled(
            format!(" {message} "),
            Style::default().fg(Color::Red),
        )));
    }
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let line = match value {
        Some(value) => Line::from(value.to_string()),
        None => Line::from(Span::styled(
            label.to_string(),
            Style::default().add_modifier(Modifier::DIM),
        )),
    };
    frame.render_widget(Paragraph::new(line), inner);
}

fn render_buttons(frame: &mut Frame, area: Rect, form: &TaskForm, insert_mode: bool) {
    let submit_focused = insert_mode && form.focused == TaskField::Submit;
    let cancel_focused = insert_mode && form.focused == TaskField::Cancel;

    let button = |label: &str, focused: bool| {
        if focused {
            Span::styled(
                format!("[ {label} ]"),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED),
            )
        } else {
            Span::styled(format!("[ {label} ]"), Style::default().fg(Color::Cyan))
        }
    };

    let line = Line::from(vec![
        button("Add Task", submit_focused),
        Span::raw("  "),
        button("Cancel", cancel_focused),
    ]);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(field_border(submit_focused || cancel_focused));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(Paragraph::new(line), inner);
}

fn input_line(value: &str, width: u16, focused: bool) -> Line<'static> {
    let avail = width.saturating_sub(1);
    let tail = visible_tail(value, avail);
    let mut spans = vec![Span::raw(tail.to_string())];
    if focused {
        spans.push(Span::styled("█", Style::default().fg(Color::Yellow)));
    }
    Line::from(spans)
}

/// The longest suffix of `value` that fits in `max_width` terminal cells, so
/// the cursor end of a long input stays on screen.
fn visible_tail(value: &str, max_width: u16) -> &str {
    let max = max_width as usize;
    if value.width() <= max {
        return value;
    }
    let mut width = 0;
    let mut start = value.len();
    for (idx, ch) in value.char_indices().rev() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if width + ch_width > max {
            break;
        }
        width += ch_width;
        start = idx;
    }
    &value[start..]
}
