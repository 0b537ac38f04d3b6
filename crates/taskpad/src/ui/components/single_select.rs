/// **Input**: Option list plus keyboard events for navigation/confirmation.
/// **Output**: Committed value on Enter and dropdown rendering via ratatui.
/// **Position**: Reusable TUI component for single-choice selection.
use std::fmt::Display;

use ratatui::Frame;
use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState};

#[derive(Debug, Clone)]
pub struct SingleSelect<T> {
    options: Vec<T>,
    cursor: usize,
    committed: Option<usize>,
}

impl<T> SingleSelect<T>
where
    T: Clone + Display + PartialEq,
{
    pub fn new(options: Vec<T>) -> Self {
        Self {
            options,
            cursor: 0,
            committed: None,
        }
    }

    pub fn with_committed(options: Vec<T>, value: &T) -> Self {
        let mut select = Self::new(options);
        select.commit_value(value);
        select
    }

    #[cfg(test)]
    pub fn cursor_index(&self) -> usize {
        self.cursor
    }

    #[cfg(test)]
    pub fn committed(&self) -> Option<&T> {
        self.committed.and_then(|index| self.options.get(index))
    }

    pub fn commit_value(&mut self, value: &T) {
        if let Some(index) = self.options.iter().position(|option| option == value) {
            self.cursor = index;
            self.committed = Some(index);
        }
    }

    pub fn reset_cursor(&mut self) {
        self.cursor = self.committed.unwrap_or(0);
    }

    /// Moves the cursor on Up/Down (wrapping) and commits on Enter.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<T> {
        if self.options.is_empty() {
            return None;
        }
        match key.code {
            KeyCode::Up => {
                self.cursor = if self.cursor == 0 {
                    self.options.len() - 1
                } else {
                    self.cursor - 1
                };
                None
            }
            KeyCode::Down => {
                self.cursor = (self.cursor + 1) % self.options.len();
                None
            }
            KeyCode::Enter => {
                self.committed = Some(self.cursor);
                self.options.get(self.cursor).cloned()
            }
            _ => None,
        }
    }

    /// Draws the dropdown list as a popup over `area`.
    pub fn render_dropdown(&self, frame: &mut Frame, area: Rect, title: &str) {
        frame.render_widget(Clear, area);

        let items: Vec<ListItem> = self
            .options
            .iter()
            .map(|option| ListItem::new(Line::from(option.to_string())))
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .title(title.to_string())
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");

        let mut state = ListState::default();
        state.select(Some(self.cursor));
        frame.render_stateful_widget(list, area, &mut state);
    }
}
