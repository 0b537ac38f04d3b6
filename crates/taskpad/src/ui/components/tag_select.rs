/// **Input**: Preset tag vocabulary plus keyboard events.
/// **Output**: An ordered tag sequence (duplicates allowed) and popup
/// rendering via ratatui.
/// **Position**: TUI component for multi-select free-tag input.
use ratatui::Frame;
use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

/// Multi-select over a preset vocabulary with a free-text entry buffer.
/// Chosen tags keep their entry order; picking the same tag twice adds it
/// twice.
#[derive(Debug, Clone)]
pub struct TagSelect {
    presets: Vec<String>,
    chosen: Vec<String>,
    cursor: usize,
    entry: String,
}

impl TagSelect {
    pub fn new(presets: Vec<String>) -> Self {
        Self {
            presets,
            chosen: Vec::new(),
            cursor: 0,
            entry: String::new(),
        }
    }

    pub fn chosen(&self) -> &[String] {
        &self.chosen
    }

    #[cfg(test)]
    pub fn entry(&self) -> &str {
        &self.entry
    }

    pub fn reset(&mut self) {
        self.chosen.clear();
        self.entry.clear();
        self.cursor = 0;
    }

    /// Returns true when the chosen sequence changed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Up => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                }
                false
            }
            KeyCode::Down => {
                if self.cursor + 1 < self.presets.len() {
                    self.cursor += 1;
                }
                false
            }
            KeyCode::Enter => {
                let trimmed = self.entry.trim();
                if !trimmed.is_empty() {
                    self.chosen.push(trimmed.to_string());
                    self.entry.clear();
                    true
                } else if let Some(preset) = self.presets.get(self.cursor) {
                    self.chosen.push(preset.clone());
                    true
                } else {
                    false
                }
            }
            KeyCode::Backspace => {
                if !self.entry.is_empty() {
                    self.entry.pop();
                    false
                } else {
                    self.chosen.pop().is_some()
                }
            }
            KeyCode::Char(ch) => {
                self.entry.push(ch);
                false
            }
            _ => false,
        }
    }

    /// Draws the tag picker as a popup over `area`.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Clear, area);

        let block = Block::default()
            .title(" Tags ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines = Vec::new();
        for (index, preset) in self.presets.iter().enumerate() {
            let count = self.chosen.iter().filter(|tag| *tag == preset).count();
            let label = if count > 0 {
                format!("{preset} ×{count}")
            } else {
                preset.clone()
            };
            let style = if index == self.cursor {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let marker = if index == self.cursor { "▶ " } else { "  " };
            lines.push(Line::from(vec![
                Span::raw(marker),
                Span::styled(label, style),
            ]));
        }

        lines.push(Line::from(vec![
            Span::styled("New tag: ", Style::default().fg(Color::Gray)),
            Span::raw(self.entry.clone()),
            Span::styled("█", Style::default().fg(Color::Yellow)),
        ]));
        lines.push(Line::from(Span::styled(
            "↑/↓ choose  Enter add  Backspace remove last",
            Style::default().fg(Color::Gray),
        )));

        frame.render_widget(Paragraph::new(lines), inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn presets() -> Vec<String> {
        vec![
            "Crucial".to_string(),
            "High Priority".to_string(),
            "Low Priority".to_string(),
            "Usual".to_string(),
        ]
    }

    #[test]
    fn enter_adds_the_highlighted_preset() {
        let mut select = TagSelect::new(presets());
        select.handle_key(key(KeyCode::Down));
        assert!(select.handle_key(key(KeyCode::Enter)));
        assert_eq!(select.chosen(), ["High Priority"]);
    }

    #[test]
    fn duplicates_are_allowed_and_ordered() {
        let mut select = TagSelect::new(presets());
        select.handle_key(key(KeyCode::Enter));
        select.handle_key(key(KeyCode::Enter));
        assert_eq!(select.chosen(), ["Crucial", "Crucial"]);
    }

    #[test]
    fn typed_text_becomes_a_free_tag() {
        let mut select = TagSelect::new(presets());
        for ch in "errand".chars() {
            select.handle_key(key(KeyCode::Char(ch)));
        }
        assert!(select.handle_key(key(KeyCode::Enter)));
        assert_eq!(select.chosen(), ["errand"]);
        assert!(select.entry().is_empty());
    }

    #[test]
    fn backspace_edits_entry_before_removing_tags() {
        let mut select = TagSelect::new(presets());
        select.handle_key(key(KeyCode::Enter));
        select.handle_key(key(KeyCode::Char('x')));

        // First backspace eats the entry buffer.
        assert!(!select.handle_key(key(KeyCode::Backspace)));
        assert_eq!(select.chosen().len(), 1);

        // Next backspace removes the last chosen tag.
        assert!(select.handle_key(key(KeyCode::Backspace)));
        assert!(select.chosen().is_empty());
    }

    #[test]
    fn reset_clears_everything() {
        let mut select = TagSelect::new(presets());
        select.handle_key(key(KeyCode::Enter));
        select.handle_key(key(KeyCode::Char('x')));
        select.reset();
        assert!(select.chosen().is_empty());
        assert!(select.entry().is_empty());
    }
}
