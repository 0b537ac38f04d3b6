use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::state::{AppMode, AppState};

/// Render the menu bar at the bottom of the screen
pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let menu_items: &[(&str, &str)] = match state.mode {
        AppMode::Normal => &[
            ("i", "New task"),
            ("j/k", "Navigate"),
            ("?", "Help"),
            ("q", "Quit"),
        ],
        AppMode::Insert => &[
            ("Tab", "Next field"),
            ("Enter", "Select/Submit"),
            ("Ctrl+K", "Clear field"),
            ("Esc", "Cancel"),
        ],
    };

    let mut spans = vec![];
    for (i, (hotkey, description)) in menu_items.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" | "));
        }
        spans.push(Span::styled(
            *hotkey,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!(" {description}"),
            Style::default().fg(Color::Cyan),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}
