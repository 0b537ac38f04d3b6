use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::ui::centered_rect;

/// Render the help overlay
pub fn render(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Help ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let entry = |hotkey: &str, description: &str| {
        Line::from(vec![
            Span::styled(
                format!("  {hotkey:<10}"),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(description.to_string()),
        ])
    };

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  Browsing",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        entry("i / n", "Open the entry form (reveals the full form)"),
        entry("j / k", "Move the task list selection"),
        entry("q", "Quit"),
        Line::from(""),
        Line::from(Span::styled(
            "  Entry form",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        entry("Tab", "Next field (Shift+Tab back)"),
        entry("Enter", "Pick a slot/tag/status, or press a button"),
        entry("Ctrl+K", "Clear the focused text field"),
        entry("Esc", "Cancel and clear the form"),
        Line::from(""),
        entry("? / F1", "Toggle this overlay"),
    ];

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, popup_area);
}
