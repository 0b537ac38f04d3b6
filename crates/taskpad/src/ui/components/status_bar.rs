use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::state::{AppMode, AppState};
use crate::ui::components::task_form::FormPhase;

/// Render the status bar at the top of the screen
pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(Color::Blue));

    let mode_str = match state.mode {
        AppMode::Normal => "NORMAL",
        AppMode::Insert => "INSERT",
    };
    let phase_str = match state.form.phase() {
        FormPhase::Collapsed => "collapsed",
        FormPhase::Expanded => "expanded",
        FormPhase::Submitting => "submitting",
    };

    let title_spans = vec![
        Span::styled(
            "Taskpad",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" | "),
        Span::styled(format!("Mode: {mode_str}"), Style::default().fg(Color::Yellow)),
        Span::raw(" | "),
        Span::styled(format!("Form: {phase_str}"), Style::default().fg(Color::Green)),
    ];

    let mut lines = vec![Line::from(title_spans)];

    // The one-shot notice outranks the ordinary status message.
    if let Some((ref notice, _)) = state.notice {
        lines.push(Line::from(Span::styled(
            notice.clone(),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )));
    } else if let Some(ref message) = state.status_message {
        lines.push(Line::from(vec![
            Span::styled("Status: ", Style::default().fg(Color::Blue)),
            Span::styled(message.clone(), Style::default().fg(Color::Yellow)),
        ]));
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Left);

    frame.render_widget(paragraph, area);
}
