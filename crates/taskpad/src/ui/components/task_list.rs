use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};

use taskpad::record::{TaskRecord, TaskStatus};

/// Render the task list pane. The list view only consumes the record
/// sequence and a selection state; it never mutates the records.
pub fn render(frame: &mut Frame, area: Rect, records: &[TaskRecord], state: &mut ListState) {
    let items: Vec<ListItem> = if records.is_empty() {
        vec![ListItem::new(Line::from(Span::styled(
            "No tasks yet",
            Style::default().add_modifier(Modifier::DIM),
        )))]
    } else {
        records.iter().map(row).collect()
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Tasks ({}) ", records.len())),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, state);
}

fn row(record: &TaskRecord) -> ListItem<'static> {
    let status_style = match record.status {
        TaskStatus::Open => Style::default().fg(Color::Cyan),
        TaskStatus::Working => Style::default().fg(Color::Yellow),
        TaskStatus::Done => Style::default().fg(Color::Green),
        TaskStatus::Overdue => Style::default().fg(Color::Red),
    };

    let mut spans = vec![
        Span::raw(record.title.clone()),
        Span::raw("  "),
        Span::styled(record.status.as_str(), status_style),
        Span::styled(
            format!("  due {}", record.due_date),
            Style::default().fg(Color::Gray),
        ),
    ];
    if !record.tags.is_empty() {
        spans.push(Span::styled(
            format!("  [{}]", record.tags.join(", ")),
            Style::default().fg(Color::Magenta),
        ));
    }
    ListItem::new(Line::from(spans))
}
