use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::app::state::{AppMode, AppState};
use crate::ui::components::task_form::TaskField;

pub mod components;

/// Main render function - called every frame
pub fn render(frame: &mut Frame, state: &mut AppState) {
    let area = frame.area();

    let [status_area, form_area, list_area, menu_area] = Layout::vertical([
        Constraint::Length(3),                  // Status bar
        Constraint::Length(state.form.height()), // Entry form
        Constraint::Fill(1),                    // Task list
        Constraint::Length(1),                  // Menu bar
    ])
    .areas(area);

    components::status_bar::render(frame, status_area, state);
    components::task_form::render(
        frame,
        form_area,
        &state.form,
        state.mode == AppMode::Insert,
    );
    components::task_list::render(frame, list_area, &state.records, &mut state.list_state);
    components::menu_bar::render(frame, menu_area, state);

    // Field popups sit on top of the list so they get some room.
    if state.mode == AppMode::Insert {
        let popup = popup_rect(area);
        match state.form.focused {
            TaskField::DueDate => state.form.date_picker.render(frame, popup, state.now),
            TaskField::Tags => state.form.tag_select.render(frame, popup),
            TaskField::Status => state
                .form
                .status_select
                .render_dropdown(frame, popup, " Set Status "),
            _ => {}
        }
    }

    if state.show_help {
        components::help::render(frame, area);
    }
}

/// A fixed-size popup anchored over the lower half of the screen.
fn popup_rect(area: Rect) -> Rect {
    let width = area.width.min(44);
    let height = area.height.min(8);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + area.height.saturating_sub(height + 2),
        width,
        height,
    }
}

/// Create a centered rect for popups
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
