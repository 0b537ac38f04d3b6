/// **Input**: Wall-clock time plus keyboard events for slot navigation.
/// **Output**: A selected due date, never at or before the end of the
/// current hour.
/// **Position**: TUI component for due-date selection in the entry form.
use chrono::{DateTime, Datelike, Days, Duration, DurationRound, Local, Timelike};
use ratatui::Frame;
use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

/// First instant a due date may fall on: the start of the hour after the
/// current one. Everything at or before the end of the current hour is
/// refused by the picker, not reported as a validation error.
pub fn min_selectable(now: DateTime<Local>) -> DateTime<Local> {
    match now.duration_trunc(Duration::hours(1)) {
        Ok(hour_start) => hour_start + Duration::hours(1),
        // Rounding only fails on dates far outside any plausible clock.
        Err(_) => now,
    }
}

pub fn is_selectable(candidate: DateTime<Local>, now: DateTime<Local>) -> bool {
    candidate >= min_selectable(now)
}

/// Slot-based date-time picker: a day offset from today plus an hour of day.
#[derive(Debug, Clone)]
pub struct DueDatePicker {
    horizon_days: u16,
    day_cursor: u16,
    hour_cursor: u8,
}

impl DueDatePicker {
    pub fn new(horizon_days: u16) -> Self {
        Self {
            horizon_days: horizon_days.max(1),
            day_cursor: 0,
            hour_cursor: 0,
        }
    }

    /// Positions the cursors on the earliest selectable slot.
    pub fn reset(&mut self, now: DateTime<Local>) {
        let earliest = min_selectable(now);
        let offset = earliest
            .date_naive()
            .signed_duration_since(now.date_naive())
            .num_days();
        self.day_cursor = offset.clamp(0, i64::from(self.horizon_days)) as u16;
        self.hour_cursor = earliest.hour() as u8;
    }

    /// The slot currently under the cursor. None when the local timezone has
    /// no such instant (DST gap) or the date overflows the calendar.
    pub fn cursor_slot(&self, now: DateTime<Local>) -> Option<DateTime<Local>> {
        let date = now
            .date_naive()
            .checked_add_days(Days::new(u64::from(self.day_cursor)))?;
        date.and_hms_opt(u32::from(self.hour_cursor), 0, 0)?
            .and_local_timezone(Local)
            .single()
    }

    /// Left/Right move the day, Up/Down move the hour, Enter selects. A
    /// refused slot returns None and leaves the cursor where it is.
    pub fn handle_key(&mut self, key: KeyEvent, now: DateTime<Local>) -> Option<DateTime<Local>> {
        match key.code {
            KeyCode::Left => {
                self.day_cursor = self.day_cursor.saturating_sub(1);
                None
            }
            KeyCode::Right => {
                if self.day_cursor < self.horizon_days {
                    self.day_cursor += 1;
                }
                None
            }
            KeyCode::Up => {
                self.hour_cursor = if self.hour_cursor == 0 {
                    23
                } else {
                    self.hour_cursor - 1
                };
                None
            }
            KeyCode::Down => {
                self.hour_cursor = (self.hour_cursor + 1) % 24;
                None
            }
            KeyCode::Enter => {
                let slot = self.cursor_slot(now)?;
                is_selectable(slot, now).then_some(slot)
            }
            _ => None,
        }
    }

    /// Draws the picker as a popup over `area`.
    pub fn render(&self, frame: &mut Frame, area: Rect, now: DateTime<Local>) {
        frame.render_widget(Clear, area);

        let block = Block::default()
            .title(" Due Date ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let day_label = match self.cursor_slot(now) {
            Some(slot) => format!("◀ {} {} ▶", slot.weekday(), slot.format("%Y-%m-%d")),
            None => "◀ (unavailable) ▶".to_string(),
        };

        let mut lines = vec![Line::from(Span::styled(
            day_label,
            Style::default().add_modifier(Modifier::BOLD),
        ))];

        // Hour grid, two rows of twelve. Slots before the cutoff are dimmed.
        for row in 0..2u8 {
            let mut spans = Vec::new();
            for col in 0..12u8 {
                let hour = row * 12 + col;
                let slot = self.slot_at(hour, now);
                let selectable = slot.is_some_and(|slot| is_selectable(slot, now));
                let style = if hour == self.hour_cursor {
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else if selectable {
                    Style::default()
                } else {
                    Style::default().add_modifier(Modifier::DIM)
                };
                spans.push(Span::styled(format!("{hour:02} "), style));
            }
            lines.push(Line::from(spans));
        }

        lines.push(Line::from(Span::styled(
            "←/→ day  ↑/↓ hour  Enter select",
            Style::default().fg(Color::Gray),
        )));

        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn slot_at(&self, hour: u8, now: DateTime<Local>) -> Option<DateTime<Local>> {
        let date = now
            .date_naive()
            .checked_add_days(Days::new(u64::from(self.day_cursor)))?;
        date.and_hms_opt(u32::from(hour), 0, 0)?
            .and_local_timezone(Local)
            .single()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use ratatui::crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn at(h: u32, m: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 8, 8, h, m, 0).single().unwrap()
    }

    #[test]
    fn cutoff_is_the_start_of_the_next_hour() {
        assert_eq!(min_selectable(at(14, 25)), at(15, 0));
        assert_eq!(min_selectable(at(14, 0)), at(15, 0));
    }

    #[test]
    fn end_of_current_hour_is_unselectable() {
        let now = at(14, 25);
        assert!(!is_selectable(at(14, 59), now));
        assert!(!is_selectable(now, now));
    }

    #[test]
    fn one_minute_past_the_boundary_is_selectable() {
        let now = at(14, 25);
        assert!(is_selectable(at(15, 0), now));
        assert!(is_selectable(
            Local.with_ymd_and_hms(2026, 8, 8, 15, 1, 0).single().unwrap(),
            now
        ));
    }

    #[test]
    fn reset_lands_on_the_earliest_selectable_slot() {
        let mut picker = DueDatePicker::new(14);
        let now = at(14, 25);
        picker.reset(now);
        assert_eq!(picker.cursor_slot(now), Some(at(15, 0)));
    }

    #[test]
    fn reset_rolls_over_to_tomorrow_late_in_the_day() {
        let mut picker = DueDatePicker::new(14);
        let now = at(23, 30);
        picker.reset(now);
        let slot = picker.cursor_slot(now).unwrap();
        assert_eq!(
            slot,
            Local.with_ymd_and_hms(2026, 8, 9, 0, 0, 0).single().unwrap()
        );
    }

    #[test]
    fn enter_refuses_a_past_slot() {
        let mut picker = DueDatePicker::new(14);
        let now = at(14, 25);
        picker.reset(now);

        // Walk back to a disabled slot on the same day.
        picker.handle_key(key(KeyCode::Up), now);
        assert_eq!(picker.handle_key(key(KeyCode::Enter), now), None);
    }

    #[test]
    fn enter_selects_a_future_slot() {
        let mut picker = DueDatePicker::new(14);
        let now = at(14, 25);
        picker.reset(now);

        picker.handle_key(key(KeyCode::Right), now);
        let selected = picker.handle_key(key(KeyCode::Enter), now);
        assert_eq!(
            selected,
            Local.with_ymd_and_hms(2026, 8, 9, 15, 0, 0).single()
        );
    }

    #[test]
    fn day_cursor_respects_the_horizon() {
        let mut picker = DueDatePicker::new(2);
        let now = at(10, 0);
        for _ in 0..5 {
            picker.handle_key(key(KeyCode::Right), now);
        }
        let slot = picker.cursor_slot(now).unwrap();
        assert_eq!(slot.date_naive(), now.date_naive() + Days::new(2));

        for _ in 0..5 {
            picker.handle_key(key(KeyCode::Left), now);
        }
        let slot = picker.cursor_slot(now).unwrap();
        assert_eq!(slot.date_naive(), now.date_naive());
    }
}
