use ratatui::crossterm::event::KeyEvent;

/// All possible events that can occur in the application
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Periodic tick for UI updates
    Tick,

    /// Keyboard input from user
    Key(KeyEvent),

    /// Terminal resize event (width, height)
    Resize(u16, u16),

    /// The input reader died; shut the application down
    Shutdown,
}
