pub mod event;
pub mod state;

use std::time::Duration;

use anyhow::Result;
use ratatui::DefaultTerminal;
use ratatui::crossterm::event::{
    self as crossterm_event, Event as CrosstermEvent, KeyCode, KeyEventKind, KeyModifiers,
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::app::event::AppEvent;
use crate::app::state::{AppMode, AppState};
use crate::ui;

const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(200);

pub struct App {
    pub state: AppState,
    event_tx: mpsc::UnboundedSender<AppEvent>,
    event_rx: mpsc::UnboundedReceiver<AppEvent>,
    input_shutdown: CancellationToken,
    should_exit: bool,
}

impl App {
    pub fn new(state: AppState) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        Self {
            state,
            event_tx,
            event_rx,
            input_shutdown: CancellationToken::new(),
            should_exit: false,
        }
    }

    pub async fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        let event_tx = self.event_tx.clone();
        let shutdown = self.input_shutdown.clone();

        tokio::task::spawn_blocking(move || {
            while !shutdown.is_cancelled() {
                if !crossterm_event::poll(INPUT_POLL_INTERVAL).unwrap_or(false) {
                    continue;
                }
                match crossterm_event::read() {
                    Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                        if event_tx.send(AppEvent::Key(key)).is_err() {
                            break;
                        }
                    }
                    Ok(CrosstermEvent::Resize(width, height)) => {
                        if event_tx.send(AppEvent::Resize(width, height)).is_err() {
                            break;
                        }
                    }
                    Ok(_) => {}
                    Err(err) => {
                        warn!(error = %err, "input reader failed");
                        let _ = event_tx.send(AppEvent::Shutdown);
                        break;
                    }
                }
            }
        });

        let mut tick =
            tokio::time::interval(Duration::from_millis(self.state.config.tick_ms.max(50)));

        while !self.should_exit {
            tokio::select! {
                _ = tick.tick() => {
                    self.handle_event(AppEvent::Tick).await?;
                }
                maybe_event = self.event_rx.recv() => {
                    if let Some(event) = maybe_event {
                        self.handle_event(event).await?;
                    }
                }
            }

            terminal.draw(|frame| ui::render(frame, &mut self.state))?;
        }

        self.input_shutdown.cancel();
        Ok(())
    }

    async fn handle_event(&mut self, event: AppEvent) -> Result<()> {
        match event {
            AppEvent::Tick => self.state.update_tick(),
            // A redraw follows every event; nothing else to do here.
            AppEvent::Resize(_, _) => {}
            AppEvent::Shutdown => self.should_exit = true,
            AppEvent::Key(key) => {
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    self.should_exit = true;
                    return Ok(());
                }
                if self.state.show_help {
                    if matches!(
                        key.code,
                        KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') | KeyCode::F(1)
                    ) {
                        self.state.show_help = false;
                    }
                    return Ok(());
                }
                match self.state.mode {
                    AppMode::Normal => self.handle_normal_key(key.code),
                    AppMode::Insert => self.state.handle_form_key(key).await?,
                }
            }
        }
        Ok(())
    }

    fn handle_normal_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') => self.should_exit = true,
            // Title activation: any of these focus the entry form.
            KeyCode::Char('i') | KeyCode::Char('n') | KeyCode::Enter => self.state.open_form(),
            KeyCode::Char('j') | KeyCode::Down => self.state.move_selection(1),
            KeyCode::Char('k') | KeyCode::Up => self.state.move_selection(-1),
            KeyCode::Char('?') | KeyCode::F(1) => self.state.show_help = true,
            _ => {}
        }
    }
}
