//! Main application controller
//!
//! Owns the tracker and the screens, turns key presses into tracker
//! operations and reports their outcome on the status line.

use crate::{
    app::{
        screens::{
            ConfirmResetScreen, DataEntryAction, DataEntryScreen, HistoryScreen, StatusMessage,
            TrackerCommand, TrackerScreen,
        },
        state::{AppState, NavigationAction, StateManager},
        tui::Tui,
    },
    config::TrackerConfig,
    error,
    tracker::{PullReceipt, PullTracker, SaveStatus},
    Result, SlotCountError,
};
use crossterm::event::KeyEvent;
use log::info;

/// TUI application controller
pub struct App {
    /// Terminal, present once `init` has run
    tui: Option<Tui>,
    /// Application state manager
    state_manager: StateManager,
    config: TrackerConfig,
    tracker: PullTracker,
    /// Screen components
    tracker_screen: TrackerScreen,
    history_screen: HistoryScreen,
    data_entry_screen: DataEntryScreen,
    confirm_screen: ConfirmResetScreen,
}

impl App {
    /// Create the application and load the pull history
    pub fn new(config: TrackerConfig) -> Self {
        let tracker = PullTracker::new(&config);
        Self {
            tui: None,
            state_manager: StateManager::new(),
            config,
            tracker,
            tracker_screen: TrackerScreen::new(),
            history_screen: HistoryScreen::default(),
            data_entry_screen: DataEntryScreen::new(),
            confirm_screen: ConfirmResetScreen::new(),
        }
    }

    /// Take over the terminal
    pub fn init(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.init()
            .map_err(|e| SlotCountError::TuiError(format!("Failed to initialize terminal: {}", e)))?;
        self.tui = Some(tui);
        info!("Tracker started with {} recorded pulls", self.tracker.total_pulls());
        Ok(())
    }

    /// Run the main application loop
    pub fn run(&mut self) -> Result<()> {
        while !self.state_manager.should_quit() {
            self.draw()?;
            let key = match self.tui.as_mut() {
                Some(tui) => tui.next_key()?,
                None => {
                    return Err(SlotCountError::TuiError(
                        "Terminal not initialized".to_string(),
                    ))
                }
            };
            if let Some(key) = key {
                self.handle_key(key);
            }
        }

        if let Some(tui) = self.tui.as_mut() {
            tui.restore()?;
        }
        Ok(())
    }

    pub fn tracker(&self) -> &PullTracker {
        &self.tracker
    }

    pub fn state_manager(&self) -> &StateManager {
        &self.state_manager
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.tracker_screen.status()
    }

    /// Draw the current screen
    fn draw(&mut self) -> Result<()> {
        let Some(tui) = self.tui.as_mut() else {
            return Ok(());
        };
        let tracker = &self.tracker;
        let tracker_screen = &mut self.tracker_screen;
        let history_screen = &mut self.history_screen;
        let data_entry_screen = &mut self.data_entry_screen;
        let confirm_screen = &self.confirm_screen;
        let state = self.state_manager.current_state().clone();

        tui.draw(|f| match state {
            AppState::Tracker => tracker_screen.render(f, tracker),
            AppState::History => history_screen.render(f),
            AppState::DataEntry => data_entry_screen.render(f),
            AppState::ConfirmReset => {
                tracker_screen.render(f, tracker);
                confirm_screen.render(f);
            }
        })?;
        Ok(())
    }

    /// Dispatch one key press to the active screen
    pub fn handle_key(&mut self, key: KeyEvent) {
        if StateManager::key_to_navigation(key) == NavigationAction::Quit {
            self.state_manager.quit();
            return;
        }

        match self.state_manager.current_state().clone() {
            AppState::Tracker => {
                let selections = self.tracker.selection_snapshot();
                if let Some(command) = self.tracker_screen.handle_key_event(key, &selections) {
                    self.apply_command(command);
                }
            }
            AppState::History => self.handle_history_key(key),
            AppState::DataEntry => self.handle_data_entry_key(key),
            AppState::ConfirmReset => self.handle_confirm_key(key),
        }
    }

    fn apply_command(&mut self, command: TrackerCommand) {
        match command {
            TrackerCommand::Select(slot, color) => self.tracker.select_color(slot, color),
            TrackerCommand::Confirm => match self.tracker.confirm_pull() {
                Ok(receipt) => self.report_pull(receipt, "Pull confirmed!"),
                Err(e) => {
                    let text = error::user_friendly_message(&e);
                    let status = if error::is_user_input_error(&e) {
                        StatusMessage::warning(text)
                    } else {
                        StatusMessage::error(text)
                    };
                    self.tracker_screen.set_status(status);
                }
            },
            TrackerCommand::Back => {
                self.tracker.back_click();
                self.tracker_screen.set_status(StatusMessage::info("Selection cleared"));
            }
            TrackerCommand::ResetSession => {
                let counted = self.tracker.reset_session();
                let text = if counted {
                    format!("Session {} closed", self.tracker.session_count())
                } else {
                    "Session reset (no pulls, not counted)".to_string()
                };
                self.tracker_screen.set_status(StatusMessage::info(text));
            }
            TrackerCommand::ResetAll => {
                self.confirm_screen.prepare(self.tracker.total_pulls());
                self.state_manager.transition_to(AppState::ConfirmReset);
            }
            TrackerCommand::OpenHistory => {
                self.history_screen
                    .set_records(self.tracker.pull_history(), self.config.history_display_limit);
                self.state_manager.transition_to(AppState::History);
            }
            TrackerCommand::OpenDataEntry => {
                self.data_entry_screen.reset();
                self.state_manager.transition_to(AppState::DataEntry);
            }
            TrackerCommand::Quit => self.state_manager.quit(),
        }
    }

    fn report_pull(&mut self, receipt: PullReceipt, success: &str) {
        let status = match receipt.save {
            SaveStatus::Saved => {
                StatusMessage::info(format!("{} (#{})", success, receipt.pull_number))
            }
            SaveStatus::Failed(e) => StatusMessage::error(format!(
                "Pull #{} recorded but not saved: {}",
                receipt.pull_number,
                error::user_friendly_message(&e)
            )),
        };
        self.tracker_screen.set_status(status);
    }

    fn handle_history_key(&mut self, key: KeyEvent) {
        match StateManager::key_to_navigation(key) {
            NavigationAction::Up => self.history_screen.select_previous(),
            NavigationAction::Down => self.history_screen.select_next(),
            NavigationAction::Back | NavigationAction::Select => self.state_manager.go_back(),
            _ => {}
        }
    }

    fn handle_data_entry_key(&mut self, key: KeyEvent) {
        match self.data_entry_screen.handle_key_event(key) {
            Some(DataEntryAction::Submit) => {
                if !self.data_entry_screen.has_entries() {
                    self.tracker_screen
                        .set_status(StatusMessage::warning("Data entry had no colors; nothing recorded"));
                } else {
                    let receipt = self.tracker.confirm_data_pull(
                        &self.data_entry_screen.colors(),
                        &self.data_entry_screen.counts(),
                    );
                    self.report_pull(receipt, "Data pull recorded!");
                }
                self.state_manager.go_back();
            }
            Some(DataEntryAction::Cancel) => self.state_manager.go_back(),
            None => {}
        }
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) {
        match self.confirm_screen.handle_key_event(key) {
            Some(true) => {
                let status = match self.tracker.reset_all() {
                    SaveStatus::Saved => StatusMessage::info("All data reset"),
                    SaveStatus::Failed(e) => StatusMessage::error(format!(
                        "Data reset but history file not updated: {}",
                        error::user_friendly_message(&e)
                    )),
                };
                self.tracker_screen.set_status(status);
                self.state_manager.go_back();
            }
            Some(false) => self.state_manager.go_back(),
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Color, InputSource, SlotId};
    use crate::app::screens::StatusKind;
    use crossterm::event::{KeyCode, KeyModifiers};
    use tempfile::TempDir;

    fn create_app(temp_dir: &TempDir) -> App {
        App::new(TrackerConfig::new().with_history_path(temp_dir.path().join("pull_history.json")))
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_keys(app: &mut App, keys: &str) {
        for c in keys.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_confirm_through_keys() {
        let temp_dir = TempDir::new().unwrap();
        let mut app = create_app(&temp_dir);

        type_keys(&mut app, "wgwpw");
        press(&mut app, KeyCode::Enter);

        let tracker = app.tracker();
        assert_eq!(tracker.total_pulls(), 1);
        assert_eq!(tracker.counter_snapshot(), [1, 0, 1, 1, 1]);
        assert_eq!(app.status().unwrap().kind, StatusKind::Info);
    }

    #[test]
    fn test_incomplete_confirm_warns() {
        let temp_dir = TempDir::new().unwrap();
        let mut app = create_app(&temp_dir);

        type_keys(&mut app, "ww");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.tracker().total_pulls(), 0);
        let status = app.status().unwrap();
        assert_eq!(status.kind, StatusKind::Warning);
        assert!(status.text.contains("all slots"));
    }

    #[test]
    fn test_reset_all_requires_confirmation() {
        let temp_dir = TempDir::new().unwrap();
        let mut app = create_app(&temp_dir);
        type_keys(&mut app, "ppppp");
        press(&mut app, KeyCode::Enter);

        type_keys(&mut app, "X");
        assert_eq!(*app.state_manager().current_state(), AppState::ConfirmReset);
        type_keys(&mut app, "n");
        assert_eq!(*app.state_manager().current_state(), AppState::Tracker);
        assert_eq!(app.tracker().total_pulls(), 1);

        type_keys(&mut app, "Xy");
        assert_eq!(app.tracker().total_pulls(), 0);
        assert_eq!(app.tracker().history_len(), 0);
    }

    #[test]
    fn test_data_entry_flow() {
        let temp_dir = TempDir::new().unwrap();
        let mut app = create_app(&temp_dir);

        type_keys(&mut app, "d");
        assert_eq!(*app.state_manager().current_state(), AppState::DataEntry);
        type_keys(&mut app, "g0");
        press(&mut app, KeyCode::Down);
        type_keys(&mut app, "w17");
        press(&mut app, KeyCode::Enter);

        assert_eq!(*app.state_manager().current_state(), AppState::Tracker);
        let history = app.tracker().pull_history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].input_source, InputSource::Data);
        assert_eq!(history[0].color(SlotId::Slot1), Some(Color::Gold));
        assert_eq!(history[0].counter(SlotId::Slot2), Some(17));
        assert_eq!(app.tracker().counter_snapshot(), [0; 5]);
    }

    #[test]
    fn test_history_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let mut app = create_app(&temp_dir);

        type_keys(&mut app, "h");
        assert_eq!(*app.state_manager().current_state(), AppState::History);
        press(&mut app, KeyCode::Esc);
        assert_eq!(*app.state_manager().current_state(), AppState::Tracker);
    }

    #[test]
    fn test_ctrl_c_quits_anywhere() {
        let temp_dir = TempDir::new().unwrap();
        let mut app = create_app(&temp_dir);
        type_keys(&mut app, "d");

        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.state_manager().should_quit());
    }
}
