//! Full reset confirmation dialog

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Asks before erasing all pulls and the history file
#[derive(Debug, Default)]
pub struct ConfirmResetScreen {
    total_pulls: u32,
}

impl ConfirmResetScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember how many pulls would be lost for the prompt
    pub fn prepare(&mut self, total_pulls: u32) {
        self.total_pulls = total_pulls;
    }

    /// `Some(true)` to reset, `Some(false)` to cancel
    pub fn handle_key_event(&self, key: KeyEvent) -> Option<bool> {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => Some(true),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc | KeyCode::Enter => Some(false),
            _ => None,
        }
    }

    pub fn render(&self, f: &mut Frame) {
        let size = f.size();
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(35),
                Constraint::Length(7),
                Constraint::Min(0),
            ])
            .split(size);
        let area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(20),
                Constraint::Percentage(60),
                Constraint::Percentage(20),
            ])
            .split(rows[1])[1];

        let text = vec![
            Line::from(format!(
                "Erase all {} pulls, session data and the history file?",
                self.total_pulls
            )),
            Line::from("This cannot be undone."),
            Line::from(""),
            Line::from("Y: Reset everything   N/Esc: Cancel"),
        ];
        let dialog = Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Reset All")
                    .border_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            );

        f.render_widget(Clear, area);
        f.render_widget(dialog, area);
    }
}
