//! Tracker screen implementation
//!
//! Main screen: one row per slot showing the pending color and the streak
//! counter, the session totals, and a status line for confirmations and
//! warnings.

use crate::app::screens::{cycle_color, pull_color_style, StatusMessage};
use crate::models::{Color as PullColor, SlotId};
use crate::tracker::PullTracker;
use crate::SLOT_COUNT;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

/// What the user asked the tracker to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackerCommand {
    Select(SlotId, PullColor),
    Confirm,
    Back,
    ResetSession,
    ResetAll,
    OpenHistory,
    OpenDataEntry,
    Quit,
}

/// Tracker screen component
#[derive(Debug)]
pub struct TrackerScreen {
    selected_index: usize,
    list_state: ListState,
    status: Option<StatusMessage>,
}

impl TrackerScreen {
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            selected_index: 0,
            list_state,
            status: None,
        }
    }

    /// Slot under the cursor
    pub fn selected_slot(&self) -> SlotId {
        SlotId::ALL[self.selected_index]
    }

    pub fn set_status(&mut self, status: StatusMessage) {
        self.status = Some(status);
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    fn focus(&mut self, index: usize) {
        self.selected_index = index % SLOT_COUNT;
        self.list_state.select(Some(self.selected_index));
    }

    /// Move selection up
    pub fn select_previous(&mut self) {
        self.focus(self.selected_index + SLOT_COUNT - 1);
    }

    /// Move selection down
    pub fn select_next(&mut self) {
        self.focus(self.selected_index + 1);
    }

    /// Translate a key press. Color keys also advance to the next slot.
    pub fn handle_key_event(
        &mut self,
        key: KeyEvent,
        selections: &[Option<PullColor>; SLOT_COUNT],
    ) -> Option<TrackerCommand> {
        let slot = self.selected_slot();
        let command = match key.code {
            KeyCode::Up => {
                self.select_previous();
                None
            }
            KeyCode::Down => {
                self.select_next();
                None
            }
            KeyCode::Char(c @ '1'..='5') => {
                let number = c as usize - '0' as usize;
                self.focus(number - 1);
                None
            }
            KeyCode::Left => Some(TrackerCommand::Select(
                slot,
                cycle_color(selections[slot.index()], false),
            )),
            KeyCode::Right => Some(TrackerCommand::Select(
                slot,
                cycle_color(selections[slot.index()], true),
            )),
            KeyCode::Char('w') | KeyCode::Char('W') => {
                self.select_next();
                Some(TrackerCommand::Select(slot, PullColor::White))
            }
            KeyCode::Char('p') | KeyCode::Char('P') => {
                self.select_next();
                Some(TrackerCommand::Select(slot, PullColor::Purple))
            }
            KeyCode::Char('g') | KeyCode::Char('G') => {
                self.select_next();
                Some(TrackerCommand::Select(slot, PullColor::Gold))
            }
            KeyCode::Enter => Some(TrackerCommand::Confirm),
            KeyCode::Backspace | KeyCode::Esc => Some(TrackerCommand::Back),
            KeyCode::Char('r') => Some(TrackerCommand::ResetSession),
            KeyCode::Char('X') => Some(TrackerCommand::ResetAll),
            KeyCode::Char('h') | KeyCode::Char('H') => Some(TrackerCommand::OpenHistory),
            KeyCode::Char('d') | KeyCode::Char('D') => Some(TrackerCommand::OpenDataEntry),
            KeyCode::Char('q') | KeyCode::Char('Q') => Some(TrackerCommand::Quit),
            _ => None,
        };

        if matches!(command, Some(TrackerCommand::Confirm) | Some(TrackerCommand::Back)) {
            self.focus(0);
        }
        command
    }

    /// Render the tracker screen
    pub fn render(&mut self, f: &mut Frame, tracker: &PullTracker) {
        let size = f.size();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),                     // Title
                Constraint::Length(SLOT_COUNT as u16 + 2), // Slots
                Constraint::Length(3),                     // Totals
                Constraint::Length(3),                     // Status
                Constraint::Min(3),                        // Help
            ])
            .split(size);

        self.render_title(f, chunks[0]);
        self.render_slots(f, chunks[1], tracker);
        self.render_totals(f, chunks[2], tracker);
        self.render_status(f, chunks[3]);
        self.render_help(f, chunks[4]);
    }

    fn render_title(&self, f: &mut Frame, area: Rect) {
        let title = Paragraph::new("SLOTCOUNT")
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            );
        f.render_widget(title, area);
    }

    fn slot_line(slot: SlotId, selection: Option<PullColor>, counter: u32) -> Line<'static> {
        let mut spans = vec![Span::raw(format!("{:<7}", slot.name()))];
        for color in PullColor::ALL {
            let style = if selection == Some(color) {
                pull_color_style(color).add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                pull_color_style(color).add_modifier(Modifier::DIM)
            };
            spans.push(Span::styled(format!(" {:^8} ", color.name()), style));
        }
        let counter_style = if counter == 0 {
            Style::default().fg(Color::Gray)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(format!("  Count: {}", counter), counter_style));
        Line::from(spans)
    }

    fn render_slots(&mut self, f: &mut Frame, area: Rect, tracker: &PullTracker) {
        let items: Vec<ListItem> = SlotId::ALL
            .iter()
            .map(|slot| {
                ListItem::new(Self::slot_line(
                    *slot,
                    tracker.slot_selection(*slot),
                    tracker.slot_counter(*slot),
                ))
            })
            .collect();

        let title = if tracker.are_all_slots_selected() {
            "Slots (ready to confirm)"
        } else {
            "Slots"
        };
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(title))
            .highlight_style(Style::default().add_modifier(Modifier::BOLD))
            .highlight_symbol(">> ");

        f.render_stateful_widget(list, area, &mut self.list_state);
    }

    fn render_totals(&self, f: &mut Frame, area: Rect, tracker: &PullTracker) {
        let label = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
        let stats = tracker.session_stats();
        let totals = Line::from(vec![
            Span::styled("Total ", label),
            Span::raw(format!("{}   ", stats.total_pulls)),
            Span::styled("Session ", label),
            Span::raw(format!("{}   ", stats.session_pulls)),
            Span::styled("Sessions ", label),
            Span::raw(format!("{}   ", stats.session_count)),
            Span::styled("Average ", label),
            Span::raw(format!("{:.1}", stats.average_pulls())),
        ]);
        let paragraph = Paragraph::new(totals)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_status(&self, f: &mut Frame, area: Rect) {
        let paragraph = match &self.status {
            Some(status) => Paragraph::new(status.text.as_str()).style(status.style()),
            None => Paragraph::new("Select a color for every slot, then press Enter"),
        };
        f.render_widget(
            paragraph
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL)),
            area,
        );
    }

    fn render_help(&self, f: &mut Frame, area: Rect) {
        let key = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
        let help = vec![
            Line::from(vec![
                Span::styled("↑↓/1-5", key),
                Span::raw(" Slot  "),
                Span::styled("W/P/G ←→", key),
                Span::raw(" Color  "),
                Span::styled("Enter", key),
                Span::raw(" Confirm  "),
                Span::styled("Bksp", key),
                Span::raw(" Back"),
            ]),
            Line::from(vec![
                Span::styled("r", key),
                Span::raw(" Reset session  "),
                Span::styled("X", key),
                Span::raw(" Reset all  "),
                Span::styled("h", key),
                Span::raw(" History  "),
                Span::styled("d", key),
                Span::raw(" Data entry  "),
                Span::styled("q", key),
                Span::raw(" Quit"),
            ]),
        ];
        let paragraph = Paragraph::new(help).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        );
        f.render_widget(paragraph, area);
    }
}

impl Default for TrackerScreen {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_slot_navigation_wraps() {
        let mut screen = TrackerScreen::new();
        let none = [None; SLOT_COUNT];

        screen.handle_key_event(key(KeyCode::Up), &none);
        assert_eq!(screen.selected_slot(), SlotId::Slot5);
        screen.handle_key_event(key(KeyCode::Down), &none);
        assert_eq!(screen.selected_slot(), SlotId::Slot1);
        screen.handle_key_event(key(KeyCode::Char('3')), &none);
        assert_eq!(screen.selected_slot(), SlotId::Slot3);
    }

    #[test]
    fn test_color_keys_select_and_advance() {
        let mut screen = TrackerScreen::new();
        let none = [None; SLOT_COUNT];

        let cmd = screen.handle_key_event(key(KeyCode::Char('g')), &none);
        assert_eq!(cmd, Some(TrackerCommand::Select(SlotId::Slot1, PullColor::Gold)));
        assert_eq!(screen.selected_slot(), SlotId::Slot2);
    }

    #[test]
    fn test_arrow_cycles_current_color() {
        let mut screen = TrackerScreen::new();
        let mut selections = [None; SLOT_COUNT];
        selections[0] = Some(PullColor::White);

        let cmd = screen.handle_key_event(key(KeyCode::Right), &selections);
        assert_eq!(cmd, Some(TrackerCommand::Select(SlotId::Slot1, PullColor::Purple)));
        assert_eq!(screen.selected_slot(), SlotId::Slot1);
    }

    #[test]
    fn test_confirm_returns_cursor_to_first_slot() {
        let mut screen = TrackerScreen::new();
        let none = [None; SLOT_COUNT];
        screen.handle_key_event(key(KeyCode::Char('4')), &none);

        let cmd = screen.handle_key_event(key(KeyCode::Enter), &none);
        assert_eq!(cmd, Some(TrackerCommand::Confirm));
        assert_eq!(screen.selected_slot(), SlotId::Slot1);
    }

    #[test]
    fn test_command_keys() {
        let mut screen = TrackerScreen::new();
        let none = [None; SLOT_COUNT];
        assert_eq!(screen.handle_key_event(key(KeyCode::Char('r')), &none), Some(TrackerCommand::ResetSession));
        assert_eq!(screen.handle_key_event(key(KeyCode::Char('X')), &none), Some(TrackerCommand::ResetAll));
        assert_eq!(screen.handle_key_event(key(KeyCode::Char('x')), &none), None);
        assert_eq!(screen.handle_key_event(key(KeyCode::Backspace), &none), Some(TrackerCommand::Back));
        assert_eq!(screen.handle_key_event(key(KeyCode::Char('q')), &none), Some(TrackerCommand::Quit));
    }
}
