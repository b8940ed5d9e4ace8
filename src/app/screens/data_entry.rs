//! Data entry screen implementation
//!
//! Records a pull from values read elsewhere: each slot gets an optional
//! color and a typed streak count, submitted as-is without applying the
//! streak rule.

use crate::app::screens::pull_color_style;
use crate::models::{Color as PullColor, SlotId};
use crate::SLOT_COUNT;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};
use std::collections::BTreeMap;

const MAX_COUNT_DIGITS: usize = 6;

/// Result of a key press on the data entry screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataEntryAction {
    Submit,
    Cancel,
}

/// Data entry screen component
#[derive(Debug)]
pub struct DataEntryScreen {
    colors: [Option<PullColor>; SLOT_COUNT],
    counts: [String; SLOT_COUNT],
    selected_index: usize,
    list_state: ListState,
}

impl DataEntryScreen {
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            colors: [None; SLOT_COUNT],
            counts: Default::default(),
            selected_index: 0,
            list_state,
        }
    }

    /// Clear all fields for a fresh entry
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Colors for every slot, unset slots mapped to `None`
    pub fn colors(&self) -> BTreeMap<SlotId, Option<PullColor>> {
        SlotId::ALL
            .iter()
            .map(|slot| (*slot, self.colors[slot.index()]))
            .collect()
    }

    /// Counts for the slots where one was typed
    pub fn counts(&self) -> BTreeMap<SlotId, u32> {
        SlotId::ALL
            .iter()
            .filter_map(|slot| {
                self.counts[slot.index()]
                    .parse::<u32>()
                    .ok()
                    .map(|count| (*slot, count))
            })
            .collect()
    }

    /// True when at least one slot has a color
    pub fn has_entries(&self) -> bool {
        self.colors.iter().any(Option::is_some)
    }

    fn focus(&mut self, index: usize) {
        self.selected_index = index % SLOT_COUNT;
        self.list_state.select(Some(self.selected_index));
    }

    fn cycle(&mut self, forward: bool) {
        let current = &mut self.colors[self.selected_index];
        *current = match (*current, forward) {
            (None, true) => Some(PullColor::White),
            (None, false) => Some(PullColor::Gold),
            (Some(PullColor::Gold), true) => None,
            (Some(PullColor::White), false) => None,
            (Some(color), true) => Some(color.next()),
            (Some(color), false) => Some(color.previous()),
        };
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) -> Option<DataEntryAction> {
        let index = self.selected_index;
        match key.code {
            KeyCode::Up => self.focus(index + SLOT_COUNT - 1),
            KeyCode::Down | KeyCode::Tab => self.focus(index + 1),
            KeyCode::Left => self.cycle(false),
            KeyCode::Right => self.cycle(true),
            KeyCode::Char('w') | KeyCode::Char('W') => self.colors[index] = Some(PullColor::White),
            KeyCode::Char('p') | KeyCode::Char('P') => self.colors[index] = Some(PullColor::Purple),
            KeyCode::Char('g') | KeyCode::Char('G') => self.colors[index] = Some(PullColor::Gold),
            KeyCode::Char('n') | KeyCode::Delete => {
                self.colors[index] = None;
                self.counts[index].clear();
            }
            KeyCode::Char(c) if c.is_ascii_digit() => {
                if self.counts[index].len() < MAX_COUNT_DIGITS {
                    self.counts[index].push(c);
                }
            }
            KeyCode::Backspace => {
                self.counts[index].pop();
            }
            KeyCode::Enter => return Some(DataEntryAction::Submit),
            KeyCode::Esc => return Some(DataEntryAction::Cancel),
            _ => {}
        }
        None
    }

    /// Render the data entry screen
    pub fn render(&mut self, f: &mut Frame) {
        let size = f.size();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(SLOT_COUNT as u16 + 2),
                Constraint::Min(3),
            ])
            .split(size);

        let title = Paragraph::new("Enter Pull Data")
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, chunks[0]);

        self.render_fields(f, chunks[1]);
        self.render_help(f, chunks[2]);
    }

    fn render_fields(&mut self, f: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = SlotId::ALL
            .iter()
            .map(|slot| {
                let color_span = match self.colors[slot.index()] {
                    Some(color) => Span::styled(format!("{:<8}", color.name()), pull_color_style(color)),
                    None => Span::styled(format!("{:<8}", "-"), Style::default().fg(Color::DarkGray)),
                };
                let count = &self.counts[slot.index()];
                let count_text = if count.is_empty() { "_" } else { count.as_str() };
                ListItem::new(Line::from(vec![
                    Span::raw(format!("{:<7}", slot.name())),
                    color_span,
                    Span::raw(format!("  Count: {}", count_text)),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Slots"))
            .highlight_style(Style::default().add_modifier(Modifier::BOLD))
            .highlight_symbol(">> ");

        f.render_stateful_widget(list, area, &mut self.list_state);
    }

    fn render_help(&self, f: &mut Frame, area: Rect) {
        let help = Paragraph::new(vec![
            Line::from("↑↓: Slot  ←→/W/P/G: Color  N: Clear slot  0-9/Bksp: Count"),
            Line::from("Enter: Record pull  Esc: Cancel"),
        ])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        );
        f.render_widget(help, area);
    }
}

impl Default for DataEntryScreen {
    fn default() -> Self {
        Self::new()
    }
}
