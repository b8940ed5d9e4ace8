//! History screen implementation
//!
//! Scrollable list of past pulls, newest first, with the colors and counters
//! recorded for each slot.

use crate::models::{PullRecord, SlotId};
use crate::app::screens::pull_color_style;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

/// History screen component
#[derive(Debug)]
pub struct HistoryScreen {
    records: Vec<PullRecord>,
    total: usize,
    selected_index: usize,
    list_state: ListState,
}

impl HistoryScreen {
    /// Create a new history screen from records sorted newest first
    pub fn new(records: Vec<PullRecord>) -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            total: records.len(),
            records,
            selected_index: 0,
            list_state,
        }
    }

    /// Replace the list, keeping at most `limit` records
    pub fn set_records(&mut self, mut records: Vec<PullRecord>, limit: usize) {
        self.total = records.len();
        records.truncate(limit);
        self.records = records;
        self.selected_index = 0;
        self.list_state.select(Some(0));
    }

    /// Get the currently selected record
    pub fn selected_record(&self) -> Option<&PullRecord> {
        self.records.get(self.selected_index)
    }

    /// Move selection up
    pub fn select_previous(&mut self) {
        if self.records.is_empty() {
            return;
        }
        if self.selected_index > 0 {
            self.selected_index -= 1;
        } else {
            self.selected_index = self.records.len() - 1;
        }
        self.list_state.select(Some(self.selected_index));
    }

    /// Move selection down
    pub fn select_next(&mut self) {
        if self.records.is_empty() {
            return;
        }
        if self.selected_index < self.records.len() - 1 {
            self.selected_index += 1;
        } else {
            self.selected_index = 0;
        }
        self.list_state.select(Some(self.selected_index));
    }

    /// Render the history screen
    pub fn render(&mut self, f: &mut Frame) {
        let size = f.size();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
                Constraint::Length(3),
            ])
            .split(size);

        self.render_title(f, chunks[0]);
        self.render_list(f, chunks[1]);
        self.render_detail(f, chunks[2]);
        self.render_help(f, chunks[3]);
    }

    fn render_title(&self, f: &mut Frame, area: Rect) {
        let text = if self.total > self.records.len() {
            format!("Pull History ({} of {})", self.records.len(), self.total)
        } else {
            format!("Pull History ({})", self.total)
        };
        let title = Paragraph::new(text)
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn record_line(record: &PullRecord) -> Line<'static> {
        let mut spans = vec![Span::styled(
            format!(
                "#{:<5} {}  {:<5} ",
                record.pull_number,
                record.timestamp.format("%Y-%m-%d %H:%M"),
                record.input_source
            ),
            Style::default().fg(Color::Gray),
        )];
        for slot in SlotId::ALL {
            let span = match (record.color(slot), record.counter(slot)) {
                (Some(color), Some(count)) => {
                    Span::styled(format!(" {:<6} {:>3} ", color.name(), count), pull_color_style(color))
                }
                (Some(color), None) => {
                    Span::styled(format!(" {:<6}     ", color.name()), pull_color_style(color))
                }
                _ => Span::styled("   -        ".to_string(), Style::default().fg(Color::DarkGray)),
            };
            spans.push(span);
        }
        Line::from(spans)
    }

    fn render_list(&mut self, f: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = if self.records.is_empty() {
            vec![ListItem::new("No pulls recorded")]
        } else {
            self.records
                .iter()
                .map(|r| ListItem::new(Self::record_line(r)))
                .collect()
        };

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL))
            .highlight_style(Style::default().bg(Color::Cyan).fg(Color::Black))
            .highlight_symbol(">> ");

        f.render_stateful_widget(list, area, &mut self.list_state);
    }

    /// Detail line for the highlighted pull
    fn detail_text(&self) -> String {
        match self.selected_record() {
            Some(record) => {
                let golds = record.gold_count();
                format!(
                    "Pull #{} recorded {} via {}: {} gold{}",
                    record.pull_number,
                    record.timestamp.format("%Y-%m-%d %H:%M:%S"),
                    record.input_source,
                    golds,
                    if golds == 1 { "" } else { "s" }
                )
            }
            None => "Confirm a pull to start the history".to_string(),
        }
    }

    fn render_detail(&self, f: &mut Frame, area: Rect) {
        let detail = Paragraph::new(self.detail_text())
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Selected"));
        f.render_widget(detail, area);
    }

    fn render_help(&self, f: &mut Frame, area: Rect) {
        let text = Paragraph::new("↑↓: Navigate  Esc: Back")
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(text, area);
    }
}

impl Default for HistoryScreen {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
