//! Main viewer controller
//!
//! Owns the built tables, the view state and the terminal, and runs the
//! draw / key handling loop.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};
use crate::{
    app::{
        screens::{render_chart, render_grid},
        state::{Pane, ViewState},
        tui::Tui,
    },
    config::AxisSet,
    models::{Averages, TableCollection},
    util::units::TimeUnit,
    Result, SortBenchError,
};

/// Counts shown in the status line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestSummary {
    pub rows_skipped: usize,
    pub sources_failed: usize,
}

/// Terminal viewer over built and averaged tables
pub struct App {
    axes: AxisSet,
    collection: TableCollection,
    averages: Averages,
    summary: IngestSummary,
    state: ViewState,
}

impl App {
    pub fn new(
        axes: AxisSet,
        collection: TableCollection,
        averages: Averages,
        unit: TimeUnit,
        summary: IngestSummary,
    ) -> Self {
        let state = ViewState::new(axes.variations.len(), collection.sources().len(), unit);
        Self {
            axes,
            collection,
            averages,
            summary,
            state,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut ViewState {
        &mut self.state
    }

    /// Run the viewer until the user quits
    pub fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new().map_err(|e| SortBenchError::TuiError(e.to_string()))?;
        tui.init().map_err(|e| SortBenchError::TuiError(e.to_string()))?;

        while !self.state.should_quit() {
            tui.draw(|f| self.draw(f))?;
            if let Some(key) = tui.next_key()? {
                self.state.handle_key_event(key);
            }
        }

        tui.restore()?;
        Ok(())
    }

    /// Render the whole screen
    pub fn draw(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Variations
                Constraint::Length(3), // Panes
                Constraint::Min(8),    // Content
                Constraint::Length(3), // Status and help
            ])
            .split(f.size());

        self.render_variations(f, chunks[0]);
        self.render_panes(f, chunks[1]);
        self.render_content(f, chunks[2]);
        self.render_status(f, chunks[3]);
    }

    fn selected_variation(&self) -> &str {
        self.axes
            .variations
            .get(self.state.variation())
            .map(String::as_str)
            .unwrap_or("")
    }

    fn render_variations(&self, f: &mut Frame, area: Rect) {
        let titles: Vec<Line> = self.axes.variations.iter().map(|v| Line::from(v.clone())).collect();
        let tabs = Tabs::new(titles)
            .select(self.state.variation())
            .block(Block::default().title("Data Variation (←/→)").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
        f.render_widget(tabs, area);
    }

    fn render_panes(&self, f: &mut Frame, area: Rect) {
        let titles: Vec<Line> = Pane::ALL.iter().map(|p| Line::from(p.title())).collect();
        let tabs = Tabs::new(titles)
            .select(self.state.pane().index())
            .block(Block::default().title("View (Tab)").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
        f.render_widget(tabs, area);
    }

    fn render_content(&self, f: &mut Frame, area: Rect) {
        let variation = self.selected_variation();
        let unit = self.state.unit();

        match self.state.pane() {
            Pane::Sources => {
                let selected = self
                    .collection
                    .by_index(self.state.variation())
                    .nth(self.state.source());
                match selected {
                    Some((source, table)) => {
                        let title = format!(
                            "Data from {} for {} ({}/{}, ↑/↓)",
                            source,
                            variation,
                            self.state.source() + 1,
                            self.collection.sources().len()
                        );
                        render_grid(f, area, &title, &self.axes, unit, |a, s| (table.get(a, s), None));
                    }
                    None => {
                        let empty = Paragraph::new("No sources loaded")
                            .alignment(Alignment::Center)
                            .block(Block::default().title("Sources").borders(Borders::ALL));
                        f.render_widget(empty, area);
                    }
                }
            }
            Pane::Averages => {
                let title = format!("Averages for {}", variation);
                match self.averages.by_index(self.state.variation()) {
                    Some(table) => render_grid(f, area, &title, &self.axes, unit, |a, s| {
                        (table.get(a, s), Some(table.samples(a, s)))
                    }),
                    None => render_grid(f, area, &title, &self.axes, unit, |_, _| (None, None)),
                }
            }
            Pane::Chart => {
                let table = self.averages.by_index(self.state.variation());
                render_chart(f, area, variation, &self.axes, table, unit);
            }
        }
    }

    fn render_status(&self, f: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled(
                format!("{} sources", self.collection.sources().len()),
                Style::default().fg(Color::Green),
            ),
            Span::raw(" | "),
        ];
        if self.summary.rows_skipped > 0 {
            spans.push(Span::styled(
                format!("{} rows skipped", self.summary.rows_skipped),
                Style::default().fg(Color::Yellow),
            ));
            spans.push(Span::raw(" | "));
        }
        if self.summary.sources_failed > 0 {
            spans.push(Span::styled(
                format!("{} sources unreadable", self.summary.sources_failed),
                Style::default().fg(Color::Red),
            ));
            spans.push(Span::raw(" | "));
        }
        spans.push(Span::raw(format!("unit: {} (u)", self.state.unit())));
        spans.push(Span::raw(" | q: quit"));

        let status = Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(status, area);
    }
}
