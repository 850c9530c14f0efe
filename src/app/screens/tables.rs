//! Table panes
//!
//! Renders a source table or the average table of the selected variation
//! as an algorithm × size grid.

use ratatui::{
    layout::{Alignment, Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};
use crate::config::AxisSet;
use crate::util::units::{format_cell, TimeUnit};

/// Render one grid. `cell(a, s)` yields the canonical value and, for
/// average tables, the number of contributing sources.
pub fn render_grid<F>(
    f: &mut Frame,
    area: Rect,
    title: &str,
    axes: &AxisSet,
    unit: TimeUnit,
    cell: F,
) where
    F: Fn(usize, usize) -> (Option<f64>, Option<usize>),
{
    let block = Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let has_data = (0..axes.algorithm_count())
        .any(|a| (0..axes.size_count()).any(|s| cell(a, s).0.is_some()));
    if !has_data {
        let empty = Paragraph::new("No data")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let header = Row::new(
        std::iter::once(Cell::from(format!("[{}]", unit.abbreviation())))
            .chain(axes.sizes.iter().map(|s| Cell::from(s.to_string()))),
    )
    .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));

    let mut rows = Vec::with_capacity(axes.algorithm_count());
    for (a, algorithm) in axes.algorithms.iter().enumerate() {
        let mut cells = vec![Cell::from(algorithm.clone())];
        for s in 0..axes.size_count() {
            let (value, samples) = cell(a, s);
            let style = match (value, samples) {
                (None, _) => Style::default().fg(Color::DarkGray),
                // Averages backed by a single source
                (Some(_), Some(1)) => Style::default().fg(Color::LightYellow),
                _ => Style::default(),
            };
            cells.push(Cell::from(format_cell(value, unit)).style(style));
        }
        rows.push(Row::new(cells));
    }

    let label_width = axes
        .algorithms
        .iter()
        .map(|a| a.chars().count())
        .max()
        .unwrap_or(8) as u16;
    let widths = std::iter::once(Constraint::Length(label_width + 1))
        .chain(axes.sizes.iter().map(|_| Constraint::Min(8)));

    let table = Table::new(rows, widths).header(header).block(block);
    f.render_widget(table, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_grid_shows_values_and_absent_marker() {
        let axes = AxisSet::new(["Sorted"], ["Quick Sort", "Heap Sort"], vec![1000, 2000]);
        let mut terminal = Terminal::new(TestBackend::new(80, 10)).unwrap();
        terminal
            .draw(|f| {
                render_grid(f, f.size(), "Averages", &axes, TimeUnit::Millisecond, |a, s| {
                    if a == 0 && s == 0 { (Some(6_000_000.0), Some(2)) } else { (None, Some(0)) }
                })
            })
            .unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("Averages"));
        assert!(text.contains("[ms]"));
        assert!(text.contains("Quick Sort"));
        assert!(text.contains("6.000"));
        assert!(text.contains("2000"));
    }

    #[test]
    fn test_empty_grid_shows_no_data() {
        let axes = AxisSet::new(["Sorted"], ["Quick Sort"], vec![1000]);
        let mut terminal = Terminal::new(TestBackend::new(40, 6)).unwrap();
        terminal
            .draw(|f| render_grid(f, f.size(), "run.csv", &axes, TimeUnit::Nanosecond, |_, _| (None, None)))
            .unwrap();
        assert!(screen_text(&terminal).contains("No data"));
    }
}
