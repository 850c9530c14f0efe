//! Chart pane
//!
//! Plots the average time of every algorithm against input size for the
//! selected variation.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};
use crate::config::AxisSet;
use crate::models::AverageTable;
use crate::util::units::{format_time, TimeUnit};

const SERIES_COLORS: [Color; 6] = [
    Color::Cyan,
    Color::Yellow,
    Color::Green,
    Color::Magenta,
    Color::Red,
    Color::Blue,
];

/// Points of one algorithm as (size, time in `unit`), absent cells left out
pub fn series(axes: &AxisSet, table: &AverageTable, algorithm: usize, unit: TimeUnit) -> Vec<(f64, f64)> {
    axes.sizes
        .iter()
        .zip(table.row(algorithm).unwrap_or_default())
        .filter_map(|(size, cell)| cell.map(|ns| (*size as f64, unit.from_nanos(ns))))
        .collect()
}

/// Render the averages of one variation as a line chart
pub fn render_chart(
    f: &mut Frame,
    area: Rect,
    variation: &str,
    axes: &AxisSet,
    table: Option<&AverageTable>,
    unit: TimeUnit,
) {
    let block = Block::default()
        .title(format!("Performance for {} input (average)", variation))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let points: Vec<(String, Vec<(f64, f64)>)> = match table {
        Some(table) => axes
            .algorithms
            .iter()
            .enumerate()
            .map(|(a, name)| (name.clone(), series(axes, table, a, unit)))
            .filter(|(_, data)| !data.is_empty())
            .collect(),
        None => Vec::new(),
    };

    if points.is_empty() {
        let empty = Paragraph::new("No data")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let x_min = axes.sizes.iter().copied().min().unwrap_or(0) as f64;
    let x_max = axes.sizes.iter().copied().max().unwrap_or(1) as f64;
    let y_max = points
        .iter()
        .flat_map(|(_, data)| data.iter().map(|(_, y)| *y))
        .fold(0.0f64, f64::max);
    let y_max = if y_max > 0.0 { y_max * 1.05 } else { 1.0 };

    let datasets = points
        .iter()
        .enumerate()
        .map(|(i, (name, data))| {
            Dataset::default()
                .name(name.clone())
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(SERIES_COLORS[i % SERIES_COLORS.len()]))
                .data(data)
        })
        .collect::<Vec<_>>();

    let x_axis = Axis::default()
        .title("Input Size [N]")
        .style(Style::default().fg(Color::Gray))
        .bounds([x_min, x_max])
        .labels(vec![
            Span::raw(format!("{}", x_min)),
            Span::raw(format!("{}", (x_min + x_max) / 2.0)),
            Span::raw(format!("{}", x_max)),
        ]);

    let y_unit = unit.abbreviation();
    let y_axis = Axis::default()
        .title(format!("Time Taken ({})", y_unit))
        .style(Style::default().fg(Color::Gray))
        .bounds([0.0, y_max])
        .labels(vec![
            Span::raw("0"),
            Span::raw(format_time(unit.to_nanos(y_max / 2.0), unit)),
            Span::raw(format_time(unit.to_nanos(y_max), unit)),
        ]);

    let chart = Chart::new(datasets).block(block).x_axis(x_axis).y_axis(y_axis);
    f.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{average, build_from_readers, Diagnostic};
    use ratatui::{backend::TestBackend, Terminal};

    fn averages() -> (AxisSet, AverageTable) {
        let axes = AxisSet::new(["Sorted"], ["Quick Sort", "Heap Sort"], vec![1000, 2000, 3000]);
        let csv = "Dataset Size,Dataset Variation,Sorting Algorithm,Time Taken\n\
                   1000,Sorted,Quick Sort,1000000\n\
                   3000,Sorted,Quick Sort,3000000\n";
        let mut diagnostics: Vec<Diagnostic> = Vec::new();
        let collection =
            build_from_readers(vec![("run".to_string(), csv.as_bytes())], &axes, &mut diagnostics).unwrap();
        let averages = average(&collection, &axes).unwrap();
        let table = averages.get("Sorted").unwrap().clone();
        (axes, table)
    }

    #[test]
    fn test_series_skips_absent_cells() {
        let (axes, table) = averages();
        assert_eq!(series(&axes, &table, 0, TimeUnit::Millisecond), vec![(1000.0, 1.0), (3000.0, 3.0)]);
        assert!(series(&axes, &table, 1, TimeUnit::Millisecond).is_empty());
    }

    #[test]
    fn test_chart_renders_legend() {
        let (axes, table) = averages();
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal
            .draw(|f| render_chart(f, f.size(), "Sorted", &axes, Some(&table), TimeUnit::Millisecond))
            .unwrap();
        let text: String = terminal.backend().buffer().content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Quick Sort"));
        assert!(!text.contains("Heap Sort"));
    }

    #[test]
    fn test_chart_without_data() {
        let axes = AxisSet::new(["Sorted"], ["Quick Sort"], vec![1000]);
        let mut terminal = Terminal::new(TestBackend::new(60, 10)).unwrap();
        terminal
            .draw(|f| render_chart(f, f.size(), "Sorted", &axes, None, TimeUnit::Nanosecond))
            .unwrap();
        let text: String = terminal.backend().buffer().content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("No data"));
    }
}
