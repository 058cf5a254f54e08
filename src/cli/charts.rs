use colored::Colorize;
use ratatui::{
    buffer::Buffer,
    layout::{Direction, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Widget},
};

use crate::cli::{open_store, terminal_width};
use crate::error::Result;
use crate::fmt::MONTH_LABELS;
use crate::query::{by_year_department_type, distinct_departments, ChartData, ReportFilter};

const MAX_WIDTH: u16 = 100;

/// Draw `widget` into an off-screen buffer and return its rows as text.
fn render_to_string<W: Widget>(widget: W, width: u16, height: u16) -> String {
    let area = Rect::new(0, 0, width, height);
    let mut buf = Buffer::empty(area);
    widget.render(area, &mut buf);
    let mut rows = Vec::with_capacity(usize::from(height));
    for y in 0..height {
        let row: String = (0..width).map(|x| buf[(x, y)].symbol()).collect();
        rows.push(row.trim_end().to_string());
    }
    rows.join("\n")
}

fn monthly_chart(monthly: &[usize; 12], width: u16) -> String {
    let bars: Vec<Bar> = monthly
        .iter()
        .zip(MONTH_LABELS)
        .map(|(&count, label)| {
            Bar::default()
                .value(count as u64)
                .label(Line::from(label))
                .style(Style::default().fg(Color::Blue))
        })
        .collect();
    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Jumlah Kecelakaan per Bulan "),
        )
        .data(BarGroup::default().bars(&bars))
        .bar_width(4)
        .bar_gap(1);
    render_to_string(chart, width.max(62), 14)
}

/// Horizontal bars, one row per label.
fn ranked_chart(title: &str, counts: &[(String, usize)], width: u16, color: Color) -> String {
    let bars: Vec<Bar> = counts
        .iter()
        .map(|(label, count)| {
            Bar::default()
                .value(*count as u64)
                .label(Line::from(label.as_str()))
                .style(Style::default().fg(color))
        })
        .collect();
    let chart = BarChart::default()
        .block(Block::default().borders(Borders::ALL).title(format!(" {title} ")))
        .direction(Direction::Horizontal)
        .data(BarGroup::default().bars(&bars))
        .bar_width(1)
        .bar_gap(0);
    let height = u16::try_from(counts.len()).unwrap_or(u16::MAX - 2).saturating_add(2);
    render_to_string(chart, width, height)
}

fn format_charts(data: &ChartData, width: u16) -> String {
    let width = width.min(MAX_WIDTH);
    let mut out = vec![monthly_chart(&data.monthly, width)];
    if data.types.is_empty() {
        out.push("Tidak ada data jenis kecelakaan".to_string());
    } else {
        out.push(ranked_chart("Jenis Kecelakaan", &data.types, width, Color::Red));
    }
    if data.departments.is_empty() {
        out.push("Tidak ada data departemen".to_string());
    } else {
        out.push(ranked_chart("Kecelakaan per Departemen", &data.departments, width, Color::Green));
    }
    out.join("\n\n")
}

pub fn run(year: Option<i32>, department: Option<String>, accident_type: Option<String>) -> Result<()> {
    let store = open_store()?;
    let reports = store.list_all();
    let filter = ReportFilter {
        year,
        department,
        accident_type,
    };
    let filtered = by_year_department_type(&reports, &filter);

    let departments = distinct_departments(&reports);
    if !departments.is_empty() {
        println!("{} {}", "Departemen:".bold(), departments.join(", "));
    }
    println!("{} laporan cocok dengan filter\n", filtered.len());
    println!("{}", format_charts(&ChartData::compute(&filtered), terminal_width()));
    Ok(())
}
