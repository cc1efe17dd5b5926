//! Idle clock and iqamah countdown

use chrono::{DateTime, Local};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::utils::format_duration;

pub fn render_idle(frame: &mut Frame, area: Rect, now: DateTime<Local>) {
    let lines = vec![
        Line::from(Span::styled(
            now.format("%H:%M:%S").to_string(),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            now.format("%A, %d %B %Y").to_string(),
            Style::default().fg(Color::White),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Nothing playing. Q to quit",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    render_centered(frame, area, lines, " Prayer Player ", Color::Green);
}

pub fn render_countdown(frame: &mut Frame, area: Rect, remaining_secs: u32) {
    let lines = vec![
        Line::from(Span::styled(
            "Iqamah in",
            Style::default().fg(Color::White),
        )),
        Line::from(Span::styled(
            format_duration(f64::from(remaining_secs)),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled("Esc to dismiss", Style::default().fg(Color::DarkGray))),
    ];

    render_centered(frame, area, lines, " Iqamah ", Color::Yellow);
}

fn render_centered(frame: &mut Frame, area: Rect, lines: Vec<Line>, title: &str, accent: Color) {
    let height = lines.len() as u16;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent))
        .title(title.to_string());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .split(inner);

    let text = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(text, chunks[1]);
}
