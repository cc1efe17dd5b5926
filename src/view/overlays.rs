//! Overlay rendering (empty and error notices)

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::controller::Notice;

pub fn render_notice(frame: &mut Frame, notice: &Notice) {
    let area = frame.area();

    let popup_width = 52.min(area.width.saturating_sub(4));
    let inner_width = popup_width.saturating_sub(4).max(1) as usize;

    // Wrapped line count, plus the two borders
    let line_count = (notice.message.chars().count().div_ceil(inner_width)).max(1) as u16;
    let popup_height = (2 + line_count).min(area.height.saturating_sub(4).max(3));

    let popup_area = Rect {
        x: area.width.saturating_sub(popup_width) / 2,
        y: area.height.saturating_sub(popup_height) / 2,
        width: popup_width,
        height: popup_height,
    };

    frame.render_widget(Clear, popup_area);

    let (color, title) = if notice.retryable {
        (Color::Red, " Error (T to retry) ")
    } else {
        (Color::Yellow, " Notice ")
    };

    let widget = Paragraph::new(notice.message.clone())
        .style(Style::default().fg(color))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .title(title)
                .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD))
                .style(Style::default().bg(Color::Black)),
        );

    frame.render_widget(widget, popup_area);
}
