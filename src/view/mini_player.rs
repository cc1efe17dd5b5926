//! Mini-player bar

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Gauge},
    Frame,
};

use crate::controller::Controls;
use crate::model::PlaybackState;
use super::utils::{format_duration, truncate_string};

pub fn render_mini_player(frame: &mut Frame, area: Rect, playback: &PlaybackState, controls: &Controls) {
    let Some(track) = &playback.current_track else {
        return;
    };

    let icon = if playback.is_playing { "▶" } else { "⏸ " };
    let label = playback.content_type.map(|c| c.label()).unwrap_or_default();
    let max_title = (area.width as usize).saturating_sub(label.len() + 12);
    let title = format!(
        " {} {} | {} ",
        icon,
        truncate_string(&format!("{} · {}", track.title, track.subtitle), max_title),
        label
    );

    let volume_text = if controls.muted {
        "Muted".to_string()
    } else {
        format!("Vol: {}%", controls.volume)
    };
    let hint = format!(" Enter expand | Space play/pause | S stop | {} ", volume_text);

    let time_str = if controls.has_audio {
        format!(
            "{} / {}",
            format_duration(playback.progress_secs),
            format_duration(playback.duration_secs)
        )
    } else {
        String::new()
    };

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green))
                .title(title)
                .title_bottom(Line::from(hint).right_aligned()),
        )
        .gauge_style(Style::default().fg(Color::Green))
        .ratio(playback.progress_ratio())
        .label(time_str);

    frame.render_widget(gauge, area);
}
