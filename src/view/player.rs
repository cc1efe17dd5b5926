//! Full player screen

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Padding, Paragraph, Wrap},
    Frame,
};

use crate::controller::{Controls, ViewState};
use crate::model::PlaybackState;
use super::utils::format_duration;

pub fn render_player(frame: &mut Frame, area: Rect, playback: &PlaybackState, view: &ViewState) {
    let Some(track) = &playback.current_track else {
        render_empty(frame, area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(0),    // Text
            Constraint::Length(3), // Progress
        ])
        .split(area);

    let label = playback.content_type.map(|c| c.label()).unwrap_or_default();
    let header = Paragraph::new(Line::from(vec![
        Span::styled(track.title.clone(), Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
        Span::raw("  "),
        Span::styled(track.subtitle.clone(), Style::default().fg(Color::White)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", label))
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(header, chunks[0]);

    let mut lines = Vec::new();
    if let Some(number) = track.verse_number {
        let style = if view.controls.highlighting {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        lines.push(Line::from(Span::styled(format!("﴿{}﴾", number), style)));
        lines.push(Line::from(""));
    }
    if let Some(arabic) = &track.arabic {
        lines.push(Line::from(Span::styled(
            arabic.clone(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));
    }
    if let Some(translation) = &track.translation {
        lines.push(Line::from(Span::styled(translation.clone(), Style::default().fg(Color::Gray))));
    }

    let body = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .padding(Padding::uniform(1))
                .title_bottom(Line::from(key_hints(&view.controls)).centered()),
        );
    frame.render_widget(body, chunks[1]);

    render_progress(frame, chunks[2], playback, &view.controls);
}

fn render_empty(frame: &mut Frame, area: Rect) {
    let content = Paragraph::new("Nothing to play\n\nPick a chapter, prayer or section to begin")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).padding(Padding::uniform(1)));
    frame.render_widget(content, area);
}

fn key_hints(controls: &Controls) -> String {
    let mut hints = Vec::new();
    if controls.can_retreat || controls.can_advance {
        hints.push("←/→ step");
    }
    hints.push("0 reset");
    if controls.can_prev_section || controls.can_next_section {
        hints.push("[/] section");
    }
    if controls.repeat.is_some() {
        hints.push("R repeat");
    }
    hints.push("Esc minimize");
    hints.push("S stop");
    format!(" {} ", hints.join(" | "))
}

fn render_progress(frame: &mut Frame, area: Rect, playback: &PlaybackState, controls: &Controls) {
    let status = if !controls.has_audio {
        " No recitation"
    } else if playback.is_playing {
        " ▶ Playing"
    } else {
        " ⏸  Paused"
    };

    let mut settings = Vec::new();
    if let Some(repeat) = controls.repeat {
        settings.push(repeat.label().to_string());
    }
    settings.push(if controls.muted {
        "Muted".to_string()
    } else {
        format!("Vol: {}%", controls.volume)
    });
    let settings = format!(" {} ", settings.join(" | "));

    let time_str = format!(
        "{} / {}",
        format_duration(playback.progress_secs),
        format_duration(playback.duration_secs)
    );

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("{} ", status))
                .title_bottom(Line::from(settings).right_aligned()),
        )
        .gauge_style(Style::default().fg(Color::Green))
        .ratio(playback.progress_ratio())
        .label(time_str);

    frame.render_widget(gauge, area);
}
