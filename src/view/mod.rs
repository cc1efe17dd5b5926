//! View module - UI rendering
//!
//! Renders the playback store and the controller's view state with ratatui.
//! It is organized into submodules by screen:
//!
//! - `utils`: Shared formatting helpers
//! - `player`: Full player screen
//! - `mini_player`: Persistent bar shown while minimized
//! - `idle`: Idle clock and iqamah countdown screens
//! - `overlays`: Notices for empty and error states

mod idle;
mod mini_player;
mod overlays;
mod player;
mod utils;

use chrono::Local;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::controller::ViewState;
use crate::model::{PlaybackState, Screen};

pub use utils::format_duration;

pub struct AppView;

impl AppView {
    pub fn render(frame: &mut Frame, playback: &PlaybackState, view: &ViewState) {
        let area = frame.area();

        match view.screen {
            Screen::Player => player::render_player(frame, area, playback, view),
            Screen::IqamahCountdown => {
                idle::render_countdown(frame, area, view.countdown_secs.unwrap_or(0));
            }
            Screen::Idle => {
                // The mini-player stays on screen while a minimized session runs.
                if playback.is_active() && playback.is_minimized {
                    let chunks = Layout::default()
                        .direction(Direction::Vertical)
                        .constraints([
                            Constraint::Min(0),    // Clock
                            Constraint::Length(3), // Mini-player
                        ])
                        .split(area);
                    idle::render_idle(frame, chunks[0], Local::now());
                    mini_player::render_mini_player(frame, chunks[1], playback, &view.controls);
                } else {
                    idle::render_idle(frame, area, Local::now());
                }
            }
        }

        if let Some(notice) = &view.notice {
            overlays::render_notice(frame, notice);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::Notice;
    use crate::model::{ContentType, Track};
    use ratatui::{backend::TestBackend, Terminal};

    fn rendered(playback: &PlaybackState, view: &ViewState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| AppView::render(f, playback, view)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn playing() -> PlaybackState {
        PlaybackState {
            is_playing: true,
            content_type: Some(ContentType::Quran),
            current_track: Some(Track::new("112. Al-Ikhlas", "alafasy").with_verse_number(2)),
            duration_secs: 23.0,
            ..PlaybackState::default()
        }
    }

    #[test]
    fn player_shows_the_track() {
        let view = ViewState {
            screen: Screen::Player,
            ..ViewState::default()
        };
        let screen = rendered(&playing(), &view);
        assert!(screen.contains("112. Al-Ikhlas"));
        assert!(screen.contains("Playing"));
    }

    #[test]
    fn minimized_session_shows_the_mini_player() {
        let playback = PlaybackState {
            is_minimized: true,
            ..playing()
        };
        let screen = rendered(&playback, &ViewState::default());
        assert!(screen.contains("Enter expand"));
    }

    #[test]
    fn countdown_screen_shows_remaining_time() {
        let view = ViewState {
            screen: Screen::IqamahCountdown,
            countdown_secs: Some(125),
            ..ViewState::default()
        };
        let screen = rendered(&PlaybackState::default(), &view);
        assert!(screen.contains("2:05"));
    }

    #[test]
    fn retryable_notice_offers_retry() {
        let view = ViewState {
            notice: Some(Notice {
                message: "Could not load chapter 36.".to_string(),
                retryable: true,
            }),
            ..ViewState::default()
        };
        let screen = rendered(&PlaybackState::default(), &view);
        assert!(screen.contains("T to retry"));
    }
}
