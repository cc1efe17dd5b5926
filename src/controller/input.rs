//! Key event handling

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::model::Screen;

use super::PlayerController;

/// User intents the player understands
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intent {
    Next,
    Previous,
    Reset,
    TogglePlay,
    ToggleMute,
    VolumeUp,
    VolumeDown,
    CycleRepeat,
    NextSection,
    PrevSection,
    Minimize,
    Expand,
    Retry,
    Stop,
    Quit,
}

impl Intent {
    pub fn from_key(key: KeyEvent) -> Option<Self> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') | KeyCode::Char('q') => Some(Intent::Quit),
                _ => None,
            };
        }

        let intent = match key.code {
            KeyCode::Right | KeyCode::Down | KeyCode::Char('n') => Intent::Next,
            KeyCode::Left | KeyCode::Up | KeyCode::Char('p') => Intent::Previous,
            KeyCode::Char('0') | KeyCode::Home => Intent::Reset,
            KeyCode::Char(' ') => Intent::TogglePlay,
            KeyCode::Char('m') | KeyCode::Char('M') => Intent::ToggleMute,
            KeyCode::Char('+') | KeyCode::Char('=') => Intent::VolumeUp,
            KeyCode::Char('-') => Intent::VolumeDown,
            KeyCode::Char('r') | KeyCode::Char('R') => Intent::CycleRepeat,
            KeyCode::PageDown | KeyCode::Char(']') => Intent::NextSection,
            KeyCode::PageUp | KeyCode::Char('[') => Intent::PrevSection,
            KeyCode::Esc => Intent::Minimize,
            KeyCode::Enter => Intent::Expand,
            KeyCode::Char('t') | KeyCode::Char('T') => Intent::Retry,
            KeyCode::Char('s') | KeyCode::Char('S') => Intent::Stop,
            KeyCode::Char('q') | KeyCode::Char('Q') => Intent::Quit,
            _ => return None,
        };
        Some(intent)
    }
}

impl PlayerController {
    pub async fn handle_key_event(&mut self, key: KeyEvent) {
        if let Some(intent) = Intent::from_key(key) {
            self.handle_intent(intent).await;
        }
    }

    pub async fn handle_intent(&mut self, intent: Intent) {
        tracing::trace!(?intent, screen = ?self.screen, "Intent");

        // Content navigation only applies to the full player.
        let on_player = self.screen == Screen::Player;

        match intent {
            Intent::Next if on_player => self.next().await,
            Intent::Previous if on_player => self.previous().await,
            Intent::Reset if on_player => self.reset_position(),
            Intent::CycleRepeat if on_player => self.cycle_repeat(),
            Intent::NextSection if on_player => self.next_section().await,
            Intent::PrevSection if on_player => self.prev_section().await,
            Intent::Next
            | Intent::Previous
            | Intent::Reset
            | Intent::CycleRepeat
            | Intent::NextSection
            | Intent::PrevSection => {}
            Intent::TogglePlay => self.toggle_playback(),
            Intent::ToggleMute => self.toggle_mute(),
            Intent::VolumeUp => self.volume_up(),
            Intent::VolumeDown => self.volume_down(),
            Intent::Minimize => match self.screen {
                Screen::IqamahCountdown => self.set_screen(Screen::Idle),
                _ => self.minimize(),
            },
            Intent::Expand => self.expand(),
            Intent::Retry => {
                if self.notice.as_ref().is_some_and(|n| n.retryable) {
                    // The notice already carries the failure.
                    let _ = self.retry().await;
                }
            }
            Intent::Stop => self.stop(),
            Intent::Quit => self.set_should_quit(true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn maps_player_keys() {
        assert_eq!(Intent::from_key(press(KeyCode::Right)), Some(Intent::Next));
        assert_eq!(Intent::from_key(press(KeyCode::Left)), Some(Intent::Previous));
        assert_eq!(Intent::from_key(press(KeyCode::Char(' '))), Some(Intent::TogglePlay));
        assert_eq!(Intent::from_key(press(KeyCode::PageDown)), Some(Intent::NextSection));
        assert_eq!(Intent::from_key(press(KeyCode::Esc)), Some(Intent::Minimize));
        assert_eq!(Intent::from_key(press(KeyCode::Char('x'))), None);
    }

    #[test]
    fn control_c_quits() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(Intent::from_key(key), Some(Intent::Quit));
    }

    #[test]
    fn key_releases_are_ignored() {
        let mut key = press(KeyCode::Char('q'));
        key.kind = KeyEventKind::Release;
        assert_eq!(Intent::from_key(key), None);
    }
}
