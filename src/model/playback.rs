//! Now-playing data shared between the sessions and the player views

use super::types::ContentType;

/// Display metadata for the active position of a session
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Track {
    pub title: String,
    pub subtitle: String,
    pub arabic: Option<String>,
    pub translation: Option<String>,
    pub verse_number: Option<u32>,
}

impl Track {
    pub fn new(title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
            ..Self::default()
        }
    }

    pub fn with_arabic(mut self, arabic: impl Into<String>) -> Self {
        self.arabic = Some(arabic.into());
        self
    }

    pub fn with_translation(mut self, translation: impl Into<String>) -> Self {
        self.translation = Some(translation.into());
        self
    }

    pub fn with_verse_number(mut self, verse_number: u32) -> Self {
        self.verse_number = Some(verse_number);
        self
    }
}

/// Complete now-playing state, as rendered by the full player and the mini-player
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlaybackState {
    pub is_playing: bool,
    pub is_minimized: bool,
    pub content_type: Option<ContentType>,
    pub current_track: Option<Track>,
    pub progress_secs: f64,
    pub duration_secs: f64,
}

impl PlaybackState {
    pub fn is_active(&self) -> bool {
        self.content_type.is_some()
    }

    pub fn progress_ratio(&self) -> f64 {
        if self.duration_secs > 0.0 {
            (self.progress_secs / self.duration_secs).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_idle() {
        let state = PlaybackState::default();
        assert!(!state.is_active());
        assert!(!state.is_playing);
        assert!(!state.is_minimized);
        assert!(state.current_track.is_none());
        assert_eq!(state.progress_ratio(), 0.0);
    }

    #[test]
    fn progress_ratio_is_clamped() {
        let state = PlaybackState {
            progress_secs: 130.0,
            duration_secs: 120.0,
            ..PlaybackState::default()
        };
        assert_eq!(state.progress_ratio(), 1.0);
    }
}
