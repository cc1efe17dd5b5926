//! Core type definitions for the playback engine

use std::fmt;

/// Which kind of content the active session plays
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContentType {
    Quran,
    Invocations,
    Adhan,
    Jawshan,
}

impl ContentType {
    pub fn label(self) -> &'static str {
        match self {
            ContentType::Quran => "Quran",
            ContentType::Invocations => "Invocations",
            ContentType::Adhan => "Adhan",
            ContentType::Jawshan => "Jawshan",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Repeat mode for Quran recitation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RepeatMode {
    #[default]
    Off,
    One,
    All,
}

impl RepeatMode {
    pub fn next(self) -> Self {
        match self {
            RepeatMode::Off => RepeatMode::One,
            RepeatMode::One => RepeatMode::All,
            RepeatMode::All => RepeatMode::Off,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RepeatMode::Off => "Repeat: Off",
            RepeatMode::One => "Repeat: One",
            RepeatMode::All => "Repeat: All",
        }
    }
}

/// Phase of the two-step adhan playback
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AdhanPhase {
    #[default]
    Call,
    Supplication,
}

/// Direction of a manual skip
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Top-level screen the host is showing
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Screen {
    #[default]
    Idle,
    Player,
    IqamahCountdown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeat_mode_rotates_through_all_states() {
        let mut mode = RepeatMode::default();
        let mut seen = Vec::new();
        for _ in 0..3 {
            mode = mode.next();
            seen.push(mode);
        }
        assert_eq!(seen, vec![RepeatMode::One, RepeatMode::All, RepeatMode::Off]);
    }
}
