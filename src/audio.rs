//! Audio primitive control surface
//!
//! The engine only needs play/pause/seek, volume and two notifications
//! (time update and ended). [`SimulatedAudio`] implements the surface with a
//! virtual clock; it backs the terminal player and the tests.

use std::collections::HashMap;
use std::time::Duration;

use crate::error::{PlayerError, Result};

pub const DEFAULT_VOLUME_PERCENT: u8 = 80;
const DEFAULT_SIMULATED_DURATION_SECS: f64 = 60.0;

/// Identifies one loaded media source. Every `load` yields a new id, so
/// notifications from a replaced source can be recognized and dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AudioSourceId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AudioEvent {
    TimeUpdate { source: AudioSourceId, position_secs: f64 },
    Ended { source: AudioSourceId },
}

impl AudioEvent {
    pub fn source(&self) -> AudioSourceId {
        match self {
            AudioEvent::TimeUpdate { source, .. } | AudioEvent::Ended { source } => *source,
        }
    }
}

pub trait AudioBackend: Send {
    /// Replace the current source. Playback is paused at position 0.
    fn load(&mut self, url: &str) -> AudioSourceId;

    fn source(&self) -> Option<AudioSourceId>;

    fn play(&mut self) -> Result<()>;

    fn pause(&mut self);

    fn seek(&mut self, to_secs: f64);

    fn current_time(&self) -> f64;

    fn duration(&self) -> f64;

    fn is_playing(&self) -> bool;

    fn set_volume(&mut self, percent: u8);

    fn set_muted(&mut self, muted: bool);

    fn is_muted(&self) -> bool;

    /// Advance the backend clock by `elapsed` and return the notifications
    /// raised since the previous call.
    fn tick(&mut self, elapsed: Duration) -> Vec<AudioEvent>;
}

/// Clock-driven stand-in for a media element
pub struct SimulatedAudio {
    durations: HashMap<String, f64>,
    next_source: u64,
    source: Option<AudioSourceId>,
    url: Option<String>,
    position_secs: f64,
    duration_secs: f64,
    playing: bool,
    volume: u8,
    muted: bool,
    reject_play: bool,
}

impl Default for SimulatedAudio {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedAudio {
    pub fn new() -> Self {
        Self {
            durations: HashMap::new(),
            next_source: 1,
            source: None,
            url: None,
            position_secs: 0.0,
            duration_secs: 0.0,
            playing: false,
            volume: DEFAULT_VOLUME_PERCENT,
            muted: false,
            reject_play: false,
        }
    }

    /// Register the length of the media behind `url`.
    pub fn with_duration(mut self, url: impl Into<String>, secs: f64) -> Self {
        self.durations.insert(url.into(), secs);
        self
    }

    pub fn set_duration(&mut self, url: impl Into<String>, secs: f64) {
        self.durations.insert(url.into(), secs);
    }

    /// Make `play` fail, as a browser autoplay policy would.
    pub fn set_reject_play(&mut self, reject: bool) {
        self.reject_play = reject;
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }
}

impl AudioBackend for SimulatedAudio {
    fn load(&mut self, url: &str) -> AudioSourceId {
        let source = AudioSourceId(self.next_source);
        self.next_source += 1;
        self.source = Some(source);
        self.url = Some(url.to_string());
        self.position_secs = 0.0;
        self.duration_secs = self
            .durations
            .get(url)
            .copied()
            .unwrap_or(DEFAULT_SIMULATED_DURATION_SECS);
        self.playing = false;
        tracing::debug!(url, source = source.0, duration_secs = self.duration_secs, "Audio source loaded");
        source
    }

    fn source(&self) -> Option<AudioSourceId> {
        self.source
    }

    fn play(&mut self) -> Result<()> {
        if self.source.is_none() {
            return Err(PlayerError::PlaybackRejected("no source loaded".to_string()));
        }
        if self.reject_play {
            return Err(PlayerError::PlaybackRejected("playback not allowed".to_string()));
        }
        if self.position_secs >= self.duration_secs {
            self.position_secs = 0.0;
        }
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn seek(&mut self, to_secs: f64) {
        self.position_secs = to_secs.clamp(0.0, self.duration_secs);
    }

    fn current_time(&self) -> f64 {
        self.position_secs
    }

    fn duration(&self) -> f64 {
        self.duration_secs
    }

    fn is_playing(&self) -> bool {
        self.playing
    }

    fn set_volume(&mut self, percent: u8) {
        self.volume = percent.min(100);
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn is_muted(&self) -> bool {
        self.muted
    }

    fn tick(&mut self, elapsed: Duration) -> Vec<AudioEvent> {
        let Some(source) = self.source else {
            return Vec::new();
        };
        if !self.playing {
            return Vec::new();
        }

        self.position_secs = (self.position_secs + elapsed.as_secs_f64()).min(self.duration_secs);
        let mut events = vec![AudioEvent::TimeUpdate {
            source,
            position_secs: self.position_secs,
        }];

        if self.position_secs >= self.duration_secs {
            self.playing = false;
            events.push(AudioEvent::Ended { source });
        }
        events
    }
}
