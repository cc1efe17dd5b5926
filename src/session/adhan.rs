//! Call to prayer
//!
//! [`AdhanPhaseController`] is the bare two-phase state machine; the
//! [`AdhanSession`] wraps it with the audio and the store.

use crate::audio::AudioBackend;
use crate::model::{AdhanAudio, AdhanPhase, ContentType, Track};

use super::{resume, Navigation, Session, SessionOutcome, StoreWriter};

/// What the host should do after a phase's audio ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdhanStep {
    LoadSupplication,
    Complete,
}

/// `Call -> Supplication -> terminal`, never looping
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AdhanPhaseController {
    phase: AdhanPhase,
    supplication_enabled: bool,
    terminal: bool,
}

impl AdhanPhaseController {
    pub fn new(supplication_enabled: bool) -> Self {
        Self {
            phase: AdhanPhase::Call,
            supplication_enabled,
            terminal: false,
        }
    }

    pub fn phase(&self) -> AdhanPhase {
        self.phase
    }

    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    /// Advance on the current phase's ended notification. Returns `None`
    /// once terminal, so duplicate notifications are harmless.
    pub fn on_audio_ended(&mut self) -> Option<AdhanStep> {
        if self.terminal {
            return None;
        }
        match self.phase {
            AdhanPhase::Call if self.supplication_enabled => {
                self.phase = AdhanPhase::Supplication;
                Some(AdhanStep::LoadSupplication)
            }
            AdhanPhase::Call | AdhanPhase::Supplication => {
                self.terminal = true;
                Some(AdhanStep::Complete)
            }
        }
    }
}

pub struct AdhanSession {
    audio: AdhanAudio,
    controller: AdhanPhaseController,
    writer: StoreWriter,
}

impl AdhanSession {
    /// The supplication phase only runs when enabled and an asset exists.
    pub fn new(audio: AdhanAudio, supplication_after_call: bool, writer: StoreWriter) -> Self {
        let supplication_enabled = supplication_after_call && audio.supplication_url.is_some();
        Self {
            audio,
            controller: AdhanPhaseController::new(supplication_enabled),
            writer,
        }
    }

    pub fn initial_track(audio: &AdhanAudio) -> Track {
        phase_track(audio, AdhanPhase::Call)
    }

    pub fn phase(&self) -> AdhanPhase {
        self.controller.phase()
    }

    pub fn is_complete(&self) -> bool {
        self.controller.is_terminal()
    }
}

fn phase_track(audio: &AdhanAudio, phase: AdhanPhase) -> Track {
    match phase {
        AdhanPhase::Call => Track::new("Adhan", audio.prayer.clone()),
        AdhanPhase::Supplication => {
            let track = Track::new("Supplication after the Adhan", audio.prayer.clone());
            match &audio.supplication_text {
                Some(text) => track.with_arabic(text.clone()),
                None => track,
            }
        }
    }
}

impl Session for AdhanSession {
    fn content_type(&self) -> ContentType {
        ContentType::Adhan
    }

    fn current_track(&self) -> Track {
        phase_track(&self.audio, self.controller.phase())
    }

    fn audio_url(&self) -> Option<&str> {
        Some(&self.audio.call_url)
    }

    fn advance(&mut self, _audio: &mut dyn AudioBackend) -> Navigation {
        Navigation::Unchanged
    }

    fn retreat(&mut self, _audio: &mut dyn AudioBackend) -> Navigation {
        Navigation::Unchanged
    }

    fn reset(&mut self, _audio: &mut dyn AudioBackend) {}

    fn can_advance(&self) -> bool {
        false
    }

    fn can_retreat(&self) -> bool {
        false
    }

    fn on_time_update(&mut self, position_secs: f64, duration_secs: f64) {
        self.writer.set_progress(position_secs, duration_secs);
    }

    fn on_ended(&mut self, audio: &mut dyn AudioBackend) -> SessionOutcome {
        match self.controller.on_audio_ended() {
            Some(AdhanStep::LoadSupplication) => {
                let Some(url) = self.audio.supplication_url.clone() else {
                    self.writer.set_playing(false);
                    return SessionOutcome::AdhanComplete;
                };
                tracing::info!(prayer = %self.audio.prayer, "Adhan finished, playing supplication");
                audio.load(&url);
                self.writer.set_track(self.current_track());
                self.writer.set_progress(0.0, audio.duration());
                let _ = resume(audio, &self.writer);
                SessionOutcome::Continue
            }
            Some(AdhanStep::Complete) => {
                tracing::info!(prayer = %self.audio.prayer, "Adhan sequence complete");
                self.writer.set_playing(false);
                SessionOutcome::AdhanComplete
            }
            None => SessionOutcome::Finished,
        }
    }

    fn writer(&self) -> &StoreWriter {
        &self.writer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SimulatedAudio;
    use crate::model::PlaybackStateStore;

    const CALL: &str = "https://audio.test/adhan/makkah.mp3";
    const DUA: &str = "https://audio.test/adhan/dua.mp3";

    fn adhan_audio() -> AdhanAudio {
        AdhanAudio {
            prayer: "Maghrib".to_string(),
            call_url: CALL.to_string(),
            supplication_url: Some(DUA.to_string()),
            supplication_text: Some("اللهم رب هذه الدعوة التامة".to_string()),
        }
    }

    fn session(supplication_after_call: bool) -> (AdhanSession, PlaybackStateStore, SimulatedAudio) {
        let store = PlaybackStateStore::new();
        let audio_info = adhan_audio();
        let writer = StoreWriter::claim(&store, ContentType::Adhan, AdhanSession::initial_track(&audio_info), 0.0);
        let mut audio = SimulatedAudio::new().with_duration(CALL, 180.0).with_duration(DUA, 30.0);
        audio.load(CALL);
        (AdhanSession::new(audio_info, supplication_after_call, writer), store, audio)
    }

    #[test]
    fn controller_runs_call_then_supplication_then_stops() {
        let mut controller = AdhanPhaseController::new(true);
        assert_eq!(controller.phase(), AdhanPhase::Call);
        assert_eq!(controller.on_audio_ended(), Some(AdhanStep::LoadSupplication));
        assert_eq!(controller.phase(), AdhanPhase::Supplication);
        assert_eq!(controller.on_audio_ended(), Some(AdhanStep::Complete));
        assert!(controller.is_terminal());
        assert_eq!(controller.on_audio_ended(), None);
    }

    #[test]
    fn controller_without_supplication_completes_after_call() {
        let mut controller = AdhanPhaseController::new(false);
        assert_eq!(controller.on_audio_ended(), Some(AdhanStep::Complete));
        assert_eq!(controller.phase(), AdhanPhase::Call);
    }

    #[test]
    fn session_loads_supplication_track() {
        let (mut adhan, store, mut audio) = session(true);
        assert_eq!(adhan.on_ended(&mut audio), SessionOutcome::Continue);
        assert_eq!(adhan.phase(), AdhanPhase::Supplication);
        assert_eq!(audio.url(), Some(DUA));
        assert!(audio.is_playing());

        let state = store.snapshot();
        assert_eq!(state.current_track.unwrap().title, "Supplication after the Adhan");
        assert_eq!(state.duration_secs, 30.0);
        assert!(state.is_playing);

        assert_eq!(adhan.on_ended(&mut audio), SessionOutcome::AdhanComplete);
        assert!(adhan.is_complete());
        assert!(!store.snapshot().is_playing);
    }

    #[test]
    fn disabled_supplication_routes_straight_to_completion() {
        let (mut adhan, _store, mut audio) = session(false);
        assert_eq!(adhan.on_ended(&mut audio), SessionOutcome::AdhanComplete);
        assert_eq!(adhan.phase(), AdhanPhase::Call);
        assert_eq!(audio.url(), Some(CALL));
    }

    #[test]
    fn missing_supplication_asset_skips_the_phase() {
        let store = PlaybackStateStore::new();
        let mut info = adhan_audio();
        info.supplication_url = None;
        let writer = StoreWriter::claim(&store, ContentType::Adhan, AdhanSession::initial_track(&info), 0.0);
        let mut adhan = AdhanSession::new(info, true, writer);
        let mut audio = SimulatedAudio::new();
        audio.load(CALL);
        assert_eq!(adhan.on_ended(&mut audio), SessionOutcome::AdhanComplete);
    }
}
