//! Session module - per-content navigation and playback logic
//!
//! Each content type implements [`Session`] on its own; [`ActiveSession`]
//! is the tagged union the host keeps for whichever one is running.
//!
//! - `quran`: verse cursor synchronized with the recitation timeline
//! - `invocation`: repeated post-prayer invocations
//! - `jawshan`: litany lines, closing phrase and section paging
//! - `adhan`: the call/supplication phase controller

mod adhan;
mod invocation;
mod jawshan;
mod quran;

pub use adhan::{AdhanPhaseController, AdhanSession, AdhanStep};
pub use invocation::InvocationSession;
pub use jawshan::JawshanSession;
pub use quran::{QuranSession, PIN_RELEASE_TICKS};

use crate::audio::AudioBackend;
use crate::error::Result;
use crate::model::{ContentType, PlaybackStateStore, SessionLease, Track};

/// Result of a navigation intent
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Navigation {
    Moved,
    Unchanged,
    /// The session wants the host to page to another litany section.
    SectionRequested(u32),
}

/// What the host should do after the audio of a session ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The session restarted or switched audio and keeps playing.
    Continue,
    /// Playback stopped; the session stays open at its position.
    Finished,
    /// Auto-advance to another litany section.
    LoadSection(u32),
    /// The adhan sequence reached its terminal state.
    AdhanComplete,
}

/// A session's write access to the shared store
#[derive(Clone)]
pub struct StoreWriter {
    store: PlaybackStateStore,
    lease: SessionLease,
}

impl StoreWriter {
    /// Claim the store for a new session, replacing whatever was playing.
    pub fn claim(store: &PlaybackStateStore, content_type: ContentType, track: Track, duration_secs: f64) -> Self {
        let lease = store.claim(content_type, track, duration_secs);
        Self {
            store: store.clone(),
            lease,
        }
    }

    pub fn set_track(&self, track: Track) -> bool {
        self.store.set_track(&self.lease, track)
    }

    pub fn set_playing(&self, is_playing: bool) -> bool {
        self.store.set_playing(&self.lease, is_playing)
    }

    pub fn set_progress(&self, progress_secs: f64, duration_secs: f64) -> bool {
        self.store.set_progress(&self.lease, progress_secs, duration_secs)
    }
}

/// Start the audio and mirror the outcome in the store. A rejected start
/// leaves the session intact with `is_playing` false.
pub(crate) fn resume(audio: &mut dyn AudioBackend, writer: &StoreWriter) -> Result<()> {
    match audio.play() {
        Ok(()) => {
            writer.set_playing(true);
            Ok(())
        }
        Err(e) => {
            tracing::warn!(error = %e, "Audio refused to start");
            audio.pause();
            writer.set_playing(false);
            Err(e)
        }
    }
}

pub trait Session {
    fn content_type(&self) -> ContentType;

    fn current_track(&self) -> Track;

    /// Audio to load when the session starts.
    fn audio_url(&self) -> Option<&str>;

    fn advance(&mut self, audio: &mut dyn AudioBackend) -> Navigation;

    fn retreat(&mut self, audio: &mut dyn AudioBackend) -> Navigation;

    /// Back to the start of the current item or section.
    fn reset(&mut self, audio: &mut dyn AudioBackend);

    fn can_advance(&self) -> bool;

    fn can_retreat(&self) -> bool;

    fn on_time_update(&mut self, position_secs: f64, duration_secs: f64);

    fn on_ended(&mut self, audio: &mut dyn AudioBackend) -> SessionOutcome;

    fn writer(&self) -> &StoreWriter;
}

pub enum ActiveSession {
    Quran(QuranSession),
    Invocations(InvocationSession),
    Jawshan(JawshanSession),
    Adhan(AdhanSession),
}

impl ActiveSession {
    pub fn as_session(&self) -> &dyn Session {
        match self {
            ActiveSession::Quran(s) => s,
            ActiveSession::Invocations(s) => s,
            ActiveSession::Jawshan(s) => s,
            ActiveSession::Adhan(s) => s,
        }
    }

    pub fn as_session_mut(&mut self) -> &mut dyn Session {
        match self {
            ActiveSession::Quran(s) => s,
            ActiveSession::Invocations(s) => s,
            ActiveSession::Jawshan(s) => s,
            ActiveSession::Adhan(s) => s,
        }
    }
}
