//! Controller module - the session host
//!
//! The controller owns the active session, the audio primitive and the
//! screen routing. Every event (audio notification, user intent, countdown
//! tick) is handled to completion on `&mut self`, so handlers never
//! interleave. It is organized into submodules by responsibility:
//!
//! - `input`: Key and intent handling
//! - `navigation`: Session start/retry and content navigation
//! - `playback`: Play/pause, volume, minimize and stop
//! - `audio_events`: Time-update and ended notifications, adhan routing
//! - `countdown`: Iqamah countdown

mod audio_events;
mod countdown;
mod input;
mod navigation;
mod playback;

pub use countdown::Countdown;
pub use input::Intent;

use std::sync::Arc;

use crate::audio::{AudioBackend, AudioSourceId};
use crate::config::Config;
use crate::error::PlayerError;
use crate::model::{PlaybackStateStore, RepeatMode, Screen};
use crate::selection::Selection;
use crate::session::ActiveSession;
use crate::source::ContentSource;

/// Message for the empty-state and error screens
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub retryable: bool,
}

impl Notice {
    pub(crate) fn from_error(error: &PlayerError) -> Self {
        Self {
            message: error.user_message(),
            retryable: error.is_retryable(),
        }
    }
}

/// Which controls are enabled for the active session
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Controls {
    pub can_advance: bool,
    pub can_retreat: bool,
    pub can_next_section: bool,
    pub can_prev_section: bool,
    pub has_audio: bool,
    pub repeat: Option<RepeatMode>,
    pub highlighting: bool,
    pub muted: bool,
    pub volume: u8,
}

/// Everything the views need besides the playback store
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewState {
    pub screen: Screen,
    pub notice: Option<Notice>,
    pub countdown_secs: Option<u32>,
    pub controls: Controls,
}

pub struct PlayerController {
    pub(crate) store: PlaybackStateStore,
    pub(crate) source: Arc<dyn ContentSource>,
    pub(crate) audio: Box<dyn AudioBackend>,
    pub(crate) session: Option<ActiveSession>,
    /// Source whose notifications belong to the active session.
    pub(crate) active_source: Option<AudioSourceId>,
    pub(crate) config: Config,
    pub(crate) screen: Screen,
    pub(crate) countdown: Option<Countdown>,
    pub(crate) notice: Option<Notice>,
    pub(crate) last_selection: Option<Selection>,
    /// Section whose fetch failed, with its autoplay flag, for retry.
    pub(crate) pending_section: Option<(u32, bool)>,
    should_quit: bool,
}

impl PlayerController {
    pub fn new(
        store: PlaybackStateStore,
        source: Arc<dyn ContentSource>,
        mut audio: Box<dyn AudioBackend>,
        config: Config,
    ) -> Self {
        audio.set_volume(config.volume);
        Self {
            store,
            source,
            audio,
            session: None,
            active_source: None,
            config,
            screen: Screen::Idle,
            countdown: None,
            notice: None,
            last_selection: None,
            pending_section: None,
            should_quit: false,
        }
    }

    pub fn store(&self) -> &PlaybackStateStore {
        &self.store
    }

    pub fn session(&self) -> Option<&ActiveSession> {
        self.session.as_ref()
    }

    pub fn audio(&self) -> &dyn AudioBackend {
        self.audio.as_ref()
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn set_should_quit(&mut self, quit: bool) {
        self.should_quit = quit;
    }

    /// Switch screens. Leaving the countdown screen clears its countdown.
    pub(crate) fn set_screen(&mut self, screen: Screen) {
        if self.screen == screen {
            return;
        }
        if self.screen == Screen::IqamahCountdown && self.countdown.take().is_some() {
            tracing::debug!("Iqamah countdown cleared");
        }
        tracing::debug!(from = ?self.screen, to = ?screen, "Screen changed");
        self.screen = screen;
    }

    pub fn view_state(&self) -> ViewState {
        let mut controls = Controls {
            muted: self.audio.is_muted(),
            volume: self.config.volume,
            ..Controls::default()
        };

        if let Some(active) = &self.session {
            let session = active.as_session();
            controls.can_advance = session.can_advance();
            controls.can_retreat = session.can_retreat();
            controls.has_audio = session.audio_url().is_some();
            match active {
                ActiveSession::Quran(quran) => {
                    controls.repeat = Some(quran.repeat_mode());
                    controls.highlighting = quran.highlighting_enabled();
                }
                ActiveSession::Jawshan(jawshan) => {
                    controls.can_next_section = jawshan.can_go_next_section();
                    controls.can_prev_section = jawshan.can_go_prev_section();
                }
                ActiveSession::Invocations(_) | ActiveSession::Adhan(_) => {}
            }
        }

        ViewState {
            screen: self.screen,
            notice: self.notice.clone(),
            countdown_secs: self.countdown.as_ref().map(Countdown::remaining_secs),
            controls,
        }
    }
}
