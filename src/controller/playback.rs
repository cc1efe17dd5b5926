//! Playback control methods

use crate::model::Screen;
use crate::session::resume;

use super::{Notice, PlayerController};

pub const VOLUME_STEP: u8 = 5;

impl PlayerController {
    pub fn toggle_playback(&mut self) {
        let Some(active) = self.session.as_ref() else {
            return;
        };
        if self.active_source.is_none() {
            tracing::debug!("Session has no audio, ignoring play/pause");
            return;
        }
        let session = active.as_session();

        if self.audio.is_playing() {
            self.audio.pause();
            session.writer().set_playing(false);
            tracing::info!(action = "paused", "Playback toggled");
        } else {
            match resume(self.audio.as_mut(), session.writer()) {
                Ok(()) => {
                    self.notice = None;
                    tracing::info!(action = "resumed", "Playback toggled");
                }
                Err(e) => self.notice = Some(Notice::from_error(&e)),
            }
        }
    }

    pub fn toggle_mute(&mut self) {
        let muted = !self.audio.is_muted();
        self.audio.set_muted(muted);
        tracing::debug!(muted, "Mute toggled");
    }

    pub fn volume_up(&mut self) {
        self.set_volume(self.config.volume.saturating_add(VOLUME_STEP).min(100));
    }

    pub fn volume_down(&mut self) {
        self.set_volume(self.config.volume.saturating_sub(VOLUME_STEP));
    }

    fn set_volume(&mut self, volume: u8) {
        if volume == self.config.volume {
            return;
        }
        self.config.volume = volume;
        self.audio.set_volume(volume);
        tracing::debug!(volume, "Volume changed");
    }

    /// Leave the full player; playback keeps running in the mini-player.
    pub fn minimize(&mut self) {
        if self.session.is_none() {
            return;
        }
        self.store.set_minimized(true);
        self.set_screen(Screen::Idle);
    }

    pub fn expand(&mut self) {
        if self.session.is_none() {
            return;
        }
        self.store.set_minimized(false);
        self.set_screen(Screen::Player);
    }

    /// Tear down the active session and clear the store.
    pub fn stop(&mut self) {
        self.audio.pause();
        self.audio.seek(0.0);
        self.active_source = None;
        self.pending_section = None;
        if let Some(active) = self.session.take() {
            tracing::info!(content_type = %active.as_session().content_type(), "Session stopped");
        }
        self.store.reset();
        self.set_screen(Screen::Idle);
    }
}
