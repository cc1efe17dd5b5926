//! Audio notifications and the periodic tick

use std::time::Duration;

use crate::audio::AudioEvent;
use crate::model::Screen;
use crate::session::SessionOutcome;

use super::{Countdown, PlayerController};

impl PlayerController {
    /// Route one audio notification to the active session. Notifications
    /// from any other source belong to a torn-down session and are dropped.
    pub async fn handle_audio_event(&mut self, event: AudioEvent) {
        if self.active_source != Some(event.source()) {
            tracing::trace!(?event, "Dropping notification from an inactive source");
            return;
        }
        let Some(active) = self.session.as_mut() else {
            return;
        };

        match event {
            AudioEvent::TimeUpdate { position_secs, .. } => {
                let duration = self.audio.duration();
                active.as_session_mut().on_time_update(position_secs, duration);
            }
            AudioEvent::Ended { .. } => {
                let outcome = active.as_session_mut().on_ended(self.audio.as_mut());
                tracing::debug!(?outcome, "Audio ended");
                match outcome {
                    SessionOutcome::Continue => self.active_source = self.audio.source(),
                    SessionOutcome::Finished => {}
                    SessionOutcome::LoadSection(section) => self.change_section(section, true).await,
                    SessionOutcome::AdhanComplete => self.finish_adhan(),
                }
            }
        }
    }

    /// Drive the iqamah countdown and the audio clock by `elapsed`. The
    /// countdown goes first so one started by this tick begins at full length.
    pub async fn tick(&mut self, elapsed: Duration) {
        if let Some(countdown) = self.countdown.as_mut()
            && countdown.tick(elapsed)
        {
            tracing::info!("Iqamah countdown finished");
            self.set_screen(Screen::Idle);
        }

        for event in self.audio.tick(elapsed) {
            self.handle_audio_event(event).await;
        }
    }

    fn finish_adhan(&mut self) {
        self.stop();
        if self.config.congregational_mode {
            tracing::info!(secs = self.config.iqamah_countdown_secs, "Starting iqamah countdown");
            self.countdown = Some(Countdown::new(self.config.iqamah_countdown_secs));
            self.set_screen(Screen::IqamahCountdown);
        }
    }
}
