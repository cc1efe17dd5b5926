//! Session start/retry and content navigation

use crate::error::{PlayerError, Result};
use crate::model::{AdhanAudio, Chapter, ContentType, Direction, InvocationSet, JawshanSection, Screen};
use crate::selection::Selection;
use crate::session::{
    resume, ActiveSession, AdhanSession, InvocationSession, JawshanSession, Navigation, QuranSession, StoreWriter,
};

use super::{Notice, PlayerController};

/// Everything a session needs, fetched before the store is touched
enum LoadedContent {
    Quran(Chapter),
    Invocations(InvocationSet),
    Jawshan(JawshanSection, Option<u32>),
    Adhan(AdhanAudio),
}

impl PlayerController {
    /// Fetch the selected content and start a session on it. On failure the
    /// previous session and the store are left as they were.
    pub async fn start_session(&mut self, selection: Selection) -> Result<()> {
        tracing::info!(?selection, "Starting session");
        self.last_selection = Some(selection.clone());
        self.pending_section = None;

        match self.fetch_content(&selection).await {
            Ok(content) => {
                self.install(content);
                Ok(())
            }
            Err(e) => {
                tracing::error!(?selection, error = %e, "Failed to load content");
                self.notice = Some(Notice::from_error(&e));
                Err(e)
            }
        }
    }

    /// Re-request whatever failed to load: the section a page was heading
    /// to, otherwise the last selection.
    pub async fn retry(&mut self) -> Result<()> {
        if let Some((section, autoplay)) = self.pending_section.take() {
            tracing::debug!(section, "Retrying section");
            self.change_section(section, autoplay).await;
            return Ok(());
        }
        let Some(selection) = self.last_selection.clone() else {
            tracing::debug!("Nothing to retry");
            return Ok(());
        };
        self.start_session(selection).await
    }

    async fn fetch_content(&self, selection: &Selection) -> Result<LoadedContent> {
        match selection {
            Selection::Quran { chapter, reciter } => {
                let chapter_data = self.source.chapter(*chapter, reciter).await?;
                if chapter_data.verses.is_empty() {
                    return Err(PlayerError::ContentNotFound(format!("chapter {}", chapter)));
                }
                Ok(LoadedContent::Quran(chapter_data))
            }
            Selection::Invocations { prayer } => {
                let set = self.source.invocations(prayer).await?;
                if set.items.is_empty() {
                    return Err(PlayerError::ContentNotFound(format!("prayer '{}'", prayer)));
                }
                Ok(LoadedContent::Invocations(set))
            }
            Selection::Jawshan { section, range_end } => {
                let section_data = self.source.jawshan_section(*section).await?;
                Ok(LoadedContent::Jawshan(section_data, *range_end))
            }
            Selection::Adhan { prayer } => Ok(LoadedContent::Adhan(self.source.adhan(prayer).await?)),
        }
    }

    fn install(&mut self, content: LoadedContent) {
        // Silence the outgoing session before its lease is revoked.
        self.audio.pause();
        self.active_source = None;

        let session = match content {
            LoadedContent::Quran(chapter) => {
                let writer =
                    StoreWriter::claim(&self.store, ContentType::Quran, QuranSession::initial_track(&chapter), 0.0);
                ActiveSession::Quran(QuranSession::new(chapter, writer))
            }
            LoadedContent::Invocations(set) => {
                let writer = StoreWriter::claim(
                    &self.store,
                    ContentType::Invocations,
                    InvocationSession::initial_track(&set),
                    0.0,
                );
                ActiveSession::Invocations(InvocationSession::new(set, writer))
            }
            LoadedContent::Jawshan(section, range_end) => {
                let writer = StoreWriter::claim(
                    &self.store,
                    ContentType::Jawshan,
                    JawshanSession::initial_track(&section),
                    0.0,
                );
                ActiveSession::Jawshan(JawshanSession::new(section, range_end, writer))
            }
            LoadedContent::Adhan(adhan) => {
                let writer =
                    StoreWriter::claim(&self.store, ContentType::Adhan, AdhanSession::initial_track(&adhan), 0.0);
                ActiveSession::Adhan(AdhanSession::new(adhan, self.config.supplication_after_call, writer))
            }
        };

        // Invocation audio is an optional companion; the reader starts it.
        let autoplay = !matches!(session, ActiveSession::Invocations(_));
        tracing::info!(content_type = %session.as_session().content_type(), "Session started");

        self.session = Some(session);
        self.notice = None;
        self.pending_section = None;
        self.set_screen(Screen::Player);
        self.load_session_audio(autoplay);
    }

    /// Load the active session's audio, if it has any.
    pub(crate) fn load_session_audio(&mut self, autoplay: bool) {
        let Some(active) = self.session.as_mut() else {
            return;
        };
        let session = active.as_session_mut();

        let Some(url) = session.audio_url().map(str::to_string) else {
            self.audio.pause();
            self.active_source = None;
            session.writer().set_playing(false);
            return;
        };

        let source = self.audio.load(&url);
        tracing::debug!(url = %url, ?source, "Audio loaded");
        self.active_source = Some(source);
        session.writer().set_progress(0.0, self.audio.duration());

        if autoplay && let Err(e) = resume(self.audio.as_mut(), session.writer()) {
            self.notice = Some(Notice::from_error(&e));
        }
    }

    pub async fn next(&mut self) {
        self.navigate(Direction::Forward).await;
    }

    pub async fn previous(&mut self) {
        self.navigate(Direction::Backward).await;
    }

    async fn navigate(&mut self, direction: Direction) {
        let Some(active) = self.session.as_mut() else {
            return;
        };
        let session = active.as_session_mut();
        let navigation = match direction {
            Direction::Forward => session.advance(self.audio.as_mut()),
            Direction::Backward => session.retreat(self.audio.as_mut()),
        };
        tracing::debug!(?direction, ?navigation, "Navigate");

        if let Navigation::SectionRequested(section) = navigation {
            self.change_section(section, false).await;
        }
    }

    pub fn reset_position(&mut self) {
        if let Some(active) = self.session.as_mut() {
            active.as_session_mut().reset(self.audio.as_mut());
        }
    }

    pub async fn next_section(&mut self) {
        let request = match &self.session {
            Some(ActiveSession::Jawshan(jawshan)) => jawshan.next_section_request(),
            _ => return,
        };
        if let Navigation::SectionRequested(section) = request {
            self.change_section(section, false).await;
        }
    }

    pub async fn prev_section(&mut self) {
        let request = match &self.session {
            Some(ActiveSession::Jawshan(jawshan)) => jawshan.prev_section_request(),
            _ => return,
        };
        if let Navigation::SectionRequested(section) = request {
            self.change_section(section, false).await;
        }
    }

    /// Page the litany session to `section`. A failed fetch keeps the
    /// current section and shows a notice.
    pub(crate) async fn change_section(&mut self, section: u32, autoplay: bool) {
        if !matches!(self.session, Some(ActiveSession::Jawshan(_))) {
            return;
        }
        if !JawshanSection::is_valid_number(section) {
            tracing::warn!(section, "Ignoring out-of-range section");
            return;
        }

        let keep_playing = autoplay || self.audio.is_playing();
        match self.source.jawshan_section(section).await {
            Ok(section_data) => {
                if let Some(ActiveSession::Jawshan(jawshan)) = self.session.as_mut() {
                    jawshan.load_section(section_data);
                }
                tracing::info!(section, "Section loaded");
                self.notice = None;
                self.pending_section = None;
                self.load_session_audio(keep_playing);
            }
            Err(e) => {
                tracing::error!(section, error = %e, "Failed to load section");
                // An auto-advance failure leaves nothing playing.
                if autoplay && let Some(active) = &self.session {
                    active.as_session().writer().set_playing(false);
                }
                self.notice = Some(Notice::from_error(&e));
                self.pending_section = Some((section, autoplay));
            }
        }
    }

    pub fn cycle_repeat(&mut self) {
        if let Some(ActiveSession::Quran(quran)) = self.session.as_mut() {
            let mode = quran.cycle_repeat_mode();
            tracing::debug!(mode = mode.label(), "Repeat mode changed");
        }
    }
}
