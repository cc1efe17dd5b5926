//! Quran recitation session
//!
//! The verse cursor follows the audio through the chapter's timing table.
//! Manual skips seek the audio and pin the chosen verse so that a time
//! update computed before the seek cannot drag the cursor back.

use crate::audio::AudioBackend;
use crate::model::{
    Chapter, ContentType, Direction, FlatSteps, NavigationCursor, RepeatMode, TimingTable, Track,
};

use super::{resume, Navigation, Session, SessionOutcome, StoreWriter};

/// Consecutive disagreeing ticks after which a pinned verse gives way.
pub const PIN_RELEASE_TICKS: u32 = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Pin {
    verse_index: usize,
    disagreements: u32,
}

pub struct QuranSession {
    chapter: Chapter,
    timings: TimingTable,
    cursor: NavigationCursor,
    repeat: RepeatMode,
    pin: Option<Pin>,
    writer: StoreWriter,
}

impl QuranSession {
    pub fn new(mut chapter: Chapter, writer: StoreWriter) -> Self {
        let timings = TimingTable::new(std::mem::take(&mut chapter.timings));
        let session = Self {
            chapter,
            timings,
            cursor: NavigationCursor::default(),
            repeat: RepeatMode::default(),
            pin: None,
            writer,
        };
        session.writer.set_track(session.current_track());
        session
    }

    /// Track for the first verse, used when claiming the store.
    pub fn initial_track(chapter: &Chapter) -> Track {
        verse_track(chapter, 0)
    }

    fn steps(&self) -> FlatSteps {
        FlatSteps(self.chapter.verses.len())
    }

    pub fn verse_index(&self) -> usize {
        self.cursor.index
    }

    pub fn verse_count(&self) -> usize {
        self.chapter.verses.len()
    }

    pub fn repeat_mode(&self) -> RepeatMode {
        self.repeat
    }

    pub fn highlighting_enabled(&self) -> bool {
        self.timings.drives_highlighting()
    }

    pub fn cycle_repeat_mode(&mut self) -> RepeatMode {
        self.repeat = self.repeat.next();
        tracing::debug!(repeat = ?self.repeat, "Repeat mode cycled");
        self.repeat
    }

    fn move_to(&mut self, verse_index: usize) {
        self.cursor = NavigationCursor::at(verse_index, &self.steps());
        self.writer.set_track(self.current_track());
    }

    /// Seek to the start of `verse_index` when the table knows it, and hold
    /// that verse against stale time updates.
    fn seek_to_verse(&mut self, verse_index: usize, audio: &mut dyn AudioBackend) {
        if let Some(entry) = self.timings.entry_for(verse_index) {
            audio.seek(entry.start_secs());
        }
        self.pin = Some(Pin {
            verse_index,
            disagreements: 0,
        });
        self.move_to(verse_index);
        self.writer.set_progress(audio.current_time(), audio.duration());
    }

    pub fn skip(&mut self, direction: Direction, audio: &mut dyn AudioBackend) -> Navigation {
        let steps = self.steps();
        let target = match direction {
            Direction::Forward => self.cursor.advance(&steps),
            Direction::Backward => self.cursor.retreat(&steps),
        };
        if target == self.cursor {
            return Navigation::Unchanged;
        }

        tracing::debug!(from = self.cursor.index, to = target.index, "Verse skip");
        self.seek_to_verse(target.index, audio);
        Navigation::Moved
    }
}

fn verse_track(chapter: &Chapter, index: usize) -> Track {
    let total = chapter.verses.len();
    match chapter.verses.get(index) {
        Some(verse) => {
            let track = Track::new(
                format!("{}. {}", chapter.number, chapter.name),
                format!("{} · Verse {}/{}", chapter.reciter, verse.number, total),
            )
            .with_arabic(verse.arabic.clone())
            .with_verse_number(verse.number);
            match &verse.translation {
                Some(translation) => track.with_translation(translation.clone()),
                None => track,
            }
        }
        None => Track::new(format!("{}. {}", chapter.number, chapter.name), chapter.reciter.clone()),
    }
}

impl Session for QuranSession {
    fn content_type(&self) -> ContentType {
        ContentType::Quran
    }

    fn current_track(&self) -> Track {
        verse_track(&self.chapter, self.cursor.index)
    }

    fn audio_url(&self) -> Option<&str> {
        Some(&self.chapter.audio_url)
    }

    fn advance(&mut self, audio: &mut dyn AudioBackend) -> Navigation {
        self.skip(Direction::Forward, audio)
    }

    fn retreat(&mut self, audio: &mut dyn AudioBackend) -> Navigation {
        self.skip(Direction::Backward, audio)
    }

    fn reset(&mut self, audio: &mut dyn AudioBackend) {
        tracing::debug!(from = self.cursor.index, "Verse reset");
        self.seek_to_verse(0, audio);
    }

    fn can_advance(&self) -> bool {
        !self.cursor.is_at_end(&self.steps())
    }

    fn can_retreat(&self) -> bool {
        !self.cursor.is_at_start(&self.steps())
    }

    fn on_time_update(&mut self, position_secs: f64, duration_secs: f64) {
        self.writer.set_progress(position_secs, duration_secs);

        let t_ms = (position_secs.max(0.0) * 1000.0).round() as u64;
        let Some(resolved) = self.timings.resolve(t_ms) else {
            return;
        };
        let resolved = resolved.min(self.verse_count().saturating_sub(1));

        if let Some(pin) = self.pin.as_mut() {
            if resolved == pin.verse_index {
                self.pin = None;
                return;
            }
            pin.disagreements += 1;
            if pin.disagreements < PIN_RELEASE_TICKS {
                tracing::trace!(resolved, pinned = pin.verse_index, t_ms, "Ignoring stale time update");
                return;
            }
            tracing::debug!(resolved, pinned = pin.verse_index, "Releasing pinned verse");
            self.pin = None;
        }

        if resolved != self.cursor.index {
            tracing::trace!(verse_index = resolved, t_ms, "Verse changed with audio");
            self.move_to(resolved);
        }
    }

    fn on_ended(&mut self, audio: &mut dyn AudioBackend) -> SessionOutcome {
        match self.repeat {
            RepeatMode::All => {
                audio.seek(0.0);
                self.pin = Some(Pin {
                    verse_index: 0,
                    disagreements: 0,
                });
                self.move_to(0);
                let _ = resume(audio, &self.writer);
                SessionOutcome::Continue
            }
            RepeatMode::One => {
                let verse_index = self.cursor.index;
                self.seek_to_verse(verse_index, audio);
                let _ = resume(audio, &self.writer);
                SessionOutcome::Continue
            }
            RepeatMode::Off => {
                self.writer.set_playing(false);
                SessionOutcome::Finished
            }
        }
    }

    fn writer(&self) -> &StoreWriter {
        &self.writer
    }
}
