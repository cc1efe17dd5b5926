//! Jawshan litany session
//!
//! One section is loaded at a time. The line cursor walks the ten lines and
//! then the closing phrase; stepping past either end asks the host for the
//! neighbouring section, which arrives through [`JawshanSession::load_section`].

use crate::audio::AudioBackend;
use crate::model::{
    ContentType, JawshanSection, NavigationCursor, Track, JAWSHAN_FIRST_SECTION, JAWSHAN_LAST_SECTION,
};

use super::{Navigation, Session, SessionOutcome, StoreWriter};

pub struct JawshanSession {
    section: JawshanSection,
    cursor: NavigationCursor,
    /// Last section to reach by auto-advance when section audio ends.
    range_end: Option<u32>,
    writer: StoreWriter,
}

impl JawshanSession {
    pub fn new(section: JawshanSection, range_end: Option<u32>, writer: StoreWriter) -> Self {
        let cursor = NavigationCursor::start(&section);
        let session = Self {
            section,
            cursor,
            range_end,
            writer,
        };
        session.writer.set_track(session.current_track());
        session
    }

    pub fn initial_track(section: &JawshanSection) -> Track {
        section_track(section, NavigationCursor::start(section))
    }

    pub fn section_number(&self) -> u32 {
        self.section.section_number
    }

    pub fn line_index(&self) -> usize {
        self.cursor.sub_index.min(self.section.lines.len().saturating_sub(1))
    }

    pub fn at_closing_phrase(&self) -> bool {
        self.cursor.sub_index >= self.section.lines.len()
    }

    pub fn can_go_next_section(&self) -> bool {
        self.section.section_number < JAWSHAN_LAST_SECTION
    }

    pub fn can_go_prev_section(&self) -> bool {
        self.section.section_number > JAWSHAN_FIRST_SECTION
    }

    pub fn next_section_request(&self) -> Navigation {
        if self.can_go_next_section() {
            Navigation::SectionRequested(self.section.section_number + 1)
        } else {
            Navigation::Unchanged
        }
    }

    pub fn prev_section_request(&self) -> Navigation {
        if self.can_go_prev_section() {
            Navigation::SectionRequested(self.section.section_number - 1)
        } else {
            Navigation::Unchanged
        }
    }

    pub fn go_to_next_line(&mut self) -> Navigation {
        if self.at_closing_phrase() {
            return self.next_section_request();
        }
        self.cursor = self.cursor.advance(&self.section);
        self.writer.set_track(self.current_track());
        Navigation::Moved
    }

    pub fn go_to_prev_line(&mut self) -> Navigation {
        if self.cursor.is_at_start(&self.section) {
            return self.prev_section_request();
        }
        self.cursor = self.cursor.retreat(&self.section);
        self.writer.set_track(self.current_track());
        Navigation::Moved
    }

    pub fn reset_section(&mut self) {
        self.cursor = NavigationCursor::start(&self.section);
        self.writer.set_track(self.current_track());
    }

    /// Replace the current section. The line cursor always starts over.
    pub fn load_section(&mut self, section: JawshanSection) {
        tracing::debug!(
            from = self.section.section_number,
            to = section.section_number,
            "Jawshan section changed"
        );
        self.section = section;
        self.reset_section();
    }
}

fn section_track(section: &JawshanSection, cursor: NavigationCursor) -> Track {
    let title = format!("Jawshan Kabir · Section {}", section.section_number);
    let (line, subtitle) = match section.lines.get(cursor.sub_index) {
        Some(line) => (
            line,
            format!("Line {}/{}", cursor.sub_index + 1, section.lines.len()),
        ),
        None => (&section.closing_phrase, "Closing phrase".to_string()),
    };

    let track = Track::new(title, subtitle).with_arabic(line.arabic.clone());
    match &line.translation {
        Some(translation) => track.with_translation(translation.clone()),
        None => track,
    }
}

impl Session for JawshanSession {
    fn content_type(&self) -> ContentType {
        ContentType::Jawshan
    }

    fn current_track(&self) -> Track {
        section_track(&self.section, self.cursor)
    }

    fn audio_url(&self) -> Option<&str> {
        self.section.audio_url.as_deref()
    }

    fn advance(&mut self, _audio: &mut dyn AudioBackend) -> Navigation {
        self.go_to_next_line()
    }

    fn retreat(&mut self, _audio: &mut dyn AudioBackend) -> Navigation {
        self.go_to_prev_line()
    }

    fn reset(&mut self, _audio: &mut dyn AudioBackend) {
        self.reset_section();
    }

    fn can_advance(&self) -> bool {
        !self.at_closing_phrase() || self.can_go_next_section()
    }

    fn can_retreat(&self) -> bool {
        !self.cursor.is_at_start(&self.section) || self.can_go_prev_section()
    }

    fn on_time_update(&mut self, position_secs: f64, duration_secs: f64) {
        self.writer.set_progress(position_secs, duration_secs);
    }

    fn on_ended(&mut self, _audio: &mut dyn AudioBackend) -> SessionOutcome {
        match self.range_end {
            Some(end) if self.section.section_number < end.min(JAWSHAN_LAST_SECTION) => {
                SessionOutcome::LoadSection(self.section.section_number + 1)
            }
            _ => {
                self.writer.set_playing(false);
                SessionOutcome::Finished
            }
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
    use crate::model::{JawshanLine, PlaybackStateStore, JAWSHAN_LINES_PER_SECTION};

    fn section(number: u32) -> JawshanSection {
        JawshanSection {
            section_number: number,
            lines: (0..JAWSHAN_LINES_PER_SECTION)
                .map(|i| JawshanLine {
                    arabic: format!("{}:{}", number, i),
                    translation: None,
                })
                .collect(),
            closing_phrase: JawshanLine {
                arabic: "سبحانك يا لا إله إلا أنت".to_string(),
                translation: Some("Glory be to You".to_string()),
            },
            audio_url: Some(format!("https://audio.test/jawshan/{}.mp3", number)),
        }
    }

    fn session(number: u32, range_end: Option<u32>) -> (JawshanSession, PlaybackStateStore) {
        let store = PlaybackStateStore::new();
        let section = section(number);
        let writer = StoreWriter::claim(&store, ContentType::Jawshan, JawshanSession::initial_track(&section), 0.0);
        (JawshanSession::new(section, range_end, writer), store)
    }

    #[test]
    fn last_line_then_closing_phrase_then_section_request() {
        let (mut jawshan, store) = session(7, None);
        for _ in 0..9 {
            assert_eq!(jawshan.go_to_next_line(), Navigation::Moved);
        }
        assert_eq!(jawshan.line_index(), 9);
        assert!(!jawshan.at_closing_phrase());

        assert_eq!(jawshan.go_to_next_line(), Navigation::Moved);
        assert!(jawshan.at_closing_phrase());
        assert_eq!(jawshan.section_number(), 7);
        assert_eq!(store.snapshot().current_track.unwrap().subtitle, "Closing phrase");

        assert_eq!(jawshan.go_to_next_line(), Navigation::SectionRequested(8));
        assert_eq!(jawshan.section_number(), 7);
    }

    #[test]
    fn prev_from_closing_phrase_returns_to_last_line() {
        let (mut jawshan, _store) = session(3, None);
        for _ in 0..10 {
            jawshan.go_to_next_line();
        }
        jawshan.go_to_prev_line();
        assert!(!jawshan.at_closing_phrase());
        assert_eq!(jawshan.line_index(), 9);
    }

    #[test]
    fn prev_from_first_line_requests_previous_section() {
        let (mut jawshan, _store) = session(3, None);
        assert_eq!(jawshan.go_to_prev_line(), Navigation::SectionRequested(2));
    }

    #[test]
    fn section_bounds_are_no_ops() {
        let (mut first, _store) = session(1, None);
        assert!(!first.can_go_prev_section());
        assert_eq!(first.go_to_prev_line(), Navigation::Unchanged);
        assert_eq!(first.prev_section_request(), Navigation::Unchanged);

        let (mut last, _store) = session(100, None);
        for _ in 0..10 {
            last.go_to_next_line();
        }
        assert!(!last.can_go_next_section());
        assert!(!last.can_advance());
        assert_eq!(last.go_to_next_line(), Navigation::Unchanged);
        assert_eq!(last.section_number(), 100);
    }

    #[test]
    fn loading_a_section_resets_the_line_cursor() {
        let (mut jawshan, _store) = session(4, None);
        for _ in 0..10 {
            jawshan.go_to_next_line();
        }
        jawshan.load_section(section(5));
        assert_eq!(jawshan.section_number(), 5);
        assert_eq!(jawshan.line_index(), 0);
        assert!(!jawshan.at_closing_phrase());
    }

    #[test]
    fn reset_section_returns_to_the_first_line() {
        let (mut jawshan, store) = session(9, None);
        for _ in 0..4 {
            jawshan.go_to_next_line();
        }
        jawshan.reset_section();
        assert_eq!(jawshan.line_index(), 0);
        assert_eq!(store.snapshot().current_track.unwrap().subtitle, "Line 1/10");
    }

    #[test]
    fn audio_end_auto_advances_within_range() {
        let mut audio = SimulatedAudio::new();
        let (mut jawshan, store) = session(10, Some(12));
        assert_eq!(jawshan.on_ended(&mut audio), SessionOutcome::LoadSection(11));

        jawshan.load_section(section(12));
        jawshan.writer().set_playing(true);
        assert_eq!(jawshan.on_ended(&mut audio), SessionOutcome::Finished);
        assert!(!store.snapshot().is_playing);
    }
}
