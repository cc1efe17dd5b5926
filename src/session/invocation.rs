//! Post-prayer invocation session
//!
//! The cursor counts repetitions of each invocation (1-based). The optional
//! recitation of the whole set plays independently of the text cursor.

use crate::audio::AudioBackend;
use crate::model::{ContentType, InvocationSet, NavigationCursor, Track};

use super::{Navigation, Session, SessionOutcome, StoreWriter};

pub struct InvocationSession {
    set: InvocationSet,
    cursor: NavigationCursor,
    writer: StoreWriter,
}

impl InvocationSession {
    pub fn new(set: InvocationSet, writer: StoreWriter) -> Self {
        let cursor = NavigationCursor::start(set.items.as_slice());
        let session = Self { set, cursor, writer };
        session.writer.set_track(session.current_track());
        session
    }

    pub fn initial_track(set: &InvocationSet) -> Track {
        invocation_track(set, NavigationCursor::start(set.items.as_slice()))
    }

    pub fn cursor(&self) -> NavigationCursor {
        self.cursor
    }

    fn move_to(&mut self, cursor: NavigationCursor) -> Navigation {
        if cursor == self.cursor {
            return Navigation::Unchanged;
        }
        self.cursor = cursor;
        self.writer.set_track(self.current_track());
        Navigation::Moved
    }

    pub fn go_to_next(&mut self) -> Navigation {
        let next = self.cursor.advance(self.set.items.as_slice());
        self.move_to(next)
    }

    pub fn go_to_previous(&mut self) -> Navigation {
        let previous = self.cursor.retreat(self.set.items.as_slice());
        self.move_to(previous)
    }

    pub fn reset_current(&mut self) {
        self.cursor.sub_index = 1;
        self.writer.set_track(self.current_track());
    }

    /// "Next" is disabled on the final repetition of the final invocation.
    pub fn can_go_next(&self) -> bool {
        !self.cursor.is_at_end(self.set.items.as_slice())
    }

    pub fn can_go_previous(&self) -> bool {
        !self.cursor.is_at_start(self.set.items.as_slice())
    }
}

fn invocation_track(set: &InvocationSet, cursor: NavigationCursor) -> Track {
    let title = format!("{} invocations", set.prayer);
    match set.items.get(cursor.index) {
        Some(item) => {
            let subtitle = format!(
                "{} of {} · {}/{}",
                cursor.index + 1,
                set.items.len(),
                cursor.sub_index,
                item.repetitions.max(1)
            );
            Track::new(title, subtitle)
                .with_arabic(item.arabic.clone())
                .with_translation(format!("{} ({})", item.transliteration, item.translation))
        }
        None => Track::new(title, String::new()),
    }
}

impl Session for InvocationSession {
    fn content_type(&self) -> ContentType {
        ContentType::Invocations
    }

    fn current_track(&self) -> Track {
        invocation_track(&self.set, self.cursor)
    }

    fn audio_url(&self) -> Option<&str> {
        self.set.audio_url.as_deref()
    }

    fn advance(&mut self, _audio: &mut dyn AudioBackend) -> Navigation {
        self.go_to_next()
    }

    fn retreat(&mut self, _audio: &mut dyn AudioBackend) -> Navigation {
        self.go_to_previous()
    }

    fn reset(&mut self, _audio: &mut dyn AudioBackend) {
        self.reset_current();
    }

    fn can_advance(&self) -> bool {
        self.can_go_next()
    }

    fn can_retreat(&self) -> bool {
        self.can_go_previous()
    }

    fn on_time_update(&mut self, position_secs: f64, duration_secs: f64) {
        self.writer.set_progress(position_secs, duration_secs);
    }

    fn on_ended(&mut self, _audio: &mut dyn AudioBackend) -> SessionOutcome {
        self.writer.set_playing(false);
        SessionOutcome::Finished
    }

    fn writer(&self) -> &StoreWriter {
        &self.writer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{InvocationItem, PlaybackStateStore};

    fn item(name: &str, repetitions: u32) -> InvocationItem {
        InvocationItem {
            arabic: name.to_string(),
            transliteration: name.to_string(),
            translation: name.to_string(),
            repetitions,
            source: None,
        }
    }

    fn session(items: Vec<InvocationItem>) -> (InvocationSession, PlaybackStateStore) {
        let set = InvocationSet {
            prayer: "Fajr".to_string(),
            audio_url: None,
            items,
        };
        let store = PlaybackStateStore::new();
        let writer = StoreWriter::claim(&store, ContentType::Invocations, InvocationSession::initial_track(&set), 0.0);
        (InvocationSession::new(set, writer), store)
    }

    #[test]
    fn repetitions_are_counted_before_advancing() {
        let (mut invocations, _store) = session(vec![item("Astaghfirullah", 3), item("Ayat al-Kursi", 1)]);
        invocations.go_to_next();
        invocations.go_to_next();
        assert_eq!(invocations.cursor(), NavigationCursor { index: 0, sub_index: 3 });

        invocations.go_to_next();
        assert_eq!(invocations.cursor(), NavigationCursor { index: 1, sub_index: 1 });
    }

    #[test]
    fn thirty_three_steps_move_to_the_next_invocation() {
        let mut items: Vec<_> = (0..3).map(|i| item(&format!("opening {}", i), 1)).collect();
        items.push(item("SubhanAllah", 33));
        items.push(item("Alhamdulillah", 33));
        let (mut invocations, _store) = session(items);
        for _ in 0..3 {
            invocations.go_to_next();
        }
        assert_eq!(invocations.cursor(), NavigationCursor { index: 3, sub_index: 1 });

        for _ in 0..32 {
            invocations.go_to_next();
        }
        assert_eq!(invocations.cursor(), NavigationCursor { index: 3, sub_index: 33 });

        invocations.go_to_next();
        assert_eq!(invocations.cursor(), NavigationCursor { index: 4, sub_index: 1 });
    }

    #[test]
    fn previous_across_boundary_lands_on_full_count() {
        let (mut invocations, _store) = session(vec![item("SubhanAllah", 33), item("Allahu Akbar", 34)]);
        for _ in 0..33 {
            invocations.go_to_next();
        }
        assert_eq!(invocations.cursor(), NavigationCursor { index: 1, sub_index: 1 });

        invocations.go_to_previous();
        assert_eq!(invocations.cursor(), NavigationCursor { index: 0, sub_index: 33 });
    }

    #[test]
    fn next_is_disabled_on_the_final_repetition() {
        let (mut invocations, _store) = session(vec![item("La ilaha illallah", 2)]);
        invocations.go_to_next();
        assert!(!invocations.can_go_next());
        assert_eq!(invocations.go_to_next(), Navigation::Unchanged);
        assert_eq!(invocations.cursor(), NavigationCursor { index: 0, sub_index: 2 });
    }

    #[test]
    fn reset_keeps_the_invocation() {
        let (mut invocations, store) = session(vec![item("a", 1), item("SubhanAllah", 33)]);
        for _ in 0..10 {
            invocations.go_to_next();
        }
        invocations.reset_current();
        assert_eq!(invocations.cursor(), NavigationCursor { index: 1, sub_index: 1 });
        let track = store.snapshot().current_track.unwrap();
        assert_eq!(track.subtitle, "2 of 2 · 1/33");
    }

    #[test]
    fn track_follows_the_cursor() {
        let (mut invocations, store) = session(vec![item("a", 1), item("b", 1)]);
        invocations.go_to_next();
        let track = store.snapshot().current_track.unwrap();
        assert_eq!(track.arabic.as_deref(), Some("b"));
        assert_eq!(track.title, "Fajr invocations");
    }
}
