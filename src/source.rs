//! Content source collaborators
//!
//! The engine asks a [`ContentSource`] for chapter text, recitations,
//! invocation tables, litany sections and adhan audio. Failures are returned
//! as they are; retrying is the caller's decision.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::error::{PlayerError, Result};
use crate::model::{AdhanAudio, Chapter, ChapterText, InvocationSet, JawshanSection, Recitation};

#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn chapter_text(&self, chapter: u32) -> Result<ChapterText>;

    async fn recitation(&self, chapter: u32, reciter: &str) -> Result<Recitation>;

    async fn invocations(&self, prayer: &str) -> Result<InvocationSet>;

    async fn jawshan_section(&self, section: u32) -> Result<JawshanSection>;

    async fn adhan(&self, prayer: &str) -> Result<AdhanAudio>;

    /// Chapter text and recitation, fetched together.
    async fn chapter(&self, chapter: u32, reciter: &str) -> Result<Chapter> {
        let (text, recitation) =
            futures::try_join!(self.chapter_text(chapter), self.recitation(chapter, reciter))?;
        Ok(Chapter::from_parts(text, recitation))
    }
}

/// Reads content from JSON documents under a directory:
///
/// ```text
/// quran/<chapter>/chapter.json      ChapterText
/// quran/<chapter>/<reciter>.json    Recitation
/// invocations/<prayer>.json         InvocationSet
/// jawshan/<section>.json            JawshanSection
/// adhan/<prayer>.json               AdhanAudio
/// ```
pub struct JsonContentSource {
    root: PathBuf,
}

impl JsonContentSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    async fn read<T: DeserializeOwned>(&self, relative: PathBuf, what: String) -> Result<T> {
        let path = self.root.join(relative);
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(PlayerError::ContentNotFound(what));
            }
            Err(e) => return Err(PlayerError::fetch(what, e)),
        };
        let result = serde_json::from_str(&content).map_err(|e| PlayerError::fetch(what.clone(), e));
        crate::log_fetch_result!(what, result);
        result
    }
}

/// Reject names that would escape the content directory.
fn checked_name<'a>(kind: &str, name: &'a str) -> Result<&'a str> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(name)
    } else {
        Err(PlayerError::InvalidSelection(format!("{} '{}'", kind, name)))
    }
}

#[async_trait]
impl ContentSource for JsonContentSource {
    async fn chapter_text(&self, chapter: u32) -> Result<ChapterText> {
        let relative = PathBuf::from("quran").join(chapter.to_string()).join("chapter.json");
        self.read(relative, format!("chapter {}", chapter)).await
    }

    async fn recitation(&self, chapter: u32, reciter: &str) -> Result<Recitation> {
        let reciter = checked_name("reciter", reciter)?;
        let relative = PathBuf::from("quran")
            .join(chapter.to_string())
            .join(format!("{}.json", reciter));
        self.read(relative, format!("recitation of chapter {} by {}", chapter, reciter))
            .await
    }

    async fn invocations(&self, prayer: &str) -> Result<InvocationSet> {
        let prayer = checked_name("prayer", prayer)?;
        let relative = PathBuf::from("invocations").join(format!("{}.json", prayer));
        self.read(relative, format!("invocations for {}", prayer)).await
    }

    async fn jawshan_section(&self, section: u32) -> Result<JawshanSection> {
        if !JawshanSection::is_valid_number(section) {
            return Err(PlayerError::ContentNotFound(format!("jawshan section {}", section)));
        }
        let relative = PathBuf::from("jawshan").join(format!("{}.json", section));
        self.read(relative, format!("jawshan section {}", section)).await
    }

    async fn adhan(&self, prayer: &str) -> Result<AdhanAudio> {
        let prayer = checked_name("prayer", prayer)?;
        let relative = PathBuf::from("adhan").join(format!("{}.json", prayer));
        self.read(relative, format!("adhan for {}", prayer)).await
    }
}

/// In-memory content, for embedding static tables and for tests
#[derive(Default)]
pub struct MemoryContentSource {
    chapters: HashMap<u32, ChapterText>,
    recitations: HashMap<(u32, String), Recitation>,
    invocations: HashMap<String, InvocationSet>,
    jawshan: HashMap<u32, JawshanSection>,
    adhan: HashMap<String, AdhanAudio>,
    offline: AtomicBool,
}

impl MemoryContentSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_chapter(mut self, chapter: Chapter) -> Self {
        let text = ChapterText {
            number: chapter.number,
            name: chapter.name,
            verses: chapter.verses,
        };
        let recitation = Recitation {
            reciter: chapter.reciter.clone(),
            audio_url: chapter.audio_url,
            timings: chapter.timings,
        };
        self.recitations.insert((chapter.number, chapter.reciter), recitation);
        self.chapters.insert(chapter.number, text);
        self
    }

    pub fn with_invocations(mut self, set: InvocationSet) -> Self {
        self.invocations.insert(set.prayer.to_lowercase(), set);
        self
    }

    pub fn with_jawshan_section(mut self, section: JawshanSection) -> Self {
        self.jawshan.insert(section.section_number, section);
        self
    }

    pub fn with_adhan(mut self, adhan: AdhanAudio) -> Self {
        self.adhan.insert(adhan.prayer.to_lowercase(), adhan);
        self
    }

    /// While offline every fetch fails as a network error would.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check_online(&self, what: &str) -> Result<()> {
        if self.offline.load(Ordering::SeqCst) {
            Err(PlayerError::fetch(what, "content source offline"))
        } else {
            Ok(())
        }
    }
}

fn found<T: Clone>(value: Option<&T>, what: String) -> Result<T> {
    value.cloned().ok_or(PlayerError::ContentNotFound(what))
}

#[async_trait]
impl ContentSource for MemoryContentSource {
    async fn chapter_text(&self, chapter: u32) -> Result<ChapterText> {
        let what = format!("chapter {}", chapter);
        self.check_online(&what)?;
        found(self.chapters.get(&chapter), what)
    }

    async fn recitation(&self, chapter: u32, reciter: &str) -> Result<Recitation> {
        let what = format!("recitation of chapter {} by {}", chapter, reciter);
        self.check_online(&what)?;
        found(self.recitations.get(&(chapter, reciter.to_string())), what)
    }

    async fn invocations(&self, prayer: &str) -> Result<InvocationSet> {
        let what = format!("invocations for {}", prayer);
        self.check_online(&what)?;
        found(self.invocations.get(&prayer.to_lowercase()), what)
    }

    async fn jawshan_section(&self, section: u32) -> Result<JawshanSection> {
        let what = format!("jawshan section {}", section);
        self.check_online(&what)?;
        found(self.jawshan.get(&section), what)
    }

    async fn adhan(&self, prayer: &str) -> Result<AdhanAudio> {
        let what = format!("adhan for {}", prayer);
        self.check_online(&what)?;
        found(self.adhan.get(&prayer.to_lowercase()), what)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{JawshanLine, TimingEntry, Verse};
    use std::path::Path;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    #[tokio::test]
    async fn json_source_assembles_a_chapter() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "quran/112/chapter.json",
            r#"{ "number": 112, "name": "Al-Ikhlas", "verses": [
                { "number": 1, "arabic": "قل هو الله أحد", "translation": "Say, He is Allah, the One" },
                { "number": 2, "arabic": "الله الصمد" }
            ] }"#,
        );
        write(
            dir.path(),
            "quran/112/alafasy.json",
            r#"{ "reciter": "Alafasy", "audio_url": "https://audio.test/112.mp3",
                 "timings": [ { "verse_index": 0, "timestamp_from_ms": 0 },
                              { "verse_index": 1, "timestamp_from_ms": 4200, "timestamp_to_ms": 7000 } ] }"#,
        );

        let source = JsonContentSource::new(dir.path());
        let chapter = source.chapter(112, "alafasy").await.unwrap();
        assert_eq!(chapter.name, "Al-Ikhlas");
        assert_eq!(chapter.verses.len(), 2);
        assert_eq!(chapter.verses[1].translation, None);
        assert_eq!(
            chapter.timings[1],
            TimingEntry {
                verse_index: 1,
                timestamp_from_ms: 4200,
                timestamp_to_ms: Some(7000)
            }
        );
    }

    #[tokio::test]
    async fn json_source_distinguishes_missing_from_broken() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "invocations/isha.json", "{ broken");
        let source = JsonContentSource::new(dir.path());

        assert!(matches!(
            source.invocations("fajr").await,
            Err(PlayerError::ContentNotFound(_))
        ));
        assert!(matches!(source.invocations("isha").await, Err(PlayerError::Fetch { .. })));
    }

    #[tokio::test]
    async fn json_source_rejects_path_like_names() {
        let dir = tempfile::tempdir().unwrap();
        let source = JsonContentSource::new(dir.path());
        assert!(matches!(
            source.adhan("../secrets").await,
            Err(PlayerError::InvalidSelection(_))
        ));
    }

    #[tokio::test]
    async fn out_of_range_sections_are_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let source = JsonContentSource::new(dir.path());
        assert!(matches!(
            source.jawshan_section(101).await,
            Err(PlayerError::ContentNotFound(_))
        ));
    }

    #[tokio::test]
    async fn memory_source_goes_offline() {
        let source = MemoryContentSource::new().with_jawshan_section(JawshanSection {
            section_number: 1,
            lines: vec![JawshanLine {
                arabic: "اللهم إني أسألك باسمك".to_string(),
                translation: None,
            }],
            closing_phrase: JawshanLine {
                arabic: "سبحانك".to_string(),
                translation: None,
            },
            audio_url: None,
        });
        assert!(source.jawshan_section(1).await.is_ok());

        source.set_offline(true);
        assert!(matches!(source.jawshan_section(1).await, Err(PlayerError::Fetch { .. })));
    }

    #[tokio::test]
    async fn memory_source_round_trips_a_chapter() {
        let chapter = Chapter {
            number: 1,
            name: "Al-Fatiha".to_string(),
            reciter: "husary".to_string(),
            audio_url: "https://audio.test/001.mp3".to_string(),
            verses: vec![Verse {
                number: 1,
                arabic: "بسم الله الرحمن الرحيم".to_string(),
                translation: None,
            }],
            timings: Vec::new(),
        };
        let source = MemoryContentSource::new().with_chapter(chapter.clone());
        assert_eq!(source.chapter(1, "husary").await.unwrap(), chapter);
        assert!(matches!(
            source.chapter(1, "sudais").await,
            Err(PlayerError::ContentNotFound(_))
        ));
    }
}
