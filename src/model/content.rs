//! Devotional content as delivered by the content source

use serde::{Deserialize, Serialize};

use super::cursor::StepRange;
use super::timing::TimingEntry;

pub const JAWSHAN_FIRST_SECTION: u32 = 1;
pub const JAWSHAN_LAST_SECTION: u32 = 100;
pub const JAWSHAN_LINES_PER_SECTION: usize = 10;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Verse {
    pub number: u32,
    pub arabic: String,
    #[serde(default)]
    pub translation: Option<String>,
}

/// A chapter with its recitation for one reciter
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    pub number: u32,
    pub name: String,
    pub reciter: String,
    pub audio_url: String,
    pub verses: Vec<Verse>,
    #[serde(default)]
    pub timings: Vec<TimingEntry>,
}

/// Chapter text, independent of the reciter
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChapterText {
    pub number: u32,
    pub name: String,
    pub verses: Vec<Verse>,
}

/// One reciter's audio for a chapter, with its verse timings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Recitation {
    pub reciter: String,
    pub audio_url: String,
    #[serde(default)]
    pub timings: Vec<TimingEntry>,
}

impl Chapter {
    pub fn from_parts(text: ChapterText, recitation: Recitation) -> Self {
        Self {
            number: text.number,
            name: text.name,
            reciter: recitation.reciter,
            audio_url: recitation.audio_url,
            verses: text.verses,
            timings: recitation.timings,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InvocationItem {
    pub arabic: String,
    pub transliteration: String,
    pub translation: String,
    pub repetitions: u32,
    #[serde(default)]
    pub source: Option<String>,
}

/// Post-prayer invocations for one prayer, with an optional recitation of the whole set
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InvocationSet {
    pub prayer: String,
    #[serde(default)]
    pub audio_url: Option<String>,
    pub items: Vec<InvocationItem>,
}

impl StepRange for [InvocationItem] {
    fn item_count(&self) -> usize {
        self.len()
    }

    fn first_step(&self, _index: usize) -> usize {
        1
    }

    fn last_step(&self, index: usize) -> usize {
        self.get(index).map_or(1, |item| item.repetitions.max(1) as usize)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JawshanLine {
    pub arabic: String,
    #[serde(default)]
    pub translation: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JawshanSection {
    pub section_number: u32,
    pub lines: Vec<JawshanLine>,
    pub closing_phrase: JawshanLine,
    #[serde(default)]
    pub audio_url: Option<String>,
}

impl JawshanSection {
    pub fn is_valid_number(section_number: u32) -> bool {
        (JAWSHAN_FIRST_SECTION..=JAWSHAN_LAST_SECTION).contains(&section_number)
    }
}

/// A section is one item whose steps are its lines followed by the closing
/// phrase; step `lines.len()` is the closing phrase.
impl StepRange for JawshanSection {
    fn item_count(&self) -> usize {
        1
    }

    fn first_step(&self, _index: usize) -> usize {
        0
    }

    fn last_step(&self, _index: usize) -> usize {
        self.lines.len()
    }
}

/// Audio for one call to prayer
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AdhanAudio {
    pub prayer: String,
    pub call_url: String,
    #[serde(default)]
    pub supplication_url: Option<String>,
    #[serde(default)]
    pub supplication_text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NavigationCursor;

    #[test]
    fn zero_repetitions_count_as_one_step() {
        let items = vec![InvocationItem {
            arabic: "أستغفر الله".to_string(),
            transliteration: "Astaghfirullah".to_string(),
            translation: "I seek forgiveness from Allah".to_string(),
            repetitions: 0,
            source: None,
        }];
        assert_eq!(items.as_slice().last_step(0), 1);
    }

    #[test]
    fn section_steps_end_on_closing_phrase() {
        let section = JawshanSection {
            section_number: 1,
            lines: (0..JAWSHAN_LINES_PER_SECTION)
                .map(|i| JawshanLine {
                    arabic: format!("line {}", i),
                    translation: None,
                })
                .collect(),
            closing_phrase: JawshanLine {
                arabic: "closing".to_string(),
                translation: None,
            },
            audio_url: None,
        };
        let mut cursor = NavigationCursor::start(&section);
        for _ in 0..JAWSHAN_LINES_PER_SECTION {
            cursor = cursor.advance(&section);
        }
        assert_eq!(cursor.sub_index, JAWSHAN_LINES_PER_SECTION);
        assert!(cursor.is_at_end(&section));
    }

    #[test]
    fn section_numbers_are_bounded() {
        assert!(!JawshanSection::is_valid_number(0));
        assert!(JawshanSection::is_valid_number(1));
        assert!(JawshanSection::is_valid_number(100));
        assert!(!JawshanSection::is_valid_number(101));
    }
}
