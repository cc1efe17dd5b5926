//! Session selection parameters
//!
//! Screens hand over what to play as plain key/value pairs
//! (`type=quran chapter=36 reciter=alafasy`). They are parsed into a
//! [`Selection`] before any content is fetched.

use std::collections::HashMap;

use crate::error::{PlayerError, Result};
use crate::model::{ContentType, JawshanSection};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selection {
    Quran { chapter: u32, reciter: String },
    Invocations { prayer: String },
    Jawshan { section: u32, range_end: Option<u32> },
    Adhan { prayer: String },
}

impl Selection {
    pub fn content_type(&self) -> ContentType {
        match self {
            Selection::Quran { .. } => ContentType::Quran,
            Selection::Invocations { .. } => ContentType::Invocations,
            Selection::Jawshan { .. } => ContentType::Jawshan,
            Selection::Adhan { .. } => ContentType::Adhan,
        }
    }

    pub fn from_params(params: &HashMap<String, String>) -> Result<Self> {
        let kind = required(params, "type")?;
        match kind.to_ascii_lowercase().as_str() {
            "quran" => Ok(Selection::Quran {
                chapter: number(params, "chapter")?
                    .filter(|c| (1..=114).contains(c))
                    .ok_or_else(|| PlayerError::InvalidSelection("chapter must be within 1..=114".to_string()))?,
                reciter: required(params, "reciter")?.to_string(),
            }),
            "invocations" => Ok(Selection::Invocations {
                prayer: required(params, "prayer")?.to_ascii_lowercase(),
            }),
            "jawshan" => {
                let section = number(params, "section")?.unwrap_or(1);
                if !JawshanSection::is_valid_number(section) {
                    return Err(PlayerError::InvalidSelection(format!("section {} is out of range", section)));
                }
                let range_end = number(params, "range_end")?;
                if let Some(end) = range_end {
                    if !JawshanSection::is_valid_number(end) || end < section {
                        return Err(PlayerError::InvalidSelection(format!(
                            "range_end {} must be within {}..=100",
                            end, section
                        )));
                    }
                }
                Ok(Selection::Jawshan { section, range_end })
            }
            "adhan" => Ok(Selection::Adhan {
                prayer: required(params, "prayer")?.to_ascii_lowercase(),
            }),
            other => Err(PlayerError::InvalidSelection(format!("unknown content type '{}'", other))),
        }
    }

    /// Parse `key=value` arguments.
    pub fn from_args<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut params = HashMap::new();
        for arg in args {
            let arg = arg.as_ref();
            let (key, value) = arg
                .split_once('=')
                .ok_or_else(|| PlayerError::InvalidSelection(format!("expected key=value, got '{}'", arg)))?;
            params.insert(key.trim().to_string(), value.trim().to_string());
        }
        Self::from_params(&params)
    }
}

fn required<'a>(params: &'a HashMap<String, String>, key: &str) -> Result<&'a str> {
    params
        .get(key)
        .map(String::as_str)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| PlayerError::InvalidSelection(format!("missing '{}'", key)))
}

fn number(params: &HashMap<String, String>, key: &str) -> Result<Option<u32>> {
    params
        .get(key)
        .map(|value| {
            value
                .parse::<u32>()
                .map_err(|_| PlayerError::InvalidSelection(format!("'{}' is not a number: {}", key, value)))
        })
        .transpose()
}
