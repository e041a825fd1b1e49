//! Core data model types for wkquiz.
//!
//! These mirror the slices of the WaniKani v2 resources that the quiz
//! actually reads. Unknown fields are ignored so API additions do not
//! break decoding.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kind of a subject, as reported in its `object` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubjectKind {
    Radical,
    Kanji,
    Vocabulary,
}

impl SubjectKind {
    /// Every kind, in the order the API documents them.
    pub const ALL: [SubjectKind; 3] = [
        SubjectKind::Radical,
        SubjectKind::Kanji,
        SubjectKind::Vocabulary,
    ];

    /// Whether subjects of this kind carry readings to quiz on.
    pub fn has_readings(self) -> bool {
        !matches!(self, SubjectKind::Radical)
    }
}

impl fmt::Display for SubjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubjectKind::Radical => write!(f, "radical"),
            SubjectKind::Kanji => write!(f, "kanji"),
            SubjectKind::Vocabulary => write!(f, "vocabulary"),
        }
    }
}

impl FromStr for SubjectKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "radical" | "r" => Ok(SubjectKind::Radical),
            "kanji" | "k" => Ok(SubjectKind::Kanji),
            "vocabulary" | "v" => Ok(SubjectKind::Vocabulary),
            other => Err(format!("unknown subject kind: {other}")),
        }
    }
}

/// A quizzable radical, kanji, or vocabulary entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    /// API identifier.
    pub id: u64,
    /// Which kind of subject this is.
    pub object: SubjectKind,
    /// The subject's payload.
    pub data: SubjectData,
}

/// The `data` block of a subject resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubjectData {
    /// Display text. Some radicals are image-only and have none.
    #[serde(default)]
    pub characters: Option<String>,
    /// Meaning candidates in API order.
    #[serde(default)]
    pub meanings: Vec<Meaning>,
    /// Learner-side synonyms and extra accepted meanings.
    #[serde(default)]
    pub auxiliary_meanings: Vec<AuxiliaryMeaning>,
    /// Reading candidates. Empty for radicals.
    #[serde(default)]
    pub readings: Vec<Reading>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meaning {
    pub meaning: String,
    #[serde(default)]
    pub primary: bool,
    #[serde(default)]
    pub accepted_answer: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuxiliaryMeaning {
    pub meaning: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub reading: String,
    #[serde(default)]
    pub primary: bool,
    #[serde(default)]
    pub accepted_answer: bool,
}

impl Subject {
    /// Display text, or the empty string for image-only subjects.
    pub fn characters(&self) -> &str {
        self.data.characters.as_deref().unwrap_or("")
    }

    /// Accepted primary meanings followed by every auxiliary meaning.
    pub fn accepted_meanings(&self) -> Vec<&str> {
        self.data
            .meanings
            .iter()
            .filter(|m| m.accepted_answer)
            .map(|m| m.meaning.as_str())
            .chain(self.data.auxiliary_meanings.iter().map(|m| m.meaning.as_str()))
            .collect()
    }

    /// Accepted readings in API order.
    pub fn accepted_readings(&self) -> Vec<&str> {
        self.data
            .readings
            .iter()
            .filter(|r| r.accepted_answer)
            .map(|r| r.reading.as_str())
            .collect()
    }
}

/// Evidence that the learner has reviewed a subject at least once.
///
/// Decoded from both `/reviews` and `/review_statistics`; only the
/// subject reference is read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewStatistic {
    #[serde(default)]
    pub id: u64,
    pub data: ReviewStatisticData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewStatisticData {
    pub subject_id: u64,
}

impl ReviewStatistic {
    pub fn subject_id(&self) -> u64 {
        self.data.subject_id
    }
}

/// The current account's name and level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub username: String,
    pub level: u32,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn meaning(text: &str, accepted: bool) -> Meaning {
        Meaning {
            meaning: text.into(),
            primary: accepted,
            accepted_answer: accepted,
        }
    }

    pub fn reading(text: &str, accepted: bool) -> Reading {
        Reading {
            reading: text.into(),
            primary: accepted,
            accepted_answer: accepted,
        }
    }

    pub fn radical(id: u64, characters: &str, meanings: &[&str]) -> Subject {
        Subject {
            id,
            object: SubjectKind::Radical,
            data: SubjectData {
                characters: Some(characters.into()),
                meanings: meanings.iter().map(|m| meaning(m, true)).collect(),
                auxiliary_meanings: vec![],
                readings: vec![],
            },
        }
    }

    pub fn kanji(id: u64, characters: &str, meanings: &[&str], readings: &[&str]) -> Subject {
        Subject {
            id,
            object: SubjectKind::Kanji,
            data: SubjectData {
                characters: Some(characters.into()),
                meanings: meanings.iter().map(|m| meaning(m, true)).collect(),
                auxiliary_meanings: vec![],
                readings: readings.iter().map(|r| reading(r, true)).collect(),
            },
        }
    }

    pub fn review(subject_id: u64) -> ReviewStatistic {
        ReviewStatistic {
            id: subject_id * 10,
            data: ReviewStatisticData { subject_id },
        }
    }
}
