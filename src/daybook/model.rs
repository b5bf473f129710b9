use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// The fixed mood scale, from worst to best.
///
/// Serialized as the emoji glyph so existing collections stay readable,
/// rendered as plain text in exported documents for portability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mood {
    #[serde(rename = "😭")]
    Devastated,
    #[serde(rename = "😔")]
    Down,
    #[serde(rename = "😐")]
    Neutral,
    #[serde(rename = "🙂")]
    Content,
    #[serde(rename = "😊")]
    Happy,
    #[serde(rename = "😄")]
    Elated,
}

impl Mood {
    pub fn glyph(&self) -> &'static str {
        match self {
            Mood::Devastated => "😭",
            Mood::Down => "😔",
            Mood::Neutral => "😐",
            Mood::Content => "🙂",
            Mood::Happy => "😊",
            Mood::Elated => "😄",
        }
    }

    /// Portable textual form used in exported documents.
    pub fn label(&self) -> &'static str {
        match self {
            Mood::Devastated => "devastated",
            Mood::Down => "down",
            Mood::Neutral => "neutral",
            Mood::Content => "content",
            Mood::Happy => "happy",
            Mood::Elated => "elated",
        }
    }

    pub fn all() -> &'static [Mood] {
        &[
            Mood::Devastated,
            Mood::Down,
            Mood::Neutral,
            Mood::Content,
            Mood::Happy,
            Mood::Elated,
        ]
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

impl FromStr for Mood {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "😭" | "devastated" => Ok(Mood::Devastated),
            "😔" | "down" => Ok(Mood::Down),
            "😐" | "neutral" => Ok(Mood::Neutral),
            "🙂" | "content" => Ok(Mood::Content),
            "😊" | "happy" => Ok(Mood::Happy),
            "😄" | "elated" => Ok(Mood::Elated),
            other => Err(format!("Unknown mood: {}", other)),
        }
    }
}

/// The closed tag vocabulary. Unknown tags are rejected at the boundary
/// rather than surfacing later as free-form strings at render time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tag {
    Personal,
    Work,
    Ideas,
    Goals,
    Reflections,
    Gratitude,
    Challenges,
}

impl Tag {
    pub fn name(&self) -> &'static str {
        match self {
            Tag::Personal => "Personal",
            Tag::Work => "Work",
            Tag::Ideas => "Ideas",
            Tag::Goals => "Goals",
            Tag::Reflections => "Reflections",
            Tag::Gratitude => "Gratitude",
            Tag::Challenges => "Challenges",
        }
    }

    pub fn all() -> &'static [Tag] {
        &[
            Tag::Personal,
            Tag::Work,
            Tag::Ideas,
            Tag::Goals,
            Tag::Reflections,
            Tag::Gratitude,
            Tag::Challenges,
        ]
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Tag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tag::all()
            .iter()
            .find(|t| t.name().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| format!("Unknown tag: {}", s))
    }
}

/// Metrics computed by the analysis collaborators when an entry is written
/// or edited. Stored denormalized; never recomputed on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DerivedMetrics {
    pub word_count: usize,
    pub polarity: f64,
    pub subjectivity: f64,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry {
    pub id: Uuid,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub last_edited_at: Option<DateTime<Utc>>,
    pub title: String,
    pub body: String,
    pub mood: Mood,
    pub tags: Vec<Tag>,
    /// Base64-encoded image payload, at most one per entry.
    pub image: Option<String>,
    #[serde(default)]
    pub metrics: DerivedMetrics,
    /// SHA-256 hex digest gating edit/delete of this entry.
    pub passkey_hash: String,
}

/// Unvalidated write-path input. An [`Entry`] is only minted from a draft
/// that passed validation (fresh id, timestamps, passkey hash, metrics).
#[derive(Debug, Clone, Default)]
pub struct EntryDraft {
    pub title: String,
    pub body: String,
    pub date: Option<NaiveDate>,
    pub mood: Option<Mood>,
    pub tags: Vec<Tag>,
    pub image: Option<String>,
    pub passkey: String,
}
