//! # Journal records and their insert drafts
//!
//! Five independent record kinds live in the hosted backend, one table each.
//! Every kind implements [`Record`], which tells the rest of the workspace
//! where the rows live, how a list of them is ordered and which fixed sample
//! set to show when the backend cannot be reached.
//!
//! | Record | Table | Draft | Listed by |
//! |--------|-------|-------|-----------|
//! | [`Milestone`] | `milestones` | [`NewMilestone`] | `date` ascending |
//! | [`Memory`] | `memories` | [`NewMemory`] | `created_at` descending |
//! | [`Note`] | `notes` | [`NewNote`] | `created_at` descending |
//! | [`Letter`] | `letters` | [`NewLetter`] | `created_at` descending |
//! | [`Song`] | `playlist` | [`NewSong`] | `created_at` descending |
//!
//! Drafts are the insert payloads. They only check that required fields are
//! present; the backend generates ids and timestamps. The owner is stamped by
//! the server from the signed-in user via [`Draft::with_owner`].

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::samples;

/// Column and direction a table is listed by.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ListOrder {
    pub column: &'static str,
    pub ascending: bool,
}

impl ListOrder {
    /// Query-string form understood by the REST backend: `created_at.desc`.
    pub fn to_query(&self) -> String {
        let dir = if self.ascending { "asc" } else { "desc" };
        format!("{}.{}", self.column, dir)
    }
}

/// A row kind stored in one backend table.
pub trait Record: Clone + PartialEq + Serialize + DeserializeOwned + 'static {
    /// Table (and REST collection) name.
    const TABLE: &'static str;
    /// Order the backend is asked to list rows in.
    const ORDER: ListOrder;

    type Draft: Draft;

    fn id(&self) -> &str;

    /// Position of `self` relative to `other` in a displayed list.
    /// `Less` means `self` is shown first.
    fn list_cmp(&self, other: &Self) -> Ordering;

    /// Fixed sample set shown when listing fails. Never empty.
    fn fallback() -> Vec<Self>;

    /// Whether a newly created record belongs at the top of the list even
    /// though it has no sort key to compare with.
    fn inserts_first(&self) -> bool {
        false
    }
}

/// Insert payload for a [`Record`].
pub trait Draft: Clone + Serialize {
    fn validate(&self) -> Result<(), ValidationError>;
    fn with_owner(self, user_id: String) -> Self;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),
}

fn require(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(())
}

/// Newest first; rows without a timestamp sink to the end of a loaded list.
/// A created row missing its timestamp is still prepended, see
/// [`Record::inserts_first`].
fn newest_first(a: &Option<DateTime<Utc>>, b: &Option<DateTime<Utc>>) -> Ordering {
    b.cmp(a)
}

/// Reads a nullable text column as an empty string.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A dated relationship event.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub id: String,
    pub date: NaiveDate,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Record for Milestone {
    const TABLE: &'static str = "milestones";
    const ORDER: ListOrder = ListOrder {
        column: "date",
        ascending: true,
    };
    type Draft = NewMilestone;

    fn id(&self) -> &str {
        &self.id
    }

    fn list_cmp(&self, other: &Self) -> Ordering {
        self.date.cmp(&other.date)
    }

    fn fallback() -> Vec<Self> {
        samples::milestones()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewMilestone {
    pub title: String,
    pub date: Option<NaiveDate>,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl Draft for NewMilestone {
    fn validate(&self) -> Result<(), ValidationError> {
        require(&self.title, "title")?;
        if self.date.is_none() {
            return Err(ValidationError::MissingField("date"));
        }
        Ok(())
    }

    fn with_owner(self, user_id: String) -> Self {
        Self {
            user_id: Some(user_id),
            ..self
        }
    }
}

/// A photo memory. The image itself lives in object storage.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Memory {
    pub id: String,
    pub image_url: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub caption: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Record for Memory {
    const TABLE: &'static str = "memories";
    const ORDER: ListOrder = ListOrder {
        column: "created_at",
        ascending: false,
    };
    type Draft = NewMemory;

    fn id(&self) -> &str {
        &self.id
    }

    fn list_cmp(&self, other: &Self) -> Ordering {
        newest_first(&self.created_at, &other.created_at)
    }

    fn inserts_first(&self) -> bool {
        self.created_at.is_none()
    }

    fn fallback() -> Vec<Self> {
        samples::memories()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewMemory {
    pub image_url: String,
    pub caption: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl Draft for NewMemory {
    fn validate(&self) -> Result<(), ValidationError> {
        require(&self.image_url, "image")
    }

    fn with_owner(self, user_id: String) -> Self {
        Self {
            user_id: Some(user_id),
            ..self
        }
    }
}

/// A short free-text note.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    pub content: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Record for Note {
    const TABLE: &'static str = "notes";
    const ORDER: ListOrder = ListOrder {
        column: "created_at",
        ascending: false,
    };
    type Draft = NewNote;

    fn id(&self) -> &str {
        &self.id
    }

    fn list_cmp(&self, other: &Self) -> Ordering {
        newest_first(&self.created_at, &other.created_at)
    }

    fn inserts_first(&self) -> bool {
        self.created_at.is_none()
    }

    fn fallback() -> Vec<Self> {
        samples::notes()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewNote {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl Draft for NewNote {
    fn validate(&self) -> Result<(), ValidationError> {
        require(&self.content, "content")
    }

    fn with_owner(self, user_id: String) -> Self {
        Self {
            user_id: Some(user_id),
            ..self
        }
    }
}

/// An "open-when" letter; its content stays hidden until opened.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Letter {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub is_locked: Option<bool>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Record for Letter {
    const TABLE: &'static str = "letters";
    const ORDER: ListOrder = ListOrder {
        column: "created_at",
        ascending: false,
    };
    type Draft = NewLetter;

    fn id(&self) -> &str {
        &self.id
    }

    fn list_cmp(&self, other: &Self) -> Ordering {
        newest_first(&self.created_at, &other.created_at)
    }

    fn inserts_first(&self) -> bool {
        self.created_at.is_none()
    }

    fn fallback() -> Vec<Self> {
        samples::letters()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewLetter {
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl Draft for NewLetter {
    fn validate(&self) -> Result<(), ValidationError> {
        require(&self.title, "title")?;
        require(&self.content, "content")
    }

    fn with_owner(self, user_id: String) -> Self {
        Self {
            user_id: Some(user_id),
            ..self
        }
    }
}

/// A shared song, optionally with a streaming link.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Song {
    pub id: String,
    pub song_title: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Record for Song {
    const TABLE: &'static str = "playlist";
    const ORDER: ListOrder = ListOrder {
        column: "created_at",
        ascending: false,
    };
    type Draft = NewSong;

    fn id(&self) -> &str {
        &self.id
    }

    fn list_cmp(&self, other: &Self) -> Ordering {
        newest_first(&self.created_at, &other.created_at)
    }

    fn inserts_first(&self) -> bool {
        self.created_at.is_none()
    }

    fn fallback() -> Vec<Self> {
        samples::songs()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewSong {
    pub song_title: String,
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl NewSong {
    /// Builds a draft from form input; a blank link is stored as null.
    pub fn from_form(title: &str, link: &str) -> Self {
        let link = link.trim();
        Self {
            song_title: title.trim().to_string(),
            link: (!link.is_empty()).then(|| link.to_string()),
            user_id: None,
        }
    }
}

impl Draft for NewSong {
    fn validate(&self) -> Result<(), ValidationError> {
        require(&self.song_title, "song title")
    }

    fn with_owner(self, user_id: String) -> Self {
        Self {
            user_id: Some(user_id),
            ..self
        }
    }
}

/// Object key for an uploaded image: `<millis>-<nonce>.<ext>`.
///
/// The extension is taken from the original file name; names without one
/// produce a key without an extension.
pub fn object_key(file_name: &str, millis: i64, nonce: &str) -> String {
    match file_name.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => format!("{millis}-{nonce}.{ext}"),
        _ => format!("{millis}-{nonce}"),
    }
}

/// Storage key of a public image URL (its last path segment).
pub fn object_key_from_url(url: &str) -> Option<&str> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    path.rsplit('/').next().filter(|key| !key.is_empty())
}
