use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Field-level validation failures for book input.
///
/// Raised before any transition is built, so a rejected input never
/// reaches the reducer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Title must not be empty")]
    EmptyTitle,

    #[error("Author must not be empty")]
    EmptyAuthor,
}

/// Opaque record identifier.
///
/// Stored as text. Remote catalogues are free to hand out numeric keys, so
/// deserialization accepts either a JSON string or a JSON integer; the value
/// always serializes back as a string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Mint a fresh random identifier (UUID v4).
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Signed(i64),
            Unsigned(u64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(text) => Self(text),
            RawId::Signed(n) => Self(n.to_string()),
            RawId::Unsigned(n) => Self(n.to_string()),
        })
    }
}

/// One catalogued book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub title: String,
    pub author: String,
    pub year: i32,
}

impl Record {
    pub fn new(
        id: impl Into<RecordId>,
        title: impl Into<String>,
        author: impl Into<String>,
        year: i32,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            year,
        }
    }
}

/// Field values for a book that has not been given an identifier yet.
///
/// This is also the request body sent to a remote catalogue on create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub year: i32,
}

impl BookDraft {
    pub fn new(title: impl Into<String>, author: impl Into<String>, year: i32) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            year,
        }
    }

    /// Trim text fields and reject blank ones.
    pub fn validated(self) -> Result<Self, ValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        let author = self.author.trim();
        if author.is_empty() {
            return Err(ValidationError::EmptyAuthor);
        }
        Ok(Self {
            title: title.to_string(),
            author: author.to_string(),
            year: self.year,
        })
    }

    pub fn into_record(self, id: RecordId) -> Record {
        Record {
            id,
            title: self.title,
            author: self.author,
            year: self.year,
        }
    }
}

impl From<&Record> for BookDraft {
    fn from(record: &Record) -> Self {
        Self {
            title: record.title.clone(),
            author: record.author.clone(),
            year: record.year,
        }
    }
}

/// A pending edit: new values for some fields of an existing record.
///
/// Whatever input mechanism the caller uses collects these values; `None`
/// keeps the current one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordEdit {
    pub title: Option<String>,
    pub author: Option<String>,
    pub year: Option<i32>,
}

impl RecordEdit {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.author.is_none() && self.year.is_none()
    }

    /// Build the edited record. The identifier is carried over unchanged.
    pub fn apply_to(&self, record: &Record) -> Result<Record, ValidationError> {
        let draft = BookDraft {
            title: self.title.clone().unwrap_or_else(|| record.title.clone()),
            author: self.author.clone().unwrap_or_else(|| record.author.clone()),
            year: self.year.unwrap_or(record.year),
        };
        Ok(draft.validated()?.into_record(record.id.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validated_trims_fields() {
        let draft = BookDraft::new("  Dune ", "\tHerbert", 1965).validated().unwrap();
        assert_eq!(draft.title, "Dune");
        assert_eq!(draft.author, "Herbert");
        assert_eq!(draft.year, 1965);
    }

    #[test]
    fn validated_rejects_blank_title_first() {
        let err = BookDraft::new("   ", "", 2000).validated().unwrap_err();
        assert_eq!(err, ValidationError::EmptyTitle);
    }

    #[test]
    fn validated_rejects_blank_author() {
        let err = BookDraft::new("Emma", " ", 1815).validated().unwrap_err();
        assert_eq!(err, ValidationError::EmptyAuthor);
    }

    #[test]
    fn record_id_accepts_numbers_and_strings() {
        let from_number: RecordId = serde_json::from_str("42").unwrap();
        let from_text: RecordId = serde_json::from_str("\"abc\"").unwrap();
        assert_eq!(from_number.as_str(), "42");
        assert_eq!(from_text.as_str(), "abc");
        assert_eq!(serde_json::to_string(&from_number).unwrap(), "\"42\"");
    }

    #[test]
    fn generated_ids_differ() {
        assert_ne!(RecordId::generate(), RecordId::generate());
    }

    #[test]
    fn edit_keeps_unset_fields_and_id() {
        let record = Record::new("7", "Dune", "Herbert", 1965);
        let edit = RecordEdit {
            year: Some(1966),
            ..RecordEdit::default()
        };
        let edited = edit.apply_to(&record).unwrap();
        assert_eq!(edited, Record::new("7", "Dune", "Herbert", 1966));
    }

    #[test]
    fn edit_with_blank_title_is_rejected() {
        let record = Record::new("7", "Dune", "Herbert", 1965);
        let edit = RecordEdit {
            title: Some(String::new()),
            ..RecordEdit::default()
        };
        assert_eq!(edit.apply_to(&record), Err(ValidationError::EmptyTitle));
    }
}
