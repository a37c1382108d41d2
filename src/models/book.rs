//! Book model

use bson::{oid::ObjectId, Document};
use serde::{Deserialize, Serialize};

use super::fields::{present, text};

/// Book document from the `books` collection.
///
/// Historical data is inconsistent: either external identifier may be
/// missing, or stored as an empty string. Use [`Book::isbn`] and
/// [`Book::accession_number`] rather than the raw fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    #[serde(
        rename = "_id",
        serialize_with = "bson::serde_helpers::serialize_object_id_as_hex_string"
    )]
    pub id: ObjectId,
    #[serde(default, rename = "isbn")]
    pub raw_isbn: Option<String>,
    #[serde(default, rename = "accession_number")]
    pub raw_accession_number: Option<String>,
    /// Every other stored field (title, author, thumbnail, quantity...),
    /// passed through with whatever type it was stored as
    #[serde(flatten)]
    pub extra: Document,
}

impl Book {
    /// ISBN, if populated
    pub fn isbn(&self) -> Option<&str> {
        present(self.raw_isbn.as_deref())
    }

    /// Accession number, if populated
    pub fn accession_number(&self) -> Option<&str> {
        present(self.raw_accession_number.as_deref())
    }

    /// Whether this book answers to the given identifier (ISBN or accession number)
    pub fn is_identified_by(&self, identifier: &str) -> bool {
        self.isbn() == Some(identifier) || self.accession_number() == Some(identifier)
    }

    pub fn title(&self) -> Option<String> {
        text(&self.extra, "title")
    }

    pub fn thumbnail(&self) -> Option<String> {
        text(&self.extra, "thumbnail")
    }
}
