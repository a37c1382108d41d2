//! Borrow transaction model

use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::fields::present;

/// Borrow transaction from the `borrows` collection.
///
/// The book reference was written three different ways over time: the
/// unified `book_identifier` field, or one of the legacy `isbn` /
/// `accession_number` fields.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BorrowRecord {
    #[serde(rename = "_id", default = "ObjectId::new")]
    pub id: ObjectId,
    #[serde(default)]
    pub book_identifier: Option<String>,
    #[serde(default)]
    pub isbn: Option<String>,
    #[serde(default)]
    pub accession_number: Option<String>,
    pub student_no: String,
    pub borrow_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    #[serde(default)]
    pub return_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub penalty: Option<f64>,
}

/// Book reference field on a borrow record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorrowField {
    BookIdentifier,
    Isbn,
    AccessionNumber,
    StudentNo,
}

impl BorrowField {
    /// Document field name
    pub fn as_str(&self) -> &'static str {
        match self {
            BorrowField::BookIdentifier => "book_identifier",
            BorrowField::Isbn => "isbn",
            BorrowField::AccessionNumber => "accession_number",
            BorrowField::StudentNo => "student_no",
        }
    }
}

impl BorrowRecord {
    /// Stored value of a field, `None` when missing or blank
    pub fn field(&self, field: BorrowField) -> Option<&str> {
        match field {
            BorrowField::BookIdentifier => present(self.book_identifier.as_deref()),
            BorrowField::Isbn => present(self.isbn.as_deref()),
            BorrowField::AccessionNumber => present(self.accession_number.as_deref()),
            BorrowField::StudentNo => present(Some(self.student_no.as_str())),
        }
    }

    /// Not yet returned
    pub fn is_active(&self) -> bool {
        self.return_date.is_none()
    }

    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.is_active() && self.due_date < now
    }
}
