//! Borrow-record predicates
//!
//! Matching borrow records against a book has to cope with three historical
//! record shapes at once, and must never degrade into "match everything"
//! when a book has no identifiers. An empty `$or` is rejected by MongoDB and
//! an empty filter document matches every record, so the empty case is an
//! explicit [`BorrowFilter::Never`] variant instead.

use bson::{doc, Document};

use super::{
    book::Book,
    borrow::{BorrowField, BorrowRecord},
    fields::present,
    student::Student,
};

/// Single `field == value` predicate, compared exactly as MongoDB would
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMatch {
    pub field: BorrowField,
    pub value: String,
}

impl FieldMatch {
    pub fn new(field: BorrowField, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
        }
    }

    fn matches(&self, record: &BorrowRecord) -> bool {
        record.field(self.field) == Some(self.value.as_str())
    }

    fn to_document(&self) -> Document {
        let mut document = Document::new();
        document.insert(self.field.as_str(), self.value.as_str());
        document
    }
}

/// Predicate over borrow records
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BorrowFilter {
    /// Matches no record
    Never,
    /// Matches records satisfying at least one clause. Never empty.
    AnyOf(Vec<FieldMatch>),
}

impl BorrowFilter {
    /// Build from a list of clauses; an empty list yields [`BorrowFilter::Never`].
    pub fn any_of(clauses: Vec<FieldMatch>) -> Self {
        if clauses.is_empty() {
            BorrowFilter::Never
        } else {
            BorrowFilter::AnyOf(clauses)
        }
    }

    /// Reconciliation filter for a book: every record tagged with one of the
    /// book's identifiers, through the canonical field or the matching
    /// legacy field.
    pub fn for_book(book: &Book) -> Self {
        let mut clauses = Vec::with_capacity(4);

        if let Some(isbn) = book.isbn() {
            clauses.push(FieldMatch::new(BorrowField::BookIdentifier, isbn));
            clauses.push(FieldMatch::new(BorrowField::Isbn, isbn));
        }
        if let Some(accession) = book.accession_number() {
            // A book whose ISBN and accession number coincide needs no duplicate clause
            if book.isbn() != Some(accession) {
                clauses.push(FieldMatch::new(BorrowField::BookIdentifier, accession));
            }
            clauses.push(FieldMatch::new(BorrowField::AccessionNumber, accession));
        }

        Self::any_of(clauses)
    }

    /// All borrow records of a student
    pub fn for_student(student: &Student) -> Self {
        let clauses = present(Some(student.student_no.as_str()))
            .map(|no| vec![FieldMatch::new(BorrowField::StudentNo, no)])
            .unwrap_or_default();
        Self::any_of(clauses)
    }

    pub fn is_never(&self) -> bool {
        matches!(self, BorrowFilter::Never)
    }

    /// Evaluate against a record in process
    pub fn matches(&self, record: &BorrowRecord) -> bool {
        match self {
            BorrowFilter::Never => false,
            BorrowFilter::AnyOf(clauses) => clauses.iter().any(|c| c.matches(record)),
        }
    }

    /// Render as a MongoDB query document
    pub fn to_document(&self) -> Document {
        match self {
            // No document has an `_id` in the empty set
            BorrowFilter::Never => doc! { "_id": { "$in": [] } },
            BorrowFilter::AnyOf(clauses) if clauses.len() == 1 => clauses[0].to_document(),
            BorrowFilter::AnyOf(clauses) => {
                let alternatives: Vec<Document> =
                    clauses.iter().map(FieldMatch::to_document).collect();
                doc! { "$or": alternatives }
            }
        }
    }
}
