//! Borrow analytics results (computed per request, never stored)

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{book::Book, student::Student};

/// Student with the most borrows of a given book
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TopBorrower {
    pub student_no: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    pub borrow_count: i64,
    /// Display URL, resolved from `image` or a gender placeholder
    #[serde(default, rename = "photoUrl")]
    pub photo_url: Option<String>,
}

/// Book a given student borrowed the most
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MostBorrowedBook {
    /// Canonical identifier the borrows were grouped under
    pub book_identifier: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    pub borrow_count: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookAnalytics {
    /// The book document as stored
    #[schema(value_type = Object)]
    pub book_details: Book,
    pub total_borrows: u64,
    pub top_borrower: Option<TopBorrower>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StudentAnalytics {
    /// The student document as stored
    #[schema(value_type = Object)]
    pub student_details: Student,
    pub total_borrows: u64,
    pub most_borrowed_book: Option<MostBorrowedBook>,
}

/// Dashboard counters
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct DashboardStats {
    pub total_books: u64,
    pub total_students: u64,
    pub total_borrows: u64,
    /// Borrows without a return date
    pub active_borrows: u64,
    /// Active borrows past their due date
    pub overdue_borrows: u64,
    /// Sum of recorded penalties
    pub total_penalties: f64,
}
