//! Borrow analytics for a single book or student

use std::sync::Arc;

use bson::oid::ObjectId;

use crate::{
    error::{AppError, AppResult},
    models::{BookAnalytics, BorrowFilter, StudentAnalytics},
    repository::LibraryStore,
};

use super::photos::PhotoResolver;

#[derive(Clone)]
pub struct AnalyticsService {
    store: Arc<dyn LibraryStore>,
    photos: PhotoResolver,
}

/// Parse a document id, reporting failures against the given entity name
fn parse_identity(raw: &str, entity: &str) -> AppResult<ObjectId> {
    ObjectId::parse_str(raw.trim())
        .map_err(|_| AppError::InvalidIdentity(format!("Invalid {} ID.", entity)))
}

impl AnalyticsService {
    pub fn new(store: Arc<dyn LibraryStore>, photos: PhotoResolver) -> Self {
        Self { store, photos }
    }

    /// Total borrows of a book and its top borrower.
    ///
    /// Borrows are reconciled across the canonical and legacy identifier
    /// fields; a book without identifiers has no borrows.
    pub async fn book_analytics(&self, book_id: &str) -> AppResult<BookAnalytics> {
        let id = parse_identity(book_id, "book")?;
        let book = self
            .store
            .find_book(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Book not found.".to_string()))?;

        let filter = BorrowFilter::for_book(&book);
        if filter.is_never() {
            tracing::debug!(book = %id, "Book has no identifiers, skipping borrow lookup");
            return Ok(BookAnalytics {
                book_details: book,
                total_borrows: 0,
                top_borrower: None,
            });
        }

        let total_borrows = self.store.count_borrows(&filter).await?;
        let top_borrower = self
            .store
            .top_borrower(&filter)
            .await?
            .map(|mut borrower| {
                borrower.photo_url = Some(
                    self.photos
                        .resolve(borrower.image.as_deref(), borrower.gender.as_deref()),
                );
                borrower
            });

        tracing::debug!(book = %id, total_borrows, "Computed book analytics");

        Ok(BookAnalytics {
            book_details: book,
            total_borrows,
            top_borrower,
        })
    }

    /// Total borrows of a student and the book they borrowed most
    pub async fn student_analytics(&self, student_id: &str) -> AppResult<StudentAnalytics> {
        let id = parse_identity(student_id, "student")?;
        let student = self
            .store
            .find_student(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Student not found.".to_string()))?;

        let filter = BorrowFilter::for_student(&student);
        if filter.is_never() {
            return Ok(StudentAnalytics {
                student_details: student,
                total_borrows: 0,
                most_borrowed_book: None,
            });
        }

        let total_borrows = self.store.count_borrows(&filter).await?;
        let most_borrowed_book = self
            .store
            .most_borrowed_book(&student.student_no)
            .await?;

        tracing::debug!(student = %id, total_borrows, "Computed student analytics");

        Ok(StudentAnalytics {
            student_details: student,
            total_borrows,
            most_borrowed_book,
        })
    }
}
