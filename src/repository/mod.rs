//! Document store access
//!
//! Services depend on [`LibraryStore`] only. [`MongoStore`] is the
//! production backend; [`MemoryStore`] evaluates the same queries over
//! in-process vectors.

pub mod memory;
pub mod mongo;
pub mod pipelines;

use async_trait::async_trait;
use bson::oid::ObjectId;
use chrono::{DateTime, Utc};

use crate::{
    error::AppResult,
    models::{Book, BorrowFilter, DashboardStats, MostBorrowedBook, Student, TopBorrower},
};

pub use memory::{Fixture, MemoryStore};
pub use mongo::MongoStore;

/// Read-only queries over the `books`, `students` and `borrows` collections
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LibraryStore: Send + Sync {
    async fn find_book(&self, id: ObjectId) -> AppResult<Option<Book>>;

    async fn find_student(&self, id: ObjectId) -> AppResult<Option<Student>>;

    /// Number of borrow records matching `filter`
    async fn count_borrows(&self, filter: &BorrowFilter) -> AppResult<u64>;

    /// Student with the most borrow records matching `filter`, joined with
    /// their student document. `None` when nothing matches or the winning
    /// student no longer exists.
    async fn top_borrower(&self, filter: &BorrowFilter) -> AppResult<Option<TopBorrower>>;

    /// Book the student borrowed most, grouped by canonical `book_identifier`
    /// and resolved against books by ISBN or accession number.
    async fn most_borrowed_book(&self, student_no: &str) -> AppResult<Option<MostBorrowedBook>>;

    async fn dashboard_stats(&self, now: DateTime<Utc>) -> AppResult<DashboardStats>;

    /// Connectivity check
    async fn ping(&self) -> AppResult<()>;
}
