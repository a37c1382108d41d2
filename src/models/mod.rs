//! Data models for the library collections

pub mod analytics;
pub mod book;
pub mod borrow;
pub(crate) mod fields;
pub mod filter;
pub mod student;

// Re-export commonly used types
pub use analytics::{BookAnalytics, DashboardStats, MostBorrowedBook, StudentAnalytics, TopBorrower};
pub use book::Book;
pub use borrow::{BorrowField, BorrowRecord};
pub use filter::{BorrowFilter, FieldMatch};
pub use student::Student;
