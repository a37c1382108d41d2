//! In-process store
//!
//! Answers the same queries as [`super::MongoStore`] over plain vectors, with
//! the same grouping and join semantics. Groups tied on count resolve to the
//! first one encountered in record order.

use std::{collections::HashMap, path::Path};

use async_trait::async_trait;
use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    models::{
        Book, BorrowField, BorrowFilter, BorrowRecord, DashboardStats, MostBorrowedBook, Student,
        TopBorrower,
    },
};

use super::LibraryStore;

/// Seed data for [`MemoryStore`]
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Fixture {
    #[serde(default)]
    pub books: Vec<Book>,
    #[serde(default)]
    pub students: Vec<Student>,
    #[serde(default)]
    pub borrows: Vec<BorrowRecord>,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    books: Vec<Book>,
    students: Vec<Student>,
    borrows: Vec<BorrowRecord>,
}

impl MemoryStore {
    pub fn new(books: Vec<Book>, students: Vec<Student>, borrows: Vec<BorrowRecord>) -> Self {
        Self {
            books,
            students,
            borrows,
        }
    }

    /// Load a JSON fixture file
    pub async fn load(path: &Path) -> AppResult<Self> {
        let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
            AppError::Internal(format!("Cannot read fixture {}: {}", path.display(), e))
        })?;
        let fixture: Fixture = serde_json::from_str(&raw).map_err(|e| {
            AppError::Internal(format!("Invalid fixture {}: {}", path.display(), e))
        })?;
        Ok(Self::from(fixture))
    }

    fn matching<'a>(
        &'a self,
        filter: &'a BorrowFilter,
    ) -> impl Iterator<Item = &'a BorrowRecord> + 'a {
        self.borrows.iter().filter(move |record| filter.matches(record))
    }
}

impl From<Fixture> for MemoryStore {
    fn from(fixture: Fixture) -> Self {
        Self::new(fixture.books, fixture.students, fixture.borrows)
    }
}

/// Key with the highest count; ties go to the key seen first.
fn most_frequent<'a>(keys: impl Iterator<Item = &'a str>) -> Option<(&'a str, i64)> {
    let mut order: Vec<(&str, i64)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for key in keys {
        match index.get(key) {
            Some(&i) => order[i].1 += 1,
            None => {
                index.insert(key, order.len());
                order.push((key, 1));
            }
        }
    }

    order
        .into_iter()
        .fold(None, |best, (key, count)| match best {
            Some((_, top)) if top >= count => best,
            _ => Some((key, count)),
        })
}

#[async_trait]
impl LibraryStore for MemoryStore {
    async fn find_book(&self, id: ObjectId) -> AppResult<Option<Book>> {
        Ok(self.books.iter().find(|b| b.id == id).cloned())
    }

    async fn find_student(&self, id: ObjectId) -> AppResult<Option<Student>> {
        Ok(self.students.iter().find(|s| s.id == id).cloned())
    }

    async fn count_borrows(&self, filter: &BorrowFilter) -> AppResult<u64> {
        Ok(self.matching(filter).count() as u64)
    }

    async fn top_borrower(&self, filter: &BorrowFilter) -> AppResult<Option<TopBorrower>> {
        let Some((student_no, borrow_count)) =
            most_frequent(self.matching(filter).filter_map(|r| r.field(BorrowField::StudentNo)))
        else {
            return Ok(None);
        };

        Ok(self
            .students
            .iter()
            .find(|s| s.student_no == student_no)
            .map(|student| TopBorrower {
                student_no: student.student_no.clone(),
                first_name: student.first_name(),
                last_name: student.last_name(),
                image: student.image(),
                gender: student.gender(),
                borrow_count,
                photo_url: None,
            }))
    }

    async fn most_borrowed_book(&self, student_no: &str) -> AppResult<Option<MostBorrowedBook>> {
        let identifiers = self
            .borrows
            .iter()
            .filter(|r| r.field(BorrowField::StudentNo) == Some(student_no))
            .filter_map(|r| r.field(BorrowField::BookIdentifier));

        let Some((identifier, borrow_count)) = most_frequent(identifiers) else {
            return Ok(None);
        };

        Ok(self
            .books
            .iter()
            .find(|b| b.is_identified_by(identifier))
            .map(|book| MostBorrowedBook {
                book_identifier: identifier.to_string(),
                title: book.title(),
                thumbnail: book.thumbnail(),
                borrow_count,
            }))
    }

    async fn dashboard_stats(&self, now: DateTime<Utc>) -> AppResult<DashboardStats> {
        Ok(DashboardStats {
            total_books: self.books.len() as u64,
            total_students: self.students.len() as u64,
            total_borrows: self.borrows.len() as u64,
            active_borrows: self.borrows.iter().filter(|r| r.is_active()).count() as u64,
            overdue_borrows: self.borrows.iter().filter(|r| r.is_overdue(now)).count() as u64,
            total_penalties: self.borrows.iter().filter_map(|r| r.penalty).sum(),
        })
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;
    use chrono::Duration;

    fn student(no: &str, first: &str) -> Student {
        Student {
            id: ObjectId::new(),
            student_no: no.to_string(),
            extra: doc! { "first_name": first, "last_name": "Santos", "gender": "female" },
        }
    }

    fn borrow(student_no: &str, book_identifier: Option<&str>, isbn: Option<&str>) -> BorrowRecord {
        let now = Utc::now();
        BorrowRecord {
            id: ObjectId::new(),
            book_identifier: book_identifier.map(String::from),
            isbn: isbn.map(String::from),
            accession_number: None,
            student_no: student_no.to_string(),
            borrow_date: now - Duration::days(10),
            due_date: now - Duration::days(3),
            return_date: None,
            penalty: None,
        }
    }

    #[test]
    fn test_most_frequent_ties_keep_first() {
        assert_eq!(most_frequent(["b", "a", "a", "b"].into_iter()), Some(("b", 2)));
        assert_eq!(most_frequent(["b", "a", "a"].into_iter()), Some(("a", 2)));
        assert_eq!(most_frequent(std::iter::empty()), None);
    }

    #[tokio::test]
    async fn test_count_agrees_with_filter() {
        let borrows = vec![
            borrow("S1", Some("111"), None),
            borrow("S2", None, Some("111")),
            borrow("S2", Some("222"), None),
            borrow("S3", None, None),
        ];
        let store = MemoryStore::new(vec![], vec![], borrows.clone());

        let filters = [
            BorrowFilter::Never,
            BorrowFilter::any_of(vec![
                crate::models::FieldMatch::new(BorrowField::BookIdentifier, "111"),
                crate::models::FieldMatch::new(BorrowField::Isbn, "111"),
            ]),
            BorrowFilter::any_of(vec![crate::models::FieldMatch::new(
                BorrowField::StudentNo,
                "S2",
            )]),
        ];

        for filter in &filters {
            let expected = borrows.iter().filter(|r| filter.matches(r)).count() as u64;
            assert_eq!(store.count_borrows(filter).await.unwrap(), expected);
        }
    }

    #[tokio::test]
    async fn test_top_borrower_requires_student_document() {
        let store = MemoryStore::new(
            vec![],
            vec![student("S2", "Ana")],
            vec![
                borrow("S1", Some("111"), None),
                borrow("S1", Some("111"), None),
                borrow("S2", Some("111"), None),
            ],
        );
        let filter = BorrowFilter::any_of(vec![crate::models::FieldMatch::new(
            BorrowField::BookIdentifier,
            "111",
        )]);

        // S1 wins the grouping but has no student document
        assert_eq!(store.top_borrower(&filter).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_padded_identifiers_match_exactly() {
        let book = Book {
            id: ObjectId::new(),
            raw_isbn: Some("111 ".to_string()),
            raw_accession_number: None,
            extra: doc! { "title": 1984, "thumbnail": "1984.jpg" },
        };
        let store = MemoryStore::new(
            vec![book.clone()],
            vec![student("S1 ", "Ana")],
            vec![
                borrow("S1 ", Some("111 "), None),
                borrow("S1 ", None, Some("111 ")),
                borrow("S1", Some("111"), None),
            ],
        );

        let filter = BorrowFilter::for_book(&book);
        assert_eq!(store.count_borrows(&filter).await.unwrap(), 2);

        let top = store.top_borrower(&filter).await.unwrap().unwrap();
        assert_eq!(top.student_no, "S1 ");
        assert_eq!(top.borrow_count, 2);
        assert_eq!(top.first_name.as_deref(), Some("Ana"));

        let most = store.most_borrowed_book("S1 ").await.unwrap().unwrap();
        assert_eq!(most.book_identifier, "111 ");
        assert_eq!(most.title.as_deref(), Some("1984"));
        assert_eq!(most.borrow_count, 1);

        // "S1" is a different student_no; its only borrow names an unknown book
        assert_eq!(store.most_borrowed_book("S1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_dashboard_stats() {
        let mut returned = borrow("S1", Some("111"), None);
        returned.return_date = Some(Utc::now());
        returned.penalty = Some(15.0);
        let mut fined = borrow("S2", Some("111"), None);
        fined.penalty = Some(5.5);
        let mut upcoming = borrow("S2", Some("222"), None);
        upcoming.due_date = Utc::now() + Duration::days(7);

        let store = MemoryStore::new(
            vec![],
            vec![student("S1", "Ana"), student("S2", "Ben")],
            vec![returned, fined, upcoming],
        );
        let stats = store.dashboard_stats(Utc::now()).await.unwrap();

        assert_eq!(stats.total_students, 2);
        assert_eq!(stats.total_borrows, 3);
        assert_eq!(stats.active_borrows, 2);
        assert_eq!(stats.overdue_borrows, 1);
        assert_eq!(stats.total_penalties, 20.5);
    }

    #[test]
    fn test_fixture_parses() {
        let fixture: Fixture = serde_json::from_str(
            r#"{
                "books": [{ "_id": { "$oid": "65a1b2c3d4e5f60718293a4b" }, "title": "Florante at Laura", "isbn": "111", "quantity": "4" }],
                "borrows": [{
                    "student_no": "S1",
                    "book_identifier": "111",
                    "borrow_date": "2024-01-10T08:00:00Z",
                    "due_date": "2024-01-17T08:00:00Z"
                }]
            }"#,
        )
        .unwrap();

        assert_eq!(fixture.books[0].isbn(), Some("111"));
        assert_eq!(fixture.books[0].title().as_deref(), Some("Florante at Laura"));
        assert!(fixture.students.is_empty());
        assert!(fixture.borrows[0].is_active());
    }
}
