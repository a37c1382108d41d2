//! MongoDB-backed store

use async_trait::async_trait;
use bson::{doc, oid::ObjectId, Bson, Document};
use chrono::{DateTime, Utc};
use futures::stream::TryStreamExt;
use mongodb::{Client, Collection, Database};
use serde::de::DeserializeOwned;

use crate::{
    config::{CollectionsConfig, DatabaseConfig},
    error::AppResult,
    models::{Book, BorrowFilter, DashboardStats, MostBorrowedBook, Student, TopBorrower},
};

use super::{pipelines, LibraryStore};

#[derive(Clone)]
pub struct MongoStore {
    db: Database,
    books: Collection<Document>,
    students: Collection<Document>,
    borrows: Collection<Document>,
    collections: CollectionsConfig,
}

impl MongoStore {
    /// Connect using the configured URI and database name
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        let client = Client::with_uri_str(&config.uri).await?;
        Ok(Self::new(
            client.database(&config.name),
            config.collections.clone(),
        ))
    }

    pub fn new(db: Database, collections: CollectionsConfig) -> Self {
        Self {
            books: db.collection(&collections.books),
            students: db.collection(&collections.students),
            borrows: db.collection(&collections.borrows),
            collections,
            db,
        }
    }

    /// Fetch one document by `_id` and decode it
    async fn find_by_id<T: DeserializeOwned>(
        collection: &Collection<Document>,
        id: ObjectId,
    ) -> AppResult<Option<T>> {
        match collection.find_one(doc! { "_id": id }).await? {
            Some(document) => Ok(Some(bson::from_document(document)?)),
            None => Ok(None),
        }
    }

    /// Run a pipeline over `borrows` and decode its first result
    async fn aggregate_first<T: DeserializeOwned>(
        &self,
        pipeline: Vec<Document>,
    ) -> AppResult<Option<T>> {
        let mut cursor = self.borrows.aggregate(pipeline).await?;
        match cursor.try_next().await? {
            Some(document) => Ok(Some(bson::from_document(document)?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl LibraryStore for MongoStore {
    async fn find_book(&self, id: ObjectId) -> AppResult<Option<Book>> {
        Self::find_by_id(&self.books, id).await
    }

    async fn find_student(&self, id: ObjectId) -> AppResult<Option<Student>> {
        Self::find_by_id(&self.students, id).await
    }

    async fn count_borrows(&self, filter: &BorrowFilter) -> AppResult<u64> {
        if filter.is_never() {
            return Ok(0);
        }
        Ok(self.borrows.count_documents(filter.to_document()).await?)
    }

    async fn top_borrower(&self, filter: &BorrowFilter) -> AppResult<Option<TopBorrower>> {
        if filter.is_never() {
            return Ok(None);
        }
        self.aggregate_first(pipelines::top_borrower(filter, &self.collections.students))
            .await
    }

    async fn most_borrowed_book(&self, student_no: &str) -> AppResult<Option<MostBorrowedBook>> {
        self.aggregate_first(pipelines::most_borrowed_book(
            student_no,
            &self.collections.books,
        ))
        .await
    }

    async fn dashboard_stats(&self, now: DateTime<Utc>) -> AppResult<DashboardStats> {
        let total_books = self.books.count_documents(doc! {}).await?;
        let total_students = self.students.count_documents(doc! {}).await?;
        let total_borrows = self.borrows.count_documents(doc! {}).await?;

        // `null` matches both an explicit null and a missing field
        let active_borrows = self
            .borrows
            .count_documents(doc! { "return_date": null })
            .await?;
        let overdue_borrows = self
            .borrows
            .count_documents(doc! {
                "return_date": null,
                "due_date": { "$lt": bson::DateTime::from_chrono(now) },
            })
            .await?;

        let total_penalties = self
            .aggregate_first::<Document>(pipelines::total_penalties())
            .await?
            .and_then(|document| document.get("total").and_then(bson_number))
            .unwrap_or(0.0);

        Ok(DashboardStats {
            total_books,
            total_students,
            total_borrows,
            active_borrows,
            overdue_borrows,
            total_penalties,
        })
    }

    async fn ping(&self) -> AppResult<()> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}

/// `$sum` yields Int32, Int64 or Double depending on the inputs
fn bson_number(value: &Bson) -> Option<f64> {
    match value {
        Bson::Double(v) => Some(*v),
        Bson::Int32(v) => Some(f64::from(*v)),
        Bson::Int64(v) => Some(*v as f64),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bson_number() {
        assert_eq!(bson_number(&Bson::Int32(3)), Some(3.0));
        assert_eq!(bson_number(&Bson::Int64(7)), Some(7.0));
        assert_eq!(bson_number(&Bson::Double(2.5)), Some(2.5));
        assert_eq!(bson_number(&Bson::Null), None);
    }
}
