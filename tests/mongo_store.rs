//! MongoDB store tests
//!
//! Need a running server: `MONGODB_URI=mongodb://localhost:27017 cargo test -- --ignored`

use bson::{doc, oid::ObjectId, Document};
use mongodb::{Client, Database};

use lms_server::{
    config::CollectionsConfig,
    models::{Book, BorrowFilter},
    repository::{LibraryStore, MongoStore},
};

/// Fresh database seeded with one book, two students and some borrows
async fn seeded() -> (Database, MongoStore, ObjectId) {
    let uri = std::env::var("MONGODB_URI").unwrap_or_else(|_| "mongodb://localhost:27017".into());
    let client = Client::with_uri_str(&uri).await.expect("Failed to connect");
    let db = client.database(&format!("lms_test_{}", ObjectId::new().to_hex()));

    let book_id = ObjectId::new();
    db.collection::<Document>("books")
        .insert_many(vec![
            doc! { "_id": book_id, "title": "Noli Me Tangere", "isbn": "111", "accession_number": "ACC-1", "quantity": "4" },
            doc! { "_id": ObjectId::new(), "title": "Dekada '70", "accession_number": "ACC-2" },
        ])
        .await
        .expect("Failed to seed books");
    db.collection::<Document>("students")
        .insert_many(vec![
            doc! { "_id": ObjectId::new(), "student_no": "S1", "first_name": "Ana", "last_name": "Reyes", "gender": "female", "year_level": 2 },
            doc! { "_id": ObjectId::new(), "student_no": "S2", "first_name": "Ben", "last_name": "Cruz" },
        ])
        .await
        .expect("Failed to seed students");
    db.collection::<Document>("borrows")
        .insert_many(vec![
            doc! { "student_no": "S1", "book_identifier": "111" },
            doc! { "student_no": "S1", "isbn": "111" },
            doc! { "student_no": "S1", "accession_number": "ACC-1" },
            doc! { "student_no": "S2", "book_identifier": "ACC-1" },
            doc! { "student_no": "S2", "book_identifier": "ACC-2" },
            doc! { "student_no": "S2", "book_identifier": "ACC-2" },
            doc! { "student_no": "S2", "accession_number": "999" },
            doc! { "student_no": "S2", "book_identifier": "111 " },
        ])
        .await
        .expect("Failed to seed borrows");

    let store = MongoStore::new(db.clone(), CollectionsConfig::default());
    (db, store, book_id)
}

#[tokio::test]
#[ignore]
async fn test_book_reconciliation() {
    let (db, store, book_id) = seeded().await;

    let book: Book = store.find_book(book_id).await.unwrap().expect("book seeded");
    assert_eq!(book.extra.get_str("quantity").unwrap(), "4");
    let filter = BorrowFilter::for_book(&book);

    // The padded "111 " borrow is a different identifier
    assert_eq!(store.count_borrows(&filter).await.unwrap(), 4);

    let top = store.top_borrower(&filter).await.unwrap().expect("top borrower");
    assert_eq!(top.student_no, "S1");
    assert_eq!(top.borrow_count, 3);
    assert_eq!(top.first_name.as_deref(), Some("Ana"));

    db.drop().await.unwrap();
}

#[tokio::test]
#[ignore]
async fn test_never_filter_counts_nothing() {
    let (db, store, _) = seeded().await;

    let count = db
        .collection::<Document>("borrows")
        .count_documents(BorrowFilter::Never.to_document())
        .await
        .unwrap();
    assert_eq!(count, 0);
    assert_eq!(store.count_borrows(&BorrowFilter::Never).await.unwrap(), 0);

    db.drop().await.unwrap();
}

#[tokio::test]
#[ignore]
async fn test_most_borrowed_book() {
    let (db, store, _) = seeded().await;

    let most = store.most_borrowed_book("S2").await.unwrap().expect("most borrowed");
    assert_eq!(most.book_identifier, "ACC-2");
    assert_eq!(most.title.as_deref(), Some("Dekada '70"));
    assert_eq!(most.borrow_count, 2);

    assert!(store.most_borrowed_book("S9").await.unwrap().is_none());
    store.ping().await.unwrap();

    db.drop().await.unwrap();
}
