//! Aggregation pipelines over the `borrows` collection

use bson::{doc, Document};

use crate::models::BorrowFilter;

/// Condition selecting string fields with at least one non-blank character
fn has_text() -> Document {
    doc! { "$regex": "\\S" }
}

/// A field converted to a string, or null when missing or not convertible
fn as_text(path: &str) -> Document {
    doc! { "$convert": { "input": path, "to": "string", "onError": null, "onNull": null } }
}

/// Group matching borrows by student, keep the largest group and join it
/// with the students collection.
///
/// Records with a blank `student_no` are not grouped. `$unwind` drops the
/// group when no student carries that `student_no`.
pub fn top_borrower(filter: &BorrowFilter, students: &str) -> Vec<Document> {
    vec![
        doc! { "$match": { "$and": [filter.to_document(), { "student_no": has_text() }] } },
        doc! { "$group": { "_id": "$student_no", "borrow_count": { "$sum": 1 } } },
        doc! { "$sort": { "borrow_count": -1 } },
        doc! { "$limit": 1 },
        doc! {
            "$lookup": {
                "from": students,
                "localField": "_id",
                "foreignField": "student_no",
                "as": "student",
            }
        },
        doc! { "$unwind": "$student" },
        doc! {
            "$project": {
                "_id": 0,
                "student_no": "$_id",
                "borrow_count": 1,
                "first_name": as_text("$student.first_name"),
                "last_name": as_text("$student.last_name"),
                "image": as_text("$student.image"),
                "gender": as_text("$student.gender"),
            }
        },
    ]
}

/// Group a student's borrows by canonical `book_identifier` (legacy fields
/// are not consulted), keep the largest group and resolve it to a book whose
/// ISBN or accession number equals the identifier.
pub fn most_borrowed_book(student_no: &str, books: &str) -> Vec<Document> {
    vec![
        doc! {
            "$match": {
                "student_no": student_no,
                "book_identifier": has_text(),
            }
        },
        doc! { "$group": { "_id": "$book_identifier", "borrow_count": { "$sum": 1 } } },
        doc! { "$sort": { "borrow_count": -1 } },
        doc! { "$limit": 1 },
        doc! {
            "$lookup": {
                "from": books,
                "let": { "identifier": "$_id" },
                "pipeline": [
                    {
                        "$match": {
                            "$expr": {
                                "$or": [
                                    { "$eq": ["$isbn", "$$identifier"] },
                                    { "$eq": ["$accession_number", "$$identifier"] },
                                ]
                            }
                        }
                    },
                    { "$limit": 1 },
                ],
                "as": "book",
            }
        },
        doc! { "$unwind": "$book" },
        doc! {
            "$project": {
                "_id": 0,
                "book_identifier": "$_id",
                "title": as_text("$book.title"),
                "thumbnail": as_text("$book.thumbnail"),
                "borrow_count": 1,
            }
        },
    ]
}

/// Sum of all recorded penalties, as a single `{ total }` document
pub fn total_penalties() -> Vec<Document> {
    vec![doc! { "$group": { "_id": null, "total": { "$sum": "$penalty" } } }]
}
