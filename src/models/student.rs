//! Student model

use bson::{oid::ObjectId, Document};
use serde::{Deserialize, Serialize};

use super::fields::text;

/// Student document from the `students` collection.
/// `student_no` is the join key to borrow records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    #[serde(
        rename = "_id",
        serialize_with = "bson::serde_helpers::serialize_object_id_as_hex_string"
    )]
    pub id: ObjectId,
    #[serde(default)]
    pub student_no: String,
    /// Profile fields (names, course, year level, photo...), as stored
    #[serde(flatten)]
    pub extra: Document,
}

impl Student {
    pub fn first_name(&self) -> Option<String> {
        text(&self.extra, "first_name")
    }

    pub fn last_name(&self) -> Option<String> {
        text(&self.extra, "last_name")
    }

    pub fn image(&self) -> Option<String> {
        text(&self.extra, "image")
    }

    pub fn gender(&self) -> Option<String> {
        text(&self.extra, "gender")
    }
}
