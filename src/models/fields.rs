//! Access to loosely typed document fields
//!
//! Documents carry no schema: identifiers may be blank and display fields
//! may hold a number where a string is expected.

use bson::{Bson, Document};

/// The stored value, or `None` for missing or blank strings.
///
/// Blankness is judged on the trimmed value, but the value itself is
/// returned untouched: MongoDB compares identifiers exactly, so the
/// in-process side must as well.
pub(crate) fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// A scalar field rendered as text; `None` when missing, null or structured.
///
/// Mirrors what `$convert: { to: "string" }` yields on the database side.
pub(crate) fn text(document: &Document, key: &str) -> Option<String> {
    match document.get(key)? {
        Bson::String(s) => Some(s.clone()),
        Bson::Int32(n) => Some(n.to_string()),
        Bson::Int64(n) => Some(n.to_string()),
        Bson::Double(n) => Some(n.to_string()),
        Bson::Boolean(b) => Some(b.to_string()),
        Bson::ObjectId(id) => Some(id.to_hex()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;

    #[test]
    fn test_present_keeps_padding() {
        assert_eq!(present(Some("111 ")), Some("111 "));
        assert_eq!(present(Some(" \t")), None);
        assert_eq!(present(None), None);
    }

    #[test]
    fn test_text_accepts_scalars() {
        let document = doc! {
            "title": "Noli Me Tangere",
            "year_level": 2,
            "quantity": 4.0,
            "tags": ["fiction"],
            "image": null,
        };
        assert_eq!(text(&document, "title").as_deref(), Some("Noli Me Tangere"));
        assert_eq!(text(&document, "year_level").as_deref(), Some("2"));
        assert_eq!(text(&document, "quantity").as_deref(), Some("4"));
        assert_eq!(text(&document, "tags"), None);
        assert_eq!(text(&document, "image"), None);
        assert_eq!(text(&document, "missing"), None);
    }
}
