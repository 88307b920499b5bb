//! Book model and the request payloads that create or change one.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// A catalog record. `id` is assigned by the store and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub genre: String,
    /// Publication year
    pub year: i64,
}

/// Incoming body for create and update.
///
/// Every field is optional and kept as raw JSON so the validator can apply
/// presence and truthiness rules before anything is typed. `null` reads as
/// absent.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct BookPayload {
    #[schema(value_type = Option<String>)]
    pub title: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub author: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub genre: Option<Value>,
    /// Integer, or a string holding one
    #[schema(value_type = Option<i64>)]
    pub year: Option<Value>,
}

/// Fully validated fields for a new record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub genre: String,
    pub year: i64,
}

/// Validated partial update; `None` leaves the stored value alone
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookChanges {
    pub title: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
    pub year: Option<i64>,
}

impl BookChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.author.is_none() && self.genre.is_none() && self.year.is_none()
    }
}

impl Book {
    pub fn apply(&mut self, changes: BookChanges) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(author) = changes.author {
            self.author = author;
        }
        if let Some(genre) = changes.genre {
            self.genre = genre;
        }
        if let Some(year) = changes.year {
            self.year = year;
        }
    }
}

/// JSON truthiness: null, false, zero, and empty strings/arrays/objects are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Integer conversion for `year`.
///
/// Integers pass through, floats truncate toward zero, strings must hold a
/// base-10 integer (surrounding whitespace allowed). Integers too large for
/// `i64`, written as numbers or as strings, saturate so they fail the range
/// check rather than the conversion. Booleans are not years.
pub fn coerce_year(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_u64().map(|_| i64::MAX))
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => parse_saturating(s.trim()),
        _ => None,
    }
}

fn parse_saturating(s: &str) -> Option<i64> {
    if let Ok(n) = s.parse::<i64>() {
        return Some(n);
    }

    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    Some(if negative { i64::MIN } else { i64::MAX })
}

/// A supplied text field: truthy and a string
fn text(value: &Option<Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

/// A supplied year: present and convertible. `0` counts, `""` does not.
fn year(value: &Option<Value>) -> Option<i64> {
    value.as_ref().and_then(coerce_year)
}

impl BookPayload {
    /// Typed record for a create. `None` when a field is missing or
    /// unconvertible, which strict validation rules out beforehand.
    pub fn to_new_book(&self) -> Option<NewBook> {
        Some(NewBook {
            title: text(&self.title)?,
            author: text(&self.author)?,
            genre: text(&self.genre)?,
            year: year(&self.year)?,
        })
    }

    /// Typed changes for an update. Empty or non-string text fields count as
    /// not supplied, as does a year that does not convert.
    pub fn to_changes(&self) -> BookChanges {
        BookChanges {
            title: text(&self.title),
            author: text(&self.author),
            genre: text(&self.genre),
            year: year(&self.year),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> BookPayload {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn book_serializes_with_flat_fields() {
        let book = Book {
            id: 1,
            title: "1984".into(),
            author: "George Orwell".into(),
            genre: "Dystopian Fiction".into(),
            year: 1949,
        };
        let json = serde_json::to_value(&book).unwrap();
        assert_eq!(
            json,
            json!({
                "id": 1,
                "title": "1984",
                "author": "George Orwell",
                "genre": "Dystopian Fiction",
                "year": 1949
            })
        );
    }

    #[test]
    fn payload_fields_are_all_optional() {
        let input = payload(json!({}));
        assert!(input.title.is_none());
        assert!(input.year.is_none());

        let input = payload(json!({ "title": "Dune", "isbn": "ignored" }));
        assert_eq!(input.title, Some(json!("Dune")));
        assert!(input.author.is_none());
    }

    #[test]
    fn null_reads_as_absent() {
        let input = payload(json!({ "title": null }));
        assert!(input.title.is_none());
    }

    #[test]
    fn truthiness_matches_loose_json_semantics() {
        for falsy in [json!(null), json!(false), json!(0), json!(0.0), json!(""), json!([]), json!({})] {
            assert!(!is_truthy(&falsy), "{falsy} should be falsy");
        }
        for truthy in [json!(true), json!(-1), json!("0"), json!([0]), json!({ "a": 1 })] {
            assert!(is_truthy(&truthy), "{truthy} should be truthy");
        }
    }

    #[test]
    fn year_coercion() {
        assert_eq!(coerce_year(&json!(1965)), Some(1965));
        assert_eq!(coerce_year(&json!("1965")), Some(1965));
        assert_eq!(coerce_year(&json!(" 1965 ")), Some(1965));
        assert_eq!(coerce_year(&json!(1965.9)), Some(1965));
        assert_eq!(coerce_year(&json!(-1)), Some(-1));
        assert_eq!(coerce_year(&json!(u64::MAX)), Some(i64::MAX));
        assert_eq!(coerce_year(&json!("abc")), None);
        assert_eq!(coerce_year(&json!("19.5")), None);
        assert_eq!(coerce_year(&json!("")), None);
        assert_eq!(coerce_year(&json!(true)), None);
        assert_eq!(coerce_year(&json!([1965])), None);
    }

    #[test]
    fn oversized_year_strings_saturate_like_numbers() {
        assert_eq!(coerce_year(&json!("99999999999999999999")), Some(i64::MAX));
        assert_eq!(coerce_year(&json!("+99999999999999999999")), Some(i64::MAX));
        assert_eq!(coerce_year(&json!("-99999999999999999999")), Some(i64::MIN));
        assert_eq!(coerce_year(&json!("9999999999999999999x")), None);
        assert_eq!(coerce_year(&json!("-")), None);
    }

    #[test]
    fn new_book_coerces_year_string() {
        let input = payload(json!({
            "title": "Dune",
            "author": "Herbert",
            "genre": "SciFi",
            "year": "1965"
        }));
        let book = input.to_new_book().unwrap();
        assert_eq!(book.year, 1965);
        assert_eq!(book.title, "Dune");
    }

    #[test]
    fn new_book_requires_every_field() {
        let input = payload(json!({ "title": "Dune", "author": "Herbert", "genre": "SciFi" }));
        assert!(input.to_new_book().is_none());
    }

    #[test]
    fn changes_skip_empty_text_and_unconvertible_year() {
        let changes = payload(json!({ "title": "", "author": "Someone", "year": "" })).to_changes();
        assert_eq!(
            changes,
            BookChanges {
                author: Some("Someone".into()),
                ..Default::default()
            }
        );
        assert!(payload(json!({})).to_changes().is_empty());
        assert!(payload(json!({ "year": null })).to_changes().is_empty());
        assert!(payload(json!({ "year": false })).to_changes().is_empty());
    }

    #[test]
    fn zero_year_is_a_supplied_change() {
        let changes = payload(json!({ "year": 0 })).to_changes();
        assert_eq!(changes.year, Some(0));
        assert_eq!(payload(json!({ "year": "0" })).to_changes().year, Some(0));
    }

    #[test]
    fn apply_touches_only_supplied_fields() {
        let mut book = Book {
            id: 3,
            title: "Pride and Prejudice".into(),
            author: "Jane Austen".into(),
            genre: "Romance".into(),
            year: 1813,
        };
        book.apply(BookChanges {
            genre: Some("Classic".into()),
            year: Some(1814),
            ..Default::default()
        });
        assert_eq!(book.title, "Pride and Prejudice");
        assert_eq!(book.author, "Jane Austen");
        assert_eq!(book.genre, "Classic");
        assert_eq!(book.year, 1814);
        assert_eq!(book.id, 3);
    }
}
