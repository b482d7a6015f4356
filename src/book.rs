// Book data model and the JSON shapes exchanged with the backend.
//
// `Book` is what the server returns (it always carries an `id`), `NewBook`
// is what we POST (no `id`), and `BookDraft` is the form's working copy
// where every field is still raw text.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Server-assigned identifier, opaque to the client. Backends may send a
/// JSON number or a string; the wire shape is kept so an update echoes it
/// unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BookId {
    Number(u64),
    Text(String),
}

impl BookId {
    /// The id as a percent-encoded URL path segment.
    pub fn as_path(&self) -> String {
        urlencoding::encode(&self.to_string()).into_owned()
    }
}

impl PartialEq for BookId {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (BookId::Number(a), BookId::Number(b)) => a == b,
            _ => self.to_string() == other.to_string(),
        }
    }
}

impl Eq for BookId {}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookId::Number(n) => write!(f, "{}", n),
            BookId::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for BookId {
    fn from(n: u64) -> Self {
        BookId::Number(n)
    }
}

impl From<&str> for BookId {
    /// Digits become a number, anything else stays text.
    fn from(raw: &str) -> Self {
        match raw.parse::<u64>() {
            Ok(n) if n.to_string() == raw => BookId::Number(n),
            _ => BookId::Text(raw.to_string()),
        }
    }
}

/// A book as stored by the backend.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub published_year: i32,
    pub genre: String,
    pub description: String,
}

/// Create payload: a book minus its `id`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub published_year: i32,
    pub genre: String,
    pub description: String,
}

impl NewBook {
    /// Attach an identifier, producing the full record sent on update.
    pub fn with_id(self, id: BookId) -> Book {
        Book {
            id,
            title: self.title,
            author: self.author,
            published_year: self.published_year,
            genre: self.genre,
            description: self.description,
        }
    }
}

/// Success envelope: `{ "data": ... }`.
#[derive(Serialize, Deserialize, Debug)]
pub struct DataEnvelope<T> {
    pub data: T,
}

/// Failure envelope returned by POST/PUT: `{ "errors": { field: message } }`.
/// Some backends send a list of messages per field; both shapes are
/// accepted. Entries that are neither are skipped.
#[derive(Deserialize, Debug)]
pub struct ErrorEnvelope {
    pub errors: BTreeMap<String, Value>,
}

impl From<ErrorEnvelope> for FieldErrors {
    fn from(envelope: ErrorEnvelope) -> Self {
        let mut errors = FieldErrors::default();
        for (name, value) in envelope.errors {
            let text = match value {
                Value::String(s) => s,
                Value::Array(items) => items
                    .iter()
                    .filter_map(Value::as_str)
                    .collect::<Vec<_>>()
                    .join(" "),
                _ => continue,
            };
            if !text.trim().is_empty() {
                errors.insert_named(name, text);
            }
        }
        errors
    }
}

/// The editable fields of a book, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Title,
    Author,
    PublishedYear,
    Genre,
    Description,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Title,
        Field::Author,
        Field::PublishedYear,
        Field::Genre,
        Field::Description,
    ];

    /// Wire name, as used in JSON bodies and error maps.
    pub fn name(self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Author => "author",
            Field::PublishedYear => "published_year",
            Field::Genre => "genre",
            Field::Description => "description",
        }
    }

    /// Human label shown next to the input.
    pub fn label(self) -> &'static str {
        match self {
            Field::Title => "Title",
            Field::Author => "Author",
            Field::PublishedYear => "Published Year",
            Field::Genre => "Genre",
            Field::Description => "Description",
        }
    }

    pub fn from_name(name: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|f| f.name() == name)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-field messages keyed by wire name. Local validation and server-side
/// rejections both end up here so they render the same way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field.name().to_string(), message.into());
    }

    pub fn insert_named(&mut self, name: impl Into<String>, message: impl Into<String>) {
        self.0.insert(name.into(), message.into());
    }

    /// Message for a field, or `None` when the field is fine.
    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(field.name()).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Messages for keys that do not name a form field. The form has no
    /// input to attach these to, so it shows them in the banner instead.
    pub fn unattached(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .filter(|(k, _)| Field::from_name(k).is_none())
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// The form's working copy. Everything is text until validation succeeds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookDraft {
    pub id: Option<BookId>,
    pub title: String,
    pub author: String,
    pub published_year: String,
    pub genre: String,
    pub description: String,
}

impl BookDraft {
    /// Blank draft used in create mode.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Title => &self.title,
            Field::Author => &self.author,
            Field::PublishedYear => &self.published_year,
            Field::Genre => &self.genre,
            Field::Description => &self.description,
        }
    }

    /// Write one field. No other field is touched.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Title => self.title = value,
            Field::Author => self.author = value,
            Field::PublishedYear => self.published_year = value,
            Field::Genre => self.genre = value,
            Field::Description => self.description = value,
        }
    }
}

impl From<&Book> for BookDraft {
    fn from(book: &Book) -> Self {
        BookDraft {
            id: Some(book.id.clone()),
            title: book.title.clone(),
            author: book.author.clone(),
            published_year: book.published_year.to_string(),
            genre: book.genre.clone(),
            description: book.description.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_envelope_keeps_server_order() {
        let body = r#"{"data":[
            {"id":7,"title":"B","author":"x","published_year":1999,"genre":"g","description":"d"},
            {"id":3,"title":"A","author":"y","published_year":2001,"genre":"g","description":"d"}
        ]}"#;
        let env: DataEnvelope<Vec<Book>> = serde_json::from_str(body).unwrap();
        let ids: Vec<_> = env.data.iter().map(|b| b.id.clone()).collect();
        assert_eq!(ids, vec![BookId::from(7), BookId::from(3)]);
    }

    #[test]
    fn string_ids_decode_and_keep_their_shape() {
        let body = r#"{"data":[
            {"id":"9b2e","title":"B","author":"x","published_year":1999,
             "genre":"g","description":"d"},
            {"id":"5","title":"A","author":"y","published_year":2001,"genre":"g","description":"d"},
            {"id":12,"title":"C","author":"z","published_year":2003,"genre":"g","description":"d"}
        ]}"#;
        let env: DataEnvelope<Vec<Book>> = serde_json::from_str(body).unwrap();
        assert_eq!(env.data[0].id, BookId::Text("9b2e".into()));
        assert_eq!(env.data[0].id.to_string(), "9b2e");
        assert_eq!(env.data[1].id, BookId::from(5));
        assert_eq!(env.data[2].id, BookId::from("12"));

        let echoed = serde_json::to_value(&env.data[1]).unwrap();
        assert_eq!(echoed["id"], "5");
        let echoed = serde_json::to_value(&env.data[2]).unwrap();
        assert_eq!(echoed["id"], 12);
    }

    #[test]
    fn id_path_segment_is_percent_encoded() {
        assert_eq!(BookId::from(42).as_path(), "42");
        assert_eq!(BookId::from("the hobbit").as_path(), "the%20hobbit");
        assert_eq!(BookId::from("a/b").as_path(), "a%2Fb");
    }

    #[test]
    fn new_book_has_no_id_on_the_wire() {
        let book = NewBook {
            title: "Dune".into(),
            author: "Frank Herbert".into(),
            published_year: 1965,
            genre: "SF".into(),
            description: "Spice".into(),
        };
        let value = serde_json::to_value(&book).unwrap();
        assert!(value.get("id").is_none());
        assert_eq!(value["published_year"], 1965);
    }

    #[test]
    fn error_envelope_accepts_strings_and_lists() {
        let body = r#"{"message":"invalid","errors":{
            "title":"The title has already been taken.",
            "genre":["The genre field is required.","Too short."]
        }}"#;
        let env: ErrorEnvelope = serde_json::from_str(body).unwrap();
        let errors = FieldErrors::from(env);
        assert_eq!(errors.get(Field::Title), Some("The title has already been taken."));
        assert_eq!(
            errors.get(Field::Genre),
            Some("The genre field is required. Too short.")
        );
        assert_eq!(errors.get(Field::Author), None);
    }

    #[test]
    fn error_envelope_skips_entries_that_are_not_messages() {
        let body = r#"{"errors":{
            "title":["The title has already been taken."],
            "code":422,
            "meta":{"retry":false},
            "genre":[1, "Genre is too long."]
        }}"#;
        let env: ErrorEnvelope = serde_json::from_str(body).unwrap();
        let errors = FieldErrors::from(env);
        assert_eq!(errors.get(Field::Title), Some("The title has already been taken."));
        assert_eq!(errors.get(Field::Genre), Some("Genre is too long."));
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn draft_from_book_copies_every_field() {
        let book = Book {
            id: 9.into(),
            title: "Emma".into(),
            author: "Jane Austen".into(),
            published_year: 1815,
            genre: "Novel".into(),
            description: "Matchmaking".into(),
        };
        let draft = BookDraft::from(&book);
        assert_eq!(draft.id, Some(BookId::from(9)));
        assert_eq!(draft.get(Field::PublishedYear), "1815");
        assert_eq!(draft.get(Field::Description), "Matchmaking");
    }

    #[test]
    fn set_only_touches_one_field() {
        let mut draft = BookDraft::empty();
        draft.set(Field::Genre, "Poetry");
        assert_eq!(draft.genre, "Poetry");
        assert!(draft.title.is_empty());
        assert!(draft.published_year.is_empty());
    }

    #[test]
    fn unknown_keys_stay_unattached() {
        let mut errors = FieldErrors::default();
        errors.insert(Field::Title, "old");
        errors.insert(Field::Title, "new");
        errors.insert_named("isbn", "bad isbn");
        assert_eq!(errors.get(Field::Title), Some("new"));
        assert_eq!(errors.unattached().collect::<Vec<_>>(), vec![("isbn", "bad isbn")]);
    }
}
