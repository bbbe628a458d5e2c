//! Book types for the catalog.

use crate::{error::Result, BookId, Error, Timestamp};
use serde::{Deserialize, Serialize};

/// Catalog fields for a book that has not been created yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub genre: String,
    pub isbn: String,
}

impl NewBook {
    /// Collect the four catalog fields.
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        genre: impl Into<String>,
        isbn: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            genre: genre.into(),
            isbn: isbn.into(),
        }
    }

    /// Check that every field is present.
    ///
    /// Reports the first blank field in the order title, author, genre, isbn.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("title", &self.title),
            ("author", &self.author),
            ("genre", &self.genre),
            ("isbn", &self.isbn),
        ];
        match fields.into_iter().find(|(_, value)| is_blank(value)) {
            Some((name, _)) => Err(Error::MissingField(name)),
            None => Ok(()),
        }
    }
}

/// A partial set of catalog changes.
///
/// Blank values count as absent: an update can replace a field but never
/// clear it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
}

impl BookUpdate {
    /// An update that changes nothing.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    pub fn isbn(mut self, isbn: impl Into<String>) -> Self {
        self.isbn = Some(isbn.into());
        self
    }

    /// Whether the update changes title, author or isbn.
    ///
    /// These identify the physical item and are frozen while it is on loan.
    pub fn touches_identity(&self) -> bool {
        [&self.title, &self.author, &self.isbn]
            .into_iter()
            .any(|field| present(field).is_some())
    }
}

/// Lending details of a book currently on loan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    /// Name of the borrower
    pub borrowed_by: String,
    /// When the book was lent
    pub borrowed_at: Timestamp,
    /// When the book is due back
    pub due_date: Timestamp,
}

/// A catalog item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Unique identifier, assigned by the engine
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub isbn: String,
    /// Lending state; `None` while the book is on the shelf
    pub loan: Option<Loan>,
    /// When the book entered the catalog
    pub created_at: Timestamp,
}

impl Book {
    /// Create a validated book with no loan.
    pub fn new(id: BookId, draft: NewBook, created_at: Timestamp) -> Result<Self> {
        draft.validate()?;
        let NewBook {
            title,
            author,
            genre,
            isbn,
        } = draft;

        Ok(Self {
            id,
            title,
            author,
            genre,
            isbn,
            loan: None,
            created_at,
        })
    }

    /// Check if the book is on the shelf.
    pub fn is_available(&self) -> bool {
        self.loan.is_none()
    }

    pub fn borrowed_by(&self) -> Option<&str> {
        self.loan.as_ref().map(|loan| loan.borrowed_by.as_str())
    }

    pub fn borrowed_at(&self) -> Option<Timestamp> {
        self.loan.as_ref().map(|loan| loan.borrowed_at)
    }

    pub fn due_date(&self) -> Option<Timestamp> {
        self.loan.as_ref().map(|loan| loan.due_date)
    }

    /// Put the book on loan.
    pub(crate) fn lend(&mut self, borrower: impl Into<String>, at: Timestamp, due: Timestamp) {
        self.loan = Some(Loan {
            borrowed_by: borrower.into(),
            borrowed_at: at,
            due_date: due,
        });
    }

    /// Take the book off loan, handing back the loan it had.
    pub(crate) fn release(&mut self) -> Option<Loan> {
        self.loan.take()
    }

    /// Apply the non-blank fields of an update.
    pub(crate) fn apply(&mut self, update: BookUpdate) {
        let BookUpdate {
            title,
            author,
            genre,
            isbn,
        } = update;

        for (slot, value) in [
            (&mut self.title, title),
            (&mut self.author, author),
            (&mut self.genre, genre),
            (&mut self.isbn, isbn),
        ] {
            if let Some(value) = value.filter(|v| !is_blank(v)) {
                *slot = value;
            }
        }
    }

    /// Whether any catalog field contains `needle`.
    ///
    /// `needle` must already be lowercase.
    pub(crate) fn matches(&self, needle: &str) -> bool {
        [&self.title, &self.author, &self.genre, &self.isbn]
            .into_iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|v| !is_blank(v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration};

    fn at(millis: i64) -> Timestamp {
        DateTime::from_timestamp_millis(millis).unwrap()
    }

    fn draft() -> NewBook {
        NewBook::new("El Principito", "Antoine de Saint-Exupéry", "Ficción", "123456789")
    }

    #[test]
    fn create_book() {
        let book = Book::new(1, draft(), at(1000)).unwrap();

        assert_eq!(book.id, 1);
        assert_eq!(book.title, "El Principito");
        assert_eq!(book.genre, "Ficción");
        assert!(book.is_available());
        assert_eq!(book.borrowed_by(), None);
        assert_eq!(book.borrowed_at(), None);
        assert_eq!(book.due_date(), None);
        assert_eq!(book.created_at, at(1000));
    }

    #[test]
    fn create_book_missing_fields() {
        let cases = [
            (NewBook::new("", "A", "G", "I"), "title"),
            (NewBook::new("T", "", "G", "I"), "author"),
            (NewBook::new("T", "A", "  ", "I"), "genre"),
            (NewBook::new("T", "A", "G", ""), "isbn"),
            (NewBook::default(), "title"),
        ];

        for (draft, field) in cases {
            let result = Book::new(1, draft, at(0));
            assert_eq!(result, Err(Error::MissingField(field)));
        }
    }

    #[test]
    fn lend_and_release() {
        let mut book = Book::new(1, draft(), at(0)).unwrap();
        let due = at(0) + Duration::days(14);

        book.lend("María", at(0), due);
        assert!(!book.is_available());
        assert_eq!(book.borrowed_by(), Some("María"));
        assert_eq!(book.borrowed_at(), Some(at(0)));
        assert_eq!(book.due_date(), Some(due));

        let loan = book.release().unwrap();
        assert_eq!(loan.borrowed_by, "María");
        assert!(book.is_available());
        assert_eq!(book.due_date(), None);
    }

    #[test]
    fn apply_skips_blank_fields() {
        let mut book = Book::new(1, draft(), at(0)).unwrap();
        book.apply(BookUpdate::new().title("").genre("Clásico").isbn("   "));

        assert_eq!(book.title, "El Principito");
        assert_eq!(book.genre, "Clásico");
        assert_eq!(book.isbn, "123456789");
    }

    #[test]
    fn touches_identity() {
        assert!(!BookUpdate::new().touches_identity());
        assert!(!BookUpdate::new().genre("Drama").touches_identity());
        assert!(!BookUpdate::new().title("").touches_identity());
        assert!(BookUpdate::new().title("New").touches_identity());
        assert!(BookUpdate::new().author("Someone").touches_identity());
        assert!(BookUpdate::new().isbn("42").touches_identity());
    }

    #[test]
    fn matches_any_field() {
        let book = Book::new(1, draft(), at(0)).unwrap();
        assert!(book.matches("principito"));
        assert!(book.matches("saint"));
        assert!(book.matches("ficción"));
        assert!(book.matches("4567"));
        assert!(!book.matches("orwell"));
    }

    #[test]
    fn serialization_format() {
        let mut book = Book::new(1, draft(), at(0)).unwrap();
        book.lend("Ana", at(0), at(86_400_000));

        let json = serde_json::to_string(&book).unwrap();
        assert!(json.contains("createdAt"));
        assert!(json.contains("borrowedBy"));
        assert!(json.contains("dueDate"));

        let parsed: Book = serde_json::from_str(&json).unwrap();
        assert_eq!(book, parsed);
    }
}
