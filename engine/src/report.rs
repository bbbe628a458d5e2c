//! Aggregate views over the catalog.

use crate::{fine, Book, BookId, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Summary of one overdue loan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverdueBook {
    pub id: BookId,
    pub title: String,
    pub borrowed_by: String,
    pub due_date: Timestamp,
    /// Whole days past the due date, rounded up
    pub overdue_days: i64,
    pub fine: Decimal,
}

impl OverdueBook {
    /// Summarize `book` if it is on loan and past due at `now`.
    pub(crate) fn assess(book: &Book, now: Timestamp, fine_rate: Decimal) -> Option<Self> {
        let loan = book.loan.as_ref()?;
        if loan.due_date >= now {
            return None;
        }
        let overdue_days = fine::overdue_days(loan.due_date, now);

        Some(Self {
            id: book.id,
            title: book.title.clone(),
            borrowed_by: loan.borrowed_by.clone(),
            due_date: loan.due_date,
            overdue_days,
            fine: fine::charge(overdue_days, fine_rate),
        })
    }
}

/// Counts and fines across the whole catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryReport {
    pub total_books: usize,
    pub borrowed_books: usize,
    pub available_books: usize,
    /// Number of overdue loans
    pub overdue_books: usize,
    /// Sum of all overdue fines, rounded to cents
    pub total_fines: Decimal,
    pub overdue_books_details: Vec<OverdueBook>,
}

impl LibraryReport {
    pub(crate) fn new(
        total_books: usize,
        borrowed_books: usize,
        overdue: Vec<OverdueBook>,
    ) -> Self {
        let total_fines = fine::total(overdue.iter().map(|o| o.fine));

        Self {
            total_books,
            borrowed_books,
            available_books: total_books.saturating_sub(borrowed_books),
            overdue_books: overdue.len(),
            total_fines,
            overdue_books_details: overdue,
        }
    }
}

/// A [`LibraryReport`] plus the genre breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryStats {
    #[serde(flatten)]
    pub report: LibraryReport,
    /// Number of books per genre, keyed by the genre as stored
    pub genres_distribution: BTreeMap<String, usize>,
    /// Genre with the most books; empty when the catalog is empty
    pub most_popular_genre: String,
}

impl LibraryStats {
    pub(crate) fn new<'a>(
        report: LibraryReport,
        books: impl IntoIterator<Item = &'a Book>,
    ) -> Self {
        let mut genres_distribution = BTreeMap::new();
        for book in books {
            *genres_distribution.entry(book.genre.clone()).or_insert(0) += 1;
        }
        let most_popular_genre = most_popular(&genres_distribution);

        Self {
            report,
            genres_distribution,
            most_popular_genre,
        }
    }
}

/// Highest count wins; on a tie the genre folded first (alphabetically) stays.
fn most_popular(histogram: &BTreeMap<String, usize>) -> String {
    histogram
        .iter()
        .fold(None::<(&String, usize)>, |best, (genre, &count)| match best {
            Some((_, top)) if top >= count => best,
            _ => Some((genre, count)),
        })
        .map(|(genre, _)| genre.clone())
        .unwrap_or_default()
}
