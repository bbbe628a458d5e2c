//! CirculationEngine - the in-memory circulation desk.
//!
//! The engine holds the catalog and the index of borrowed books. It applies
//! lending operations and answers queries against them.
//!
//! Three containers describe the same books:
//!
//! | Operation | `books`          | `positions`              | `borrowed`        |
//! |-----------|------------------|--------------------------|-------------------|
//! | add       | push             | insert                   | -                 |
//! | remove    | remove           | remove, shift later ones | remove if present |
//! | borrow    | mutate in place  | -                        | insert            |
//! | return    | mutate in place  | -                        | remove            |
//! | update    | mutate in place  | -                        | -                 |
//!
//! `positions` maps an id to its slot in `books`, and `borrowed` holds ids
//! only; the book itself lives once, in `books`.

use crate::{
    error::Result, fine, report::OverdueBook, Book, BookId, BookUpdate, Clock, Error,
    LendingPolicy, LibraryReport, LibraryStats, NewBook, SystemClock, Timestamp,
};
use chrono::Duration;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, info};

/// Result of a successful checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Checkout {
    /// The book as it stands after the checkout
    pub book: Book,
    pub due_date: Timestamp,
}

/// Result of a successful return.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Return {
    /// The book as it stands after the return
    pub book: Book,
    /// Fine owed for returning late; zero when on time
    pub fine: Decimal,
}

/// The circulation desk state.
#[derive(Debug, Clone)]
pub struct CirculationEngine<C = SystemClock> {
    /// Source of the current instant
    clock: C,
    /// Loan period and fine rate defaults
    policy: LendingPolicy,
    /// Catalog in insertion order
    books: Vec<Book>,
    /// Slot of each book in `books`, by id
    positions: HashMap<BookId, usize>,
    /// Ids of books currently on loan
    borrowed: BTreeSet<BookId>,
    /// Id handed to the next created book
    next_id: BookId,
}

impl Default for CirculationEngine {
    fn default() -> Self {
        Self::new(SystemClock)
    }
}

impl<C: Clock> CirculationEngine<C> {
    /// Create an empty engine with the default lending policy.
    pub fn new(clock: C) -> Self {
        Self::with_policy(clock, LendingPolicy::default())
    }

    /// Create an empty engine with a custom lending policy.
    pub fn with_policy(clock: C, policy: LendingPolicy) -> Self {
        Self {
            clock,
            policy,
            books: Vec::new(),
            positions: HashMap::new(),
            borrowed: BTreeSet::new(),
            next_id: 1,
        }
    }

    /// Get the lending policy.
    pub fn policy(&self) -> &LendingPolicy {
        &self.policy
    }

    /// Get the clock.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Validate catalog fields and build a book with a fresh id.
    ///
    /// The book is not added to the catalog; use [`add_book`](Self::add_book)
    /// for that. An id is consumed only when validation succeeds.
    pub fn create_book(&mut self, draft: NewBook) -> Result<Book> {
        let book = Book::new(self.next_id, draft, self.clock.now())?;
        self.next_id += 1;
        Ok(book)
    }

    /// Create a book and append it to the catalog.
    pub fn add_book(&mut self, draft: NewBook) -> Result<Book> {
        let book = self.create_book(draft).inspect_err(|err| {
            debug!(%err, "rejected new book");
        })?;

        info!(book_id = book.id, title = %book.title, "book added");
        self.positions.insert(book.id, self.books.len());
        self.books.push(book.clone());
        Ok(book)
    }

    /// Remove a book from the catalog, on loan or not.
    pub fn remove_book(&mut self, id: BookId) -> Result<Book> {
        let position = self.position(id).ok_or_else(|| {
            debug!(book_id = id, "remove of unknown book");
            Error::BookNotFound(id)
        })?;

        let book = self.books.remove(position);
        self.positions.remove(&id);
        for (slot, shifted) in self.books.iter().enumerate().skip(position) {
            self.positions.insert(shifted.id, slot);
        }
        let was_borrowed = self.borrowed.remove(&id);

        info!(book_id = id, was_borrowed, "book removed");
        Ok(book)
    }

    /// Lend a book for the policy's default loan period.
    pub fn borrow_book(&mut self, id: BookId, borrower: &str) -> Result<Checkout> {
        self.borrow_book_for(id, borrower, self.policy.default_loan_days)
    }

    /// Lend a book for `days` whole days.
    ///
    /// Checks, in order: the book exists, it is available, the borrower is
    /// named. A zero-day loan is due immediately.
    pub fn borrow_book_for(&mut self, id: BookId, borrower: &str, days: u32) -> Result<Checkout> {
        let now = self.clock.now();
        let position = self.position(id).ok_or(Error::BookNotFound(id))?;

        let book = &mut self.books[position];
        if !book.is_available() {
            debug!(book_id = id, "borrow of unavailable book");
            return Err(Error::NotAvailable(id));
        }

        if borrower.trim().is_empty() {
            return Err(Error::BorrowerRequired);
        }

        let due_date = Duration::try_days(i64::from(days))
            .and_then(|period| now.checked_add_signed(period))
            .ok_or(Error::LoanPeriodOutOfRange(days))?;

        book.lend(borrower, now, due_date);
        let book = book.clone();
        self.borrowed.insert(id);

        info!(book_id = id, borrower, %due_date, "book borrowed");
        Ok(Checkout { book, due_date })
    }

    /// Take a book back, charging the policy fine if it is late.
    ///
    /// Only the borrowed index is consulted, so a book on the shelf is never
    /// "returned".
    pub fn return_book(&mut self, id: BookId) -> Result<Return> {
        let position = match (self.borrowed.contains(&id), self.position(id)) {
            (true, Some(position)) => position,
            (false, Some(_)) => {
                debug!(book_id = id, "return of book not on loan");
                return Err(Error::NotBorrowed(id));
            }
            (_, None) => return Err(Error::BookNotFound(id)),
        };
        let now = self.clock.now();
        let book = &mut self.books[position];

        let fine = fine::calculate(book.due_date(), now, self.policy.fine_rate);
        book.release();
        let book = book.clone();
        self.borrowed.remove(&id);

        info!(book_id = id, %fine, "book returned");
        Ok(Return { book, fine })
    }

    /// Fine owed as of now for a loan due at `due_date`.
    pub fn calculate_fine(&self, due_date: Option<Timestamp>, fine_rate: Decimal) -> Decimal {
        fine::calculate(due_date, self.clock.now(), fine_rate)
    }

    /// Books whose title, author, genre or isbn contains `criteria`,
    /// ignoring case. Blank criteria match every book.
    pub fn search_books(&self, criteria: &str) -> Vec<&Book> {
        let needle = criteria.trim().to_lowercase();
        if needle.is_empty() {
            return self.books.iter().collect();
        }
        self.books.iter().filter(|b| b.matches(&needle)).collect()
    }

    /// Books in `genre`, ignoring case. `None` matches every book.
    pub fn books_by_genre(&self, genre: Option<&str>) -> Vec<&Book> {
        match genre {
            Some(genre) => {
                let genre = genre.to_lowercase();
                self.books
                    .iter()
                    .filter(|b| b.genre.to_lowercase() == genre)
                    .collect()
            }
            None => self.books.iter().collect(),
        }
    }

    /// Books on the shelf, in catalog order.
    pub fn available_books(&self) -> Vec<&Book> {
        self.books.iter().filter(|b| b.is_available()).collect()
    }

    /// Books on loan, in ascending id order.
    pub fn borrowed_books(&self) -> Vec<&Book> {
        self.borrowed.iter().filter_map(|&id| self.get(id)).collect()
    }

    /// Change catalog fields of a book.
    ///
    /// Title, author and isbn are frozen while the book is on loan; genre is
    /// not. Blank values in `update` are ignored.
    pub fn update_book(&mut self, id: BookId, update: BookUpdate) -> Result<Book> {
        let position = self.position(id).ok_or(Error::BookNotFound(id))?;
        let book = &mut self.books[position];

        if !book.is_available() && update.touches_identity() {
            debug!(book_id = id, "update of borrowed book rejected");
            return Err(Error::BorrowedBookLocked(id));
        }

        book.apply(update);
        info!(book_id = id, "book updated");
        Ok(book.clone())
    }

    /// Borrowed books past their due date, priced at `fine_rate`.
    pub fn overdue_books(&self, fine_rate: Decimal) -> Vec<OverdueBook> {
        let now = self.clock.now();
        self.borrowed_books()
            .into_iter()
            .filter_map(|book| OverdueBook::assess(book, now, fine_rate))
            .collect()
    }

    /// Counts and overdue fines at the policy rate.
    pub fn report(&self) -> LibraryReport {
        LibraryReport::new(
            self.books.len(),
            self.borrowed.len(),
            self.overdue_books(self.policy.fine_rate),
        )
    }

    /// The report plus a genre breakdown.
    pub fn stats(&self) -> LibraryStats {
        LibraryStats::new(self.report(), &self.books)
    }

    /// Get a book by id.
    pub fn get(&self, id: BookId) -> Option<&Book> {
        self.position(id).and_then(|position| self.books.get(position))
    }

    /// All books in catalog order.
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// Number of books in the catalog.
    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    fn position(&self, id: BookId) -> Option<usize> {
        self.positions.get(&id).copied()
    }
}
