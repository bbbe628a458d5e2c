//! # Circulation Engine
//!
//! A deterministic in-memory circulation engine for a single-branch library
//! desk.
//!
//! This crate tracks the catalog, lending state, due dates and overdue fines,
//! and produces aggregate reports. The same inputs and the same clock reading
//! always produce the same outputs.
//!
//! ## Design Principles
//!
//! - **No IO**: Engine has no knowledge of files, network, or platform
//! - **Deterministic**: Time is read from an injected [`Clock`]
//! - **Never aborts**: Every failure is a [`Result`] the caller inspects
//! - **Read-only views**: Queries hand out `&Book`, mutations return owned snapshots
//!
//! ## Core Concepts
//!
//! ### Books
//!
//! A [`Book`] carries catalog fields (title, author, genre, isbn), a creation
//! timestamp and an optional [`Loan`]. A book is available exactly when it has
//! no loan, so the lending fields are always all present or all absent.
//!
//! ### Catalog and borrowed index
//!
//! The [`CirculationEngine`] keeps the catalog in insertion order and a
//! separate index of borrowed book ids. Every mutating operation keeps both
//! in sync; the index never holds a copy of a book.
//!
//! ### Fines
//!
//! Overdue days are whole days past the due date, rounded up. A fine is
//! `overdue_days * fine_rate` rounded to cents, see [`fine`].
//!
//! ## Quick Start
//!
//! ```rust
//! use circulation_engine::{CirculationEngine, ManualClock, NewBook};
//! use rust_decimal::Decimal;
//!
//! let clock = ManualClock::at_millis(1_706_745_600_000);
//! let mut engine = CirculationEngine::new(clock.clone());
//!
//! let book = engine
//!     .add_book(NewBook::new("Dune", "Frank Herbert", "Sci-Fi", "9780441172719"))
//!     .unwrap();
//!
//! let checkout = engine.borrow_book_for(book.id, "Bob", 1).unwrap();
//! assert!(!checkout.book.is_available());
//!
//! // Three days later the book is two days overdue.
//! clock.advance(chrono::Duration::days(3));
//! let returned = engine.return_book(book.id).unwrap();
//! assert_eq!(returned.fine, Decimal::new(100, 2));
//! ```

pub mod book;
pub mod clock;
pub mod engine;
pub mod error;
pub mod fine;
pub mod policy;
pub mod report;

// Re-export main types at crate root
pub use book::{Book, BookUpdate, Loan, NewBook};
pub use clock::{Clock, ManualClock, SystemClock};
pub use engine::{Checkout, CirculationEngine, Return};
pub use error::{Error, Result};
pub use policy::LendingPolicy;
pub use report::{LibraryReport, LibraryStats, OverdueBook};

/// Type aliases for clarity
pub type BookId = u64;
pub type Timestamp = chrono::DateTime<chrono::Utc>;
