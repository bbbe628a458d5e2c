//! Scripted circulation session.
//!
//! Walks the desk through a day of work: stocking the shelves, searching,
//! lending, taking books back and correcting catalog entries. Rejections the
//! desk expects (a book already out, a missing borrower name) are logged and
//! the session carries on.

use crate::error::Result;
use circulation_engine::{BookUpdate, CirculationEngine, Clock, LibraryStats, NewBook};
use tracing::{info, warn};

/// Run the session against `engine` and report where the desk ended up.
pub fn run<C: Clock>(engine: &mut CirculationEngine<C>) -> Result<LibraryStats> {
    let principito = engine.add_book(NewBook::new(
        "El Principito",
        "Antoine de Saint-Exupéry",
        "Ficción",
        "123456789",
    ))?;
    let orwell = engine.add_book(NewBook::new("1984", "George Orwell", "Ficción", "987654321"))?;
    let soledad = engine.add_book(NewBook::new(
        "Cien años de soledad",
        "Gabriel García Márquez",
        "Realismo mágico",
        "456789123",
    ))?;

    if let Err(err) = engine.add_book(NewBook::new("", "Autor", "Género", "111111")) {
        warn!(%err, "incomplete catalog entry rejected");
    }

    for criteria in ["", "principito", "orwell", "ficción"] {
        let hits = engine.search_books(criteria).len();
        info!(criteria, hits, "catalog search");
    }
    info!(available = engine.available_books().len(), "shelf count");

    let checkout = engine.borrow_book(principito.id, "María García")?;
    info!(book_id = principito.id, due_date = %checkout.due_date, "first loan");

    for (id, borrower) in [
        (principito.id, "Carlos López"),
        (orwell.id, "Ana Martínez"),
        (999_999, "Juan Pérez"),
        (soledad.id, ""),
    ] {
        match engine.borrow_book(id, borrower) {
            Ok(checkout) => info!(book_id = id, due_date = %checkout.due_date, "loan"),
            Err(err) => warn!(book_id = id, %err, "loan refused"),
        }
    }

    for id in [principito.id, principito.id, 999_999] {
        match engine.return_book(id) {
            Ok(returned) => info!(book_id = id, fine = %returned.fine, "return"),
            Err(err) => warn!(book_id = id, %err, "return refused"),
        }
    }

    // Orwell is still out: genre may change, title may not
    engine.update_book(orwell.id, BookUpdate::new().genre("Distopía"))?;
    let retitle = BookUpdate::new().title("Nineteen Eighty-Four");
    if let Err(err) = engine.update_book(orwell.id, retitle) {
        warn!(%err, "catalog correction refused");
    }

    for book in engine.borrowed_books() {
        info!(book_id = book.id, borrower = book.borrowed_by(), "still on loan");
    }

    Ok(engine.stats())
}
