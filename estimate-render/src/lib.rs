//! Printable quote documents.
//!
//! Takes a finalized estimate plus a company profile and produces a
//! self-contained HTML document: the printable representation handed to
//! whatever turns it into a PDF. Totals are always re-derived through the
//! calculator; the cached fields on the record are never trusted here.

mod quote;

pub use quote::{format_money, render_quote_html};
