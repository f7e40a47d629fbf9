//! Pagination module
//!
//! Offset pagination with a fixed request budget.
//!
//! # Overview
//!
//! A [`PageCursor`] owns the `from` offset of a run and the number of
//! requests still allowed. The fetch loop asks it for the next offset, and
//! advances it only after a page has been fully written.

mod types;

pub use types::PageCursor;

#[cfg(test)]
mod tests;
