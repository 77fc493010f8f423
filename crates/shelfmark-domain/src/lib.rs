//! Pure domain types shared across the Shelfmark workspace.
//!
//! No I/O, no framework types — only wire-format enums and pagination.

pub mod book;
pub mod pagination;
pub mod preference;
pub mod user;
