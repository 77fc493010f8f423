//! sea-orm entities for the Shelfmark api service.

pub mod books;
pub mod preferences;
pub mod reviews;
pub mod users;
