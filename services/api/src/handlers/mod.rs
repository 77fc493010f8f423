pub mod book;
pub mod preference;
pub mod review;
pub mod user;
