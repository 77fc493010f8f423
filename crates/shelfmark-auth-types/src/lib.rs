//! JWT token validation and the Bearer identity extractor.
//!
//! Token issuance lives in the api service (`usecase/token.rs`); this crate
//! only validates, so any future service can authenticate requests without
//! being able to mint tokens.

pub mod identity;
pub mod token;
