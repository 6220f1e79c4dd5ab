//! Pure domain logic for the FullCircle 360° review platform.
//!
//! No I/O lives here: status vocabularies, state-transition rules, input
//! validation, and the tokenize/tally helpers behind the reporting queries.
//! The db and api crates build on these primitives.

pub mod assignment;
pub mod cycle;
pub mod error;
pub mod reporting;
pub mod review;
pub mod roles;
pub mod types;
