//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A `Deserialize` create/submit DTO for inserts
//! - Read-side projection structs where a query joins across tables

pub mod assignment;
pub mod cycle;
pub mod report;
pub mod review;
pub mod user;
