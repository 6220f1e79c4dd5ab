//! HTTP request handlers, grouped by resource.

pub mod admin;
pub mod assignment;
pub mod auth;
pub mod cycle;
pub mod report;
pub mod review;
