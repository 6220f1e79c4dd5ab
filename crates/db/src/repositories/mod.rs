//! Repository structs, one per table, plus the read-only report queries.
//!
//! All queries are runtime-checked `query_as` with a shared column-list
//! constant per repository. Multi-row writes go through the lifecycle
//! engine (`crate::lifecycle`), which owns the transactions.

pub mod assignment_repo;
pub mod cycle_repo;
pub mod report_repo;
pub mod review_repo;
pub mod user_repo;

pub use assignment_repo::AssignmentRepo;
pub use cycle_repo::CycleRepo;
pub use report_repo::ReportRepo;
pub use review_repo::ReviewRepo;
pub use user_repo::UserRepo;
