//! PostgreSQL adapters
//!
//! Implementations of repository traits using SeaORM and PostgreSQL.

pub mod month_repo;
pub mod pull_request_repo;
pub mod user_repo;


pub use month_repo::PostgresMonthRepository;
pub use pull_request_repo::PostgresPullRequestRepository;
pub use user_repo::PostgresUserRepository;
