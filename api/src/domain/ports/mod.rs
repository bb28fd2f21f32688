//! Domain ports (traits)
//!
//! Port traits define interfaces that the domain layer requires.
//! Adapters provide concrete implementations of these traits.

pub mod github;
pub mod repositories;

pub use github::{FetchedPullRequest, PullRequestSource};
pub use repositories::{MonthRepository, PullRequestRepository, UserRepository};
