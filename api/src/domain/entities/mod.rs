//! Domain entities
//!
//! Pure domain models representing core business concepts.
//! These are separate from the SeaORM entities in the `entity` module.

pub mod month;
pub mod org;
pub mod pull_request;
pub mod user;

pub use month::{validate_month_label, Month, MonthId, TrackedMonths};
pub use org::{OrgId, ProjectId};
pub use pull_request::{
    approximate_merged, NewPullRequest, PullRequest, PullRequestDetails, PullRequestId,
};
pub use user::{is_valid_github_handle, NewUser, User, UserId};
