//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod health;
pub mod stats;
pub mod track;
pub mod users;

pub use health::{greet, health};
pub use stats::{admin_dashboard, leaderboard};
pub use track::track_prs;
pub use users::create_user;
