//! Domain layer
//!
//! Users, months and the pull requests filed under them, plus the traits
//! the application layer needs from storage and from GitHub.
//! - `entities`: Domain models
//! - `ports`: Repository and pull request source traits

pub mod entities;
pub mod ports;
