//! GitHub adapter
//!
//! Implementation of the pull request source on top of the GitHub search API.

pub mod client;

pub use client::GitHubClientImpl;
