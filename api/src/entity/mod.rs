//! SeaORM entities
//!
//! Table models matching `migrations/0001_init.sql`.

pub mod months;
pub mod orgs;
pub mod projects;
pub mod prs;
pub mod users;
