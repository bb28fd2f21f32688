//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services coordinate between domain entities, ports, and external systems.

pub mod aggregation_service;
pub mod ingestion_queue;
pub mod ingestion_service;
pub mod month_registry;
pub mod user_service;

pub use aggregation_service::{AggregationService, DashboardEntry, HandleLookup, LeaderboardEntry};
pub use ingestion_queue::IngestionQueue;
pub use ingestion_service::IngestionService;
pub use month_registry::MonthRegistry;
pub use user_service::UserService;
