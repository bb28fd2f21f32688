//! Organization and project references
//!
//! Pull requests may point at an org and a project. Nothing in this service
//! assigns them; they are populated out of band and only read back for
//! display.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an organization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrgId(pub Uuid);

impl From<Uuid> for OrgId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

/// Unique identifier for a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectId(pub Uuid);

impl From<Uuid> for ProjectId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}
