//! User handlers
//!
//! Endpoint for registering tracked users.

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::domain::entities::{NewUser, User};
use crate::error::AppError;
use crate::AppState;

/// Response body for a registered user
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub github_user: String,
    pub created_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name,
            github_user: user.github_user,
            created_at: user.created_at.to_rfc3339(),
        }
    }
}

/// POST /users
///
/// Register a user. Their pull requests for the tracked months are fetched
/// in the background, so the response never waits on GitHub.
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<NewUser>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let user = state.user_service.register(&request).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}
