//! Role lookup handler.

use axum::{extract::State, response::Json};

use crate::api::AppState;
use crate::domain::Role;
use crate::errors::AppResult;
use crate::types::ApiResponse;

/// List the roles users can register with
#[utoipa::path(
    get,
    path = "/api/roles",
    tag = "Roles",
    responses(
        (status = 200, description = "Available roles", body = [Role])
    )
)]
pub async fn list_roles(State(state): State<AppState>) -> AppResult<Json<ApiResponse<Vec<Role>>>> {
    let roles = state.roles.list().await?;

    Ok(Json(ApiResponse::with_message(roles, "Roles retrieved successfully")))
}
