use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use uuid::Uuid;

use kisankart_core::identity::IdentityHeaders;
use kisankart_domain::user::Role;

use crate::error::MarketServiceError;
use crate::handlers::auth::UserResponse;
use crate::state::AppState;
use crate::usecase::directory::{GetUserUseCase, ListUsersUseCase, ToggleUserStatusUseCase};

// ── GET /users/@me ───────────────────────────────────────────────────────────

pub async fn get_me(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Json<UserResponse>, MarketServiceError> {
    let usecase = GetUserUseCase {
        repo: state.user_repo(),
    };
    let user = usecase.execute(identity.user_id).await?;
    Ok(Json(user.into()))
}

// ── GET /users ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ListUsersQuery {
    pub role: String,
}

pub async fn get_users(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Query(query): Query<ListUsersQuery>,
) -> Result<Json<Vec<UserResponse>>, MarketServiceError> {
    if identity.role != Role::Admin {
        return Err(MarketServiceError::Forbidden);
    }
    let role = Role::from_str_opt(&query.role)
        .ok_or_else(|| MarketServiceError::invalid_input("unknown role"))?;
    let usecase = ListUsersUseCase {
        repo: state.user_repo(),
    };
    let users = usecase.execute(role).await?;
    Ok(Json(users.into_iter().map(Into::into).collect()))
}

// ── PATCH /users/{id}/status ─────────────────────────────────────────────────

pub async fn toggle_user_status(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserResponse>, MarketServiceError> {
    if identity.role != Role::Admin {
        return Err(MarketServiceError::Forbidden);
    }
    let usecase = ToggleUserStatusUseCase {
        repo: state.user_repo(),
    };
    let user = usecase.execute(id).await?;
    Ok(Json(user.into()))
}
