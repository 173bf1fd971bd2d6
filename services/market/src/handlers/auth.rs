use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use kisankart_domain::user::Role;

use crate::domain::types::User;
use crate::error::MarketServiceError;
use crate::state::AppState;
use crate::usecase::directory::{LoginInput, LoginUseCase, SignupInput, SignupUseCase};

/// Account payload returned by signup and login. Credentials never leave
/// the service.
#[derive(Serialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: &'static str,
    pub status: &'static str,
    #[serde(serialize_with = "kisankart_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name,
            email: user.email,
            phone: user.phone,
            role: user.role.as_str(),
            status: user.status.as_str(),
            created_at: user.created_at,
        }
    }
}

fn parse_role(role: &str) -> Result<Role, MarketServiceError> {
    Role::from_str_opt(role)
        .ok_or_else(|| MarketServiceError::invalid_input("role must be farmer, customer or admin"))
}

// ── POST /auth/signup ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub role: String,
    pub admin_key: Option<String>,
}

pub async fn signup(
    State(state): State<AppState>,
    Json(body): Json<SignupRequest>,
) -> Result<(StatusCode, Json<UserResponse>), MarketServiceError> {
    let role = parse_role(&body.role)?;
    let usecase = SignupUseCase {
        repo: state.user_repo(),
        admin_key: state.admin_key.clone(),
    };
    let user = usecase
        .execute(SignupInput {
            name: body.name,
            email: body.email,
            phone: body.phone,
            password: body.password,
            role,
            admin_key: body.admin_key,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

// ── POST /auth/login ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub role: String,
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<UserResponse>, MarketServiceError> {
    let role = parse_role(&body.role)?;
    let usecase = LoginUseCase {
        repo: state.user_repo(),
    };
    let user = usecase
        .execute(LoginInput {
            email: body.email,
            password: body.password,
            role,
        })
        .await?;
    Ok(Json(user.into()))
}
