use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use kisankart_core::identity::IdentityHeaders;
use kisankart_domain::user::Role;

use crate::domain::types::ContactMessage;
use crate::error::MarketServiceError;
use crate::state::AppState;
use crate::usecase::contact::{
    DeleteContactMessageUseCase, ListContactMessagesUseCase, MarkMessageReadUseCase,
    SubmitContactMessageInput, SubmitContactMessageUseCase,
};

#[derive(Serialize)]
pub struct ContactMessageResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
    pub status: &'static str,
    #[serde(serialize_with = "kisankart_core::serde::to_rfc3339_ms")]
    pub date: chrono::DateTime<chrono::Utc>,
}

impl From<ContactMessage> for ContactMessageResponse {
    fn from(m: ContactMessage) -> Self {
        Self {
            id: m.id.to_string(),
            name: m.name,
            email: m.email,
            phone: m.phone,
            subject: m.subject,
            message: m.message,
            status: m.status.as_str(),
            date: m.date,
        }
    }
}

// ── POST /contact ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SubmitContactRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub subject: String,
    pub message: String,
}

/// Public contact form; no identity required.
pub async fn submit_contact_message(
    State(state): State<AppState>,
    Json(body): Json<SubmitContactRequest>,
) -> Result<(StatusCode, Json<ContactMessageResponse>), MarketServiceError> {
    let usecase = SubmitContactMessageUseCase {
        repo: state.contact_repo(),
    };
    let message = usecase
        .execute(SubmitContactMessageInput {
            name: body.name,
            email: body.email,
            phone: body.phone,
            subject: body.subject,
            message: body.message,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(message.into())))
}

// ── GET /contact ─────────────────────────────────────────────────────────────

pub async fn get_contact_messages(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Json<Vec<ContactMessageResponse>>, MarketServiceError> {
    if identity.role != Role::Admin {
        return Err(MarketServiceError::Forbidden);
    }
    let usecase = ListContactMessagesUseCase {
        repo: state.contact_repo(),
    };
    let messages = usecase.execute().await?;
    Ok(Json(messages.into_iter().map(Into::into).collect()))
}

// ── PATCH /contact/{id}/read ─────────────────────────────────────────────────

pub async fn mark_message_read(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, MarketServiceError> {
    if identity.role != Role::Admin {
        return Err(MarketServiceError::Forbidden);
    }
    let usecase = MarkMessageReadUseCase {
        repo: state.contact_repo(),
    };
    usecase.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── DELETE /contact/{id} ─────────────────────────────────────────────────────

pub async fn delete_contact_message(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, MarketServiceError> {
    if identity.role != Role::Admin {
        return Err(MarketServiceError::Forbidden);
    }
    let usecase = DeleteContactMessageUseCase {
        repo: state.contact_repo(),
    };
    usecase.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
