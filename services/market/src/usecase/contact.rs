use chrono::Utc;
use uuid::Uuid;

use kisankart_domain::contact::ContactStatus;

use crate::domain::repository::ContactRepository;
use crate::domain::types::{ContactMessage, validate_email};
use crate::error::MarketServiceError;

// ── SubmitContactMessage ─────────────────────────────────────────────────────

pub struct SubmitContactMessageInput {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
}

/// Anonymous inbox: no account needed to write in.
pub struct SubmitContactMessageUseCase<R: ContactRepository> {
    pub repo: R,
}

impl<R: ContactRepository> SubmitContactMessageUseCase<R> {
    pub async fn execute(
        &self,
        input: SubmitContactMessageInput,
    ) -> Result<ContactMessage, MarketServiceError> {
        if input.name.trim().is_empty() {
            return Err(MarketServiceError::invalid_input("name must not be blank"));
        }
        if !validate_email(&input.email) {
            return Err(MarketServiceError::invalid_input("malformed email address"));
        }
        if input.subject.trim().is_empty() {
            return Err(MarketServiceError::invalid_input("subject must not be blank"));
        }
        if input.message.trim().is_empty() {
            return Err(MarketServiceError::invalid_input("message must not be blank"));
        }

        let message = ContactMessage {
            id: Uuid::now_v7(),
            name: input.name,
            email: input.email,
            phone: input.phone,
            subject: input.subject,
            message: input.message,
            status: ContactStatus::New,
            date: Utc::now(),
        };
        self.repo.create(&message).await?;
        Ok(message)
    }
}

// ── ListContactMessages ──────────────────────────────────────────────────────

pub struct ListContactMessagesUseCase<R: ContactRepository> {
    pub repo: R,
}

impl<R: ContactRepository> ListContactMessagesUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<ContactMessage>, MarketServiceError> {
        self.repo.list().await
    }
}

// ── MarkMessageRead ──────────────────────────────────────────────────────────

pub struct MarkMessageReadUseCase<R: ContactRepository> {
    pub repo: R,
}

impl<R: ContactRepository> MarkMessageReadUseCase<R> {
    pub async fn execute(&self, message_id: Uuid) -> Result<(), MarketServiceError> {
        self.repo.update_status(message_id, ContactStatus::Read).await
    }
}

// ── DeleteContactMessage ─────────────────────────────────────────────────────

pub struct DeleteContactMessageUseCase<R: ContactRepository> {
    pub repo: R,
}

impl<R: ContactRepository> DeleteContactMessageUseCase<R> {
    pub async fn execute(&self, message_id: Uuid) -> Result<(), MarketServiceError> {
        self.repo.delete(message_id).await
    }
}
