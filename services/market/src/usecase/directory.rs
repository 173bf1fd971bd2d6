use chrono::Utc;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use kisankart_domain::user::{Role, UserStatus};

use crate::domain::repository::UserRepository;
use crate::domain::types::{User, validate_email};
use crate::error::MarketServiceError;

/// Salted SHA-256 digest, hex-encoded. Plaintext passwords are never stored.
pub fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

fn generate_salt() -> String {
    Uuid::new_v4().simple().to_string()
}

fn verify_password(user: &User, password: &str) -> bool {
    hash_password(&user.password_salt, password) == user.password_hash
}

// ── Signup ───────────────────────────────────────────────────────────────────

pub struct SignupInput {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub role: Role,
    pub admin_key: Option<String>,
}

pub struct SignupUseCase<R: UserRepository> {
    pub repo: R,
    /// Shared secret required to create admin accounts.
    pub admin_key: String,
}

impl<R: UserRepository> SignupUseCase<R> {
    pub async fn execute(&self, input: SignupInput) -> Result<User, MarketServiceError> {
        if input.name.trim().is_empty() {
            return Err(MarketServiceError::invalid_input("name must not be blank"));
        }
        if !validate_email(&input.email) {
            return Err(MarketServiceError::invalid_input("malformed email address"));
        }
        if input.password.is_empty() {
            return Err(MarketServiceError::invalid_input("password must not be empty"));
        }
        if input.role == Role::Admin && input.admin_key.as_deref() != Some(self.admin_key.as_str())
        {
            return Err(MarketServiceError::Forbidden);
        }

        let salt = generate_salt();
        let user = User {
            id: Uuid::now_v7(),
            name: input.name,
            email: input.email,
            phone: input.phone,
            password_hash: hash_password(&salt, &input.password),
            password_salt: salt,
            role: input.role,
            status: UserStatus::Active,
            created_at: Utc::now(),
        };
        // duplicate-email rejection happens inside create, under the store lock
        self.repo.create(&user).await?;
        Ok(user)
    }
}

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginInput {
    pub email: String,
    pub password: String,
    pub role: Role,
}

pub struct LoginUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> LoginUseCase<R> {
    /// Credential check. The requested role must match the account's role;
    /// a wrong role reads the same as a wrong password to the caller.
    pub async fn execute(&self, input: LoginInput) -> Result<User, MarketServiceError> {
        let user = self
            .repo
            .find_by_email(&input.email)
            .await?
            .ok_or(MarketServiceError::InvalidCredentials)?;
        if user.role != input.role || !verify_password(&user, &input.password) {
            return Err(MarketServiceError::InvalidCredentials);
        }
        Ok(user)
    }
}

// ── GetUser ──────────────────────────────────────────────────────────────────

pub struct GetUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> GetUserUseCase<R> {
    pub async fn execute(&self, user_id: Uuid) -> Result<User, MarketServiceError> {
        self.repo
            .find_by_id(user_id)
            .await?
            .ok_or(MarketServiceError::UserNotFound)
    }
}

// ── ListUsers ────────────────────────────────────────────────────────────────

pub struct ListUsersUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> ListUsersUseCase<R> {
    pub async fn execute(&self, role: Role) -> Result<Vec<User>, MarketServiceError> {
        self.repo.list_by_role(role).await
    }
}

// ── ToggleUserStatus ─────────────────────────────────────────────────────────

pub struct ToggleUserStatusUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> ToggleUserStatusUseCase<R> {
    /// Flip active/inactive. Products and orders of a deactivated user are
    /// untouched; in particular a deactivated farmer's products stay listed.
    pub async fn execute(&self, user_id: Uuid) -> Result<User, MarketServiceError> {
        let user = self.repo.toggle_status(user_id).await?;
        tracing::info!(user_id = %user.id, status = user.status.as_str(), "user status toggled");
        Ok(user)
    }
}
