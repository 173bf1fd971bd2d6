use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Market service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum MarketServiceError {
    #[error("user not found")]
    UserNotFound,
    #[error("product not found")]
    ProductNotFound,
    #[error("order not found")]
    OrderNotFound,
    #[error("contact message not found")]
    ContactMessageNotFound,
    #[error("user already exists")]
    UserAlreadyExists,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("cart is empty")]
    EmptyCart,
    #[error("insufficient stock for {product}: requested {requested}, available {available}")]
    InsufficientStock {
        product: String,
        requested: u32,
        available: u32,
    },
    #[error("forbidden")]
    Forbidden,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl MarketServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::ProductNotFound => "PRODUCT_NOT_FOUND",
            Self::OrderNotFound => "ORDER_NOT_FOUND",
            Self::ContactMessageNotFound => "CONTACT_MESSAGE_NOT_FOUND",
            Self::UserAlreadyExists => "USER_ALREADY_EXISTS",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::EmptyCart => "EMPTY_CART",
            Self::InsufficientStock { .. } => "INSUFFICIENT_STOCK",
            Self::Forbidden => "FORBIDDEN",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

impl IntoResponse for MarketServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::UserNotFound
            | Self::ProductNotFound
            | Self::OrderNotFound
            | Self::ContactMessageNotFound => StatusCode::NOT_FOUND,
            Self::UserAlreadyExists | Self::InsufficientStock { .. } => StatusCode::CONFLICT,
            Self::InvalidInput(_) | Self::EmptyCart => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
