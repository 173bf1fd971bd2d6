use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use kisankart_core::identity::IdentityHeaders;
use kisankart_domain::user::Role;

use crate::domain::types::Cart;
use crate::error::MarketServiceError;
use crate::state::AppState;
use crate::usecase::cart::{
    AddToCartUseCase, ClearCartUseCase, GetCartUseCase, RemoveCartLineUseCase,
    UpdateCartQuantityUseCase,
};

#[derive(Serialize)]
pub struct CartLineResponse {
    pub product_id: String,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
    pub total: Decimal,
}

#[derive(Serialize)]
pub struct CartResponse {
    pub lines: Vec<CartLineResponse>,
    pub total: Decimal,
}

impl From<Cart> for CartResponse {
    fn from(cart: Cart) -> Self {
        Self {
            total: cart.total(),
            lines: cart
                .lines
                .into_iter()
                .map(|l| CartLineResponse {
                    product_id: l.product_id.to_string(),
                    name: l.name.clone(),
                    unit_price: l.unit_price,
                    total: l.total(),
                    quantity: l.quantity,
                })
                .collect(),
        }
    }
}

fn require_customer(identity: &IdentityHeaders) -> Result<(), MarketServiceError> {
    if identity.role != Role::Customer {
        return Err(MarketServiceError::Forbidden);
    }
    Ok(())
}

// ── GET /cart ────────────────────────────────────────────────────────────────

pub async fn get_cart(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Json<CartResponse>, MarketServiceError> {
    require_customer(&identity)?;
    let usecase = GetCartUseCase {
        carts: state.cart_store(),
    };
    let cart = usecase.execute(identity.user_id).await?;
    Ok(Json(cart.into()))
}

// ── POST /cart ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct AddToCartRequest {
    pub product_id: Uuid,
    pub quantity: u32,
}

pub async fn add_to_cart(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<AddToCartRequest>,
) -> Result<Json<CartResponse>, MarketServiceError> {
    require_customer(&identity)?;
    let usecase = AddToCartUseCase {
        products: state.product_repo(),
        carts: state.cart_store(),
    };
    let cart = usecase
        .execute(identity.user_id, body.product_id, body.quantity)
        .await?;
    Ok(Json(cart.into()))
}

// ── PATCH /cart/{index} ──────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateCartLineRequest {
    pub delta: i64,
}

pub async fn update_cart_line(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(index): Path<usize>,
    Json(body): Json<UpdateCartLineRequest>,
) -> Result<Json<CartResponse>, MarketServiceError> {
    require_customer(&identity)?;
    let usecase = UpdateCartQuantityUseCase {
        products: state.product_repo(),
        carts: state.cart_store(),
    };
    let cart = usecase.execute(identity.user_id, index, body.delta).await?;
    Ok(Json(cart.into()))
}

// ── DELETE /cart/{index} ─────────────────────────────────────────────────────

pub async fn remove_cart_line(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<CartResponse>, MarketServiceError> {
    require_customer(&identity)?;
    let usecase = RemoveCartLineUseCase {
        carts: state.cart_store(),
    };
    let cart = usecase.execute(identity.user_id, index).await?;
    Ok(Json(cart.into()))
}

// ── DELETE /cart ─────────────────────────────────────────────────────────────

pub async fn clear_cart(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<StatusCode, MarketServiceError> {
    require_customer(&identity)?;
    let usecase = ClearCartUseCase {
        carts: state.cart_store(),
    };
    usecase.execute(identity.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
