use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use kisankart_core::identity::IdentityHeaders;
use kisankart_domain::order::{OrderStatus, PaymentMethod};
use kisankart_domain::user::Role;

use crate::domain::types::Order;
use crate::error::MarketServiceError;
use crate::state::AppState;
use crate::usecase::checkout::{PlaceOrderInput, PlaceOrderUseCase};
use crate::usecase::orders::{
    GetOrderUseCase, ListAllOrdersUseCase, ListCustomerOrdersUseCase, UpdateOrderStatusUseCase,
};

#[derive(Serialize)]
pub struct OrderLineResponse {
    pub product_id: String,
    pub name: String,
    pub price: Decimal,
    pub quantity: u32,
    pub total: Decimal,
}

#[derive(Serialize)]
pub struct OrderResponse {
    pub id: String,
    pub customer_id: String,
    pub lines: Vec<OrderLineResponse>,
    pub total: Decimal,
    pub payment_method: &'static str,
    pub delivery_address: String,
    pub status: &'static str,
    #[serde(serialize_with = "kisankart_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id.to_string(),
            customer_id: order.customer_id.to_string(),
            lines: order
                .lines
                .iter()
                .map(|l| OrderLineResponse {
                    product_id: l.product_id.to_string(),
                    name: l.name.clone(),
                    price: l.price,
                    quantity: l.quantity,
                    total: l.total(),
                })
                .collect(),
            total: order.total,
            payment_method: order.payment_method.as_str(),
            delivery_address: order.delivery_address,
            status: order.status.as_str(),
            created_at: order.created_at,
        }
    }
}

// ── POST /orders ─────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct PlaceOrderRequest {
    pub payment_method: String,
    pub delivery_address: String,
}

/// Checkout: converts the caller's cart into an order.
pub async fn place_order(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<PlaceOrderRequest>,
) -> Result<(StatusCode, Json<OrderResponse>), MarketServiceError> {
    if identity.role != Role::Customer {
        return Err(MarketServiceError::Forbidden);
    }
    let payment_method = PaymentMethod::from_str_opt(&body.payment_method)
        .ok_or_else(|| MarketServiceError::invalid_input("payment method must be cod, upi or card"))?;
    let usecase = PlaceOrderUseCase {
        products: state.product_repo(),
        checkout: state.checkout_port(),
        carts: state.cart_store(),
    };
    let order = usecase
        .execute(
            identity.user_id,
            PlaceOrderInput {
                payment_method,
                delivery_address: body.delivery_address,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(order.into())))
}

// ── GET /orders/@me ──────────────────────────────────────────────────────────

pub async fn get_own_orders(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Json<Vec<OrderResponse>>, MarketServiceError> {
    if identity.role != Role::Customer {
        return Err(MarketServiceError::Forbidden);
    }
    let usecase = ListCustomerOrdersUseCase {
        repo: state.order_repo(),
    };
    let orders = usecase.execute(identity.user_id).await?;
    Ok(Json(orders.into_iter().map(Into::into).collect()))
}

// ── GET /orders ──────────────────────────────────────────────────────────────

pub async fn get_all_orders(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Json<Vec<OrderResponse>>, MarketServiceError> {
    if identity.role != Role::Admin {
        return Err(MarketServiceError::Forbidden);
    }
    let usecase = ListAllOrdersUseCase {
        repo: state.order_repo(),
    };
    let orders = usecase.execute().await?;
    Ok(Json(orders.into_iter().map(Into::into).collect()))
}

// ── GET /orders/{id} ─────────────────────────────────────────────────────────

pub async fn get_order(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<OrderResponse>, MarketServiceError> {
    let usecase = GetOrderUseCase {
        repo: state.order_repo(),
    };
    let order = usecase.execute(identity.user_id, identity.role, id).await?;
    Ok(Json(order.into()))
}

// ── PATCH /orders/{id}/status ────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateOrderStatusRequest {
    pub status: String,
}

pub async fn update_order_status(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateOrderStatusRequest>,
) -> Result<Json<OrderResponse>, MarketServiceError> {
    if identity.role != Role::Admin {
        return Err(MarketServiceError::Forbidden);
    }
    let status = OrderStatus::from_str_opt(&body.status)
        .ok_or_else(|| MarketServiceError::invalid_input("unknown order status"))?;
    let usecase = UpdateOrderStatusUseCase {
        repo: state.order_repo(),
    };
    let order = usecase.execute(id, status).await?;
    Ok(Json(order.into()))
}
