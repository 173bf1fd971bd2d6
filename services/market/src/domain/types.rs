use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use kisankart_domain::contact::ContactStatus;
use kisankart_domain::order::{OrderStatus, PaymentMethod};
use kisankart_domain::user::{Role, UserStatus};

/// Registered account. Never hard-deleted; admins toggle `status` instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password_salt: String,
    pub password_hash: String,
    pub role: Role,
    pub status: UserStatus,
    pub created_at: DateTime<Utc>,
}

/// Product listed by a farmer. `stock` is the only field the checkout path
/// mutates; it must never go negative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub price: Decimal,
    pub stock: u32,
    pub description: String,
    pub image_ref: String,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// One intended purchase line. Price and owner are snapshots taken at
/// add-to-cart time; stock is re-validated against the authoritative product
/// at checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: Uuid,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
    pub owner_id: Uuid,
}

impl CartLine {
    pub fn total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Session-scoped cart. Held in memory only — lost on restart by design.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    pub lines: Vec<CartLine>,
}

impl Cart {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn total(&self) -> Decimal {
        self.lines.iter().map(CartLine::total).sum()
    }
}

/// A committed order line. Same shape as `CartLine`; frozen at checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: Uuid,
    pub name: String,
    pub price: Decimal,
    pub quantity: u32,
    pub owner_id: Uuid,
}

impl OrderLine {
    pub fn total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// Durable order created exactly once at checkout.
/// Invariant: `total == Σ line.total()`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub lines: Vec<OrderLine>,
    pub total: Decimal,
    pub payment_method: PaymentMethod,
    pub delivery_address: String,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Recompute the total from the line items (for invariant checks).
    pub fn computed_total(&self) -> Decimal {
        self.lines.iter().map(OrderLine::total).sum()
    }
}

/// Immutable per-line ledger entry, derived from an order at checkout.
/// Invariant: sale totals for an order sum to that order's total.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleRecord {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub owner_id: Uuid,
    pub customer_id: Uuid,
    pub quantity: u32,
    pub price: Decimal,
    pub total: Decimal,
    pub date: DateTime<Utc>,
}

/// Message submitted through the public contact form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactMessage {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
    pub status: ContactStatus,
    pub date: DateTime<Utc>,
}

/// Sort options for a farmer's own product list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductSortBy {
    Name,
    Price,
    Stock,
}

impl ProductSortBy {
    pub fn from_kebab_case(s: &str) -> Option<Self> {
        match s {
            "name" => Some(Self::Name),
            "price" => Some(Self::Price),
            "stock" => Some(Self::Stock),
            _ => None,
        }
    }
}

/// Minimal structural check for email addresses: one `@` with non-empty
/// local and domain parts, and a dot in the domain.
pub fn validate_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}
