#![allow(async_fn_in_trait)]

use uuid::Uuid;

use kisankart_domain::user::Role;

use crate::domain::types::{
    Cart, ContactMessage, Order, Product, ProductSortBy, SaleRecord, User,
};
use crate::error::MarketServiceError;
use kisankart_domain::contact::ContactStatus;
use kisankart_domain::order::OrderStatus;

/// Catalog browse filter. `search` is matched case-insensitively against
/// product name and description.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub search: Option<String>,
}

/// Fields a farmer may change on an existing product. `None` keeps the
/// stored value.
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<rust_decimal::Decimal>,
    pub stock: Option<u32>,
    pub description: Option<String>,
    pub image_ref: Option<String>,
}

/// Repository for user accounts.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, MarketServiceError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, MarketServiceError>;
    /// Create an account. Fails with `UserAlreadyExists` when the email is
    /// taken; the uniqueness check and the insert happen under one lock.
    async fn create(&self, user: &User) -> Result<(), MarketServiceError>;
    async fn list_by_role(&self, role: Role) -> Result<Vec<User>, MarketServiceError>;
    /// Flip active/inactive and return the updated record.
    async fn toggle_status(&self, id: Uuid) -> Result<User, MarketServiceError>;
}

/// Repository for the product catalog.
pub trait ProductRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, MarketServiceError>;
    /// Products with stock > 0, optionally filtered.
    async fn list_available(
        &self,
        filter: &ProductFilter,
    ) -> Result<Vec<Product>, MarketServiceError>;
    async fn list_by_owner(
        &self,
        owner_id: Uuid,
        sort_by: Option<ProductSortBy>,
    ) -> Result<Vec<Product>, MarketServiceError>;
    async fn create(&self, product: &Product) -> Result<(), MarketServiceError>;
    /// Apply a patch to an owned product. `NotFound` for unknown ids,
    /// `Forbidden` on owner mismatch.
    async fn update(
        &self,
        id: Uuid,
        owner_id: Uuid,
        patch: ProductPatch,
    ) -> Result<Product, MarketServiceError>;
    /// Remove an owned product. Same guards as `update`.
    async fn delete(&self, id: Uuid, owner_id: Uuid) -> Result<(), MarketServiceError>;
    /// Atomic compare-and-decrement. Fails with `InsufficientStock` when
    /// `qty` exceeds current stock; the check and the write are one step.
    async fn decrement_stock(&self, id: Uuid, qty: u32) -> Result<(), MarketServiceError>;
}

/// Repository for committed orders.
pub trait OrderRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, MarketServiceError>;
    async fn list_by_customer(&self, customer_id: Uuid) -> Result<Vec<Order>, MarketServiceError>;
    async fn list_all(&self) -> Result<Vec<Order>, MarketServiceError>;
    async fn update_status(
        &self,
        id: Uuid,
        status: OrderStatus,
    ) -> Result<Order, MarketServiceError>;
}

/// Repository for the sale ledger. Sale records are append-only; they are
/// written solely through `CheckoutPort::commit`.
pub trait SaleRepository: Send + Sync {
    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<SaleRecord>, MarketServiceError>;
    async fn list_by_order(&self, order_id: Uuid) -> Result<Vec<SaleRecord>, MarketServiceError>;
}

/// Repository for contact messages.
pub trait ContactRepository: Send + Sync {
    async fn create(&self, message: &ContactMessage) -> Result<(), MarketServiceError>;
    /// All messages, newest first.
    async fn list(&self) -> Result<Vec<ContactMessage>, MarketServiceError>;
    async fn update_status(
        &self,
        id: Uuid,
        status: ContactStatus,
    ) -> Result<(), MarketServiceError>;
    async fn delete(&self, id: Uuid) -> Result<(), MarketServiceError>;
}

/// Atomically commit one order, its sale records, and the matching stock
/// decrements. Stock is re-validated line by line at commit time; if any
/// line exceeds available stock, nothing is applied.
pub trait CheckoutPort: Send + Sync {
    async fn commit(
        &self,
        order: &Order,
        sales: &[SaleRecord],
    ) -> Result<(), MarketServiceError>;
}

/// Session-scoped cart storage, one cart per customer.
pub trait CartStore: Send + Sync {
    async fn get(&self, customer_id: Uuid) -> Result<Cart, MarketServiceError>;
    async fn save(&self, customer_id: Uuid, cart: Cart) -> Result<(), MarketServiceError>;
    async fn clear(&self, customer_id: Uuid) -> Result<(), MarketServiceError>;
}

/// One consistent copy of the read-side collections, taken under a single
/// lock so reports never observe a half-applied checkout.
#[derive(Debug, Clone, Default)]
pub struct ReportSnapshot {
    pub users: Vec<User>,
    pub products: Vec<Product>,
    pub orders: Vec<Order>,
    pub sales: Vec<SaleRecord>,
}

/// Read-side aggregation source for dashboards.
pub trait ReportingPort: Send + Sync {
    async fn snapshot(&self) -> Result<ReportSnapshot, MarketServiceError>;
}
