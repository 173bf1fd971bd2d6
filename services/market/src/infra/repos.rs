//! Store-backed repository and port implementations.

use std::sync::Arc;

use uuid::Uuid;

use kisankart_domain::contact::ContactStatus;
use kisankart_domain::order::OrderStatus;
use kisankart_domain::user::Role;

use crate::domain::repository::{
    CheckoutPort, ContactRepository, OrderRepository, ProductFilter, ProductPatch,
    ProductRepository, ReportSnapshot, ReportingPort, SaleRepository, UserRepository,
};
use crate::domain::types::{
    ContactMessage, Order, Product, ProductSortBy, SaleRecord, User,
};
use crate::error::MarketServiceError;
use crate::infra::store::{Collections, JsonStore};

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct StoreUserRepository {
    pub store: Arc<JsonStore>,
}

impl UserRepository for StoreUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, MarketServiceError> {
        Ok(self.store.read().users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, MarketServiceError> {
        Ok(self
            .store
            .read()
            .users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn create(&self, user: &User) -> Result<(), MarketServiceError> {
        self.store.mutate(|data| {
            if data
                .users
                .iter()
                .any(|u| u.email.eq_ignore_ascii_case(&user.email))
            {
                return Err(MarketServiceError::UserAlreadyExists);
            }
            data.users.push(user.clone());
            Ok(())
        })
    }

    async fn list_by_role(&self, role: Role) -> Result<Vec<User>, MarketServiceError> {
        Ok(self
            .store
            .read()
            .users
            .iter()
            .filter(|u| u.role == role)
            .cloned()
            .collect())
    }

    async fn toggle_status(&self, id: Uuid) -> Result<User, MarketServiceError> {
        self.store.mutate(|data| {
            let user = data
                .users
                .iter_mut()
                .find(|u| u.id == id)
                .ok_or(MarketServiceError::UserNotFound)?;
            user.status = user.status.toggled();
            Ok(user.clone())
        })
    }
}

// ── Product repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct StoreProductRepository {
    pub store: Arc<JsonStore>,
}

impl ProductRepository for StoreProductRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, MarketServiceError> {
        Ok(self
            .store
            .read()
            .products
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn list_available(
        &self,
        filter: &ProductFilter,
    ) -> Result<Vec<Product>, MarketServiceError> {
        let needle = filter.search.as_deref().map(str::to_lowercase);
        Ok(self
            .store
            .read()
            .products
            .iter()
            .filter(|p| p.stock > 0)
            .filter(|p| {
                filter
                    .category
                    .as_deref()
                    .is_none_or(|c| p.category == c)
            })
            .filter(|p| {
                needle.as_deref().is_none_or(|n| {
                    p.name.to_lowercase().contains(n)
                        || p.description.to_lowercase().contains(n)
                })
            })
            .cloned()
            .collect())
    }

    async fn list_by_owner(
        &self,
        owner_id: Uuid,
        sort_by: Option<ProductSortBy>,
    ) -> Result<Vec<Product>, MarketServiceError> {
        let mut products: Vec<Product> = self
            .store
            .read()
            .products
            .iter()
            .filter(|p| p.owner_id == owner_id)
            .cloned()
            .collect();
        match sort_by {
            Some(ProductSortBy::Name) => products.sort_by(|a, b| a.name.cmp(&b.name)),
            Some(ProductSortBy::Price) => products.sort_by(|a, b| a.price.cmp(&b.price)),
            // stock sorts descending: low-stock products sink to the bottom
            Some(ProductSortBy::Stock) => products.sort_by(|a, b| b.stock.cmp(&a.stock)),
            None => {}
        }
        Ok(products)
    }

    async fn create(&self, product: &Product) -> Result<(), MarketServiceError> {
        self.store.mutate(|data| {
            data.products.push(product.clone());
            Ok(())
        })
    }

    async fn update(
        &self,
        id: Uuid,
        owner_id: Uuid,
        patch: ProductPatch,
    ) -> Result<Product, MarketServiceError> {
        self.store.mutate(|data| {
            let product = find_owned_product(data, id, owner_id)?;
            if let Some(name) = patch.name {
                product.name = name;
            }
            if let Some(category) = patch.category {
                product.category = category;
            }
            if let Some(price) = patch.price {
                product.price = price;
            }
            if let Some(stock) = patch.stock {
                product.stock = stock;
            }
            if let Some(description) = patch.description {
                product.description = description;
            }
            if let Some(image_ref) = patch.image_ref {
                product.image_ref = image_ref;
            }
            Ok(product.clone())
        })
    }

    async fn delete(&self, id: Uuid, owner_id: Uuid) -> Result<(), MarketServiceError> {
        self.store.mutate(|data| {
            find_owned_product(data, id, owner_id)?;
            data.products.retain(|p| p.id != id);
            Ok(())
        })
    }

    async fn decrement_stock(&self, id: Uuid, qty: u32) -> Result<(), MarketServiceError> {
        self.store.mutate(|data| decrement_line(data, id, qty))
    }
}

fn find_owned_product<'a>(
    data: &'a mut Collections,
    id: Uuid,
    owner_id: Uuid,
) -> Result<&'a mut Product, MarketServiceError> {
    let product = data
        .products
        .iter_mut()
        .find(|p| p.id == id)
        .ok_or(MarketServiceError::ProductNotFound)?;
    if product.owner_id != owner_id {
        return Err(MarketServiceError::Forbidden);
    }
    Ok(product)
}

fn decrement_line(data: &mut Collections, id: Uuid, qty: u32) -> Result<(), MarketServiceError> {
    let product = data
        .products
        .iter_mut()
        .find(|p| p.id == id)
        .ok_or(MarketServiceError::ProductNotFound)?;
    if qty > product.stock {
        return Err(MarketServiceError::InsufficientStock {
            product: product.name.clone(),
            requested: qty,
            available: product.stock,
        });
    }
    product.stock -= qty;
    Ok(())
}

// ── Order repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct StoreOrderRepository {
    pub store: Arc<JsonStore>,
}

impl OrderRepository for StoreOrderRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, MarketServiceError> {
        Ok(self.store.read().orders.iter().find(|o| o.id == id).cloned())
    }

    async fn list_by_customer(
        &self,
        customer_id: Uuid,
    ) -> Result<Vec<Order>, MarketServiceError> {
        Ok(self
            .store
            .read()
            .orders
            .iter()
            .filter(|o| o.customer_id == customer_id)
            .cloned()
            .collect())
    }

    async fn list_all(&self) -> Result<Vec<Order>, MarketServiceError> {
        Ok(self.store.read().orders.clone())
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: OrderStatus,
    ) -> Result<Order, MarketServiceError> {
        self.store.mutate(|data| {
            let order = data
                .orders
                .iter_mut()
                .find(|o| o.id == id)
                .ok_or(MarketServiceError::OrderNotFound)?;
            order.status = status;
            Ok(order.clone())
        })
    }
}

// ── Sale repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct StoreSaleRepository {
    pub store: Arc<JsonStore>,
}

impl SaleRepository for StoreSaleRepository {
    async fn list_by_owner(
        &self,
        owner_id: Uuid,
    ) -> Result<Vec<SaleRecord>, MarketServiceError> {
        Ok(self
            .store
            .read()
            .sales
            .iter()
            .filter(|s| s.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn list_by_order(
        &self,
        order_id: Uuid,
    ) -> Result<Vec<SaleRecord>, MarketServiceError> {
        Ok(self
            .store
            .read()
            .sales
            .iter()
            .filter(|s| s.order_id == order_id)
            .cloned()
            .collect())
    }
}

// ── Contact repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct StoreContactRepository {
    pub store: Arc<JsonStore>,
}

impl ContactRepository for StoreContactRepository {
    async fn create(&self, message: &ContactMessage) -> Result<(), MarketServiceError> {
        self.store.mutate(|data| {
            data.contacts.push(message.clone());
            Ok(())
        })
    }

    async fn list(&self) -> Result<Vec<ContactMessage>, MarketServiceError> {
        let mut messages = self.store.read().contacts.clone();
        messages.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(messages)
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: ContactStatus,
    ) -> Result<(), MarketServiceError> {
        self.store.mutate(|data| {
            let message = data
                .contacts
                .iter_mut()
                .find(|c| c.id == id)
                .ok_or(MarketServiceError::ContactMessageNotFound)?;
            message.status = status;
            Ok(())
        })
    }

    async fn delete(&self, id: Uuid) -> Result<(), MarketServiceError> {
        self.store.mutate(|data| {
            if !data.contacts.iter().any(|c| c.id == id) {
                return Err(MarketServiceError::ContactMessageNotFound);
            }
            data.contacts.retain(|c| c.id != id);
            Ok(())
        })
    }
}

// ── Checkout port ────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct StoreCheckout {
    pub store: Arc<JsonStore>,
}

impl CheckoutPort for StoreCheckout {
    async fn commit(
        &self,
        order: &Order,
        sales: &[SaleRecord],
    ) -> Result<(), MarketServiceError> {
        self.store.mutate(|data| {
            // Stock is re-validated here, under the store lock. The use case
            // already checked it, but a concurrent checkout may have landed
            // in between; any shortfall aborts the whole commit.
            for line in &order.lines {
                decrement_line(data, line.product_id, line.quantity)?;
            }
            data.orders.push(order.clone());
            data.sales.extend_from_slice(sales);
            Ok(())
        })
    }
}

// ── Reporting port ───────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct StoreReporting {
    pub store: Arc<JsonStore>,
}

impl ReportingPort for StoreReporting {
    async fn snapshot(&self) -> Result<ReportSnapshot, MarketServiceError> {
        let data = self.store.read();
        Ok(ReportSnapshot {
            users: data.users.clone(),
            products: data.products.clone(),
            orders: data.orders.clone(),
            sales: data.sales.clone(),
        })
    }
}
