//! Session-scoped cart storage.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use uuid::Uuid;

use crate::domain::repository::CartStore;
use crate::domain::types::Cart;
use crate::error::MarketServiceError;

/// One in-memory cart per customer. Never persisted: carts do not survive a
/// restart, matching the session-scoped contract.
#[derive(Clone, Default)]
pub struct InMemoryCartStore {
    carts: Arc<RwLock<HashMap<Uuid, Cart>>>,
}

impl InMemoryCartStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CartStore for InMemoryCartStore {
    async fn get(&self, customer_id: Uuid) -> Result<Cart, MarketServiceError> {
        let carts = self.carts.read().unwrap_or_else(PoisonError::into_inner);
        Ok(carts.get(&customer_id).cloned().unwrap_or_default())
    }

    async fn save(&self, customer_id: Uuid, cart: Cart) -> Result<(), MarketServiceError> {
        let mut carts = self.carts.write().unwrap_or_else(PoisonError::into_inner);
        carts.insert(customer_id, cart);
        Ok(())
    }

    async fn clear(&self, customer_id: Uuid) -> Result<(), MarketServiceError> {
        let mut carts = self.carts.write().unwrap_or_else(PoisonError::into_inner);
        carts.remove(&customer_id);
        Ok(())
    }
}
