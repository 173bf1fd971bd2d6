use std::sync::Arc;

use crate::infra::carts::InMemoryCartStore;
use crate::infra::repos::{
    StoreCheckout, StoreContactRepository, StoreOrderRepository, StoreProductRepository,
    StoreReporting, StoreSaleRepository, StoreUserRepository,
};
use crate::infra::store::JsonStore;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<JsonStore>,
    pub carts: InMemoryCartStore,
    pub admin_key: String,
}

impl AppState {
    pub fn new(store: Arc<JsonStore>, admin_key: String) -> Self {
        Self {
            store,
            carts: InMemoryCartStore::new(),
            admin_key,
        }
    }

    pub fn user_repo(&self) -> StoreUserRepository {
        StoreUserRepository {
            store: self.store.clone(),
        }
    }

    pub fn product_repo(&self) -> StoreProductRepository {
        StoreProductRepository {
            store: self.store.clone(),
        }
    }

    pub fn order_repo(&self) -> StoreOrderRepository {
        StoreOrderRepository {
            store: self.store.clone(),
        }
    }

    pub fn sale_repo(&self) -> StoreSaleRepository {
        StoreSaleRepository {
            store: self.store.clone(),
        }
    }

    pub fn contact_repo(&self) -> StoreContactRepository {
        StoreContactRepository {
            store: self.store.clone(),
        }
    }

    pub fn checkout_port(&self) -> StoreCheckout {
        StoreCheckout {
            store: self.store.clone(),
        }
    }

    pub fn reporting(&self) -> StoreReporting {
        StoreReporting {
            store: self.store.clone(),
        }
    }

    pub fn cart_store(&self) -> InMemoryCartStore {
        self.carts.clone()
    }
}
