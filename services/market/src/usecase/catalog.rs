use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use kisankart_domain::pagination::PageRequest;

use crate::domain::repository::{ProductFilter, ProductPatch, ProductRepository};
use crate::domain::types::{Product, ProductSortBy};
use crate::error::MarketServiceError;

// ── BrowseProducts ───────────────────────────────────────────────────────────

pub struct BrowseProductsUseCase<R: ProductRepository> {
    pub repo: R,
}

impl<R: ProductRepository> BrowseProductsUseCase<R> {
    /// Products with stock > 0, filtered and paged. The storefront view.
    pub async fn execute(
        &self,
        filter: ProductFilter,
        page: PageRequest,
    ) -> Result<Vec<Product>, MarketServiceError> {
        let products = self.repo.list_available(&filter).await?;
        Ok(page.slice(&products))
    }
}

// ── ListOwnProducts ──────────────────────────────────────────────────────────

pub struct ListOwnProductsUseCase<R: ProductRepository> {
    pub repo: R,
}

impl<R: ProductRepository> ListOwnProductsUseCase<R> {
    pub async fn execute(
        &self,
        owner_id: Uuid,
        sort_by: Option<ProductSortBy>,
    ) -> Result<Vec<Product>, MarketServiceError> {
        self.repo.list_by_owner(owner_id, sort_by).await
    }
}

// ── CreateProduct ────────────────────────────────────────────────────────────

pub struct CreateProductInput {
    pub name: String,
    pub category: String,
    pub price: Decimal,
    pub stock: u32,
    pub description: String,
    pub image_ref: String,
}

pub struct CreateProductUseCase<R: ProductRepository> {
    pub repo: R,
}

impl<R: ProductRepository> CreateProductUseCase<R> {
    pub async fn execute(
        &self,
        owner_id: Uuid,
        input: CreateProductInput,
    ) -> Result<Product, MarketServiceError> {
        if input.name.trim().is_empty() {
            return Err(MarketServiceError::invalid_input("product name must not be blank"));
        }
        if input.category.trim().is_empty() {
            return Err(MarketServiceError::invalid_input("category must not be blank"));
        }
        if input.price < Decimal::ZERO {
            return Err(MarketServiceError::invalid_input("price must be non-negative"));
        }
        let product = Product {
            id: Uuid::now_v7(),
            name: input.name,
            category: input.category,
            price: input.price,
            stock: input.stock,
            description: input.description,
            image_ref: input.image_ref,
            owner_id,
            created_at: Utc::now(),
        };
        self.repo.create(&product).await?;
        Ok(product)
    }
}

// ── UpdateProduct ────────────────────────────────────────────────────────────

pub struct UpdateProductUseCase<R: ProductRepository> {
    pub repo: R,
}

impl<R: ProductRepository> UpdateProductUseCase<R> {
    pub async fn execute(
        &self,
        id: Uuid,
        owner_id: Uuid,
        patch: ProductPatch,
    ) -> Result<Product, MarketServiceError> {
        if let Some(ref name) = patch.name {
            if name.trim().is_empty() {
                return Err(MarketServiceError::invalid_input("product name must not be blank"));
            }
        }
        if let Some(price) = patch.price {
            if price < Decimal::ZERO {
                return Err(MarketServiceError::invalid_input("price must be non-negative"));
            }
        }
        self.repo.update(id, owner_id, patch).await
    }
}

// ── DeleteProduct ────────────────────────────────────────────────────────────

pub struct DeleteProductUseCase<R: ProductRepository> {
    pub repo: R,
}

impl<R: ProductRepository> DeleteProductUseCase<R> {
    pub async fn execute(&self, id: Uuid, owner_id: Uuid) -> Result<(), MarketServiceError> {
        self.repo.delete(id, owner_id).await
    }
}
