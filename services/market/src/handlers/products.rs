use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use kisankart_core::identity::IdentityHeaders;
use kisankart_domain::pagination::PageRequest;
use kisankart_domain::user::Role;

use crate::domain::repository::{ProductFilter, ProductPatch, ProductRepository};
use crate::domain::types::{Product, ProductSortBy};
use crate::error::MarketServiceError;
use crate::state::AppState;
use crate::usecase::catalog::{
    BrowseProductsUseCase, CreateProductInput, CreateProductUseCase, DeleteProductUseCase,
    ListOwnProductsUseCase, UpdateProductUseCase,
};

#[derive(Serialize)]
pub struct ProductResponse {
    pub id: String,
    pub name: String,
    pub category: String,
    pub price: Decimal,
    pub stock: u32,
    pub description: String,
    pub image_ref: String,
    pub owner_id: String,
    #[serde(serialize_with = "kisankart_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Product> for ProductResponse {
    fn from(p: Product) -> Self {
        Self {
            id: p.id.to_string(),
            name: p.name,
            category: p.category,
            price: p.price,
            stock: p.stock,
            description: p.description,
            image_ref: p.image_ref,
            owner_id: p.owner_id.to_string(),
            created_at: p.created_at,
        }
    }
}

// ── GET /products ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct BrowseQuery {
    pub category: Option<String>,
    pub search: Option<String>,
    #[serde(rename = "per-page")]
    pub per_page: Option<u32>,
    pub page: Option<u32>,
}

/// Public storefront: in-stock products only, no identity required.
pub async fn browse_products(
    State(state): State<AppState>,
    Query(query): Query<BrowseQuery>,
) -> Result<Json<Vec<ProductResponse>>, MarketServiceError> {
    let defaults = PageRequest::default();
    let page = PageRequest {
        per_page: query.per_page.unwrap_or(defaults.per_page),
        page: query.page.unwrap_or(defaults.page),
    };
    let usecase = BrowseProductsUseCase {
        repo: state.product_repo(),
    };
    let products = usecase
        .execute(
            ProductFilter {
                category: query.category,
                search: query.search,
            },
            page,
        )
        .await?;
    Ok(Json(products.into_iter().map(Into::into).collect()))
}

// ── GET /products/{id} ───────────────────────────────────────────────────────

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProductResponse>, MarketServiceError> {
    let product = state
        .product_repo()
        .find_by_id(id)
        .await?
        .ok_or(MarketServiceError::ProductNotFound)?;
    Ok(Json(product.into()))
}

// ── GET /farmers/@me/products ────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct OwnProductsQuery {
    #[serde(rename = "sort-by")]
    pub sort_by: Option<String>,
}

pub async fn get_own_products(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Query(query): Query<OwnProductsQuery>,
) -> Result<Json<Vec<ProductResponse>>, MarketServiceError> {
    if identity.role != Role::Farmer {
        return Err(MarketServiceError::Forbidden);
    }
    let sort_by = match query.sort_by.as_deref() {
        Some(s) => Some(
            ProductSortBy::from_kebab_case(s)
                .ok_or_else(|| MarketServiceError::invalid_input("unknown sort key"))?,
        ),
        None => None,
    };
    let usecase = ListOwnProductsUseCase {
        repo: state.product_repo(),
    };
    let products = usecase.execute(identity.user_id, sort_by).await?;
    Ok(Json(products.into_iter().map(Into::into).collect()))
}

// ── POST /products ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub category: String,
    pub price: Decimal,
    pub stock: u32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_ref: String,
}

pub async fn create_product(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<ProductResponse>), MarketServiceError> {
    if identity.role != Role::Farmer {
        return Err(MarketServiceError::Forbidden);
    }
    let usecase = CreateProductUseCase {
        repo: state.product_repo(),
    };
    let product = usecase
        .execute(
            identity.user_id,
            CreateProductInput {
                name: body.name,
                category: body.category,
                price: body.price,
                stock: body.stock,
                description: body.description,
                image_ref: body.image_ref,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(product.into())))
}

// ── PATCH /products/{id} ─────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<Decimal>,
    pub stock: Option<u32>,
    pub description: Option<String>,
    pub image_ref: Option<String>,
}

pub async fn update_product(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateProductRequest>,
) -> Result<Json<ProductResponse>, MarketServiceError> {
    if identity.role != Role::Farmer {
        return Err(MarketServiceError::Forbidden);
    }
    let usecase = UpdateProductUseCase {
        repo: state.product_repo(),
    };
    let product = usecase
        .execute(
            id,
            identity.user_id,
            ProductPatch {
                name: body.name,
                category: body.category,
                price: body.price,
                stock: body.stock,
                description: body.description,
                image_ref: body.image_ref,
            },
        )
        .await?;
    Ok(Json(product.into()))
}

// ── DELETE /products/{id} ────────────────────────────────────────────────────

pub async fn delete_product(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, MarketServiceError> {
    if identity.role != Role::Farmer {
        return Err(MarketServiceError::Forbidden);
    }
    let usecase = DeleteProductUseCase {
        repo: state.product_repo(),
    };
    usecase.execute(id, identity.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
