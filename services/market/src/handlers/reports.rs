use axum::{Json, extract::State};
use rust_decimal::Decimal;
use serde::Serialize;

use kisankart_core::identity::IdentityHeaders;
use kisankart_domain::user::Role;

use crate::domain::types::SaleRecord;
use crate::error::MarketServiceError;
use crate::state::AppState;
use crate::usecase::reporting::{
    CustomerActivity, CustomerActivityUseCase, FarmerPerformance, FarmerPerformanceUseCase,
    FarmerSalesUseCase, PlatformOverviewUseCase,
};

// ── GET /reports/platform ────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct PlatformOverviewResponse {
    pub total_farmers: usize,
    pub total_customers: usize,
    pub total_revenue: Decimal,
    pub today_revenue: Decimal,
    pub active_products: usize,
    pub pending_orders: usize,
}

pub async fn get_platform_overview(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Json<PlatformOverviewResponse>, MarketServiceError> {
    if identity.role != Role::Admin {
        return Err(MarketServiceError::Forbidden);
    }
    let usecase = PlatformOverviewUseCase {
        reporting: state.reporting(),
    };
    let overview = usecase.execute().await?;
    Ok(Json(PlatformOverviewResponse {
        total_farmers: overview.total_farmers,
        total_customers: overview.total_customers,
        total_revenue: overview.total_revenue,
        today_revenue: overview.today_revenue,
        active_products: overview.active_products,
        pending_orders: overview.pending_orders,
    }))
}

// ── GET /reports/farmers ─────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct FarmerPerformanceResponse {
    pub farmer_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub status: &'static str,
    pub product_count: usize,
    pub sale_count: usize,
    pub revenue: Decimal,
}

impl From<FarmerPerformance> for FarmerPerformanceResponse {
    fn from(row: FarmerPerformance) -> Self {
        Self {
            farmer_id: row.farmer_id.to_string(),
            name: row.name,
            email: row.email,
            phone: row.phone,
            status: row.status.as_str(),
            product_count: row.product_count,
            sale_count: row.sale_count,
            revenue: row.revenue,
        }
    }
}

pub async fn get_farmer_performance(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Json<Vec<FarmerPerformanceResponse>>, MarketServiceError> {
    if identity.role != Role::Admin {
        return Err(MarketServiceError::Forbidden);
    }
    let usecase = FarmerPerformanceUseCase {
        reporting: state.reporting(),
    };
    let rows = usecase.execute().await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

// ── GET /reports/customers ───────────────────────────────────────────────────

#[derive(Serialize)]
pub struct CustomerActivityResponse {
    pub customer_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub status: &'static str,
    pub order_count: usize,
    pub total_spent: Decimal,
}

impl From<CustomerActivity> for CustomerActivityResponse {
    fn from(row: CustomerActivity) -> Self {
        Self {
            customer_id: row.customer_id.to_string(),
            name: row.name,
            email: row.email,
            phone: row.phone,
            status: row.status.as_str(),
            order_count: row.order_count,
            total_spent: row.total_spent,
        }
    }
}

pub async fn get_customer_activity(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Json<Vec<CustomerActivityResponse>>, MarketServiceError> {
    if identity.role != Role::Admin {
        return Err(MarketServiceError::Forbidden);
    }
    let usecase = CustomerActivityUseCase {
        reporting: state.reporting(),
    };
    let rows = usecase.execute().await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

// ── GET /farmers/@me/sales ───────────────────────────────────────────────────

#[derive(Serialize)]
pub struct SaleResponse {
    pub id: String,
    pub order_id: String,
    pub product_id: String,
    pub quantity: u32,
    pub price: Decimal,
    pub total: Decimal,
    #[serde(serialize_with = "kisankart_core::serde::to_rfc3339_ms")]
    pub date: chrono::DateTime<chrono::Utc>,
}

impl From<SaleRecord> for SaleResponse {
    fn from(s: SaleRecord) -> Self {
        Self {
            id: s.id.to_string(),
            order_id: s.order_id.to_string(),
            product_id: s.product_id.to_string(),
            quantity: s.quantity,
            price: s.price,
            total: s.total,
            date: s.date,
        }
    }
}

pub async fn get_own_sales(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Json<Vec<SaleResponse>>, MarketServiceError> {
    if identity.role != Role::Farmer {
        return Err(MarketServiceError::Forbidden);
    }
    let usecase = FarmerSalesUseCase {
        sales: state.sale_repo(),
    };
    let sales = usecase.execute(identity.user_id).await?;
    Ok(Json(sales.into_iter().map(Into::into).collect()))
}
