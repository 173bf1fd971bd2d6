use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use kisankart_domain::order::OrderStatus;
use kisankart_domain::user::{Role, UserStatus};

use crate::domain::repository::{ReportSnapshot, ReportingPort, SaleRepository};
use crate::domain::types::SaleRecord;
use crate::error::MarketServiceError;

/// Platform-wide headline numbers for the admin dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformOverview {
    pub total_farmers: usize,
    pub total_customers: usize,
    pub total_revenue: Decimal,
    pub today_revenue: Decimal,
    pub active_products: usize,
    pub pending_orders: usize,
}

/// Per-farmer row in the admin directory.
#[derive(Debug, Clone)]
pub struct FarmerPerformance {
    pub farmer_id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub status: UserStatus,
    pub product_count: usize,
    pub sale_count: usize,
    pub revenue: Decimal,
}

/// Per-customer row in the admin directory.
#[derive(Debug, Clone)]
pub struct CustomerActivity {
    pub customer_id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub status: UserStatus,
    pub order_count: usize,
    pub total_spent: Decimal,
}

fn revenue_of(sales: &[SaleRecord], owner_id: Uuid) -> Decimal {
    sales
        .iter()
        .filter(|s| s.owner_id == owner_id)
        .map(|s| s.total)
        .sum()
}

// ── PlatformOverview ─────────────────────────────────────────────────────────

pub struct PlatformOverviewUseCase<R: ReportingPort> {
    pub reporting: R,
}

impl<R: ReportingPort> PlatformOverviewUseCase<R> {
    pub async fn execute(&self) -> Result<PlatformOverview, MarketServiceError> {
        let snapshot = self.reporting.snapshot().await?;
        let today = Utc::now().date_naive();
        Ok(PlatformOverview {
            total_farmers: count_role(&snapshot, Role::Farmer),
            total_customers: count_role(&snapshot, Role::Customer),
            total_revenue: snapshot.sales.iter().map(|s| s.total).sum(),
            today_revenue: snapshot
                .sales
                .iter()
                .filter(|s| s.date.date_naive() == today)
                .map(|s| s.total)
                .sum(),
            active_products: snapshot.products.iter().filter(|p| p.stock > 0).count(),
            pending_orders: snapshot
                .orders
                .iter()
                .filter(|o| o.status == OrderStatus::Pending)
                .count(),
        })
    }
}

fn count_role(snapshot: &ReportSnapshot, role: Role) -> usize {
    snapshot.users.iter().filter(|u| u.role == role).count()
}

// ── FarmerPerformance ────────────────────────────────────────────────────────

pub struct FarmerPerformanceUseCase<R: ReportingPort> {
    pub reporting: R,
}

impl<R: ReportingPort> FarmerPerformanceUseCase<R> {
    /// One row per farmer. All rows come from a single snapshot, so counts
    /// and revenue agree with each other even under concurrent checkouts.
    pub async fn execute(&self) -> Result<Vec<FarmerPerformance>, MarketServiceError> {
        let snapshot = self.reporting.snapshot().await?;
        Ok(snapshot
            .users
            .iter()
            .filter(|u| u.role == Role::Farmer)
            .map(|farmer| FarmerPerformance {
                farmer_id: farmer.id,
                name: farmer.name.clone(),
                email: farmer.email.clone(),
                phone: farmer.phone.clone(),
                status: farmer.status,
                product_count: snapshot
                    .products
                    .iter()
                    .filter(|p| p.owner_id == farmer.id)
                    .count(),
                sale_count: snapshot
                    .sales
                    .iter()
                    .filter(|s| s.owner_id == farmer.id)
                    .count(),
                revenue: revenue_of(&snapshot.sales, farmer.id),
            })
            .collect())
    }
}

// ── CustomerActivity ─────────────────────────────────────────────────────────

pub struct CustomerActivityUseCase<R: ReportingPort> {
    pub reporting: R,
}

impl<R: ReportingPort> CustomerActivityUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<CustomerActivity>, MarketServiceError> {
        let snapshot = self.reporting.snapshot().await?;
        Ok(snapshot
            .users
            .iter()
            .filter(|u| u.role == Role::Customer)
            .map(|customer| {
                let orders: Vec<_> = snapshot
                    .orders
                    .iter()
                    .filter(|o| o.customer_id == customer.id)
                    .collect();
                CustomerActivity {
                    customer_id: customer.id,
                    name: customer.name.clone(),
                    email: customer.email.clone(),
                    phone: customer.phone.clone(),
                    status: customer.status,
                    order_count: orders.len(),
                    total_spent: orders.iter().map(|o| o.total).sum(),
                }
            })
            .collect())
    }
}

// ── FarmerSales ──────────────────────────────────────────────────────────────

pub struct FarmerSalesUseCase<S: SaleRepository> {
    pub sales: S,
}

impl<S: SaleRepository> FarmerSalesUseCase<S> {
    /// A farmer's own sale ledger, for their dashboard.
    pub async fn execute(&self, owner_id: Uuid) -> Result<Vec<SaleRecord>, MarketServiceError> {
        self.sales.list_by_owner(owner_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use kisankart_domain::order::PaymentMethod;

    use crate::domain::types::{Order, Product, User};

    struct FixedSnapshot {
        snapshot: ReportSnapshot,
    }

    impl ReportingPort for FixedSnapshot {
        async fn snapshot(&self) -> Result<ReportSnapshot, MarketServiceError> {
            Ok(self.snapshot.clone())
        }
    }

    fn user(role: Role) -> User {
        User {
            id: Uuid::now_v7(),
            name: "Someone".into(),
            email: format!("{}@example.com", Uuid::new_v4().simple()),
            phone: "9876543210".into(),
            password_salt: "salt".into(),
            password_hash: "hash".into(),
            role,
            status: UserStatus::Active,
            created_at: Utc::now(),
        }
    }

    fn product(owner_id: Uuid, stock: u32) -> Product {
        Product {
            id: Uuid::now_v7(),
            name: "Rice".into(),
            category: "grains".into(),
            price: "55".parse().unwrap(),
            stock,
            description: "Basmati".into(),
            image_ref: "rice.jpg".into(),
            owner_id,
            created_at: Utc::now(),
        }
    }

    fn sale(owner_id: Uuid, total: &str, date: chrono::DateTime<Utc>) -> SaleRecord {
        SaleRecord {
            id: Uuid::now_v7(),
            order_id: Uuid::now_v7(),
            product_id: Uuid::now_v7(),
            owner_id,
            customer_id: Uuid::now_v7(),
            quantity: 1,
            price: total.parse().unwrap(),
            total: total.parse().unwrap(),
            date,
        }
    }

    fn order(customer_id: Uuid, total: &str, status: OrderStatus) -> Order {
        Order {
            id: Uuid::now_v7(),
            customer_id,
            lines: vec![],
            total: total.parse().unwrap(),
            payment_method: PaymentMethod::Cod,
            delivery_address: "12 Main Rd".into(),
            status,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn should_compute_platform_overview() {
        let farmer = user(Role::Farmer);
        let customer = user(Role::Customer);
        let yesterday = Utc::now() - Duration::days(1);
        let snapshot = ReportSnapshot {
            users: vec![farmer.clone(), customer.clone(), user(Role::Admin)],
            products: vec![product(farmer.id, 5), product(farmer.id, 0)],
            orders: vec![
                order(customer.id, "100", OrderStatus::Pending),
                order(customer.id, "50", OrderStatus::Delivered),
            ],
            sales: vec![
                sale(farmer.id, "100", Utc::now()),
                sale(farmer.id, "50", yesterday),
            ],
        };

        let usecase = PlatformOverviewUseCase {
            reporting: FixedSnapshot { snapshot },
        };
        let overview = usecase.execute().await.unwrap();

        assert_eq!(overview.total_farmers, 1);
        assert_eq!(overview.total_customers, 1);
        assert_eq!(overview.total_revenue, "150".parse::<Decimal>().unwrap());
        assert_eq!(overview.today_revenue, "100".parse::<Decimal>().unwrap());
        assert_eq!(overview.active_products, 1);
        assert_eq!(overview.pending_orders, 1);
    }

    #[tokio::test]
    async fn should_compute_per_farmer_rows() {
        let farmer_a = user(Role::Farmer);
        let farmer_b = user(Role::Farmer);
        let snapshot = ReportSnapshot {
            users: vec![farmer_a.clone(), farmer_b.clone()],
            products: vec![product(farmer_a.id, 5)],
            orders: vec![],
            sales: vec![
                sale(farmer_a.id, "100", Utc::now()),
                sale(farmer_a.id, "20", Utc::now()),
            ],
        };

        let usecase = FarmerPerformanceUseCase {
            reporting: FixedSnapshot { snapshot },
        };
        let rows = usecase.execute().await.unwrap();
        assert_eq!(rows.len(), 2);

        let row_a = rows.iter().find(|r| r.farmer_id == farmer_a.id).unwrap();
        assert_eq!(row_a.product_count, 1);
        assert_eq!(row_a.sale_count, 2);
        assert_eq!(row_a.revenue, "120".parse::<Decimal>().unwrap());

        let row_b = rows.iter().find(|r| r.farmer_id == farmer_b.id).unwrap();
        assert_eq!(row_b.product_count, 0);
        assert_eq!(row_b.revenue, Decimal::ZERO);
    }

    #[tokio::test]
    async fn should_compute_per_customer_rows() {
        let customer = user(Role::Customer);
        let snapshot = ReportSnapshot {
            users: vec![customer.clone()],
            products: vec![],
            orders: vec![
                order(customer.id, "100", OrderStatus::Pending),
                order(customer.id, "40.50", OrderStatus::Delivered),
            ],
            sales: vec![],
        };

        let usecase = CustomerActivityUseCase {
            reporting: FixedSnapshot { snapshot },
        };
        let rows = usecase.execute().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].order_count, 2);
        assert_eq!(rows[0].total_spent, "140.50".parse::<Decimal>().unwrap());
    }
}
