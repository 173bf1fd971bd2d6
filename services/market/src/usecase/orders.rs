use uuid::Uuid;

use kisankart_domain::order::OrderStatus;
use kisankart_domain::user::Role;

use crate::domain::repository::OrderRepository;
use crate::domain::types::Order;
use crate::error::MarketServiceError;

// ── GetOrder ─────────────────────────────────────────────────────────────────

pub struct GetOrderUseCase<R: OrderRepository> {
    pub repo: R,
}

impl<R: OrderRepository> GetOrderUseCase<R> {
    /// Customers see their own orders; admins see any.
    pub async fn execute(
        &self,
        actor_id: Uuid,
        actor_role: Role,
        order_id: Uuid,
    ) -> Result<Order, MarketServiceError> {
        let order = self
            .repo
            .find_by_id(order_id)
            .await?
            .ok_or(MarketServiceError::OrderNotFound)?;
        if actor_role != Role::Admin && order.customer_id != actor_id {
            return Err(MarketServiceError::Forbidden);
        }
        Ok(order)
    }
}

// ── ListCustomerOrders ───────────────────────────────────────────────────────

pub struct ListCustomerOrdersUseCase<R: OrderRepository> {
    pub repo: R,
}

impl<R: OrderRepository> ListCustomerOrdersUseCase<R> {
    pub async fn execute(&self, customer_id: Uuid) -> Result<Vec<Order>, MarketServiceError> {
        self.repo.list_by_customer(customer_id).await
    }
}

// ── ListAllOrders ────────────────────────────────────────────────────────────

pub struct ListAllOrdersUseCase<R: OrderRepository> {
    pub repo: R,
}

impl<R: OrderRepository> ListAllOrdersUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<Order>, MarketServiceError> {
        self.repo.list_all().await
    }
}

// ── UpdateOrderStatus ────────────────────────────────────────────────────────

pub struct UpdateOrderStatusUseCase<R: OrderRepository> {
    pub repo: R,
}

impl<R: OrderRepository> UpdateOrderStatusUseCase<R> {
    pub async fn execute(
        &self,
        order_id: Uuid,
        status: OrderStatus,
    ) -> Result<Order, MarketServiceError> {
        let order = self.repo.update_status(order_id, status).await?;
        tracing::info!(order_id = %order.id, status = status.as_str(), "order status updated");
        Ok(order)
    }
}
