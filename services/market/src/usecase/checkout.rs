use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use kisankart_domain::order::{OrderStatus, PaymentMethod};

use crate::domain::repository::{CartStore, CheckoutPort, ProductRepository};
use crate::domain::types::{Order, OrderLine, SaleRecord};
use crate::error::MarketServiceError;

pub struct PlaceOrderInput {
    pub payment_method: PaymentMethod,
    pub delivery_address: String,
}

/// Converts a cart into a durable order, one sale record per line, and the
/// matching stock decrements. Either the whole order materializes or none of
/// it does; the cart is cleared only after the commit lands.
pub struct PlaceOrderUseCase<P: ProductRepository, K: CheckoutPort, C: CartStore> {
    pub products: P,
    pub checkout: K,
    pub carts: C,
}

impl<P: ProductRepository, K: CheckoutPort, C: CartStore> PlaceOrderUseCase<P, K, C> {
    pub async fn execute(
        &self,
        customer_id: Uuid,
        input: PlaceOrderInput,
    ) -> Result<Order, MarketServiceError> {
        let cart = self.carts.get(customer_id).await?;
        if cart.is_empty() {
            return Err(MarketServiceError::EmptyCart);
        }
        if input.delivery_address.trim().is_empty() {
            return Err(MarketServiceError::invalid_input(
                "delivery address must not be blank",
            ));
        }

        // Validate every line against the authoritative catalog before
        // writing anything. Prices stay as quoted at add-to-cart time.
        for line in &cart.lines {
            let product = self
                .products
                .find_by_id(line.product_id)
                .await?
                .ok_or(MarketServiceError::ProductNotFound)?;
            if line.quantity > product.stock {
                return Err(MarketServiceError::InsufficientStock {
                    product: product.name,
                    requested: line.quantity,
                    available: product.stock,
                });
            }
        }

        let now = Utc::now();
        let lines: Vec<OrderLine> = cart
            .lines
            .iter()
            .map(|l| OrderLine {
                product_id: l.product_id,
                name: l.name.clone(),
                price: l.unit_price,
                quantity: l.quantity,
                owner_id: l.owner_id,
            })
            .collect();
        let total: Decimal = lines.iter().map(OrderLine::total).sum();

        let order = Order {
            id: Uuid::now_v7(),
            customer_id,
            lines,
            total,
            payment_method: input.payment_method,
            delivery_address: input.delivery_address,
            status: OrderStatus::Pending,
            created_at: now,
        };
        let sales: Vec<SaleRecord> = order
            .lines
            .iter()
            .map(|l| SaleRecord {
                id: Uuid::now_v7(),
                order_id: order.id,
                product_id: l.product_id,
                owner_id: l.owner_id,
                customer_id,
                quantity: l.quantity,
                price: l.price,
                total: l.total(),
                date: now,
            })
            .collect();

        // One logical transaction: order, sales, and stock land together or
        // not at all. The port re-checks stock under its own lock, so a
        // concurrent checkout cannot oversell past the validation above.
        self.checkout.commit(&order, &sales).await?;
        self.carts.clear(customer_id).await?;

        tracing::info!(
            order_id = %order.id,
            customer_id = %customer_id,
            lines = order.lines.len(),
            total = %order.total,
            "order placed"
        );
        Ok(order)
    }
}
