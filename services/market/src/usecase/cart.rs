use uuid::Uuid;

use crate::domain::repository::{CartStore, ProductRepository};
use crate::domain::types::{Cart, CartLine};
use crate::error::MarketServiceError;

// ── GetCart ──────────────────────────────────────────────────────────────────

pub struct GetCartUseCase<C: CartStore> {
    pub carts: C,
}

impl<C: CartStore> GetCartUseCase<C> {
    pub async fn execute(&self, customer_id: Uuid) -> Result<Cart, MarketServiceError> {
        self.carts.get(customer_id).await
    }
}

// ── AddToCart ────────────────────────────────────────────────────────────────

pub struct AddToCartUseCase<P: ProductRepository, C: CartStore> {
    pub products: P,
    pub carts: C,
}

impl<P: ProductRepository, C: CartStore> AddToCartUseCase<P, C> {
    /// Add `quantity` of a product. The line carries price and owner
    /// snapshots; stock is checked against the catalog now and re-checked at
    /// checkout. Adding a product already in the cart merges quantities.
    pub async fn execute(
        &self,
        customer_id: Uuid,
        product_id: Uuid,
        quantity: u32,
    ) -> Result<Cart, MarketServiceError> {
        if quantity < 1 {
            return Err(MarketServiceError::invalid_input("quantity must be at least 1"));
        }
        let product = self
            .products
            .find_by_id(product_id)
            .await?
            .ok_or(MarketServiceError::ProductNotFound)?;
        if quantity > product.stock {
            return Err(MarketServiceError::InsufficientStock {
                product: product.name,
                requested: quantity,
                available: product.stock,
            });
        }

        let mut cart = self.carts.get(customer_id).await?;
        match cart.lines.iter_mut().find(|l| l.product_id == product_id) {
            Some(line) => line.quantity = line.quantity.saturating_add(quantity),
            None => cart.lines.push(CartLine {
                product_id,
                name: product.name,
                unit_price: product.price,
                quantity,
                owner_id: product.owner_id,
            }),
        }
        self.carts.save(customer_id, cart.clone()).await?;
        Ok(cart)
    }
}

// ── UpdateCartQuantity ───────────────────────────────────────────────────────

pub struct UpdateCartQuantityUseCase<P: ProductRepository, C: CartStore> {
    pub products: P,
    pub carts: C,
}

impl<P: ProductRepository, C: CartStore> UpdateCartQuantityUseCase<P, C> {
    /// Adjust a line's quantity by `delta`. A result of zero or less removes
    /// the line; growth beyond current stock is rejected.
    pub async fn execute(
        &self,
        customer_id: Uuid,
        index: usize,
        delta: i64,
    ) -> Result<Cart, MarketServiceError> {
        let mut cart = self.carts.get(customer_id).await?;
        let Some(line) = cart.lines.get_mut(index) else {
            return Err(MarketServiceError::invalid_input("no such cart line"));
        };

        // `delta` comes straight off the request body; all arithmetic is
        // checked so an extreme value cannot panic or wrap.
        let new_quantity = i64::from(line.quantity).checked_add(delta);
        match new_quantity {
            Some(q) if q <= 0 => {
                cart.lines.remove(index);
            }
            None if delta < 0 => {
                cart.lines.remove(index);
            }
            _ => {
                let product = self
                    .products
                    .find_by_id(line.product_id)
                    .await?
                    .ok_or(MarketServiceError::ProductNotFound)?;
                let Some(requested) = new_quantity.and_then(|q| u32::try_from(q).ok()) else {
                    return Err(MarketServiceError::invalid_input("quantity out of range"));
                };
                if requested > product.stock {
                    return Err(MarketServiceError::InsufficientStock {
                        product: product.name,
                        requested,
                        available: product.stock,
                    });
                }
                line.quantity = requested;
            }
        }
        self.carts.save(customer_id, cart.clone()).await?;
        Ok(cart)
    }
}

// ── RemoveCartLine ───────────────────────────────────────────────────────────

pub struct RemoveCartLineUseCase<C: CartStore> {
    pub carts: C,
}

impl<C: CartStore> RemoveCartLineUseCase<C> {
    pub async fn execute(
        &self,
        customer_id: Uuid,
        index: usize,
    ) -> Result<Cart, MarketServiceError> {
        let mut cart = self.carts.get(customer_id).await?;
        if index >= cart.lines.len() {
            return Err(MarketServiceError::invalid_input("no such cart line"));
        }
        cart.lines.remove(index);
        self.carts.save(customer_id, cart.clone()).await?;
        Ok(cart)
    }
}

// ── ClearCart ────────────────────────────────────────────────────────────────

pub struct ClearCartUseCase<C: CartStore> {
    pub carts: C,
}

impl<C: CartStore> ClearCartUseCase<C> {
    pub async fn execute(&self, customer_id: Uuid) -> Result<(), MarketServiceError> {
        self.carts.clear(customer_id).await
    }
}
