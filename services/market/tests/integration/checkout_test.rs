use std::sync::Arc;

use rust_decimal::Decimal;
use uuid::Uuid;

use kisankart_domain::order::OrderStatus;
use kisankart_domain::user::Role;
use kisankart_market::domain::repository::{ProductPatch, ProductRepository};
use kisankart_market::error::MarketServiceError;
use kisankart_market::infra::store::JsonStore;
use kisankart_market::usecase::cart::GetCartUseCase;

use crate::helpers::{
    add_to_cart, checkout, create_product, signup_user, test_state, test_state_with_store,
};

#[tokio::test]
async fn should_checkout_merged_cart_and_decrement_stock() {
    let state = test_state();
    let farmer = signup_user(&state, "farmer@kisankart.test", Role::Farmer).await;
    let customer = signup_user(&state, "customer@kisankart.test", Role::Customer).await;
    let product = create_product(&state, &farmer, "Tomatoes", "40", 10).await;

    // two adds of the same product merge into a single line
    add_to_cart(&state, customer.id, product.id, 4).await;
    add_to_cart(&state, customer.id, product.id, 3).await;

    let order = checkout(&state, customer.id).await.unwrap();

    assert_eq!(order.lines.len(), 1);
    assert_eq!(order.lines[0].quantity, 7);
    assert_eq!(order.total, "280".parse::<Decimal>().unwrap());
    assert_eq!(order.status, OrderStatus::Pending);

    let data = state.store.read();
    assert_eq!(data.products[0].stock, 3);
    assert_eq!(data.orders.len(), 1);
    assert_eq!(data.sales.len(), 1);
    assert_eq!(data.sales[0].order_id, order.id);
    assert_eq!(data.sales[0].owner_id, farmer.id);
    let sale_total: Decimal = data.sales.iter().map(|s| s.total).sum();
    assert_eq!(sale_total, order.total);
    drop(data);

    let cart = GetCartUseCase {
        carts: state.cart_store(),
    }
    .execute(customer.id)
    .await
    .unwrap();
    assert!(cart.is_empty());
}

#[tokio::test]
async fn should_let_exactly_one_of_two_oversubscribing_checkouts_win() {
    let state = test_state();
    let farmer = signup_user(&state, "farmer@kisankart.test", Role::Farmer).await;
    let alice = signup_user(&state, "alice@kisankart.test", Role::Customer).await;
    let bob = signup_user(&state, "bob@kisankart.test", Role::Customer).await;
    let product = create_product(&state, &farmer, "Onions", "18", 10).await;

    // both carts pass their add-time check; together they exceed stock
    add_to_cart(&state, alice.id, product.id, 6).await;
    add_to_cart(&state, bob.id, product.id, 6).await;

    let (first, second) = tokio::join!(checkout(&state, alice.id), checkout(&state, bob.id));

    let succeeded = [&first, &second].iter().filter(|r| r.is_ok()).count();
    assert_eq!(succeeded, 1, "exactly one checkout must win");
    let loser = if first.is_ok() { second } else { first };
    assert!(matches!(
        loser,
        Err(MarketServiceError::InsufficientStock { .. })
    ));

    let data = state.store.read();
    assert_eq!(data.products[0].stock, 4);
    assert_eq!(data.orders.len(), 1);
    assert_eq!(data.sales.len(), 1);
}

#[tokio::test]
async fn should_roll_back_whole_order_when_one_line_is_short() {
    let state = test_state();
    let farmer = signup_user(&state, "farmer@kisankart.test", Role::Farmer).await;
    let customer = signup_user(&state, "customer@kisankart.test", Role::Customer).await;
    let tomatoes = create_product(&state, &farmer, "Tomatoes", "40", 10).await;
    let onions = create_product(&state, &farmer, "Onions", "18", 5).await;

    add_to_cart(&state, customer.id, tomatoes.id, 2).await;
    add_to_cart(&state, customer.id, onions.id, 5).await;

    // stock drops between add-to-cart and checkout
    state
        .product_repo()
        .update(
            onions.id,
            farmer.id,
            ProductPatch {
                stock: Some(3),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let result = checkout(&state, customer.id).await;
    assert!(matches!(
        result,
        Err(MarketServiceError::InsufficientStock { .. })
    ));

    // nothing was applied, not even the line that had enough stock
    let data = state.store.read();
    assert!(data.orders.is_empty());
    assert!(data.sales.is_empty());
    let tomatoes_after = data.products.iter().find(|p| p.id == tomatoes.id).unwrap();
    assert_eq!(tomatoes_after.stock, 10);
    drop(data);

    let cart = GetCartUseCase {
        carts: state.cart_store(),
    }
    .execute(customer.id)
    .await
    .unwrap();
    assert_eq!(cart.lines.len(), 2);
}

#[tokio::test]
async fn should_persist_checkout_across_restart() {
    let dir = tempfile::tempdir().unwrap();
    let customer_id;
    let order_id;
    {
        let store = Arc::new(JsonStore::open(dir.path().to_path_buf()).unwrap());
        let state = test_state_with_store(store);
        let farmer = signup_user(&state, "farmer@kisankart.test", Role::Farmer).await;
        let customer = signup_user(&state, "customer@kisankart.test", Role::Customer).await;
        let product = create_product(&state, &farmer, "Mangoes", "120", 8).await;

        add_to_cart(&state, customer.id, product.id, 2).await;
        let order = checkout(&state, customer.id).await.unwrap();
        customer_id = customer.id;
        order_id = order.id;
    }

    let reopened = JsonStore::open(dir.path().to_path_buf()).unwrap();
    let data = reopened.read();
    assert_eq!(data.orders.len(), 1);
    assert_eq!(data.orders[0].id, order_id);
    assert_eq!(data.orders[0].customer_id, customer_id);
    assert_eq!(data.orders[0].total, "240".parse::<Decimal>().unwrap());
    assert_eq!(data.sales.len(), 1);
    assert_eq!(data.products[0].stock, 6);
}

#[tokio::test]
async fn should_reject_checkout_of_unknown_customer_cart() {
    let state = test_state();
    let result = checkout(&state, Uuid::now_v7()).await;
    assert!(matches!(result, Err(MarketServiceError::EmptyCart)));
}
