use axum::{
    Router,
    routing::{delete, get, patch, post},
};

use kisankart_core::health::{healthz, readyz};
use kisankart_core::middleware::request_id_layer;

use crate::handlers::{
    auth::{login, signup},
    cart::{add_to_cart, clear_cart, get_cart, remove_cart_line, update_cart_line},
    contact::{
        delete_contact_message, get_contact_messages, mark_message_read, submit_contact_message,
    },
    orders::{get_all_orders, get_order, get_own_orders, place_order, update_order_status},
    products::{
        browse_products, create_product, delete_product, get_own_products, get_product,
        update_product,
    },
    reports::{
        get_customer_activity, get_farmer_performance, get_own_sales, get_platform_overview,
    },
    users::{get_me, get_users, toggle_user_status},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Auth
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
        // Catalog
        .route("/products", get(browse_products))
        .route("/products", post(create_product))
        .route("/products/{id}", get(get_product))
        .route("/products/{id}", patch(update_product))
        .route("/products/{id}", delete(delete_product))
        .route("/farmers/@me/products", get(get_own_products))
        .route("/farmers/@me/sales", get(get_own_sales))
        // Cart
        .route("/cart", get(get_cart))
        .route("/cart", post(add_to_cart))
        .route("/cart", delete(clear_cart))
        .route("/cart/{index}", patch(update_cart_line))
        .route("/cart/{index}", delete(remove_cart_line))
        // Orders
        .route("/orders", post(place_order))
        .route("/orders", get(get_all_orders))
        .route("/orders/@me", get(get_own_orders))
        .route("/orders/{id}", get(get_order))
        .route("/orders/{id}/status", patch(update_order_status))
        // Directory
        .route("/users/@me", get(get_me))
        .route("/users", get(get_users))
        .route("/users/{id}/status", patch(toggle_user_status))
        // Reports
        .route("/reports/platform", get(get_platform_overview))
        .route("/reports/farmers", get(get_farmer_performance))
        .route("/reports/customers", get(get_customer_activity))
        // Contact
        .route("/contact", post(submit_contact_message))
        .route("/contact", get(get_contact_messages))
        .route("/contact/{id}/read", patch(mark_message_read))
        .route("/contact/{id}", delete(delete_contact_message))
        .layer(request_id_layer())
        .with_state(state)
}
