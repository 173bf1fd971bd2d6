use std::sync::Arc;

use uuid::Uuid;

use kisankart_domain::order::PaymentMethod;
use kisankart_domain::user::Role;
use kisankart_market::domain::types::{Order, Product, User};
use kisankart_market::error::MarketServiceError;
use kisankart_market::infra::store::JsonStore;
use kisankart_market::state::AppState;
use kisankart_market::usecase::cart::AddToCartUseCase;
use kisankart_market::usecase::catalog::{CreateProductInput, CreateProductUseCase};
use kisankart_market::usecase::checkout::{PlaceOrderInput, PlaceOrderUseCase};
use kisankart_market::usecase::directory::{SignupInput, SignupUseCase};

pub const TEST_ADMIN_KEY: &str = "test-admin-key";

pub fn test_state() -> AppState {
    AppState::new(Arc::new(JsonStore::in_memory()), TEST_ADMIN_KEY.into())
}

pub fn test_state_with_store(store: Arc<JsonStore>) -> AppState {
    AppState::new(store, TEST_ADMIN_KEY.into())
}

pub async fn signup_user(state: &AppState, email: &str, role: Role) -> User {
    let usecase = SignupUseCase {
        repo: state.user_repo(),
        admin_key: TEST_ADMIN_KEY.into(),
    };
    usecase
        .execute(SignupInput {
            name: "Test User".into(),
            email: email.into(),
            phone: "9876543210".into(),
            password: "password123".into(),
            role,
            admin_key: (role == Role::Admin).then(|| TEST_ADMIN_KEY.to_owned()),
        })
        .await
        .unwrap()
}

pub async fn create_product(
    state: &AppState,
    owner: &User,
    name: &str,
    price: &str,
    stock: u32,
) -> Product {
    let usecase = CreateProductUseCase {
        repo: state.product_repo(),
    };
    usecase
        .execute(
            owner.id,
            CreateProductInput {
                name: name.into(),
                category: "vegetables".into(),
                price: price.parse().unwrap(),
                stock,
                description: "Fresh from the field".into(),
                image_ref: format!("{name}.jpg"),
            },
        )
        .await
        .unwrap()
}

pub async fn add_to_cart(state: &AppState, customer_id: Uuid, product_id: Uuid, quantity: u32) {
    let usecase = AddToCartUseCase {
        products: state.product_repo(),
        carts: state.cart_store(),
    };
    usecase
        .execute(customer_id, product_id, quantity)
        .await
        .unwrap();
}

pub async fn checkout(state: &AppState, customer_id: Uuid) -> Result<Order, MarketServiceError> {
    let usecase = PlaceOrderUseCase {
        products: state.product_repo(),
        checkout: state.checkout_port(),
        carts: state.cart_store(),
    };
    usecase
        .execute(
            customer_id,
            PlaceOrderInput {
                payment_method: PaymentMethod::Cod,
                delivery_address: "12 Main Rd, Pune".into(),
            },
        )
        .await
}
