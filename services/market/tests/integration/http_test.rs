use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{Value, json};

use kisankart_market::router::build_router;

use crate::helpers::test_state;

fn test_server() -> TestServer {
    TestServer::new(build_router(test_state())).unwrap()
}

#[tokio::test]
async fn should_answer_health_probes() {
    let server = test_server();
    server.get("/healthz").await.assert_status_ok();
    server.get("/readyz").await.assert_status_ok();
}

#[tokio::test]
async fn should_signup_and_login_over_http() {
    let server = test_server();

    let signup = server
        .post("/auth/signup")
        .json(&json!({
            "name": "Ramesh Kumar",
            "email": "ramesh@farmer.com",
            "phone": "9876543210",
            "password": "password123",
            "role": "farmer",
        }))
        .await;
    signup.assert_status(StatusCode::CREATED);
    let body: Value = signup.json();
    assert_eq!(body["role"], "farmer");
    assert_eq!(body["status"], "active");
    assert!(body.get("password_hash").is_none());

    let login = server
        .post("/auth/login")
        .json(&json!({
            "email": "ramesh@farmer.com",
            "password": "password123",
            "role": "farmer",
        }))
        .await;
    login.assert_status_ok();

    let bad_login = server
        .post("/auth/login")
        .json(&json!({
            "email": "ramesh@farmer.com",
            "password": "wrong",
            "role": "farmer",
        }))
        .await;
    bad_login.assert_status(StatusCode::UNAUTHORIZED);
    let error: Value = bad_login.json();
    assert_eq!(error["kind"], "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn should_reject_duplicate_signup_with_conflict() {
    let server = test_server();
    let payload = json!({
        "name": "Ramesh Kumar",
        "email": "ramesh@farmer.com",
        "phone": "9876543210",
        "password": "password123",
        "role": "farmer",
    });

    server
        .post("/auth/signup")
        .json(&payload)
        .await
        .assert_status(StatusCode::CREATED);
    let duplicate = server.post("/auth/signup").json(&payload).await;
    duplicate.assert_status(StatusCode::CONFLICT);
    let error: Value = duplicate.json();
    assert_eq!(error["kind"], "USER_ALREADY_EXISTS");
}

#[tokio::test]
async fn should_require_identity_headers_on_protected_routes() {
    let server = test_server();

    // public storefront needs no identity
    server.get("/products").await.assert_status_ok();

    let create = server
        .post("/products")
        .json(&json!({
            "name": "Tomatoes",
            "category": "vegetables",
            "price": "40",
            "stock": 10,
        }))
        .await;
    create.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_run_the_whole_shopping_flow_over_http() {
    let server = test_server();

    let farmer: Value = server
        .post("/auth/signup")
        .json(&json!({
            "name": "Ramesh Kumar",
            "email": "ramesh@farmer.com",
            "phone": "9876543210",
            "password": "password123",
            "role": "farmer",
        }))
        .await
        .json();
    let farmer_id = farmer["id"].as_str().unwrap().to_owned();

    let product: Value = server
        .post("/products")
        .add_header("x-kisankart-user-id", farmer_id.as_str())
        .add_header("x-kisankart-user-role", "farmer")
        .json(&json!({
            "name": "Tomatoes",
            "category": "vegetables",
            "price": "40",
            "stock": 10,
            "description": "Fresh from the field",
        }))
        .await
        .json();
    let product_id = product["id"].as_str().unwrap().to_owned();

    let customer: Value = server
        .post("/auth/signup")
        .json(&json!({
            "name": "Priya Sharma",
            "email": "priya@customer.com",
            "phone": "9876500000",
            "password": "password123",
            "role": "customer",
        }))
        .await
        .json();
    let customer_id = customer["id"].as_str().unwrap().to_owned();

    // a farmer cannot shop
    server
        .post("/cart")
        .add_header("x-kisankart-user-id", farmer_id.as_str())
        .add_header("x-kisankart-user-role", "farmer")
        .json(&json!({ "product_id": product_id, "quantity": 1 }))
        .await
        .assert_status(StatusCode::FORBIDDEN);

    let cart: Value = server
        .post("/cart")
        .add_header("x-kisankart-user-id", customer_id.as_str())
        .add_header("x-kisankart-user-role", "customer")
        .json(&json!({ "product_id": product_id, "quantity": 3 }))
        .await
        .json();
    assert_eq!(cart["total"], "120");

    let order_response = server
        .post("/orders")
        .add_header("x-kisankart-user-id", customer_id.as_str())
        .add_header("x-kisankart-user-role", "customer")
        .json(&json!({
            "payment_method": "upi",
            "delivery_address": "12 Main Rd, Pune",
        }))
        .await;
    order_response.assert_status(StatusCode::CREATED);
    let order: Value = order_response.json();
    assert_eq!(order["total"], "120");
    assert_eq!(order["status"], "pending");

    // stock is visible through the public catalog immediately
    let product_after: Value = server.get(&format!("/products/{product_id}")).await.json();
    assert_eq!(product_after["stock"], 7);

    let orders: Value = server
        .get("/orders/@me")
        .add_header("x-kisankart-user-id", customer_id.as_str())
        .add_header("x-kisankart-user-role", "customer")
        .await
        .json();
    assert_eq!(orders.as_array().unwrap().len(), 1);

    let sales: Value = server
        .get("/farmers/@me/sales")
        .add_header("x-kisankart-user-id", farmer_id.as_str())
        .add_header("x-kisankart-user-role", "farmer")
        .await
        .json();
    assert_eq!(sales.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn should_gate_admin_surfaces_by_role() {
    let server = test_server();

    let customer: Value = server
        .post("/auth/signup")
        .json(&json!({
            "name": "Priya Sharma",
            "email": "priya@customer.com",
            "phone": "9876500000",
            "password": "password123",
            "role": "customer",
        }))
        .await
        .json();
    let customer_id = customer["id"].as_str().unwrap().to_owned();

    server
        .get("/reports/platform")
        .add_header("x-kisankart-user-id", customer_id.as_str())
        .add_header("x-kisankart-user-role", "customer")
        .await
        .assert_status(StatusCode::FORBIDDEN);

    // contact form is public; reading the inbox is not
    server
        .post("/contact")
        .json(&json!({
            "name": "Priya Sharma",
            "email": "priya@customer.com",
            "subject": "Delivery area",
            "message": "When do you deliver to Nashik?",
        }))
        .await
        .assert_status(StatusCode::CREATED);
    server
        .get("/contact")
        .add_header("x-kisankart-user-id", customer_id.as_str())
        .add_header("x-kisankart-user-role", "customer")
        .await
        .assert_status(StatusCode::FORBIDDEN);

    let admin: Value = server
        .post("/auth/signup")
        .json(&json!({
            "name": "Admin",
            "email": "admin@kisankart.com",
            "phone": "9876511111",
            "password": "password123",
            "role": "admin",
            "admin_key": crate::helpers::TEST_ADMIN_KEY,
        }))
        .await
        .json();
    let admin_id = admin["id"].as_str().unwrap().to_owned();

    let inbox: Value = server
        .get("/contact")
        .add_header("x-kisankart-user-id", admin_id.as_str())
        .add_header("x-kisankart-user-role", "admin")
        .await
        .json();
    assert_eq!(inbox.as_array().unwrap().len(), 1);
    assert_eq!(inbox[0]["status"], "new");
}
