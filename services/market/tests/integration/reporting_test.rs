use rust_decimal::Decimal;

use kisankart_domain::user::{Role, UserStatus};
use kisankart_market::usecase::directory::ToggleUserStatusUseCase;
use kisankart_market::usecase::reporting::{
    CustomerActivityUseCase, FarmerPerformanceUseCase, FarmerSalesUseCase,
    PlatformOverviewUseCase,
};

use crate::helpers::{add_to_cart, checkout, create_product, signup_user, test_state};

#[tokio::test]
async fn should_report_platform_totals_after_checkout() {
    let state = test_state();
    let farmer = signup_user(&state, "farmer@kisankart.test", Role::Farmer).await;
    let customer = signup_user(&state, "customer@kisankart.test", Role::Customer).await;
    signup_user(&state, "admin@kisankart.test", Role::Admin).await;

    let tomatoes = create_product(&state, &farmer, "Tomatoes", "40", 10).await;
    create_product(&state, &farmer, "Out of season", "99", 0).await;

    add_to_cart(&state, customer.id, tomatoes.id, 3).await;
    checkout(&state, customer.id).await.unwrap();

    let overview = PlatformOverviewUseCase {
        reporting: state.reporting(),
    }
    .execute()
    .await
    .unwrap();

    assert_eq!(overview.total_farmers, 1);
    assert_eq!(overview.total_customers, 1);
    assert_eq!(overview.total_revenue, "120".parse::<Decimal>().unwrap());
    // the sale just happened, so it counts toward today
    assert_eq!(overview.today_revenue, overview.total_revenue);
    assert_eq!(overview.active_products, 1);
    assert_eq!(overview.pending_orders, 1);
}

#[tokio::test]
async fn should_attribute_revenue_to_the_selling_farmer() {
    let state = test_state();
    let ramesh = signup_user(&state, "ramesh@kisankart.test", Role::Farmer).await;
    let suresh = signup_user(&state, "suresh@kisankart.test", Role::Farmer).await;
    let customer = signup_user(&state, "customer@kisankart.test", Role::Customer).await;

    let tomatoes = create_product(&state, &ramesh, "Tomatoes", "40", 10).await;
    create_product(&state, &suresh, "Onions", "18", 10).await;

    add_to_cart(&state, customer.id, tomatoes.id, 2).await;
    checkout(&state, customer.id).await.unwrap();

    let rows = FarmerPerformanceUseCase {
        reporting: state.reporting(),
    }
    .execute()
    .await
    .unwrap();
    assert_eq!(rows.len(), 2);

    let ramesh_row = rows.iter().find(|r| r.farmer_id == ramesh.id).unwrap();
    assert_eq!(ramesh_row.sale_count, 1);
    assert_eq!(ramesh_row.revenue, "80".parse::<Decimal>().unwrap());

    let suresh_row = rows.iter().find(|r| r.farmer_id == suresh.id).unwrap();
    assert_eq!(suresh_row.sale_count, 0);
    assert_eq!(suresh_row.revenue, Decimal::ZERO);

    let sales = FarmerSalesUseCase {
        sales: state.sale_repo(),
    }
    .execute(ramesh.id)
    .await
    .unwrap();
    assert_eq!(sales.len(), 1);
    assert_eq!(sales[0].customer_id, customer.id);
}

#[tokio::test]
async fn should_track_customer_spend_and_deactivated_status() {
    let state = test_state();
    let farmer = signup_user(&state, "farmer@kisankart.test", Role::Farmer).await;
    let customer = signup_user(&state, "customer@kisankart.test", Role::Customer).await;

    let mangoes = create_product(&state, &farmer, "Mangoes", "120", 10).await;
    add_to_cart(&state, customer.id, mangoes.id, 1).await;
    checkout(&state, customer.id).await.unwrap();
    add_to_cart(&state, customer.id, mangoes.id, 2).await;
    checkout(&state, customer.id).await.unwrap();

    ToggleUserStatusUseCase {
        repo: state.user_repo(),
    }
    .execute(customer.id)
    .await
    .unwrap();

    let rows = CustomerActivityUseCase {
        reporting: state.reporting(),
    }
    .execute()
    .await
    .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].order_count, 2);
    assert_eq!(rows[0].total_spent, "360".parse::<Decimal>().unwrap());
    assert_eq!(rows[0].status, UserStatus::Inactive);
}
