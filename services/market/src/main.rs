use std::sync::Arc;

use tracing::info;

use kisankart_core::tracing::init_tracing;
use kisankart_market::config::MarketConfig;
use kisankart_market::infra::store::JsonStore;
use kisankart_market::router::build_router;
use kisankart_market::state::AppState;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = MarketConfig::from_env();

    let store = match &config.data_dir {
        Some(dir) => Arc::new(JsonStore::open(dir.clone()).expect("failed to open data dir")),
        None => {
            info!("MARKET_DATA_DIR unset, using in-memory store");
            Arc::new(JsonStore::in_memory())
        }
    };

    let state = AppState::new(store, config.admin_key);

    let router = build_router(state);
    let http_addr = format!("0.0.0.0:{}", config.market_port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .expect("failed to bind");

    info!("market service listening on {http_addr}");
    axum::serve(listener, router).await.expect("server error");
}
