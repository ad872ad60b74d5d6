//! # Card Checkout
//!
//! Single-item card checkout server.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export STRIPE_SECRET_KEY=sk_test_...
//! export STRIPE_PUBLISHABLE_KEY=pk_test_...
//! export BASE_URL=http://localhost:8080
//!
//! # Run the server
//! card-checkout
//! ```

use checkout_api::{init_tracing, routes, state::AppState};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    // Initialize application state
    let state = AppState::from_env()?;

    let addr = state.config.socket_addr()?;
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);
    info!("Trusted origin: {}", state.trusted_origin.as_str());
    info!(
        "Selling: {} ({})",
        state.item.name,
        state.item.price.display()
    );
    info!("Payment processor: {}", state.processor.provider_name());

    if !is_prod {
        info!("Checkout page: {}", state.urls.checkout_url());
        info!("Payment endpoint: POST {}", state.urls.payment_endpoint_url());
    }

    // Create router
    let app = routes::create_router(state);

    info!("Card checkout starting on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
