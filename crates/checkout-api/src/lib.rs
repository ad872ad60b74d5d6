//! # checkout-api
//!
//! HTTP layer for card-checkout-rs.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - The payment endpoint, guarded by an exact trusted-origin check
//! - Landing, checkout and success pages
//! - `EndpointClient`, a `PaymentSubmitter` for driving the endpoint from Rust
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/` | Landing page |
//! | GET | `/checkout` | Card form |
//! | GET | `/success` | Success page |
//! | POST | `/api/payment` | Create and confirm a payment |
//! | GET | `/health` | Health check |

pub mod client;
pub mod handlers;
pub mod origin;
pub mod pages;
pub mod routes;
pub mod state;

pub use client::EndpointClient;
pub use routes::create_router;
pub use state::{AppConfig, AppState};

/// Initialize logging: `RUST_LOG` filter (default INFO), JSON output when
/// `LOG_FORMAT=json`.
pub fn init_tracing() {
    use tracing::Level;
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::builder()
        .with_default_directive(Level::INFO.into())
        .from_env_lossy();
    let json = std::env::var("LOG_FORMAT").map(|f| f == "json").unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}
