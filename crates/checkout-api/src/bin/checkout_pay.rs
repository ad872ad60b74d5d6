//! Pay for the checkout item from the terminal.
//!
//! Runs the same flow as the checkout page against a running server:
//! tokenize the card with Stripe, then post the token to `/api/payment`.
//!
//! ```bash
//! export STRIPE_PUBLISHABLE_KEY=pk_test_...
//! checkout-pay --number 4242424242424242 --exp-month 12 --exp-year 2030 --cvc 123
//! ```

use checkout_api::{init_tracing, EndpointClient};
use checkout_core::{CardDetails, CheckoutController, CheckoutItem};
use checkout_stripe::StripeTokenizer;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "checkout-pay", version, about = "Pay for the checkout item with a card")]
struct Args {
    /// Card number
    #[arg(long)]
    number: String,

    /// Expiry month (1-12)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=12))]
    exp_month: u8,

    /// Expiry year (four digits)
    #[arg(long)]
    exp_year: u16,

    /// Card security code
    #[arg(long)]
    cvc: String,

    /// Base URL of the checkout server
    #[arg(long, env = "BASE_URL", default_value = "http://localhost:8080")]
    base_url: String,

    /// Item config file (defaults to the built-in item)
    #[arg(long)]
    item: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();
    let args = Args::parse();

    let item = match &args.item {
        Some(path) => CheckoutItem::load_from_paths(std::slice::from_ref(path))
            .map_err(anyhow::Error::msg)?
            .ok_or_else(|| anyhow::anyhow!("Item config not found: {}", path.display()))?,
        None => CheckoutItem::default(),
    };

    let tokenizer = StripeTokenizer::from_env()?;
    let submitter = EndpointClient::new(&args.base_url)?;
    let mut controller = CheckoutController::new(tokenizer, submitter, item);

    let card = CardDetails::new(args.number, args.exp_month, args.exp_year, args.cvc);

    println!("{}", controller.submit_label());
    match controller.submit(&card).await {
        Some(target) => {
            println!("Payment successful, continue at {}{}", args.base_url.trim_end_matches('/'), target);
            Ok(())
        }
        None => {
            let message = controller.error_message().unwrap_or("Payment failed");
            anyhow::bail!("{}", message)
        }
    }
}
