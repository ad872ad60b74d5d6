//! # Pages
//!
//! Server-rendered landing, checkout and success pages.
//! The checkout page drives Stripe.js in the browser; the card never
//! touches this server.

use crate::state::AppState;
use axum::{
    extract::State,
    http::{header, HeaderMap, Uri},
    response::{Html, IntoResponse, Redirect, Response},
};

/// Seconds before the success page sends the shopper home
pub const SUCCESS_REDIRECT_SECS: u64 = 10;

const LAYOUT: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{{TITLE}}</title>
    {{HEAD}}
    <style>
        body { font-family: system-ui; display: flex; justify-content: center; align-items: center; min-height: 100vh; margin: 0; background: linear-gradient(135deg, #1a1a2e 0%, #16213e 100%); }
        .card { background: white; padding: 48px; border-radius: 16px; text-align: center; max-width: 420px; width: 100%; }
        .button { display: inline-block; background: #635bff; color: white; border: 0; border-radius: 8px; padding: 12px 24px; font-size: 16px; text-decoration: none; cursor: pointer; }
        .button:disabled { opacity: 0.6; cursor: default; }
        #card-element { border: 1px solid #e0e0e0; border-radius: 8px; padding: 12px; margin: 16px 0; text-align: left; }
        .error { color: #e63946; margin: 12px 0; }
        .muted { color: #666; }
    </style>
</head>
<body>
    <div class="card">
{{BODY}}
    </div>
</body>
</html>
"#;

const CHECKOUT_BODY: &str = r##"        <h1>Complete Payment</h1>
        <p class="muted">{{PRICE}} {{NAME}}</p>
        <form id="payment-form">
            <h3>Card Details</h3>
            <div id="card-element"></div>
            <div id="payment-error" class="error" hidden></div>
            <button id="pay-button" class="button" type="submit" disabled>Pay {{PRICE}}</button>
        </form>
        <p class="muted">&#128274; Payments are secure and encrypted</p>
        <script>
            const stripe = Stripe({{PUBLISHABLE_KEY}});
            const card = stripe.elements().create("card", {
                style: {
                    base: { fontSize: "16px", color: "#424770", "::placeholder": { color: "#aab7c4" } },
                    invalid: { color: "#e63946" }
                }
            });
            card.mount("#card-element");

            const form = document.getElementById("payment-form");
            const button = document.getElementById("pay-button");
            const errorBox = document.getElementById("payment-error");
            const label = button.textContent;
            button.disabled = false;

            function setLoading(loading) {
                button.disabled = loading;
                button.textContent = loading ? "Processing..." : label;
            }

            form.addEventListener("submit", async (event) => {
                event.preventDefault();
                setLoading(true);
                errorBox.hidden = true;
                try {
                    const { error, paymentMethod } = await stripe.createPaymentMethod({ type: "card", card });
                    if (error) throw error;

                    const response = await fetch({{ENDPOINT}}, {
                        method: "POST",
                        headers: { "Content-Type": "application/json" },
                        body: JSON.stringify({ paymentMethodId: paymentMethod.id, amount: {{AMOUNT}}, currency: {{CURRENCY}} })
                    });
                    const data = await response.json();
                    if (!response.ok) throw new Error(data.error || "Payment failed");

                    window.location.href = {{SUCCESS_PATH}};
                } catch (err) {
                    errorBox.textContent = err.message;
                    errorBox.hidden = false;
                } finally {
                    setLoading(false);
                }
            });
        </script>"##;

fn render(title: &str, head: &str, body: &str) -> Html<String> {
    Html(
        LAYOUT
            .replace("{{TITLE}}", &escape_html(title))
            .replace("{{HEAD}}", head)
            .replace("{{BODY}}", body),
    )
}

/// Landing page
pub async fn landing(State(state): State<AppState>) -> Html<String> {
    let body = format!(
        r#"        <h1>{}</h1>
        <p class="muted">{}</p>
        <a class="button" href="{}">Go to Checkout</a>"#,
        escape_html(&state.item.name),
        escape_html(&state.item.description),
        escape_html(&state.urls.checkout_path),
    );
    render(&state.item.name, "", &body)
}

/// Card form page
pub async fn checkout(State(state): State<AppState>) -> Html<String> {
    let price = state.item.price;
    let body = CHECKOUT_BODY
        .replace("{{PRICE}}", &escape_html(&price.display()))
        .replace("{{NAME}}", &escape_html(&state.item.name))
        .replace("{{PUBLISHABLE_KEY}}", &js_string(&state.publishable_key))
        .replace("{{ENDPOINT}}", &js_string("/api/payment"))
        .replace("{{AMOUNT}}", &price.amount.to_string())
        .replace("{{CURRENCY}}", &js_string(price.currency.as_str()))
        .replace("{{SUCCESS_PATH}}", &js_string(&state.urls.success_path));

    render(
        "Checkout",
        r#"<script src="https://js.stripe.com/v3/"></script>"#,
        &body,
    )
}

/// Success page.
///
/// Only reachable straight from the checkout page; anything else is sent
/// home without rendering the success content.
pub async fn success(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let from_checkout = headers
        .get(header::REFERER)
        .and_then(|v| v.to_str().ok())
        .map(|referer| came_from_checkout(&state, referer))
        .unwrap_or(false);

    if !from_checkout {
        return Redirect::to(&state.urls.home_path).into_response();
    }

    let home = escape_html(&state.urls.home_path);
    let head = format!(
        r#"<meta name="robots" content="noindex">
    <meta http-equiv="refresh" content="{};url={}">"#,
        SUCCESS_REDIRECT_SECS, home
    );
    let body = format!(
        r#"        <div style="font-size: 60px;">&#10003;</div>
        <h1>Payment Successful!</h1>
        <p class="muted">Thank you for your purchase. A receipt has been sent to your email.</p>
        <p>Amount: <strong>{}</strong></p>
        <p class="muted">You'll be redirected to the homepage in {} seconds...</p>
        <a class="button" href="{}">Return Home Now</a>"#,
        escape_html(&state.item.price.display()),
        SUCCESS_REDIRECT_SECS,
        home
    );

    render("Payment Successful", &head, &body).into_response()
}

fn came_from_checkout(state: &AppState, referer: &str) -> bool {
    let Ok(uri) = referer.parse::<Uri>() else {
        return false;
    };
    uri.path() == state.urls.checkout_path && state.trusted_origin.matches_url(referer)
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// JSON string literal that is also safe inside a `<script>` block
fn js_string(value: &str) -> String {
    serde_json::Value::from(value)
        .to_string()
        .replace("</", "<\\/")
}
