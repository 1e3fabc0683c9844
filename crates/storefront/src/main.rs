//! Storefront entry point: wires one instance of each component and
//! runs an order flow against the configured backend.

mod catalog;
mod config;

use cart::Cart;
use checkout::{HttpHandoffRelay, HttpOrderBackend, SubmissionCoordinator};
use config::Config;
use order::OrderForm;
use session::{HttpAuthBackend, SessionGuard};
use storage::{FileKvStore, OrderArchive};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() {
    // 1. Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 2. Load configuration
    let config = Config::from_env();
    tracing::info!(api = %config.api_base_url, "starting storefront");

    // 3. Open the client-side store and the archive over it
    let store = FileKvStore::open(&config.store_path);
    let archive = OrderArchive::new(store.clone());

    // 4. Restore or establish a session
    let auth = HttpAuthBackend::new(&config.api_base_url).expect("failed to build auth client");
    let guard = SessionGuard::new(auth, store.clone());

    let user = match guard.restore().await {
        Ok(Some(user)) => user,
        Ok(None) => match demo_credentials() {
            Some((email, password)) => match guard.login(&email, &password).await {
                Ok(user) => user,
                Err(err) => {
                    tracing::error!(error = %err, "sign-in failed");
                    return;
                }
            },
            None => {
                tracing::error!(
                    "no stored session; set DEMO_EMAIL and DEMO_PASSWORD to sign in"
                );
                return;
            }
        },
        Err(err) => {
            tracing::error!(error = %err, "session restore failed");
            return;
        }
    };
    tracing::info!(name = %user.name, "signed in");

    // 5. Gate checkout on the session, then fill a cart
    let user = guard
        .require_authenticated()
        .expect("session was just established");

    let mut cart = Cart::new();
    if let Some(bread) = catalog::find("b2") {
        cart.add_item(bread.clone());
        cart.add_item(bread);
    }
    if let Some(croissant) = catalog::find("b3") {
        cart.add_item(croissant);
    }
    tracing::info!(lines = cart.len(), total = %cart.total(), "cart ready");

    // 6. Compose the order
    let form = OrderForm {
        customer_name: user.name.clone(),
        customer_phone: std::env::var("CONTACT_PHONE")
            .ok()
            .or_else(|| user.phone.clone())
            .unwrap_or_default(),
        address: std::env::var("DELIVERY_ADDRESS").unwrap_or_else(|_| "Dakar".to_string()),
        instructions: String::new(),
        payment_method: Default::default(),
    };
    let order = match order::compose(&cart, &form) {
        Ok(order) => order,
        Err(err) => {
            tracing::error!(error = %err, "order rejected");
            return;
        }
    };

    // 7. Submit: remote when possible, local fallback otherwise
    let backend =
        HttpOrderBackend::new(&config.api_base_url).expect("failed to build order client");
    let relay =
        HttpHandoffRelay::new(&config.api_base_url).expect("failed to build relay client");
    let coordinator =
        SubmissionCoordinator::with_contact(backend, relay, archive, &config.whatsapp_number);

    match coordinator.submit(&order).await {
        Ok(result) => {
            tracing::info!(
                reference = %result.reference,
                outcome = ?result.outcome,
                "order handed off"
            );
            println!("Open WhatsApp to send your order:\n{}", result.handoff_url);

            // Clear the cart only once the hand-off is confirmed.
            cart.clear();
        }
        Err(err) => {
            tracing::warn!(error = %err, "submission not started");
        }
    }
}

fn demo_credentials() -> Option<(String, String)> {
    let email = std::env::var("DEMO_EMAIL").ok()?;
    let password = std::env::var("DEMO_PASSWORD").ok()?;
    Some((email, password))
}
