//! Composition of a canonical order from cart and form state.

use cart::Cart;
use chrono::{DateTime, Utc};
use common::Money;

use crate::ValidationError;
use crate::form::OrderForm;
use crate::record::{Order, OrderLine};

/// Composes a canonical [`Order`] from the current cart and the
/// checkout form, stamped with the current time.
///
/// Fails if the cart is empty or any required form field is blank.
/// On success the cart lines are copied by value and the total is
/// recomputed from the copies, so the order can never go stale.
pub fn compose(cart: &Cart, form: &OrderForm) -> Result<Order, ValidationError> {
    compose_at(cart, form, Utc::now())
}

/// Same as [`compose`], with an explicit composition timestamp.
pub fn compose_at(
    cart: &Cart,
    form: &OrderForm,
    created_at: DateTime<Utc>,
) -> Result<Order, ValidationError> {
    let missing = missing_fields(form);
    if !missing.is_empty() {
        return Err(ValidationError::MissingFields { fields: missing });
    }

    if cart.is_empty() {
        return Err(ValidationError::EmptyCart);
    }

    let lines: Vec<OrderLine> = cart
        .items()
        .map(|item| OrderLine {
            id: item.id.clone(),
            name: item.name.clone(),
            unit_price: item.unit_price,
            quantity: item.quantity,
            category: item.category,
        })
        .collect();

    // Recomputed from the snapshot rather than copied from the cart.
    let total: Money = lines.iter().map(OrderLine::line_total).sum();

    Ok(Order {
        customer_name: form.customer_name.trim().to_string(),
        customer_phone: form.customer_phone.trim().to_string(),
        lines,
        total,
        address: form.address.trim().to_string(),
        instructions: form.instructions.trim().to_string(),
        payment_method: form.payment_method,
        created_at,
    })
}

fn missing_fields(form: &OrderForm) -> Vec<&'static str> {
    let mut missing = Vec::new();
    if form.customer_name.trim().is_empty() {
        missing.push("customer_name");
    }
    if form.customer_phone.trim().is_empty() {
        missing.push("customer_phone");
    }
    if form.address.trim().is_empty() {
        missing.push("address");
    }
    missing
}
