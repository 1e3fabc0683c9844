//! Local construction of the WhatsApp hand-off payload.
//!
//! Used whenever remote persistence or the link relay fails: renders
//! the order into the same message the relay would have produced, so
//! the shopper's hand-off is equally informative on every path.

use order::Order;

/// Renders the order as the human-readable WhatsApp message.
pub fn render_message(order: &Order) -> String {
    let mut message = String::from("🍞 NOUVELLE COMMANDE - Ma Crème 🍰\n\n");
    message.push_str(&format!("👤 *Client:* {}\n", order.customer_name));
    message.push_str(&format!("📞 *Téléphone:* {}\n", order.customer_phone));
    message.push_str(&format!("📍 *Adresse:* {}\n\n", order.address));

    message.push_str("📋 *DÉTAILS DE LA COMMANDE:*\n");
    for line in &order.lines {
        message.push_str(&format!(
            "• {} x{} - {}\n",
            line.name,
            line.quantity,
            line.line_total()
        ));
    }

    message.push_str(&format!("\n💰 *TOTAL: {}*\n", order.total));
    message.push_str(&format!(
        "💳 *Paiement: {}*\n",
        order.payment_method.label()
    ));

    if order.has_instructions() {
        message.push_str(&format!("\n📝 *Instructions:* {}\n", order.instructions));
    }

    message.push_str(&format!(
        "\n⏰ *Heure de commande:* {}",
        order.created_at.format("%d/%m/%Y %H:%M:%S")
    ));

    message
}

/// Combines the contact number and a rendered message into a
/// `wa.me` link with the message URL-encoded as the `text` parameter.
pub fn wa_me_link(number: &str, message: &str) -> String {
    let base = format!("https://wa.me/{number}");
    match reqwest::Url::parse_with_params(&base, &[("text", message)]) {
        Ok(url) => url.to_string(),
        Err(_) => base,
    }
}

/// Renders the order and wraps it into a complete hand-off link.
pub fn local_handoff_link(number: &str, order: &Order) -> String {
    wa_me_link(number, &render_message(order))
}
