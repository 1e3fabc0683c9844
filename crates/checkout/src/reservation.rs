//! Table reservation hand-off.
//!
//! Reservations never touch the remote backend: the form is rendered
//! into a WhatsApp message and handed to the fixed contact directly,
//! the same way a failed order submission degrades.

use serde::{Deserialize, Serialize};

use crate::error::ReservationError;
use crate::handoff::wa_me_link;

/// A filled-in reservation request.
///
/// `date` and `time` carry the form's raw selections (`YYYY-MM-DD`
/// and a slot such as `19:30`); `message` and `allergies` are
/// optional, empty string meaning absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReservationForm {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub date: String,
    pub time: String,
    pub guests: u32,
    pub message: String,
    pub allergies: String,
}

impl ReservationForm {
    pub fn has_message(&self) -> bool {
        !self.message.trim().is_empty()
    }

    pub fn has_allergies(&self) -> bool {
        !self.allergies.trim().is_empty()
    }
}

/// Renders the reservation as the human-readable WhatsApp message.
pub fn render_message(form: &ReservationForm) -> String {
    let mut message = String::from("🍽️ NOUVELLE RÉSERVATION - Ma Crème 🍰\n\n");
    message.push_str(&format!("👤 *Client:* {}\n", form.name));
    message.push_str(&format!("📞 *Téléphone:* {}\n", form.phone));
    message.push_str(&format!("📧 *Email:* {}\n", form.email));
    message.push_str(&format!("📅 *Date:* {}\n", form.date));
    message.push_str(&format!("⏰ *Heure:* {}\n", form.time));
    message.push_str(&format!("👥 *Nombre de personnes:* {}\n\n", form.guests));

    if form.has_message() {
        message.push_str(&format!("💬 *Demandes spéciales:*\n{}\n\n", form.message));
    }

    if form.has_allergies() {
        message.push_str(&format!("⚠️ *Allergies:*\n{}\n\n", form.allergies));
    }

    message.push_str("Merci de confirmer cette réservation ! 🎉");
    message
}

/// Validates the required fields and builds the complete `wa.me`
/// hand-off link for the reservation.
pub fn reservation_link(number: &str, form: &ReservationForm) -> Result<String, ReservationError> {
    let mut missing = Vec::new();
    if form.date.trim().is_empty() {
        missing.push("date");
    }
    if form.time.trim().is_empty() {
        missing.push("time");
    }
    if form.name.trim().is_empty() {
        missing.push("name");
    }
    if form.phone.trim().is_empty() {
        missing.push("phone");
    }
    if !missing.is_empty() {
        return Err(ReservationError::MissingFields { fields: missing });
    }

    Ok(wa_me_link(number, &render_message(form)))
}
