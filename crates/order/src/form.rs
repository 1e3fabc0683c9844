//! The transient checkout form.

use serde::{Deserialize, Serialize};

/// How the shopper intends to pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Wave mobile money.
    #[default]
    Wave,

    /// Orange Money.
    OrangeMoney,

    /// Cash on delivery.
    #[serde(rename = "especes")]
    Cash,
}

impl PaymentMethod {
    /// Returns the human-readable label shown in the hand-off message.
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Wave => "Wave",
            PaymentMethod::OrangeMoney => "Orange Money",
            PaymentMethod::Cash => "Espèces à la livraison",
        }
    }

    /// Returns the wire name used by the order backend.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Wave => "wave",
            PaymentMethod::OrangeMoney => "orange_money",
            PaymentMethod::Cash => "especes",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Contact and delivery details collected at checkout.
///
/// All fields except `instructions` are required; validation happens
/// in [`crate::compose`], not here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderForm {
    /// Shopper's full name.
    pub customer_name: String,

    /// Shopper's phone number.
    pub customer_phone: String,

    /// Delivery address.
    pub address: String,

    /// Free-form special instructions (allergies, delivery window...).
    pub instructions: String,

    /// Selected payment method.
    pub payment_method: PaymentMethod,
}
