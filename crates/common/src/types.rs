use serde::{Deserialize, Serialize};

/// Product identifier as listed in the storefront catalogs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Creates a new product ID from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the product ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ProductId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Storefront section a product belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Pastries and cakes.
    Patisserie,
    /// Breads and viennoiseries.
    Boulangerie,
    /// Restaurant dishes.
    Restaurant,
}

impl Category {
    /// Returns the category name as used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Patisserie => "patisserie",
            Category::Boulangerie => "boulangerie",
            Category::Restaurant => "restaurant",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Money amount in CFA francs, stored as centimes to avoid floating
/// point issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money {
    /// Amount in centimes (e.g., 120000 = 1200.00 FCFA)
    centimes: i64,
}

impl Money {
    /// Creates a new Money amount from centimes.
    pub fn from_centimes(centimes: i64) -> Self {
        Self { centimes }
    }

    /// Creates a new Money amount from whole francs.
    pub fn from_francs(francs: i64) -> Self {
        Self {
            centimes: francs * 100,
        }
    }

    /// Returns zero money.
    pub fn zero() -> Self {
        Self { centimes: 0 }
    }

    /// Returns the amount in centimes.
    pub fn centimes(&self) -> i64 {
        self.centimes
    }

    /// Returns the franc portion (whole number).
    pub fn francs(&self) -> i64 {
        self.centimes / 100
    }

    /// Returns the centime portion (remainder after francs).
    pub fn centimes_part(&self) -> i64 {
        self.centimes.abs() % 100
    }

    /// Returns the amount as fractional francs, for wire payloads that
    /// carry plain numbers.
    pub fn as_franc_value(&self) -> f64 {
        self.centimes as f64 / 100.0
    }

    /// Returns true if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.centimes == 0
    }

    /// Multiplies by a quantity.
    pub fn multiply(&self, quantity: u32) -> Money {
        Money {
            centimes: self.centimes * quantity as i64,
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.centimes < 0 {
            write!(f, "-{}.{:02} FCFA", self.francs().abs(), self.centimes_part())
        } else {
            write!(f, "{}.{:02} FCFA", self.francs(), self.centimes_part())
        }
    }
}

impl std::ops::Add for Money {
    type Output = Money;

    fn add(self, rhs: Self) -> Self::Output {
        Money {
            centimes: self.centimes + rhs.centimes,
        }
    }
}

impl std::ops::Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Self) -> Self::Output {
        Money {
            centimes: self.centimes - rhs.centimes,
        }
    }
}

impl std::ops::AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.centimes += rhs.centimes;
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}
