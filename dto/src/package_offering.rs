use derive_getters::Getters;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A standing gym package (e.g. a quarterly pass) as declared in the catalog.
#[derive(Debug, Serialize, Deserialize, Getters, PartialEq, Eq, Clone)]
pub struct PackageOffering {
    id: i32,
    name: String,
    duration_in_months: i32,
    price: Decimal,
}

impl PackageOffering {
    pub fn new(id: i32, name: String, duration_in_months: i32, price: Decimal) -> Self {
        Self {
            id,
            name,
            duration_in_months,
            price,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Getters, PartialEq, Eq, Clone)]
pub struct NewPackageOffering {
    name: String,
    duration_in_months: i32,
    price: Decimal,
}

impl NewPackageOffering {
    pub fn new(name: String, duration_in_months: i32, price: Decimal) -> Self {
        Self {
            name,
            duration_in_months,
            price,
        }
    }
}

#[cfg(any(test, feature = "test"))]
pub mod tests {
    use super::*;

    pub fn quarterly_pass() -> NewPackageOffering {
        NewPackageOffering {
            name: "Quarterly pass".to_string(),
            duration_in_months: 3,
            price: Decimal::new(8990, 2),
        }
    }

    pub fn yearly_pass() -> NewPackageOffering {
        NewPackageOffering {
            name: "Yearly pass".to_string(),
            duration_in_months: 12,
            price: Decimal::new(29900, 2),
        }
    }
}
