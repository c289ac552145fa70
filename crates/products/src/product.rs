use serde::{Deserialize, Serialize};

use vendo_core::Cents;

/// The fixed product catalog.
///
/// The machine sells exactly these three products. Prices are in integer
/// cents and belong to the product identity, not to configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Product {
    Candy,
    Chips,
    Soda,
}

impl Product {
    /// Catalog order, as shown on the selection panel.
    pub const ALL: [Product; 3] = [Product::Candy, Product::Chips, Product::Soda];

    /// Purchase price in cents.
    pub const fn price(self) -> Cents {
        match self {
            Product::Candy => Cents::new(65),
            Product::Chips => Cents::new(50),
            Product::Soda => Cents::new(125),
        }
    }
}

impl core::fmt::Display for Product {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Product::Candy => "candy",
            Product::Chips => "chips",
            Product::Soda => "soda",
        };
        f.write_str(name)
    }
}
