use eq_float::F64;
use serde::{Deserialize, Serialize};

use crate::common::{Price, Quantity};

/// Aggregated quantity of every live order at one price level
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct OrderSummary {
    pub quantity: Quantity,
    pub price: Price,
}

impl OrderSummary {
    pub fn new(quantity: Quantity, price: Price) -> Self {
        Self { quantity, price }
    }
}

impl PartialEq for OrderSummary {
    fn eq(&self, other: &Self) -> bool {
        F64(self.quantity) == F64(other.quantity) && self.price == other.price
    }
}

impl Eq for OrderSummary {}
