use std::fmt::{self, Display};

use arbitrary::Arbitrary;
use eq_float::F64;
use serde::{Deserialize, Serialize};

use crate::{
    common::{Price, Quantity, UserId},
    error::BoardError,
};

pub mod summary;
pub use summary::*;

/// Direction of an order. Declaration order is also summary order: every
/// SELL level precedes every BUY level.
#[derive(
    Arbitrary,
    Copy,
    Clone,
    Debug,
    Deserialize,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
pub enum Side {
    #[serde(alias = "SELL")]
    Sell,
    #[serde(alias = "BUY")]
    Buy,
}

impl Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Sell => write!(f, "SELL"),
            Side::Buy => write!(f, "BUY"),
        }
    }
}

/// A live order as returned by registration.
///
/// Orders carry no identity beyond their fields: two orders with the same
/// side, user, quantity and price are interchangeable, and cancelling one
/// of them removes whichever was registered first. Quantity comparison is
/// exact (no epsilon), so `0.1 + 0.2` and `0.3` are different quantities.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Order {
    side: Side,
    user_id: UserId,
    quantity: Quantity,
    price: Price,
}

impl PartialEq for Order {
    fn eq(&self, other: &Self) -> bool {
        self.side == other.side
            && self.user_id == other.user_id
            && F64(self.quantity) == F64(other.quantity)
            && self.price == other.price
    }
}

impl Eq for Order {}

impl Order {
    /// Builds an order after checking the field sanity rules shared by
    /// registration and cancellation
    pub fn new(
        side: Side,
        user_id: impl Into<UserId>,
        quantity: Quantity,
        price: Price,
    ) -> Result<Self, BoardError> {
        let order = Self {
            side,
            user_id: user_id.into(),
            quantity,
            price,
        };
        order.validate()?;
        Ok(order)
    }

    /// Checks the fields of an order that may not have come from
    /// [`Order::new`] (e.g. one that was deserialized)
    pub fn validate(&self) -> Result<(), BoardError> {
        if self.user_id.is_empty() {
            return Err(BoardError::EmptyUserId);
        }

        // NaN fails this comparison too
        if !(self.quantity > 0.0 && self.quantity.is_finite()) {
            return Err(BoardError::InvalidQuantity {
                quantity: self.quantity,
            });
        }

        if self.price <= 0 {
            return Err(BoardError::InvalidPrice { price: self.price });
        }

        Ok(())
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    pub fn price(&self) -> Price {
        self.price
    }
}

impl Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} @ {} [{}]",
            self.side, self.quantity, self.price, self.user_id
        )
    }
}
