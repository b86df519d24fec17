use thiserror::Error;

use crate::common::{Price, Quantity};

#[derive(Clone, Debug, Error, PartialEq)]
pub enum BoardError {
    #[error("user id must not be empty")]
    EmptyUserId,
    #[error("quantity must be greater than 0: {quantity}")]
    InvalidQuantity { quantity: Quantity },
    #[error("price must be greater than 0: {price}")]
    InvalidPrice { price: Price },
}

impl BoardError {
    /// Every variant is a rejected argument; no other failure modes exist
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Self::EmptyUserId
                | Self::InvalidQuantity { .. }
                | Self::InvalidPrice { .. }
        )
    }
}
