pub mod btree_board;

use std::fmt::Debug;

use crate::{
    common::{Price, Quantity},
    order::{Order, OrderSummary, Side},
};

/// Live order board: accepts orders, cancels them, and aggregates the live
/// set into price levels. Orders are never matched against each other.
///
/// Implementations are plain single-owner data structures. Mutation takes
/// `&mut self`, so sharing a board across threads requires the caller to
/// wrap it (a single `Mutex` around the whole board is sufficient).
pub trait Board: Clone + Debug {
    type Error;

    /// Registers a new order and returns it as the handle for a later
    /// [`Board::cancel`]
    fn register(
        &mut self,
        side: Side,
        user_id: &str,
        quantity: Quantity,
        price: Price,
    ) -> Result<Order, Self::Error>;

    /// Removes the first live order equal to `order`. Returns `Ok(false)`
    /// if no such order is live.
    fn cancel(&mut self, order: &Order) -> Result<bool, Self::Error>;

    /// Price levels of one side: ascending for SELL, descending for BUY
    fn side_summary(&self, side: Side) -> Vec<OrderSummary>;

    /// All SELL levels (ascending) followed by all BUY levels (descending)
    fn summary(&self) -> Vec<OrderSummary> {
        let mut levels = self.side_summary(Side::Sell);
        levels.extend(self.side_summary(Side::Buy));
        levels
    }

    /// Live orders at one price level, in registration order
    fn orders(&self, side: Side, price: Price) -> Vec<Order>;

    /// Number of live orders across both sides
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Lowest SELL price and highest BUY price
    fn top(&self) -> (Option<Price>, Option<Price>);
}
