use std::collections::{BTreeMap, VecDeque};
use std::fmt::Display;

use tracing::{debug, trace, warn};

use crate::{
    board::Board,
    common::{Price, Quantity},
    error::BoardError,
    event::{Event, EventKind},
    order::{Order, OrderSummary, Side},
};

type Levels = BTreeMap<Price, VecDeque<Order>>;

/// Number of journal entries kept before the oldest are dropped
pub const DEFAULT_JOURNAL_CAPACITY: usize = 1024;

/// Order board where each side is an ordered mapping (using B-trees) keyed
/// on price. Both maps are stored ascending; the BUY side is walked in
/// reverse when it is summarised.
///
/// A price key is present only while at least one order rests there.
#[derive(Clone, Debug)]
pub struct BTreeBoard {
    /// Most recent mutations of this board, oldest first
    events: VecDeque<Event>,
    /// Upper bound on `events`; zero disables the journal
    journal_capacity: usize,
    /// SELL side of the board
    sells: Levels,
    /// BUY side of the board
    buys: Levels,
    /// Number of live orders on both sides
    len: usize,
}

impl Default for BTreeBoard {
    fn default() -> Self {
        Self::with_journal_capacity(DEFAULT_JOURNAL_CAPACITY)
    }
}

/// Boards are equal when they hold the same live orders; the journal is
/// not compared.
impl PartialEq for BTreeBoard {
    fn eq(&self, other: &Self) -> bool {
        self.sells == other.sells
            && self.buys == other.buys
            && self.len == other.len
    }
}

impl Eq for BTreeBoard {}

impl Display for BTreeBoard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let col_width = 17;

        writeln!(f, "{:>w$} | {:<w$}", "BUY", "SELL", w = col_width)?;

        for level in self.side_summary(Side::Sell).iter().rev() {
            writeln!(
                f,
                "{} | {:<8} {:<8.2}",
                " ".repeat(col_width),
                level.price,
                level.quantity
            )?;
        }

        for level in self.side_summary(Side::Buy) {
            writeln!(f, "{:>8} {:>8.2} |", level.price, level.quantity)?;
        }

        Ok(())
    }
}

impl BTreeBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_journal_capacity(journal_capacity: usize) -> Self {
        Self {
            events: VecDeque::new(),
            journal_capacity,
            sells: BTreeMap::new(),
            buys: BTreeMap::new(),
            len: 0,
        }
    }

    /// Most recent mutations applied to this board, oldest first
    pub fn events(&self) -> &VecDeque<Event> {
        &self.events
    }

    /// Drains the journal, leaving it empty
    pub fn take_events(&mut self) -> Vec<Event> {
        self.events.drain(..).collect()
    }

    fn record(&mut self, kind: EventKind) {
        if self.journal_capacity == 0 {
            return;
        }

        if self.events.len() == self.journal_capacity {
            self.events.pop_front();
        }
        self.events.push_back(Event::new(kind));
    }

    /// Kahan summation in the order the quantities were registered. The
    /// plain sum is returned if an overflow leaves the compensated total
    /// as NaN.
    fn level_quantity(orders: &VecDeque<Order>) -> Quantity {
        let mut sum: Quantity = 0.0;
        let mut compensation: Quantity = 0.0;
        let mut simple: Quantity = 0.0;

        for quantity in orders.iter().map(|x| x.quantity()) {
            simple += quantity;
            let y = quantity - compensation;
            let t = sum + y;
            compensation = (t - sum) - y;
            sum = t;
        }

        let total = sum - compensation;
        if total.is_nan() && simple.is_infinite() {
            simple
        } else {
            total
        }
    }

    fn side(&self, side: Side) -> &Levels {
        match side {
            Side::Sell => &self.sells,
            Side::Buy => &self.buys,
        }
    }

    fn side_mut(&mut self, side: Side) -> &mut Levels {
        match side {
            Side::Sell => &mut self.sells,
            Side::Buy => &mut self.buys,
        }
    }

    /// Price levels of one side in display order
    fn levels(
        &self,
        side: Side,
    ) -> Box<dyn Iterator<Item = (&Price, &VecDeque<Order>)> + '_> {
        match side {
            Side::Sell => Box::new(self.sells.iter()),
            Side::Buy => Box::new(self.buys.iter().rev()),
        }
    }

    /// Insert an order at the back of its price level
    fn add_order(&mut self, order: Order) {
        self.side_mut(order.side())
            .entry(order.price())
            .or_default()
            .push_back(order.clone());
        self.len += 1;
        self.record(EventKind::Register(order));
    }

    fn remove_order_from_side(
        btree: &mut Levels,
        order: &Order,
    ) -> Option<Order> {
        let orders = btree.get_mut(&order.price())?;
        let removed = orders
            .iter()
            .position(|x| x == order)
            .and_then(|pos| orders.remove(pos));

        // Empty levels must not show up in summaries
        if orders.is_empty() {
            btree.remove(&order.price());
            trace!(price = order.price(), "pruned empty price level");
        }

        removed
    }
}

impl Board for BTreeBoard {
    type Error = BoardError;

    fn register(
        &mut self,
        side: Side,
        user_id: &str,
        quantity: Quantity,
        price: Price,
    ) -> Result<Order, Self::Error> {
        let order =
            Order::new(side, user_id, quantity, price).inspect_err(|e| {
                warn!(%side, user_id, quantity, price, "rejected order: {e}")
            })?;

        debug!(%order, "registering order");
        self.add_order(order.clone());
        Ok(order)
    }

    fn cancel(&mut self, order: &Order) -> Result<bool, Self::Error> {
        order
            .validate()
            .inspect_err(|e| warn!(%order, "rejected cancellation: {e}"))?;

        match Self::remove_order_from_side(self.side_mut(order.side()), order)
        {
            Some(removed) => {
                debug!(order = %removed, "cancelled order");
                self.len -= 1;
                self.record(EventKind::Cancel(removed));
                Ok(true)
            }
            None => {
                debug!(%order, "no live order to cancel");
                Ok(false)
            }
        }
    }

    fn side_summary(&self, side: Side) -> Vec<OrderSummary> {
        self.levels(side)
            .map(|(price, xs)| {
                OrderSummary::new(Self::level_quantity(xs), *price)
            })
            .collect()
    }

    fn orders(&self, side: Side, price: Price) -> Vec<Order> {
        self.side(side)
            .get(&price)
            .map(|xs| xs.iter().cloned().collect())
            .unwrap_or_default()
    }

    fn len(&self) -> usize {
        self.len
    }

    fn top(&self) -> (Option<Price>, Option<Price>) {
        (
            self.sells.first_key_value().map(|(price, _)| *price),
            self.buys.last_key_value().map(|(price, _)| *price),
        )
    }
}
