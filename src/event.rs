use chrono::{DateTime, Utc};

use crate::order::Order;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum EventKind {
    Register(Order),
    Cancel(Order),
}

/// Journal entry describing one mutation of a board
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Event {
    pub timestamp: DateTime<Utc>,
    pub kind: EventKind,
}

impl Event {
    pub fn new(kind: EventKind) -> Self {
        Self {
            timestamp: Utc::now(),
            kind,
        }
    }

    pub fn order(&self) -> &Order {
        match &self.kind {
            EventKind::Register(order) | EventKind::Cancel(order) => order,
        }
    }
}
