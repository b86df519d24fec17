//! In-memory live order board.
//!
//! Orders are registered per side and price, cancelled by value, and
//! summarised into price levels: SELL levels ascending, then BUY levels
//! descending. Nothing is ever matched.
pub mod board;
pub mod cli;
pub mod common;
pub mod error;
pub mod event;
pub mod order;
