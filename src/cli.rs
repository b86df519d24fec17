//! Line-oriented JSON driver for a [`Board`].
//!
//! Each input line is one command:
//!
//! ```text
//! {"register": {"side": "Sell", "user_id": "user1", "quantity": 3.5, "price": 306}}
//! {"cancel": {"side": "Sell", "user_id": "user1", "quantity": 3.5, "price": 306}}
//! "summary"
//! "board"
//! exit
//! ```
//!
//! Each command produces exactly one response. Rejected arguments and
//! malformed lines are reported as `{"error": ...}` and do not stop the
//! loop.
use std::fmt::Display;
use std::io::{BufRead, Write};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{
    board::Board,
    common::{Price, Quantity, UserId},
    error::BoardError,
    order::{Order, OrderSummary, Side},
};

/// Line that terminates [`Driver::run`]
pub const EXIT: &str = "exit";

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum SummaryFormat {
    /// JSON array of `{quantity, price}` objects
    #[default]
    Json,
    /// One `<quantity> @ <price>` line per level
    Table,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Registration {
    pub side: Side,
    pub user_id: UserId,
    pub quantity: Quantity,
    pub price: Price,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    Register(Registration),
    Cancel(Order),
    Summary,
    Board,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Response {
    Registered(Order),
    Cancelled(bool),
    Summary(Vec<OrderSummary>),
    Board(String),
    Error(String),
}

#[derive(Clone, Debug)]
pub struct Driver<B: Board> {
    board: B,
    format: SummaryFormat,
}

impl<B> Driver<B>
where
    B: Board<Error = BoardError> + Display,
{
    pub fn new(board: B, format: SummaryFormat) -> Self {
        Self { board, format }
    }

    pub fn board(&self) -> &B {
        &self.board
    }

    pub fn execute(&mut self, command: Command) -> Result<Response, BoardError> {
        Ok(match command {
            Command::Register(Registration {
                side,
                user_id,
                quantity,
                price,
            }) => Response::Registered(
                self.board.register(side, &user_id, quantity, price)?,
            ),
            Command::Cancel(order) => {
                Response::Cancelled(self.board.cancel(&order)?)
            }
            Command::Summary => Response::Summary(self.board.summary()),
            Command::Board => Response::Board(self.board.to_string()),
        })
    }

    pub fn render(&self, response: &Response) -> eyre::Result<String> {
        Ok(match (response, self.format) {
            (Response::Summary(levels), SummaryFormat::Table) => levels
                .iter()
                .map(|level| format!("{} @ {}", level.quantity, level.price))
                .collect::<Vec<String>>()
                .join("\n"),
            (Response::Board(table), _) => table.trim_end().to_string(),
            _ => serde_json::to_string(response)?,
        })
    }

    /// Executes commands from `input` until it is exhausted or an
    /// [`EXIT`] line is read
    pub fn run<R, W>(&mut self, input: R, output: &mut W) -> eyre::Result<()>
    where
        R: BufRead,
        W: Write,
    {
        for line in input.lines() {
            let line = line?;
            let line = line.trim();

            if line == EXIT {
                info!("exit requested");
                break;
            }

            if line.is_empty() {
                continue;
            }

            let response = match serde_json::from_str::<Command>(line) {
                Ok(command) => self
                    .execute(command)
                    .unwrap_or_else(|e| Response::Error(e.to_string())),
                Err(e) => {
                    warn!("malformed command: {e}");
                    Response::Error(format!("malformed command JSON: {e}"))
                }
            };

            writeln!(output, "{}", self.render(&response)?)?;
        }

        output.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::board::btree_board::BTreeBoard;

    use super::*;

    fn run_lines(format: SummaryFormat, lines: &[&str]) -> Vec<String> {
        let input = lines.join("\n");
        let mut output = Vec::new();
        let mut driver = Driver::new(BTreeBoard::new(), format);

        driver.run(input.as_bytes(), &mut output).unwrap();

        String::from_utf8(output)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_execute_register_and_cancel() {
        let mut driver = Driver::new(BTreeBoard::new(), SummaryFormat::Json);
        let registration = Registration {
            side: Side::Sell,
            user_id: "user1".to_string(),
            quantity: 3.5,
            price: 306,
        };

        let order = match driver.execute(Command::Register(registration)) {
            Ok(Response::Registered(order)) => order,
            other => panic!("unexpected response: {other:?}"),
        };

        assert_eq!(
            driver.execute(Command::Cancel(order.clone())),
            Ok(Response::Cancelled(true))
        );
        assert_eq!(
            driver.execute(Command::Cancel(order)),
            Ok(Response::Cancelled(false))
        );
        assert!(driver.board().is_empty());
    }

    #[test]
    fn test_execute_rejects_invalid_registration() {
        let mut driver = Driver::new(BTreeBoard::new(), SummaryFormat::Json);
        let registration = Registration {
            side: Side::Buy,
            user_id: "user1".to_string(),
            quantity: 1.0,
            price: 0,
        };

        assert_eq!(
            driver.execute(Command::Register(registration)),
            Err(BoardError::InvalidPrice { price: 0 })
        );
    }

    #[test]
    fn test_run_json_session() {
        let responses = run_lines(
            SummaryFormat::Json,
            &[
                r#"{"register": {"side": "Sell", "user_id": "user1", "quantity": 3.5, "price": 306}}"#,
                r#"{"register": {"side": "SELL", "user_id": "user4", "quantity": 2.0, "price": 306}}"#,
                r#"{"register": {"side": "Sell", "user_id": "user3", "quantity": 1.5, "price": 307}}"#,
                r#"{"cancel": {"side": "Sell", "user_id": "user3", "quantity": 1.5, "price": 307}}"#,
                r#""summary""#,
                "exit",
                r#""summary""#,
            ],
        );

        assert_eq!(responses.len(), 5);
        assert!(responses[0].starts_with(r#"{"registered":"#));
        assert_eq!(responses[3], r#"{"cancelled":true}"#);
        assert_eq!(responses[4], r#"{"summary":[{"quantity":5.5,"price":306}]}"#);
    }

    #[test]
    fn test_run_table_summary() {
        let responses = run_lines(
            SummaryFormat::Table,
            &[
                r#"{"register": {"side": "Buy", "user_id": "1", "quantity": 1.25, "price": 100}}"#,
                r#"{"register": {"side": "Buy", "user_id": "2", "quantity": 2.0, "price": 110}}"#,
                r#""summary""#,
            ],
        );

        assert_eq!(responses[2..], ["2 @ 110", "1.25 @ 100"]);
    }

    #[test]
    fn test_run_reports_errors_and_continues() {
        let responses = run_lines(
            SummaryFormat::Json,
            &[
                "not json",
                r#"{"register": {"side": "Buy", "user_id": "", "quantity": 1.0, "price": 10}}"#,
                "",
                r#""summary""#,
            ],
        );

        assert_eq!(responses.len(), 3);
        assert!(responses[0].starts_with(r#"{"error":"malformed command JSON"#));
        assert_eq!(responses[1], r#"{"error":"user id must not be empty"}"#);
        assert_eq!(responses[2], r#"{"summary":[]}"#);
    }

    #[test]
    fn test_run_board_renders_ladder() {
        let responses = run_lines(
            SummaryFormat::Json,
            &[
                r#"{"register": {"side": "Sell", "user_id": "1", "quantity": 1.0, "price": 120}}"#,
                r#""board""#,
            ],
        );

        assert_eq!(responses.len(), 3);
        assert!(responses[1].contains("BUY"));
        assert!(responses[2].contains("120"));
    }
}
