//! # Console
//!
//! The menu-driven text front end. It owns the interactive control flow: it is the
//! single producer feeding the pipeline, so it is also the only caller of intake.
//!
//! Input parsing lives here too. The pipeline only ever sees a non-empty item name
//! and a positive quantity.

use crate::intake::IntakeError;
use crate::lifecycle::{OrderError, OrderSystem, ShutdownReport};
use crate::menu_store::MenuError;
use crate::model::MenuItem;
use crate::worker::{DetailRecord, Receipt};
use std::io::Write;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tokio::sync::mpsc;
use tracing::{error, warn};

#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("Console I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Order(#[from] OrderError),
}

/// Top-level menu choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    ShowMenu,
    PlaceOrder,
    ShowTotal,
    Exit,
}

impl MenuOption {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuOption::ShowMenu),
            "2" => Some(MenuOption::PlaceOrder),
            "3" => Some(MenuOption::ShowTotal),
            "4" => Some(MenuOption::Exit),
            _ => None,
        }
    }
}

/// Accepts one or more ASCII digits forming a positive number that fits in `u32`.
pub fn parse_quantity(input: &str) -> Result<u32, IntakeError> {
    let input = input.trim();
    let invalid = || IntakeError::InvalidQuantity(input.to_string());

    if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    match input.parse::<u32>() {
        Ok(quantity) if quantity > 0 => Ok(quantity),
        _ => Err(invalid()),
    }
}

pub fn render_menu(items: &[MenuItem]) -> String {
    if items.is_empty() {
        return "Menu is empty.\n".to_string();
    }
    let mut out = String::from("\n===== Menu =====\n");
    for item in items {
        out.push_str(&format!(
            "Name: {} | Price: {:.2} | Stock: {}\n",
            item.name, item.unit_price, item.stock
        ));
    }
    out
}

fn describe(error: &OrderError) -> String {
    match error {
        OrderError::Intake(IntakeError::InvalidQuantity(_)) => {
            "Quantity must be a positive number.".to_string()
        }
        OrderError::Intake(IntakeError::Menu(MenuError::ItemNotFound(_))) => {
            "Item not found.".to_string()
        }
        OrderError::Intake(IntakeError::Menu(MenuError::InsufficientStock { available, .. })) => {
            format!("Quantity exceeds available stock ({} left).", available)
        }
        other => format!("Order could not be placed: {}", other),
    }
}

/// Interactive loop over a line-oriented input and a text output.
pub struct Console<R, W> {
    lines: Lines<R>,
    out: W,
}

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(input: R, out: W) -> Self {
        Self {
            lines: input.lines(),
            out,
        }
    }

    /// Runs until the user exits (or input ends), then drains the system.
    ///
    /// The drain happens even when the session breaks on an I/O error; that error
    /// is returned only after every accepted order has finished.
    pub async fn run(mut self, mut system: OrderSystem) -> Result<ShutdownReport, ConsoleError> {
        let session = self.session(&mut system).await;
        if let Err(e) = &session {
            error!(error = %e, "Console session aborted");
        }

        let pending = system.outstanding();
        let announced = if pending > 0 && session.is_ok() {
            writeln!(self.out, "Waiting for {} pending order(s)...", pending).and_then(|_| self.out.flush())
        } else {
            Ok(())
        };

        let report = system.shutdown().await?;
        session?;
        announced?;

        writeln!(self.out, "All orders processed. Total of all orders: {:.2}", report.total)?;
        self.out.flush()?;
        Ok(report)
    }

    async fn session(&mut self, system: &mut OrderSystem) -> Result<(), ConsoleError> {
        loop {
            writeln!(self.out, "\n===== Restaurant Order Management =====")?;
            writeln!(self.out, "1. Show Menu")?;
            writeln!(self.out, "2. Place Order")?;
            writeln!(self.out, "3. Show Total of All Orders")?;
            writeln!(self.out, "4. Exit")?;

            let Some(choice) = self.prompt("Choose an option: ").await? else {
                break;
            };
            match MenuOption::parse(&choice) {
                Some(MenuOption::ShowMenu) => {
                    let items = system.menu().await;
                    write!(self.out, "{}", render_menu(&items))?;
                }
                Some(MenuOption::PlaceOrder) => {
                    if !self.place_order(system).await? {
                        break;
                    }
                }
                Some(MenuOption::ShowTotal) => {
                    writeln!(self.out, "Total of all orders: {:.2}", system.total().await)?;
                }
                Some(MenuOption::Exit) => break,
                None => writeln!(self.out, "Invalid option. Please try again.")?,
            }
        }
        Ok(())
    }

    /// Returns `false` when input ended mid-dialogue.
    async fn place_order(&mut self, system: &mut OrderSystem) -> Result<bool, ConsoleError> {
        let Some(name) = self.prompt("Enter item name: ").await? else {
            return Ok(false);
        };
        if let Err(e) = system.find_item(&name).await {
            warn!(error = %e, "Unknown item requested");
            writeln!(self.out, "Item not found.")?;
            return Ok(true);
        }

        let Some(raw_quantity) = self.prompt("Enter quantity: ").await? else {
            return Ok(false);
        };
        let quantity = match parse_quantity(&raw_quantity) {
            Ok(quantity) => quantity,
            Err(e) => {
                writeln!(self.out, "{}", describe(&OrderError::from(e)))?;
                return Ok(true);
            }
        };

        match system.place_order(&name, quantity).await {
            Ok(ticket) => writeln!(
                self.out,
                "Order {} accepted: {} x{} = {:.2}",
                ticket.id, ticket.item_name, ticket.quantity, ticket.total_price
            )?,
            Err(e @ OrderError::Pipeline(_)) => {
                error!(error = %e, "Submission failed");
                writeln!(self.out, "{}", describe(&e))?;
            }
            Err(e) => writeln!(self.out, "{}", describe(&e))?,
        }
        Ok(true)
    }

    async fn prompt(&mut self, text: &str) -> Result<Option<String>, ConsoleError> {
        write!(self.out, "{}", text)?;
        self.out.flush()?;
        Ok(self.lines.next_line().await?.map(|line| line.trim().to_string()))
    }
}

/// Prints each receipt as workers finish, until every worker is gone.
pub async fn announce_receipts(mut receipts: mpsc::UnboundedReceiver<Receipt>, mut out: impl Write) {
    while let Some(receipt) = receipts.recv().await {
        let detail = match DetailRecord::decode(&receipt.encoded_detail) {
            Ok(record) => format!(" ({})", record),
            Err(e) => {
                warn!(order_id = %receipt.order_id, error = %e, "Undecodable order detail");
                String::new()
            }
        };
        let written = writeln!(
            out,
            "\nOrder {}: {} x{} processed.{}\nEncoded order detail: {}",
            receipt.order_id, receipt.item_name, receipt.quantity, detail, receipt.encoded_detail
        )
        .and_then(|_| out.flush());
        if let Err(e) = written {
            warn!(error = %e, "Could not print receipt");
        }
    }
}
