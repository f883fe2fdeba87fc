//! Command-line interface.
//!
//! Every subcommand starts the order store, performs one flow and shuts the store down.
//! `session` keeps it running for an interactive editing session instead.

use crate::config::{Config, ConfigError};
use crate::deletion::{self, FlowMessage, Level};
use crate::editor::{DraftField, OrderEditor};
use crate::framework::StoreClient;
use crate::lifecycle::{PurchaseSystem, SystemError};
use crate::model::LineItem;
use crate::order_store::OrderStoreError;
use crate::report::{self, NO_ORDERS_MESSAGE};
use crate::session::{self, Session};
use crate::submission::{self, SubmissionHandler, SubmitError};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use rustyline::error::ReadlineError;
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;
use tracing::info;

/// Exit status when the command ran but its input was rejected or matched nothing.
const EXIT_REJECTED: u8 = 2;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    System(#[from] SystemError),

    #[error(transparent)]
    Store(#[from] OrderStoreError),

    #[error("Failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Terminal error: {0}")]
    Readline(#[from] ReadlineError),
}

#[derive(Debug, Parser)]
#[command(name = "purchase-orders")]
#[command(version, about = "Enter, browse and delete purchase orders")]
pub struct Cli {
    /// YAML configuration file
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// JSON file holding the orders (overrides store.path)
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Submit a new purchase order
    Submit {
        #[arg(long)]
        supplier: String,
        /// Order date, defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Line item as PRODUCT:QUANTITY:PRICE, repeatable
        #[arg(long = "item", value_parser = parse_item)]
        items: Vec<LineItem>,
    },
    /// List stored orders
    List {
        #[arg(long, value_enum, default_value_t = View::Table)]
        view: View,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Delete every stored order
    DeleteAll {
        /// Confirm the deletion
        #[arg(long, default_value_t = false)]
        yes: bool,
    },
    /// Remove a product from every order of a supplier
    DeleteItem {
        #[arg(long)]
        supplier: String,
        #[arg(long)]
        product: String,
    },
    /// Delete one order by id or unique id prefix
    DeleteOrder { id: String },
    /// Delete orders by id or unique id prefix
    DeleteOrders { ids: Vec<String> },
    /// Interactive order form
    Session,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum View {
    /// One row per line item
    Table,
    /// Each order with its products spelled out
    Detail,
    /// Distinct supplier/date pairs
    Keys,
    /// One entry per order, with its id
    Orders,
}

/// Parses `PRODUCT:QUANTITY:PRICE`. The product id may itself contain colons.
pub fn parse_item(raw: &str) -> Result<LineItem, String> {
    let mut parts = raw.rsplitn(3, ':');
    let (Some(price), Some(quantity), Some(product_id)) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(format!("expected PRODUCT:QUANTITY:PRICE, got '{raw}'"));
    };

    if product_id.trim().is_empty() {
        return Err("product id is empty".to_string());
    }
    let quantity: u32 = quantity
        .trim()
        .parse()
        .map_err(|_| format!("invalid quantity '{quantity}'"))?;
    if quantity == 0 {
        return Err("quantity must be at least 1".to_string());
    }
    let unit_price: f64 = price
        .trim()
        .parse()
        .map_err(|_| format!("invalid price '{price}'"))?;
    if !unit_price.is_finite() || unit_price < 0.0 {
        return Err(format!("price must be a non-negative number, got '{price}'"));
    }

    Ok(LineItem::new(product_id.trim(), quantity, unit_price))
}

/// Runs one command against the configured store.
pub async fn run(cli: Cli) -> Result<ExitCode, CliError> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(path) = cli.store {
        config = config.with_store_path(path);
    }

    let system = PurchaseSystem::start(&config.store).await?;
    let result = dispatch(cli.command, &system).await;
    system.shutdown().await?;
    result
}

async fn dispatch(command: Commands, system: &PurchaseSystem) -> Result<ExitCode, CliError> {
    let store = &system.order_client;
    match command {
        Commands::Submit {
            supplier,
            date,
            items,
        } => {
            let date = date.unwrap_or_else(|| chrono::Local::now().date_naive());
            let mut editor = OrderEditor::new();
            for (index, item) in items.into_iter().enumerate() {
                editor.add_draft();
                editor.set_field(index, DraftField::ProductId(item.product_id));
                editor.set_field(index, DraftField::Quantity(item.quantity));
                editor.set_field(index, DraftField::UnitPrice(item.unit_price));
            }

            let handler = SubmissionHandler::new(store.clone());
            match handler.submit(&mut editor, &supplier, date).await {
                Ok(id) => {
                    info!(%id, "Submitted from command line");
                    print_messages(&[FlowMessage::success(submission::success_message(
                        supplier.trim(),
                    ))]);
                    println!("{id}");
                    Ok(ExitCode::SUCCESS)
                }
                Err(SubmitError::Store(e)) => Err(e.into()),
                Err(e) => Ok(print_messages(&[FlowMessage::error(e.user_message())])),
            }
        }
        Commands::List { view, json } => {
            let orders = store.find_all().await?;
            if json {
                println!("{}", render_json(&orders, view)?);
            } else if orders.is_empty() {
                println!("{NO_ORDERS_MESSAGE}");
            } else {
                print!("{}", render_text(&orders, view));
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::DeleteAll { yes } => Ok(print_messages(&deletion::delete_all(store, yes).await?)),
        Commands::DeleteItem { supplier, product } => Ok(print_messages(
            &deletion::delete_line_item(store, &supplier, &product).await?,
        )),
        Commands::DeleteOrder { id } => Ok(print_messages(
            &deletion::delete_order_by_id(store, &id).await?,
        )),
        Commands::DeleteOrders { ids } => Ok(print_messages(
            &deletion::delete_orders_by_id(store, &ids).await?,
        )),
        Commands::Session => {
            let today = chrono::Local::now().date_naive();
            session::run_repl(Session::new(store.clone(), today)).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn render_text(orders: &[crate::model::Order], view: View) -> String {
    let lines = |items: Vec<String>| -> String {
        items.iter().map(|line| format!("{line}\n")).collect()
    };
    match view {
        View::Table => report::to_flat_rows(orders)
            .map(|rows| report::render_table(rows))
            .unwrap_or_default(),
        View::Detail => report::to_detail_view(orders)
            .map(|detail| detail.to_string())
            .unwrap_or_default(),
        View::Keys => lines(
            report::unique_order_keys(orders)
                .iter()
                .map(|key| key.label())
                .collect(),
        ),
        View::Orders => lines(
            report::order_choices(orders)
                .into_iter()
                .map(|choice| format!("{}  {}", choice.id, choice.label))
                .collect(),
        ),
    }
}

fn render_json(orders: &[crate::model::Order], view: View) -> Result<String, serde_json::Error> {
    match view {
        View::Table => match report::to_flat_rows(orders) {
            Some(rows) => report::render_json(rows),
            None => Ok("[]".to_string()),
        },
        View::Detail => serde_json::to_string_pretty(orders),
        View::Keys => serde_json::to_string_pretty(&report::unique_order_keys(orders)),
        View::Orders => serde_json::to_string_pretty(&report::order_choices(orders)),
    }
}

fn print_messages(messages: &[FlowMessage]) -> ExitCode {
    for message in messages {
        println!("{message}");
    }
    ExitCode::from(exit_status(messages))
}

/// Rejected if any message is an error.
fn exit_status(messages: &[FlowMessage]) -> u8 {
    if messages.iter().any(|m| m.level == Level::Error) {
        EXIT_REJECTED
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Order, OrderId};

    #[test]
    fn test_parse_item() {
        assert_eq!(parse_item("P1:2:3.5"), Ok(LineItem::new("P1", 2, 3.5)));
        assert_eq!(parse_item("SKU:9:1:0"), Ok(LineItem::new("SKU:9", 1, 0.0)));
    }

    #[test]
    fn test_parse_item_rejects_bad_input() {
        assert!(parse_item("P1:2").is_err());
        assert!(parse_item(":2:1.0").is_err());
        assert!(parse_item("P1:0:1.0").is_err());
        assert!(parse_item("P1:x:1.0").is_err());
        assert!(parse_item("P1:1:-2").is_err());
        assert!(parse_item("P1:1:inf").is_err());
    }

    #[test]
    fn test_cli_parses_submit() {
        let cli = Cli::try_parse_from([
            "purchase-orders",
            "--store",
            "/tmp/po.json",
            "submit",
            "--supplier",
            "Acme",
            "--date",
            "2024-01-01",
            "--item",
            "P1:2:3.5",
            "--item",
            "P2:1:10",
        ])
        .unwrap();

        assert_eq!(cli.store, Some(PathBuf::from("/tmp/po.json")));
        match cli.command {
            Commands::Submit {
                supplier,
                date,
                items,
            } => {
                assert_eq!(supplier, "Acme");
                assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 1));
                assert_eq!(items.len(), 2);
                assert_eq!(items[1], LineItem::new("P2", 1, 10.0));
            }
            other => panic!("Expected Submit, got {:?}", other),
        }
    }

    #[test]
    fn test_cli_list_defaults_to_table() {
        let cli = Cli::try_parse_from(["purchase-orders", "list"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::List {
                view: View::Table,
                json: false
            }
        ));
    }

    #[test]
    fn test_cli_parses_delete_order() {
        let cli = Cli::try_parse_from(["purchase-orders", "delete-order", "1a2b3c"]).unwrap();
        match cli.command {
            Commands::DeleteOrder { id } => assert_eq!(id, "1a2b3c"),
            other => panic!("Expected DeleteOrder, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_table_json_is_empty_array() {
        assert_eq!(render_json(&[], View::Table).unwrap(), "[]");
    }

    #[test]
    fn test_keys_text_one_per_line() {
        let order = |name: &str| Order {
            id: OrderId::new(),
            supplier_name: name.into(),
            order_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            products: vec![],
        };
        let orders = vec![order("Acme"), order("Acme"), order("Bolt")];

        assert_eq!(
            render_text(&orders, View::Keys),
            "Acme - 2024-01-01\nBolt - 2024-01-01\n"
        );
    }

    #[test]
    fn test_error_messages_exit_rejected() {
        let messages = [FlowMessage::success("done"), FlowMessage::error("nope")];
        assert_eq!(exit_status(&messages), EXIT_REJECTED);
        assert_eq!(exit_status(&[FlowMessage::warning("careful")]), 0);
    }
}
