//! # Interactive Session
//!
//! A line-oriented order form. [`Session`] owns the editor and the header fields and
//! turns each command line into output text; [`run_repl`] feeds it from rustyline.
//!
//! Store failures inside a session are shown as error messages and the session carries
//! on. One-shot CLI commands treat them as fatal instead.

use crate::clients::OrderClient;
use crate::deletion::{self, FlowMessage};
use crate::editor::{DraftField, OrderEditor};
use crate::framework::StoreClient;
use crate::order_store::OrderStoreError;
use crate::report::{self, NO_ORDERS_MESSAGE};
use crate::submission::{self, SubmissionHandler};
use chrono::NaiveDate;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::debug;

pub const HELP: &str = "\
Order form:
  add                              add a blank product row
  remove                           remove the last product row
  set <n> product|qty|price <v>    edit product row n
  supplier <name>                  set the supplier name
  date <YYYY-MM-DD>                set the order date
  show                             show the form
  submit                           store the order
Stored orders:
  list | detail | keys | orders    table, detailed view, order keys, deletable orders
  delete-all [yes]                 delete every order
  delete-item <supplier> <product> remove a product from a supplier's orders
  delete-order <id>                delete one order by id or id prefix
  delete-orders <id>...            delete orders by id or id prefix
  help | quit";

/// Result of one command line.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Continue(String),
    Quit,
}

pub struct Session {
    store: OrderClient,
    submission: SubmissionHandler,
    editor: OrderEditor,
    supplier_name: String,
    order_date: NaiveDate,
}

impl Session {
    pub fn new(store: OrderClient, order_date: NaiveDate) -> Self {
        Self {
            submission: SubmissionHandler::new(store.clone()),
            store,
            editor: OrderEditor::new(),
            supplier_name: String::new(),
            order_date,
        }
    }

    pub fn editor(&self) -> &OrderEditor {
        &self.editor
    }

    pub fn supplier_name(&self) -> &str {
        &self.supplier_name
    }

    pub fn order_date(&self) -> NaiveDate {
        self.order_date
    }

    pub async fn execute(&mut self, line: &str) -> Outcome {
        let line = line.trim();
        let (command, rest) = line
            .split_once(char::is_whitespace)
            .map(|(c, r)| (c, r.trim()))
            .unwrap_or((line, ""));
        debug!(command, "Session command");

        let output = match command {
            "" => String::new(),
            "quit" | "exit" => return Outcome::Quit,
            "help" => HELP.to_string(),
            "add" => {
                self.editor.add_draft();
                self.form()
            }
            "remove" => {
                self.editor.remove_last_draft();
                self.form()
            }
            "set" => self.set(rest),
            "supplier" => {
                self.supplier_name = rest.to_string();
                self.form()
            }
            "date" => match rest.parse::<NaiveDate>() {
                Ok(date) => {
                    self.order_date = date;
                    self.form()
                }
                Err(_) => render(&[FlowMessage::error(format!(
                    "Invalid date '{rest}', expected YYYY-MM-DD"
                ))]),
            },
            "show" => self.form(),
            "submit" => self.submit().await,
            "list" | "detail" | "keys" | "orders" => self.report(command).await,
            "delete-all" => {
                let confirmed = matches!(rest, "yes" | "y");
                self.flow(deletion::delete_all(&self.store, confirmed).await)
            }
            "delete-item" => self.delete_item(rest).await,
            "delete-order" => self.flow(deletion::delete_order_by_id(&self.store, rest).await),
            "delete-orders" => {
                let wanted: Vec<String> = rest.split_whitespace().map(String::from).collect();
                self.flow(deletion::delete_orders_by_id(&self.store, &wanted).await)
            }
            other => format!("Unknown command '{other}', type `help` for a list"),
        };
        Outcome::Continue(output)
    }

    fn form(&self) -> String {
        let supplier = if self.supplier_name.is_empty() {
            "<not set>"
        } else {
            self.supplier_name.as_str()
        };
        format!(
            "Customer ID: {supplier}\nOrder Date: {}\n{}",
            self.order_date,
            self.editor.snapshot()
        )
    }

    fn set(&mut self, args: &str) -> String {
        let mut parts = args.splitn(3, char::is_whitespace);
        let (Some(row), Some(field), Some(value)) = (parts.next(), parts.next(), parts.next())
        else {
            return "Usage: set <n> product|qty|price <value>".to_string();
        };
        let value = value.trim();

        let index = match row.parse::<usize>() {
            Ok(n) if (1..=self.editor.len()).contains(&n) => n - 1,
            _ => {
                return render(&[FlowMessage::error(format!(
                    "No product row {row}, the form has {} rows",
                    self.editor.len()
                ))])
            }
        };

        let field = match field {
            "product" => DraftField::ProductId(value.to_string()),
            "qty" | "quantity" => match value.parse::<u32>() {
                Ok(quantity) => DraftField::Quantity(quantity),
                Err(_) => return render(&[FlowMessage::error(format!("Invalid quantity '{value}'"))]),
            },
            "price" => match value.parse::<f64>() {
                Ok(price) => DraftField::UnitPrice(price),
                Err(_) => return render(&[FlowMessage::error(format!("Invalid price '{value}'"))]),
            },
            other => return format!("Unknown field '{other}', expected product, qty or price"),
        };

        self.editor.set_field(index, field);
        self.form()
    }

    async fn submit(&mut self) -> String {
        let supplier_name = self.supplier_name.clone();
        match self
            .submission
            .submit(&mut self.editor, &supplier_name, self.order_date)
            .await
        {
            Ok(_) => {
                self.supplier_name.clear();
                render(&[FlowMessage::success(submission::success_message(
                    supplier_name.trim(),
                ))])
            }
            Err(e) => render(&[FlowMessage::error(e.user_message())]),
        }
    }

    async fn report(&self, view: &str) -> String {
        let orders = match self.store.find_all().await {
            Ok(orders) => orders,
            Err(e) => return store_failure(e),
        };
        if orders.is_empty() {
            return NO_ORDERS_MESSAGE.to_string();
        }

        match view {
            "detail" => report::to_detail_view(&orders)
                .map(|view| view.to_string())
                .unwrap_or_default(),
            "keys" => report::unique_order_keys(&orders)
                .iter()
                .map(|key| key.label())
                .collect::<Vec<_>>()
                .join("\n"),
            "orders" => report::order_choices(&orders)
                .into_iter()
                .map(|choice| format!("{}  {}", choice.id, choice.label))
                .collect::<Vec<_>>()
                .join("\n"),
            _ => report::to_flat_rows(&orders)
                .map(|rows| report::render_table(rows))
                .unwrap_or_default(),
        }
    }

    async fn delete_item(&self, args: &str) -> String {
        // the product id is the last word; the supplier name may contain spaces
        let (supplier_name, product_id) = args.rsplit_once(char::is_whitespace).unwrap_or(("", args));
        self.flow(deletion::delete_line_item(&self.store, supplier_name, product_id).await)
    }

    fn flow(&self, result: Result<Vec<FlowMessage>, OrderStoreError>) -> String {
        match result {
            Ok(messages) => render(&messages),
            Err(e) => store_failure(e),
        }
    }
}

fn render(messages: &[FlowMessage]) -> String {
    messages
        .iter()
        .map(FlowMessage::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

fn store_failure(e: OrderStoreError) -> String {
    tracing::error!(error = %e, "Store request failed");
    render(&[FlowMessage::error(e.to_string())])
}

/// Runs the interactive loop on the terminal until `quit` or end of input.
pub async fn run_repl(mut session: Session) -> Result<(), ReadlineError> {
    let mut rl = DefaultEditor::new()?;
    println!("{HELP}");

    loop {
        match rl.readline("po> ") {
            Ok(line) => {
                if !line.trim().is_empty() {
                    rl.add_history_entry(line.as_str())?;
                }
                match session.execute(&line).await {
                    Outcome::Continue(output) if output.is_empty() => {}
                    Outcome::Continue(output) => println!("{output}"),
                    Outcome::Quit => break,
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::MockCollection;
    use crate::model::{LineItem, Order, OrderId};
    use crate::order_store;
    use crate::storage::MemoryStorage;
    use std::sync::Arc;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    async fn output(session: &mut Session, line: &str) -> String {
        match session.execute(line).await {
            Outcome::Continue(output) => output,
            Outcome::Quit => panic!("session quit on '{line}'"),
        }
    }

    #[tokio::test]
    async fn test_commands_drive_editor() {
        let mock = MockCollection::<Order>::new();
        let mut session = Session::new(OrderClient::new(mock.client()), day());

        output(&mut session, "add").await;
        output(&mut session, "set 1 product Widget Pro").await;
        output(&mut session, "set 1 qty 3").await;
        let form = output(&mut session, "set 1 price 2.5").await;

        assert_eq!(session.editor().drafts(), &[LineItem::new("Widget Pro", 3, 2.5)]);
        assert!(form.contains("7.50"));

        output(&mut session, "remove").await;
        assert!(session.editor().is_empty());
        mock.verify();
    }

    #[tokio::test]
    async fn test_out_of_range_row_is_rejected() {
        let mock = MockCollection::<Order>::new();
        let mut session = Session::new(OrderClient::new(mock.client()), day());
        output(&mut session, "add").await;

        let text = output(&mut session, "set 2 qty 4").await;
        assert_eq!(text, "[error] No product row 2, the form has 1 rows");

        let text = output(&mut session, "set 0 qty 4").await;
        assert!(text.starts_with("[error] No product row 0"));
        assert_eq!(session.editor().drafts()[0].quantity, 1);
    }

    #[tokio::test]
    async fn test_header_fields() {
        let mock = MockCollection::<Order>::new();
        let mut session = Session::new(OrderClient::new(mock.client()), day());

        output(&mut session, "supplier Acme Corp").await;
        output(&mut session, "date 2024-03-05").await;
        let bad = output(&mut session, "date tomorrow").await;

        assert_eq!(session.supplier_name(), "Acme Corp");
        assert_eq!(session.order_date(), NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        assert!(bad.starts_with("[error] Invalid date"));
    }

    #[tokio::test]
    async fn test_submit_without_products_keeps_form() {
        let mock = MockCollection::<Order>::new();
        let mut session = Session::new(OrderClient::new(mock.client()), day());
        output(&mut session, "supplier Acme").await;

        let text = output(&mut session, "submit").await;

        assert_eq!(
            text,
            "[error] Please fill all the required fields correctly. Add at least one product."
        );
        assert_eq!(session.supplier_name(), "Acme");
        mock.verify();
    }

    #[tokio::test]
    async fn test_submit_names_the_failed_field() {
        let mock = MockCollection::<Order>::new();
        let mut no_supplier = Session::new(OrderClient::new(mock.client()), day());
        output(&mut no_supplier, "add").await;
        let mut no_products = Session::new(OrderClient::new(mock.client()), day());
        output(&mut no_products, "supplier Acme").await;

        let missing_supplier = output(&mut no_supplier, "submit").await;
        let missing_products = output(&mut no_products, "submit").await;

        assert_ne!(missing_supplier, missing_products);
        assert!(missing_supplier.contains("Customer ID is required"));
        assert!(missing_products.contains("Add at least one product"));
        assert_eq!(no_supplier.editor().len(), 1);
        mock.verify();
    }

    #[tokio::test]
    async fn test_full_round_trip_against_store() {
        let (actor, store) = order_store::open(Arc::new(MemoryStorage::<Order>::new()), 8)
            .await
            .unwrap();
        tokio::spawn(actor.run());
        let mut session = Session::new(store.clone(), day());

        assert_eq!(output(&mut session, "list").await, NO_ORDERS_MESSAGE);

        for line in ["supplier Acme", "add", "set 1 product P1", "set 1 qty 2", "set 1 price 3.5"] {
            output(&mut session, line).await;
        }
        let text = output(&mut session, "submit").await;
        assert_eq!(
            text,
            "[success] Purchase order for Customer ID: Acme successfully submitted!"
        );
        assert!(session.editor().is_empty());

        assert_eq!(output(&mut session, "keys").await, "Acme - 2024-01-01");
        assert!(output(&mut session, "detail").await.contains("- Product ID: P1"));

        let stored = store.find_all().await.unwrap();
        let id: OrderId = stored[0].id;
        let listing = output(&mut session, "orders").await;
        assert!(listing.contains(&id.short()));

        let text = output(&mut session, "delete-item Acme P1").await;
        assert!(text.starts_with("[success]"));
        let text = output(&mut session, "delete-item Acme P1").await;
        assert_eq!(text, "[error] No matching product found in the given order.");

        let text = output(&mut session, &format!("delete-orders {}", id.short())).await;
        assert_eq!(text, "[success] Successfully deleted the order for Customer ID: Acme");

        let text = output(&mut session, "delete-all").await;
        assert_eq!(text, "[info] Please confirm before deleting all orders.");
        let text = output(&mut session, "delete-all yes").await;
        assert_eq!(text, "[success] Successfully deleted 0 purchase orders.");
    }

    #[tokio::test]
    async fn test_delete_single_order_then_again() {
        let (actor, store) = order_store::open(Arc::new(MemoryStorage::<Order>::new()), 8)
            .await
            .unwrap();
        tokio::spawn(actor.run());
        let mut session = Session::new(store.clone(), day());
        for line in ["supplier Acme", "add", "set 1 product P1", "submit"] {
            output(&mut session, line).await;
        }
        let id = store.find_all().await.unwrap()[0].id;

        let text = output(&mut session, &format!("delete-order {}", id.short())).await;
        assert_eq!(text, "[success] Successfully deleted the order for Customer ID: Acme");
        assert!(store.find_all().await.unwrap().is_empty());

        let text = output(&mut session, &format!("delete-order {}", id.short())).await;
        assert_eq!(text, format!("[error] No order found with id {}", id.short()));
    }

    #[tokio::test]
    async fn test_quit() {
        let mock = MockCollection::<Order>::new();
        let mut session = Session::new(OrderClient::new(mock.client()), day());
        assert_eq!(session.execute("quit").await, Outcome::Quit);
    }
}
