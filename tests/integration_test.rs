use chrono::NaiveDate;
use purchase_orders::config::{StoreBackend, StoreConfig};
use purchase_orders::deletion::{self, FlowMessage, Level};
use purchase_orders::editor::{DraftField, OrderEditor};
use purchase_orders::framework::StoreClient;
use purchase_orders::lifecycle::PurchaseSystem;
use purchase_orders::model::{LineItem, NewOrder, OrderSelector};
use purchase_orders::report;
use purchase_orders::submission::SubmissionHandler;
use tempfile::TempDir;

fn new_year() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

fn memory_config() -> StoreConfig {
    StoreConfig {
        backend: StoreBackend::Memory,
        ..StoreConfig::default()
    }
}

fn acme_order(products: Vec<LineItem>) -> NewOrder {
    NewOrder {
        supplier_name: "Acme".into(),
        order_date: new_year(),
        products,
    }
}

/// Full end-to-end flow: fill the editor, submit, browse the result.
#[tokio::test]
async fn test_submit_then_browse() {
    let system = PurchaseSystem::start(&memory_config())
        .await
        .expect("Failed to start system");

    let mut editor = OrderEditor::new();
    editor.add_draft();
    editor.set_field(0, DraftField::ProductId("P1".into()));
    editor.set_field(0, DraftField::Quantity(2));
    editor.set_field(0, DraftField::UnitPrice(3.50));

    let handler = SubmissionHandler::new(system.order_client.clone());
    let id = handler
        .submit(&mut editor, "Acme", new_year())
        .await
        .expect("Failed to submit order");
    assert!(editor.is_empty(), "Editor should be cleared after submit");

    let orders = system.order_client.find_all().await.expect("Failed to list");
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].id, id);

    let rows = report::render_json(report::to_flat_rows(&orders).expect("No rows")).unwrap();
    let rows: serde_json::Value = serde_json::from_str(&rows).unwrap();
    assert_eq!(
        rows,
        serde_json::json!([{
            "Customer ID": "Acme",
            "Order Date": "2024-01-01",
            "Product ID": "P1",
            "Quantity": 2,
            "Price per Unit": 3.5
        }])
    );

    drop(handler);
    system.shutdown().await.expect("Failed to shutdown");
}

#[tokio::test]
async fn test_delete_all_empties_store() {
    let system = PurchaseSystem::start(&memory_config()).await.unwrap();
    let store = &system.order_client;

    for _ in 0..3 {
        store.insert(acme_order(vec![LineItem::new("P1", 1, 1.0)])).await.unwrap();
    }

    let messages = deletion::delete_all(store, true).await.unwrap();
    assert_eq!(
        messages,
        vec![FlowMessage::success("Successfully deleted 3 purchase orders.")]
    );
    assert!(store.find_all().await.unwrap().is_empty());

    // Deleting an empty store is still a success, with a zero count
    assert_eq!(store.delete_all().await.unwrap(), 0);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_remove_line_item_then_again() {
    let system = PurchaseSystem::start(&memory_config()).await.unwrap();
    let store = &system.order_client;

    store
        .insert(acme_order(vec![
            LineItem::new("P1", 2, 3.5),
            LineItem::new("P2", 1, 9.0),
        ]))
        .await
        .unwrap();

    let modified = store
        .remove_line_item(OrderSelector::supplier("Acme"), "P1")
        .await
        .unwrap();
    assert_eq!(modified, 1);

    let orders = store.find_all().await.unwrap();
    assert_eq!(orders[0].products, vec![LineItem::new("P2", 1, 9.0)]);

    let modified = store
        .remove_line_item(OrderSelector::supplier("Acme"), "P1")
        .await
        .unwrap();
    assert_eq!(modified, 0);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_delete_by_duplicate_supplier_removes_exactly_one() {
    let system = PurchaseSystem::start(&memory_config()).await.unwrap();
    let store = &system.order_client;

    store.insert(acme_order(vec![LineItem::new("P1", 1, 1.0)])).await.unwrap();
    store.insert(acme_order(vec![LineItem::new("P2", 1, 1.0)])).await.unwrap();
    let before = store.find_all().await.unwrap().len();

    let deleted = store
        .delete_order(OrderSelector::supplier("Acme"))
        .await
        .unwrap();

    assert_eq!(deleted, 1);
    assert_eq!(store.find_all().await.unwrap().len(), before - 1);

    system.shutdown().await.unwrap();
}

/// Supplier-targeted line-item removal applies to every order of that supplier.
#[tokio::test]
async fn test_line_item_flow_cascades_across_supplier_orders() {
    let system = PurchaseSystem::start(&memory_config()).await.unwrap();
    let store = &system.order_client;

    store.insert(acme_order(vec![LineItem::new("P1", 1, 1.0)])).await.unwrap();
    store
        .insert(acme_order(vec![
            LineItem::new("P1", 4, 2.0),
            LineItem::new("P3", 1, 1.0),
        ]))
        .await
        .unwrap();

    let messages = deletion::delete_line_item(store, "Acme", "P1").await.unwrap();
    assert_eq!(messages[0].level, Level::Success);

    let orders = store.find_all().await.unwrap();
    assert!(orders[0].products.is_empty());
    assert_eq!(orders[1].products, vec![LineItem::new("P3", 1, 1.0)]);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_selected_orders_deleted_by_id() {
    let system = PurchaseSystem::start(&memory_config()).await.unwrap();
    let store = &system.order_client;

    store.insert(acme_order(vec![])).await.unwrap();
    store.insert(acme_order(vec![])).await.unwrap();
    let keep = store
        .insert(NewOrder {
            supplier_name: "Bolt".into(),
            order_date: new_year(),
            products: vec![],
        })
        .await
        .unwrap();

    let orders = store.find_all().await.unwrap();
    let choices = report::order_choices(&orders);
    let acme: Vec<_> = choices
        .into_iter()
        .filter(|choice| choice.supplier_name == "Acme")
        .collect();

    let messages = deletion::delete_selected_orders(store, &acme).await.unwrap();
    assert_eq!(messages.len(), 2);
    assert!(messages.iter().all(|m| m.level == Level::Success));

    let remaining = store.find_all().await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, keep);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_orders_survive_restart() {
    let dir = TempDir::new().unwrap();
    let config = StoreConfig {
        path: dir.path().join("orders.json"),
        ..StoreConfig::default()
    };

    let system = PurchaseSystem::start(&config).await.unwrap();
    system
        .order_client
        .insert(acme_order(vec![LineItem::new("P1", 2, 3.5)]))
        .await
        .unwrap();
    system
        .order_client
        .insert(NewOrder {
            supplier_name: "Bolt".into(),
            order_date: new_year(),
            products: vec![LineItem::new("P7", 1, 0.5)],
        })
        .await
        .unwrap();
    system
        .order_client
        .remove_line_item(OrderSelector::supplier("Bolt"), "P7")
        .await
        .unwrap();
    let before = system.order_client.find_all().await.unwrap();
    system.shutdown().await.unwrap();

    let system = PurchaseSystem::start(&config).await.unwrap();
    let after = system.order_client.find_all().await.unwrap();
    assert_eq!(after, before);
    assert!(after[1].products.is_empty());

    let raw = std::fs::read_to_string(dir.path().join("orders.json")).unwrap();
    let raw: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(raw[0]["supplier_name"], "Acme");
    assert_eq!(raw[0]["order_date"], "2024-01-01");

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_single_order_delete_then_not_found() {
    let system = PurchaseSystem::start(&memory_config()).await.unwrap();
    let store = &system.order_client;

    let id = store.insert(acme_order(vec![LineItem::new("P1", 1, 1.0)])).await.unwrap();
    let orders = store.find_all().await.unwrap();
    let choice = report::order_choices(&orders).remove(0);
    assert_eq!(choice.id, id);

    let messages = deletion::delete_selected_order(store, &choice).await.unwrap();
    assert_eq!(
        messages,
        vec![FlowMessage::success("Successfully deleted the order for Customer ID: Acme")]
    );

    // The choice is stale now that its order is gone
    let messages = deletion::delete_selected_order(store, &choice).await.unwrap();
    assert_eq!(
        messages,
        vec![FlowMessage::error("No order found for Customer ID: Acme")]
    );

    let messages = deletion::delete_order_by_id(store, &id.to_string()).await.unwrap();
    assert_eq!(messages[0].level, Level::Error);

    system.shutdown().await.unwrap();
}
