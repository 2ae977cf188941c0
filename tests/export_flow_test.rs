//! Integration tests for the export and unset flows
//!
//! These tests drive the engines and the coordinator against the in-memory
//! store and check what ends up in the CSV and in order metadata.

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use order_exporter::adapters::memory::InMemoryOrderStore;
use order_exporter::adapters::store::{OrderQuery, OrderStore};
use order_exporter::config::secret_string;
use order_exporter::core::access::{AccessGuard, AccessRequest, MANAGE_STORE};
use order_exporter::core::coordinator::ActionCoordinator;
use order_exporter::core::export::{ExportOutcome, OrderExportEngine};
use order_exporter::core::reset::FlagResetEngine;
use order_exporter::core::settings::{ExportSettings, CUSTOM_FIELDS_OPTION, EXPORTED_FLAG_OPTION};
use order_exporter::domain::{
    ExporterError, Order, OrderId, OrderStatus, Result, StoreError,
};
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use test_case::test_case;

const MARKER: &str = "_exported";
const TOKEN: &str = "f00dcafe";

fn order(id: u64, status: OrderStatus, meta: &[(&str, &str)]) -> Order {
    let mut builder = Order::builder()
        .id(id.to_string())
        .unwrap()
        .status(status)
        .date_created(Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap())
        .billing_email(format!("customer{id}@example.com"))
        .total(Decimal::from_str("49.90").unwrap());
    for (k, v) in meta {
        builder = builder.meta(*k, *v);
    }
    builder.build().unwrap()
}

async fn store_with(orders: Vec<Order>) -> Arc<InMemoryOrderStore> {
    let store = Arc::new(InMemoryOrderStore::new());
    for o in orders {
        store.insert_order(o).await;
    }
    store
}

fn settings(custom: &[&str]) -> ExportSettings {
    ExportSettings::new(custom.iter().map(|c| c.to_string()).collect(), MARKER)
}

fn csv_lines(outcome: &ExportOutcome) -> Vec<String> {
    String::from_utf8(outcome.payload.body().to_vec())
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

fn exported_ids(outcome: &ExportOutcome) -> Vec<String> {
    outcome
        .summary
        .exported_orders
        .iter()
        .map(|id| id.to_string())
        .collect()
}

async fn marked(store: &InMemoryOrderStore, id: u64) -> bool {
    store
        .order(&OrderId::from(id))
        .await
        .unwrap()
        .has_meta(MARKER)
}

#[tokio::test]
async fn test_scenario_two_unmarked_one_marked() {
    let store = store_with(vec![
        order(1, OrderStatus::Completed, &[]),
        order(2, OrderStatus::Completed, &[]),
        order(3, OrderStatus::Completed, &[(MARKER, "1")]),
    ])
    .await;

    let outcome = OrderExportEngine::new(store.clone(), settings(&[]))
        .export()
        .await
        .unwrap();

    assert_eq!(exported_ids(&outcome), vec!["1", "2"]);
    assert_eq!(csv_lines(&outcome).len(), 3);
    for id in [1, 2, 3] {
        assert!(marked(&store, id).await, "order {id} should be marked");
    }
    let o3 = store.order(&OrderId::from(3u64)).await.unwrap();
    assert_eq!(o3.meta(MARKER), Some("1"));

    let reset = FlagResetEngine::new(store.clone(), settings(&[]))
        .unset()
        .await
        .unwrap();

    assert_eq!(reset.cleared_count(), 3);
    for id in [1, 2, 3] {
        assert!(!marked(&store, id).await, "order {id} should be cleared");
    }
}

#[tokio::test]
async fn test_export_unset_export_round_trip() {
    let store = store_with(vec![
        order(1, OrderStatus::Completed, &[]),
        order(2, OrderStatus::Completed, &[]),
    ])
    .await;
    let export = OrderExportEngine::new(store.clone(), settings(&[]));
    let reset = FlagResetEngine::new(store.clone(), settings(&[]));

    let first = export.export().await.unwrap();
    reset.unset().await.unwrap();
    store.insert_order(order(3, OrderStatus::Completed, &[])).await;
    let second = export.export().await.unwrap();

    assert_eq!(exported_ids(&first), vec!["1", "2"]);
    assert_eq!(exported_ids(&second), vec!["1", "2", "3"]);
}

#[tokio::test]
async fn test_every_unmarked_completed_order_exported_once() {
    let store = store_with(vec![
        order(1, OrderStatus::Completed, &[]),
        order(2, OrderStatus::Completed, &[(MARKER, "")]),
        order(3, OrderStatus::Completed, &[(MARKER, "0")]),
        order(4, OrderStatus::Completed, &[]),
    ])
    .await;
    let engine = OrderExportEngine::new(store.clone(), settings(&[]));

    let first = engine.export().await.unwrap();
    let second = engine.export().await.unwrap();

    // Presence of the key is what counts, not its value
    assert_eq!(exported_ids(&first), vec!["1", "4"]);
    assert!(exported_ids(&second).is_empty());

    let still_unmarked = store
        .query_orders(&OrderQuery::completed_without(MARKER))
        .await
        .unwrap();
    assert!(still_unmarked.is_empty());
}

#[tokio::test]
async fn test_unset_twice_is_noop() {
    let store = store_with(vec![
        order(1, OrderStatus::Completed, &[(MARKER, "1")]),
        order(2, OrderStatus::Completed, &[]),
    ])
    .await;
    let reset = FlagResetEngine::new(store.clone(), settings(&[]));

    let first = reset.unset().await.unwrap();
    let snapshot = store.all_orders().await;
    let second = reset.unset().await.unwrap();

    assert_eq!(first.cleared_count(), 1);
    assert_eq!(second.cleared_count(), 0);
    assert_eq!(store.all_orders().await, snapshot);
}

#[tokio::test]
async fn test_custom_field_projection() {
    let store = store_with(vec![order(1, OrderStatus::Completed, &[("sku", "ABC123")])]).await;

    let outcome = OrderExportEngine::new(store, settings(&["sku", "region"]))
        .export()
        .await
        .unwrap();

    assert_eq!(
        csv_lines(&outcome),
        vec![
            "order_id,order_date,billing_email,order_total,sku,region",
            "1,2024-03-09 14:05:07,customer1@example.com,49.90,ABC123,",
        ]
    );
}

#[test_case(OrderStatus::Pending)]
#[test_case(OrderStatus::Processing)]
#[test_case(OrderStatus::OnHold)]
#[test_case(OrderStatus::Cancelled)]
#[test_case(OrderStatus::Refunded)]
#[test_case(OrderStatus::Failed)]
#[tokio::test]
async fn test_non_completed_orders_never_selected(status: OrderStatus) {
    let store = store_with(vec![
        order(1, status, &[]),
        order(2, status, &[(MARKER, "1")]),
    ])
    .await;

    let outcome = OrderExportEngine::new(store.clone(), settings(&[]))
        .export()
        .await
        .unwrap();
    let reset = FlagResetEngine::new(store.clone(), settings(&[]))
        .unset()
        .await
        .unwrap();

    assert!(outcome.summary.is_empty());
    assert_eq!(reset.cleared_count(), 0);
    assert!(!marked(&store, 1).await);
    assert!(marked(&store, 2).await);
}

#[tokio::test]
async fn test_empty_marker_name_round_trip() {
    let store = store_with(vec![
        order(1, OrderStatus::Completed, &[]),
        order(2, OrderStatus::Completed, &[(MARKER, "1")]),
    ])
    .await;
    let empty = ExportSettings::new(Vec::new(), "");

    let outcome = OrderExportEngine::new(store.clone(), empty.clone())
        .export()
        .await
        .unwrap();

    // Both orders lack the "" key, so both are exported
    assert_eq!(exported_ids(&outcome), vec!["1", "2"]);
    let o1 = store.order(&OrderId::from(1u64)).await.unwrap();
    assert_eq!(o1.meta(""), Some("1"));

    let reset = FlagResetEngine::new(store.clone(), empty)
        .unset()
        .await
        .unwrap();
    assert_eq!(reset.cleared_count(), 2);
    // The configured "_exported" marker on order 2 is left alone
    assert!(marked(&store, 2).await);
}

#[tokio::test]
async fn test_settings_loaded_from_store_options() {
    let store = store_with(vec![order(1, OrderStatus::Completed, &[("region", "EU")])]).await;
    store.set_option(CUSTOM_FIELDS_OPTION, " region ,").await;
    store.set_option(EXPORTED_FLAG_OPTION, MARKER).await;

    let coordinator = ActionCoordinator::new(
        store.clone(),
        store.clone(),
        AccessGuard::new(secret_string(TOKEN.to_string())),
        "wc_order_export",
    );
    let request = AccessRequest::new(
        Some(secret_string(TOKEN.to_string())),
        vec![MANAGE_STORE.to_string()],
    );
    let now = Utc.with_ymd_and_hms(2024, 4, 1, 8, 30, 0).unwrap();

    let outcome = coordinator.export_orders_at(&request, now).await.unwrap();

    assert_eq!(
        outcome.payload.file_name(),
        "wc_order_export_2024-04-01_08-30-00.csv"
    );
    assert_eq!(
        csv_lines(&outcome)[0],
        "order_id,order_date,billing_email,order_total,region"
    );
    assert!(csv_lines(&outcome)[1].ends_with(",EU"));
    assert!(marked(&store, 1).await);
}

#[test_case("sku, sku", "sku", ",A" ; "repeated field")]
#[test_case("order_id", "order_total", "49.90" ; "fixed column name")]
#[test_case("sku, sku, order_id", "sku", ",A" ; "both collisions")]
#[tokio::test]
async fn test_column_names_never_repeat(option: &str, last_column: &str, row_tail: &str) {
    let store = store_with(vec![order(1, OrderStatus::Completed, &[("sku", "A")])]).await;
    let settings = ExportSettings::from_options(Some(option), Some(MARKER));

    let outcome = OrderExportEngine::new(store.clone(), settings)
        .export()
        .await
        .unwrap();
    let lines = csv_lines(&outcome);

    let header: Vec<&str> = lines[0].split(',').collect();
    assert_eq!(header.last(), Some(&last_column));
    let mut unique = header.clone();
    unique.sort_unstable();
    unique.dedup();
    assert_eq!(unique.len(), header.len());

    assert!(lines[1].starts_with("1,"));
    assert!(lines[1].ends_with(row_tail));
}

#[test_case(None, &[MANAGE_STORE] ; "missing token")]
#[test_case(Some("wrong"), &[MANAGE_STORE] ; "wrong token")]
#[test_case(Some(TOKEN), &[] ; "no capability")]
#[test_case(Some(TOKEN), &["edit_shop_orders"] ; "other capability")]
#[tokio::test]
async fn test_access_denied_leaves_store_untouched(token: Option<&str>, caps: &[&str]) {
    let store = store_with(vec![
        order(1, OrderStatus::Completed, &[]),
        order(2, OrderStatus::Completed, &[(MARKER, "1")]),
    ])
    .await;
    store.set_option(EXPORTED_FLAG_OPTION, MARKER).await;
    let before = store.all_orders().await;

    let coordinator = ActionCoordinator::new(
        store.clone(),
        store.clone(),
        AccessGuard::new(secret_string(TOKEN.to_string())),
        "wc_order_export",
    );
    let request = AccessRequest::new(
        token.map(|t| secret_string(t.to_string())),
        caps.iter().map(|c| c.to_string()).collect(),
    );

    let export_err = coordinator.export_orders(&request).await.unwrap_err();
    let unset_err = coordinator.unset_exported_flag(&request).await.unwrap_err();

    assert!(export_err.is_access_denied());
    assert!(unset_err.is_access_denied());
    assert_eq!(store.all_orders().await, before);
}

/// Store wrapper whose metadata writes start failing after a set number
struct FailingStore {
    inner: Arc<InMemoryOrderStore>,
    writes_before_failure: usize,
    writes: AtomicUsize,
}

#[async_trait]
impl OrderStore for FailingStore {
    fn backend_name(&self) -> &str {
        "failing"
    }

    async fn query_orders(&self, query: &OrderQuery) -> Result<Vec<Order>> {
        self.inner.query_orders(query).await
    }

    async fn orders_with_status(&self, status: OrderStatus) -> Result<Vec<Order>> {
        self.inner.orders_with_status(status).await
    }

    async fn get_meta(&self, order_id: &OrderId, key: &str) -> Result<Option<String>> {
        self.inner.get_meta(order_id, key).await
    }

    async fn update_meta(&self, order_id: &OrderId, key: &str, value: &str) -> Result<()> {
        if self.writes.fetch_add(1, Ordering::SeqCst) >= self.writes_before_failure {
            return Err(StoreError::WriteFailed {
                order_id: order_id.to_string(),
                key: key.to_string(),
                message: "disk full".to_string(),
            }
            .into());
        }
        self.inner.update_meta(order_id, key, value).await
    }

    async fn delete_meta(&self, order_id: &OrderId, key: &str) -> Result<()> {
        self.inner.delete_meta(order_id, key).await
    }
}

#[tokio::test]
async fn test_mid_batch_failure_keeps_partial_marks() {
    let inner = store_with(vec![
        order(1, OrderStatus::Completed, &[]),
        order(2, OrderStatus::Completed, &[]),
        order(3, OrderStatus::Completed, &[]),
    ])
    .await;
    let failing = Arc::new(FailingStore {
        inner: inner.clone(),
        writes_before_failure: 1,
        writes: AtomicUsize::new(0),
    });

    let err = OrderExportEngine::new(failing, settings(&[]))
        .export()
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ExporterError::Store(StoreError::WriteFailed { .. })
    ));
    assert!(marked(&inner, 1).await);
    assert!(!marked(&inner, 2).await);
    assert!(!marked(&inner, 3).await);

    // A healthy rerun picks up only what is still unmarked
    let rerun = OrderExportEngine::new(inner.clone(), settings(&[]))
        .export()
        .await
        .unwrap();
    assert_eq!(exported_ids(&rerun), vec!["2", "3"]);
}
