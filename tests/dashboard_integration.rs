use std::sync::Arc;
use std::time::Duration;

use chrono::{FixedOffset, TimeZone};
use serde_json::json;

use tire_inventory::analysis::{build_snapshot, InventoryDataset, RawInventory};
use tire_inventory::cache::{CacheConfig, DataChange};
use tire_inventory::clients::InMemoryDataSource;
use tire_inventory::config::environment::EnvironmentConfig;
use tire_inventory::models::{
    Container, GroupBy, OccupancyLevel, StockEntry, TimeRange, TireModel, TireStatus, ViewParams,
};
use tire_inventory::services::{BatchStatus, RefreshOutcome};
use tire_inventory::state::AppState;
use tire_inventory::utils::errors::AppError;

fn offset() -> FixedOffset {
    FixedOffset::west_opt(3 * 3600).unwrap()
}

fn status(name: &str, color: &str, order: i32) -> TireStatus {
    TireStatus {
        id: format!("s-{}", order),
        name: name.to_string(),
        color: color.to_string(),
        display_order: Some(order),
        is_discard: false,
    }
}

fn entry(id: &str, barcode: &str, status: &str, container: Option<&str>) -> StockEntry {
    StockEntry {
        id: id.to_string(),
        barcode: barcode.to_string(),
        model_id: Some("m1".to_string()),
        container_id: container.map(str::to_string),
        status: Some(status.to_string()),
        pilot: None,
        team: None,
        notes: None,
        created_at: Some("2026-10-17T12:00:00Z".to_string()),
        updated_at: None,
    }
}

fn container(id: &str, capacity: i64) -> Container {
    Container {
        id: id.to_string(),
        name: format!("Container {}", id),
        location: None,
        capacity,
    }
}

fn catalog() -> RawInventory {
    RawInventory {
        entries: Vec::new(),
        containers: vec![container("c1", 10), container("c2", 4)],
        models: vec![TireModel {
            id: "m1".to_string(),
            name: "P Zero".to_string(),
            model_type: Some("Slick".to_string()),
        }],
        statuses: vec![
            status("Novo", "#22C55E", 1),
            status("Em uso", "#3B82F6", 2),
            status("Descarte DSI", "#EF4444", 9),
        ],
    }
}

async fn state_with(raw: RawInventory) -> (AppState, Arc<InMemoryDataSource>) {
    let source = Arc::new(InMemoryDataSource::new(raw));
    let state = AppState::new(EnvironmentConfig::default(), source.clone(), CacheConfig::default()).unwrap();
    state.inventory.refresh().await;
    (state, source)
}

#[tokio::test]
async fn test_active_and_discard_counts() {
    let mut raw = catalog();
    raw.entries = vec![
        entry("1", "00000001", "Novo", None),
        entry("2", "00000002", "Novo", None),
        entry("3", "00000003", "Descarte DSI", None),
    ];
    let (state, _) = state_with(raw).await;

    let snapshot = state.inventory.snapshot(&ViewParams::default()).await;
    assert_eq!(snapshot.summary.total_active, 2);
    assert_eq!(snapshot.summary.total_discarded, 1);

    let breakdown: Vec<(String, u64)> = snapshot
        .status_breakdown
        .iter()
        .map(|d| (d.label.clone(), d.value))
        .collect();
    assert_eq!(
        breakdown,
        vec![("Novo".to_string(), 2), ("Descarte DSI".to_string(), 1)]
    );
}

#[tokio::test]
async fn test_occupancy_levels() {
    let mut raw = catalog();
    raw.containers.push(container("c0", 0));
    for i in 1..=9 {
        raw.entries.push(entry(&i.to_string(), &format!("{:08}", i), "Novo", Some("c1")));
    }
    for i in 10..=12 {
        raw.entries.push(entry(&i.to_string(), &format!("{:08}", i), "Novo", Some("c0")));
    }
    let (state, _) = state_with(raw).await;

    let snapshot = state.inventory.snapshot(&ViewParams::default()).await;
    let c1 = snapshot.occupancy.iter().find(|o| o.container_id == "c1").unwrap();
    assert_eq!(c1.percentage, 90);
    assert_eq!(c1.level, OccupancyLevel::Critical);

    let c0 = snapshot.occupancy.iter().find(|o| o.container_id == "c0").unwrap();
    assert_eq!(c0.active_count, 3);
    assert_eq!(c0.percentage, 0);
    assert_eq!(c0.level, OccupancyLevel::Normal);

    // Mayor porcentaje primero
    assert_eq!(snapshot.occupancy[0].container_id, "c1");
}

#[test]
fn test_empty_week_series_has_seven_zero_buckets() {
    let dataset = InventoryDataset::empty(offset());
    let now = offset().with_ymd_and_hms(2026, 10, 17, 9, 0, 0).unwrap();
    let view = ViewParams {
        time_range: TimeRange::Last7Days,
        ..ViewParams::default()
    };

    let snapshot = build_snapshot(&dataset, &view, now);
    assert_eq!(snapshot.timeline.len(), 7);

    let points = serde_json::to_value(&snapshot.timeline).unwrap();
    assert_eq!(points[0], json!({ "date": "11/10", "total": 0, "slick": 0, "wet": 0 }));
    assert_eq!(points[6], json!({ "date": "17/10", "total": 0, "slick": 0, "wet": 0 }));
}

#[tokio::test]
async fn test_padded_status_resolves_to_registered() {
    let (state, _) = state_with(catalog()).await;
    let resolved = state.inventory.resolve_status(Some("  novo ")).await;
    assert_eq!(resolved.name, "Novo");
    assert_eq!(resolved.color, "#22C55E");
}

#[tokio::test]
async fn test_corrupted_barcode_is_excluded() {
    let mut raw = catalog();
    raw.entries = vec![
        entry("1", "00000001", "Novo", Some("c2")),
        entry("2", "1234567890abc", "Novo", Some("c2")),
    ];
    let (state, _) = state_with(raw).await;

    let snapshot = state.inventory.snapshot(&ViewParams::default()).await;
    assert_eq!(snapshot.summary.total_entries, 1);
    assert_eq!(snapshot.summary.corrupted_entries, 1);
    assert_eq!(snapshot.data_quality.corrupted_barcodes, 1);

    let c2 = snapshot.occupancy.iter().find(|o| o.container_id == "c2").unwrap();
    assert_eq!(c2.active_count, 1);
    assert_eq!(c2.percentage, 25);
}

#[tokio::test]
async fn test_detail_breakdown_for_discard_card() {
    let mut raw = catalog();
    raw.entries = vec![
        entry("1", "00000001", "Novo", Some("c1")),
        entry("2", "00000002", "Descarte DSI", Some("c1")),
        entry("3", "00000003", "Descartado", None),
    ];
    let (state, _) = state_with(raw).await;

    let view = ViewParams {
        selected_dimension: Some("descartes".to_string()),
        group_by: GroupBy::Container,
        ..ViewParams::default()
    };
    let snapshot = state.inventory.snapshot(&view).await;

    assert_eq!(snapshot.summary.total_discarded, 2);
    let labels: Vec<(&str, u64)> = snapshot
        .detail
        .iter()
        .map(|g| (g.label.as_str(), g.count))
        .collect();
    assert_eq!(labels, vec![("Container c1", 1), ("N/A", 1)]);
}

#[tokio::test]
async fn test_bulk_discard_partial_failure_clears_container() {
    let mut raw = catalog();
    raw.entries = vec![
        entry("1", "00000001", "Novo", Some("c1")),
        entry("2", "00000002", "Novo", Some("c1")),
        entry("3", "00000003", "Em uso", Some("c2")),
    ];
    let (state, source) = state_with(raw).await;
    source.fail_updates_for("2").await;

    let ids = vec!["1".to_string(), "2".to_string(), "3".to_string(), "1".to_string()];
    let result = state.bulk.bulk_update_status(&ids, " descarte dsi ").await.unwrap();

    assert_eq!(result.status, BatchStatus::PartialSuccess);
    assert_eq!(result.target_status, "Descarte DSI");
    assert_eq!(result.succeeded, 2);
    assert_eq!(result.failed, 1);
    assert_eq!(result.outcomes.len(), 3);
    assert!(!result.outcomes[1].success);
    assert!(result.outcomes[1].error.is_some());

    let stored = source.snapshot().await;
    let by_id = |id: &str| stored.entries.iter().find(|e| e.id == id).unwrap().clone();
    assert_eq!(by_id("1").status.as_deref(), Some("Descarte DSI"));
    assert_eq!(by_id("1").container_id, None);
    assert!(by_id("1").updated_at.is_some());
    assert_eq!(by_id("2").status.as_deref(), Some("Novo"));
    assert_eq!(by_id("2").container_id.as_deref(), Some("c1"));
    assert_eq!(by_id("3").container_id, None);
}

#[tokio::test]
async fn test_bulk_non_discard_keeps_container() {
    let mut raw = catalog();
    raw.entries = vec![entry("1", "00000001", "Novo", Some("c1"))];
    let (state, source) = state_with(raw).await;

    let result = state
        .bulk
        .bulk_update_status(&["1".to_string()], "Em uso")
        .await
        .unwrap();
    assert_eq!(result.status, BatchStatus::FullSuccess);

    let stored = source.snapshot().await;
    assert_eq!(stored.entries[0].status.as_deref(), Some("Em uso"));
    assert_eq!(stored.entries[0].container_id.as_deref(), Some("c1"));
}

#[tokio::test]
async fn test_bulk_all_failures_and_unknown_status() {
    let mut raw = catalog();
    raw.entries = vec![entry("1", "00000001", "Novo", None)];
    let (state, _) = state_with(raw).await;

    let result = state
        .bulk
        .bulk_update_status(&["missing".to_string()], "Novo")
        .await
        .unwrap();
    assert_eq!(result.status, BatchStatus::FullFailure);

    let unknown = state.bulk.bulk_update_status(&["1".to_string()], "Perdido").await;
    assert!(matches!(unknown, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_reassign_container_rules() {
    let mut raw = catalog();
    raw.entries = vec![
        entry("1", "00000001", "Novo", None),
        entry("2", "00000002", "Descarte DSI", None),
    ];
    let (state, source) = state_with(raw).await;

    state.bulk.reassign_container("1", Some("c2")).await.unwrap();
    assert_eq!(source.snapshot().await.entries[0].container_id.as_deref(), Some("c2"));

    let unknown = state.bulk.reassign_container("1", Some("c9")).await;
    assert!(matches!(unknown, Err(AppError::NotFound(_))));

    let discarded = state.bulk.reassign_container("2", Some("c1")).await;
    assert!(matches!(discarded, Err(AppError::BadRequest(_))));

    state.bulk.reassign_container("1", None).await.unwrap();
    assert_eq!(source.snapshot().await.entries[0].container_id, None);
}

#[tokio::test]
async fn test_fetch_failure_keeps_previous_dataset() {
    let mut raw = catalog();
    raw.entries = vec![entry("1", "00000001", "Novo", None)];
    let (state, source) = state_with(raw).await;

    source.set_fail_fetches(true);
    let mut events = state.cache.subscribe();
    let outcome = state.inventory.refresh().await;

    assert!(matches!(outcome, RefreshOutcome::KeptCached { .. }));
    assert!(matches!(events.recv().await.unwrap(), DataChange::RefreshFailed { .. }));

    let snapshot = state.inventory.snapshot(&ViewParams::default()).await;
    assert_eq!(snapshot.summary.total_active, 1);
}

#[tokio::test]
async fn test_refresher_reloads_after_mutation() {
    let mut raw = catalog();
    raw.entries = vec![entry("1", "00000001", "Novo", Some("c1"))];
    let (state, _) = state_with(raw).await;

    let mut events = state.cache.subscribe();
    let refresher = state.inventory.spawn_refresher();

    state
        .bulk
        .bulk_update_status(&["1".to_string()], "Descarte DSI")
        .await
        .unwrap();

    let reloaded = tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            if let Ok(DataChange::Refreshed { .. }) = events.recv().await {
                break;
            }
        }
    })
    .await;
    assert!(reloaded.is_ok());

    let snapshot = state.inventory.snapshot(&ViewParams::default()).await;
    assert_eq!(snapshot.summary.total_active, 0);
    assert_eq!(snapshot.summary.total_discarded, 1);

    refresher.abort();
}
