//! Armado del payload del dashboard
//!
//! Funciones puras: reciben el dataset y los parámetros de visualización y
//! devuelven estructuras nuevas sin tocar la entrada.

use chrono::{DateTime, FixedOffset, Utc};

use crate::analysis::dataset::{IngestedEntry, InventoryDataset};
use crate::analysis::grouping::{group_by_status, group_entries};
use crate::analysis::occupancy::container_occupancy;
use crate::analysis::time_series::{build_time_series, series_colors};
use crate::models::{ChartDatum, DashboardSnapshot, GroupCount, SummaryCards, TireType, ViewParams};

/// Card de activos (por defecto)
pub const ACTIVE_CARD: &str = "ativos";
/// Card de descartes
pub const DISCARD_CARD: &str = "descartes";

/// Cards del topo
pub fn summary_cards(dataset: &InventoryDataset) -> SummaryCards {
    let mut cards = SummaryCards {
        total_entries: dataset.entries().len() as u64,
        corrupted_entries: dataset.quality().corrupted_barcodes,
        ..SummaryCards::default()
    };

    for entry in dataset.entries() {
        if !entry.is_active() {
            cards.total_discarded += 1;
            continue;
        }
        cards.total_active += 1;
        if entry.container_id().is_none() {
            cards.unassigned_active += 1;
        }
        match entry.tire_type {
            Some(TireType::Slick) => cards.slick_active += 1,
            Some(TireType::Wet) => cards.wet_active += 1,
            None => {}
        }
    }

    cards
}

/// Subconjunto de entradas correspondiente al card seleccionado
pub fn select_entries<'a>(dataset: &'a InventoryDataset, selected: Option<&str>) -> Vec<&'a IngestedEntry> {
    let selected = selected.map(str::trim).filter(|s| !s.is_empty());

    match selected {
        None => dataset.active(),
        Some(card) if card.eq_ignore_ascii_case(ACTIVE_CARD) => dataset.active(),
        Some(card) if card.eq_ignore_ascii_case(DISCARD_CARD) => dataset.discarded(),
        Some(card) => match TireType::parse(card) {
            Some(tire_type) => dataset
                .entries()
                .iter()
                .filter(|e| e.is_active() && e.tire_type == Some(tire_type))
                .collect(),
            None => {
                let canonical = dataset.registry().canonical_name(Some(card));
                dataset
                    .entries()
                    .iter()
                    .filter(|e| e.status_key == canonical)
                    .collect()
            }
        },
    }
}

/// Gráfico por status sobre todas las entradas (incluye descartes)
pub fn status_breakdown(dataset: &InventoryDataset) -> Vec<ChartDatum> {
    group_by_status(&dataset.all(), dataset)
        .iter()
        .map(|group| ChartDatum {
            label: group.label.clone(),
            value: group.count,
            color: group.color.clone(),
            secondary_values: None,
        })
        .collect()
}

/// Tabla de detalle del card seleccionado
pub fn detail_breakdown(dataset: &InventoryDataset, view: &ViewParams) -> Vec<GroupCount> {
    let entries = select_entries(dataset, view.selected_dimension.as_deref());
    group_entries(&entries, view.group_by, dataset)
}

pub fn build_snapshot(
    dataset: &InventoryDataset,
    view: &ViewParams,
    now: DateTime<FixedOffset>,
) -> DashboardSnapshot {
    DashboardSnapshot {
        generated_at: now.with_timezone(&Utc),
        view: view.clone(),
        summary: summary_cards(dataset),
        status_breakdown: status_breakdown(dataset),
        detail: detail_breakdown(dataset, view),
        occupancy: container_occupancy(dataset),
        timeline: build_time_series(dataset, view.time_range, view.split, now),
        series_colors: series_colors(dataset, view.split),
        data_quality: dataset.quality().clone(),
    }
}

/// Igual que `build_snapshot` usando la hora actual en el offset del dataset
pub fn build_snapshot_now(dataset: &InventoryDataset, view: &ViewParams) -> DashboardSnapshot {
    let now = Utc::now().with_timezone(&dataset.offset());
    build_snapshot(dataset, view, now)
}
