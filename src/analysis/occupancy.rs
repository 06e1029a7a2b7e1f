//! Ocupación de containers

use std::collections::HashMap;

use crate::analysis::colors::occupancy_color;
use crate::analysis::dataset::InventoryDataset;
use crate::models::{ContainerOccupancy, OccupancyLevel};

pub const CRITICAL_THRESHOLD: u32 = 90;
pub const WARNING_THRESHOLD: u32 = 70;

/// `round(100 × count / capacity)`; 0 si la capacidad no es positiva.
///
/// No se recorta a 100: un container sobrecargado reporta más de 100.
pub fn occupancy_percentage(active_count: u64, capacity: i64) -> u32 {
    if capacity <= 0 {
        return 0;
    }
    (100.0 * active_count as f64 / capacity as f64).round() as u32
}

pub fn classify_occupancy(percentage: u32) -> OccupancyLevel {
    if percentage >= CRITICAL_THRESHOLD {
        OccupancyLevel::Critical
    } else if percentage >= WARNING_THRESHOLD {
        OccupancyLevel::Warning
    } else {
        OccupancyLevel::Normal
    }
}

/// Ocupación de cada container por entradas activas, mayor porcentaje primero
pub fn container_occupancy(dataset: &InventoryDataset) -> Vec<ContainerOccupancy> {
    let mut active_by_container: HashMap<&str, u64> = HashMap::new();
    for entry in dataset.entries().iter().filter(|e| e.is_active()) {
        if let Some(container_id) = entry.container_id() {
            *active_by_container.entry(container_id).or_insert(0) += 1;
        }
    }

    let mut result: Vec<ContainerOccupancy> = dataset
        .containers()
        .iter()
        .map(|container| {
            let active_count = active_by_container
                .get(container.id.as_str())
                .copied()
                .unwrap_or(0);
            let percentage = occupancy_percentage(active_count, container.capacity);
            let level = classify_occupancy(percentage);

            ContainerOccupancy {
                container_id: container.id.clone(),
                name: container.name.clone(),
                location: container.location.clone(),
                capacity: container.capacity,
                active_count,
                percentage,
                level,
                color: occupancy_color(level).to_string(),
            }
        })
        .collect();

    result.sort_by(|a, b| b.percentage.cmp(&a.percentage));
    result
}
