//! Colores y labels de las series

use crate::models::{OccupancyLevel, TireType, NEUTRAL_GRAY};

/// Paleta cíclica para modelos y containers
pub const SERIES_PALETTE: [&str; 8] = [
    "#3B82F6", "#F59E0B", "#10B981", "#8B5CF6", "#EC4899", "#14B8A6", "#F97316", "#6366F1",
];

/// Label del bucket de referencias sin resolver
pub const OVERFLOW_LABEL: &str = "N/A";

pub fn palette_color(index: usize) -> &'static str {
    SERIES_PALETTE[index % SERIES_PALETTE.len()]
}

pub fn tire_type_color(tire_type: TireType) -> &'static str {
    match tire_type {
        TireType::Slick => "#EF4444",
        TireType::Wet => "#3B82F6",
    }
}

pub fn occupancy_color(level: OccupancyLevel) -> &'static str {
    match level {
        OccupancyLevel::Critical => "#EF4444",
        OccupancyLevel::Warning => "#F59E0B",
        OccupancyLevel::Normal => "#22C55E",
    }
}

pub fn neutral_color() -> &'static str {
    NEUTRAL_GRAY
}
