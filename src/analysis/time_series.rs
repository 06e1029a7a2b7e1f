//! Series temporales por día o por mes
//!
//! Los buckets se alinean al calendario local (medianoche, primer día del
//! mes) relativo a `now`; no es una ventana deslizante de 24h. Cada entrada
//! cae en el bucket cuyo intervalo `[start, end)` contiene su `created_at`.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, TimeZone};

use crate::analysis::colors::{neutral_color, palette_color, tire_type_color, OVERFLOW_LABEL};
use crate::analysis::dataset::{IngestedEntry, InventoryDataset};
use crate::models::{SeriesSplit, TimeBucketPoint, TimeRange, TireType};

const PT_MONTHS: [&str; 12] = [
    "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
];

/// Intervalo de un bucket
#[derive(Debug, Clone, PartialEq)]
pub struct Bucket {
    pub label: String,
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
}

impl Bucket {
    pub fn contains(&self, instant: &DateTime<FixedOffset>) -> bool {
        *instant >= self.start && *instant < self.end
    }
}

fn local_midnight(date: NaiveDate, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    date.and_hms_opt(0, 0, 0)
        .and_then(|naive| offset.from_local_datetime(&naive).single())
}

/// Primer día del mes desplazado `delta` meses
fn shift_month(first_of_month: NaiveDate, delta: i32) -> Option<NaiveDate> {
    let index = first_of_month.year() * 12 + first_of_month.month0() as i32 + delta;
    NaiveDate::from_ymd_opt(index.div_euclid(12), index.rem_euclid(12) as u32 + 1, 1)
}

/// Buckets de la ventana, del más antiguo al más reciente
pub fn buckets(range: TimeRange, now: DateTime<FixedOffset>) -> Vec<Bucket> {
    let offset = *now.offset();
    let today = now.date_naive();
    let count = range.bucket_count() as i64;

    match range {
        TimeRange::Last7Days | TimeRange::Last30Days => (0..count)
            .rev()
            .filter_map(|days_back| {
                let day = today - Duration::days(days_back);
                let start = local_midnight(day, offset)?;
                let end = local_midnight(day + Duration::days(1), offset)?;
                Some(Bucket {
                    label: day.format("%d/%m").to_string(),
                    start,
                    end,
                })
            })
            .collect(),
        TimeRange::Monthly => {
            let current = NaiveDate::from_ymd_opt(today.year(), today.month(), 1);
            (0..count as i32)
                .rev()
                .filter_map(|months_back| {
                    let first = shift_month(current?, -months_back)?;
                    let next = shift_month(first, 1)?;
                    Some(Bucket {
                        label: format!("{}/{:02}", PT_MONTHS[first.month0() as usize], first.year() % 100),
                        start: local_midnight(first, offset)?,
                        end: local_midnight(next, offset)?,
                    })
                })
                .collect()
        }
    }
}

/// Inicio y fin (exclusivo) de toda la ventana
pub fn window_span(range: TimeRange, now: DateTime<FixedOffset>) -> Option<(DateTime<FixedOffset>, DateTime<FixedOffset>)> {
    let buckets = buckets(range, now);
    Some((buckets.first()?.start, buckets.last()?.end))
}

fn split_key(entry: &IngestedEntry, split: SeriesSplit, dataset: &InventoryDataset) -> Option<String> {
    match split {
        SeriesSplit::Type => entry.tire_type.map(|t| t.key().to_string()),
        SeriesSplit::Model => Some(
            entry
                .model_id()
                .and_then(|id| dataset.model(id))
                .map(|model| model.name.trim().to_string())
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| OVERFLOW_LABEL.to_string()),
        ),
    }
}

/// Serie temporal sobre todas las entradas válidas del dataset.
///
/// Con `SeriesSplit::Type` cada punto lleva siempre `slick` y `wet` (cero
/// explícito). Con `SeriesSplit::Model` solo aparecen los modelos con
/// conteo en ese bucket; la clave ausente vale cero.
pub fn build_time_series(
    dataset: &InventoryDataset,
    range: TimeRange,
    split: SeriesSplit,
    now: DateTime<FixedOffset>,
) -> Vec<TimeBucketPoint> {
    let buckets = buckets(range, now);

    let mut points: Vec<TimeBucketPoint> = buckets
        .iter()
        .map(|bucket| {
            let mut counts = BTreeMap::new();
            if split == SeriesSplit::Type {
                for tire_type in TireType::ALL {
                    counts.insert(tire_type.key().to_string(), 0);
                }
            }
            TimeBucketPoint {
                label: bucket.label.clone(),
                start: Some(bucket.start),
                end: Some(bucket.end),
                total: 0,
                counts,
            }
        })
        .collect();

    for entry in dataset.entries() {
        // Timestamp ilegible: fuera de todos los buckets
        let Some(created_at) = entry.created_at.as_ref() else {
            continue;
        };
        let Some(idx) = buckets.iter().position(|bucket| bucket.contains(created_at)) else {
            continue;
        };

        let point = &mut points[idx];
        point.total += 1;
        if let Some(key) = split_key(entry, split, dataset) {
            *point.counts.entry(key).or_insert(0) += 1;
        }
    }

    points
}

/// Color de cada serie del gráfico temporal.
///
/// Slick/Wet tienen color fijo; los modelos reciben la paleta cíclica en
/// orden de primera aparición entre las entradas.
pub fn series_colors(dataset: &InventoryDataset, split: SeriesSplit) -> BTreeMap<String, String> {
    let mut colors = BTreeMap::new();

    match split {
        SeriesSplit::Type => {
            for tire_type in TireType::ALL {
                colors.insert(tire_type.key().to_string(), tire_type_color(tire_type).to_string());
            }
        }
        SeriesSplit::Model => {
            let mut next = 0;
            for entry in dataset.entries() {
                let Some(key) = split_key(entry, split, dataset) else {
                    continue;
                };
                if colors.contains_key(&key) {
                    continue;
                }
                let color = if key == OVERFLOW_LABEL {
                    neutral_color()
                } else {
                    next += 1;
                    palette_color(next - 1)
                };
                colors.insert(key, color.to_string());
            }
        }
    }

    colors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::dataset::RawInventory;
    use crate::models::{StockEntry, TireModel};
    use crate::utils::validation::offset_from_hours;

    fn offset() -> FixedOffset {
        offset_from_hours(-3).unwrap()
    }

    fn now() -> DateTime<FixedOffset> {
        offset().with_ymd_and_hms(2026, 10, 17, 15, 30, 0).unwrap()
    }

    fn entry(id: u32, model: &str, created_at: &str) -> StockEntry {
        StockEntry {
            id: id.to_string(),
            barcode: format!("{:08}", id),
            model_id: Some(model.to_string()),
            container_id: None,
            status: Some("Novo".to_string()),
            pilot: None,
            team: None,
            notes: None,
            created_at: Some(created_at.to_string()),
            updated_at: None,
        }
    }

    fn dataset(entries: Vec<StockEntry>) -> InventoryDataset {
        InventoryDataset::ingest(
            RawInventory {
                entries,
                models: vec![
                    TireModel { id: "m1".into(), name: "Soft".into(), model_type: Some("Slick".into()) },
                    TireModel { id: "m2".into(), name: "Rain".into(), model_type: Some("Wet".into()) },
                ],
                ..RawInventory::default()
            },
            offset(),
        )
    }

    #[test]
    fn test_empty_dataset_has_fixed_length() {
        let ds = dataset(vec![]);
        for (range, len) in [(TimeRange::Last7Days, 7), (TimeRange::Last30Days, 30), (TimeRange::Monthly, 6)] {
            let series = build_time_series(&ds, range, SeriesSplit::Type, now());
            assert_eq!(series.len(), len);
            for point in &series {
                assert_eq!(point.total, 0);
                assert_eq!(point.counts.get("slick"), Some(&0));
                assert_eq!(point.counts.get("wet"), Some(&0));
            }
        }
    }

    #[test]
    fn test_day_labels_oldest_first() {
        let series = build_time_series(&dataset(vec![]), TimeRange::Last7Days, SeriesSplit::Type, now());
        assert_eq!(series.first().unwrap().label, "11/10");
        assert_eq!(series.last().unwrap().label, "17/10");
    }

    #[test]
    fn test_day_buckets_align_to_local_midnight() {
        let ds = dataset(vec![
            // 17/10 00:30 local
            entry(1, "m1", "2026-10-17T03:30:00Z"),
            // 16/10 23:59 local
            entry(2, "m2", "2026-10-17T02:59:00Z"),
            // 10/10: fuera de la ventana de 7 días
            entry(3, "m1", "2026-10-10T12:00:00Z"),
            entry(4, "m1", "ilegível"),
        ]);
        let series = build_time_series(&ds, TimeRange::Last7Days, SeriesSplit::Type, now());

        let today = series.last().unwrap();
        assert_eq!(today.total, 1);
        assert_eq!(today.count_for("slick"), 1);
        assert_eq!(today.count_for("wet"), 0);

        let yesterday = &series[5];
        assert_eq!(yesterday.total, 1);
        assert_eq!(yesterday.count_for("wet"), 1);

        let total: u64 = series.iter().map(|p| p.total).sum();
        assert_eq!(total, 2);
    }

    #[test]
    fn test_monthly_buckets_cross_year() {
        let jan = offset().with_ymd_and_hms(2026, 1, 20, 12, 0, 0).unwrap();
        let labels: Vec<String> = buckets(TimeRange::Monthly, jan).into_iter().map(|b| b.label).collect();
        assert_eq!(labels, vec!["ago/25", "set/25", "out/25", "nov/25", "dez/25", "jan/26"]);
    }

    #[test]
    fn test_monthly_model_split_omits_absent_models() {
        let ds = dataset(vec![
            entry(1, "m1", "2026-10-02T12:00:00Z"),
            entry(2, "m1", "2026-10-03T12:00:00Z"),
            entry(3, "m2", "2026-09-15T12:00:00Z"),
            entry(4, "zz", "2026-09-16T12:00:00Z"),
        ]);
        let series = build_time_series(&ds, TimeRange::Monthly, SeriesSplit::Model, now());

        let october = series.last().unwrap();
        assert_eq!(october.label, "out/26");
        assert_eq!(october.total, 2);
        assert_eq!(october.counts.get("Soft"), Some(&2));
        assert!(!october.counts.contains_key("Rain"));

        let september = &series[4];
        assert_eq!(september.count_for("Rain"), 1);
        assert_eq!(september.count_for("N/A"), 1);
    }

    #[test]
    fn test_window_span_matches_series_total() {
        let ds = dataset(vec![
            entry(1, "m1", "2026-09-18T03:00:00Z"),
            entry(2, "m1", "2026-09-18T02:59:59Z"),
            entry(3, "m2", "2026-10-17T20:00:00Z"),
            entry(4, "m2", "2026-10-18T03:00:00Z"),
        ]);
        let (start, end) = window_span(TimeRange::Last30Days, now()).unwrap();
        let in_window = ds
            .entries()
            .iter()
            .filter_map(|e| e.created_at)
            .filter(|t| *t >= start && *t < end)
            .count() as u64;

        let series = build_time_series(&ds, TimeRange::Last30Days, SeriesSplit::Type, now());
        let total: u64 = series.iter().map(|p| p.total).sum();
        assert_eq!(total, in_window);
        assert_eq!(total, 2);
    }

    #[test]
    fn test_series_colors_follow_first_appearance() {
        let ds = dataset(vec![
            entry(1, "m2", "2026-10-02T12:00:00Z"),
            entry(2, "zz", "2026-10-03T12:00:00Z"),
            entry(3, "m1", "2026-10-04T12:00:00Z"),
        ]);

        let by_model = series_colors(&ds, SeriesSplit::Model);
        assert_eq!(by_model["Rain"], palette_color(0));
        assert_eq!(by_model["Soft"], palette_color(1));
        assert_eq!(by_model["N/A"], neutral_color());

        let by_type = series_colors(&ds, SeriesSplit::Type);
        assert_eq!(by_type.len(), 2);
        assert_eq!(by_type["slick"], tire_type_color(TireType::Slick));
    }
}
