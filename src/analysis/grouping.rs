//! Agrupación por status, modelo o container
//!
//! Cada agrupación acumula conteos por clave normalizada, cruza con el
//! catálogo para obtener label y color, y ordena el resultado:
//! - status: orden de exhibición del registro (fallback alfabético);
//! - modelo/container: conteo descendente, empate por orden de aparición.
//!
//! Además calcula, por grupo, los containers distintos referenciados.

use std::collections::{HashMap, HashSet};

use crate::analysis::colors::{neutral_color, palette_color, OVERFLOW_LABEL};
use crate::analysis::dataset::{IngestedEntry, InventoryDataset};
use crate::analysis::status_resolver::NO_STATUS_LABEL;
use crate::models::{GroupBy, GroupCount};

/// Acumulador que preserva el orden de primera aparición
#[derive(Default)]
struct Tally<'a> {
    order: Vec<String>,
    counts: HashMap<String, u64>,
    containers: HashMap<String, HashSet<&'a str>>,
}

impl<'a> Tally<'a> {
    fn add(&mut self, key: &str, container_id: Option<&'a str>) {
        if !self.counts.contains_key(key) {
            self.order.push(key.to_string());
        }
        *self.counts.entry(key.to_string()).or_insert(0) += 1;

        let containers = self.containers.entry(key.to_string()).or_default();
        if let Some(id) = container_id.map(str::trim).filter(|id| !id.is_empty()) {
            containers.insert(id);
        }
    }

    fn count(&self, key: &str) -> u64 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    fn distinct_containers(&self, key: &str) -> u64 {
        self.containers.get(key).map(|set| set.len() as u64).unwrap_or(0)
    }
}

/// Agrupar por status canónico
pub fn group_by_status(entries: &[&IngestedEntry], dataset: &InventoryDataset) -> Vec<GroupCount> {
    const NO_STATUS_KEY: &str = "";

    let mut tally = Tally::default();
    for entry in entries {
        let key = entry.status_key.as_deref().unwrap_or(NO_STATUS_KEY);
        tally.add(key, entry.container_id());
    }

    let registry = dataset.registry();
    let mut result = Vec::new();

    for status in registry.ordered() {
        if tally.count(&status.name) == 0 {
            continue;
        }
        result.push(GroupCount {
            key: status.name.clone(),
            label: status.name.clone(),
            count: tally.count(&status.name),
            color: Some(status.color.clone()),
            distinct_containers: tally.distinct_containers(&status.name),
        });
    }

    // Texto libre sin status registrado: bucket propio con el texto crudo
    let mut unregistered: Vec<&String> = tally
        .order
        .iter()
        .filter(|key| !key.is_empty() && registry.get(key).is_none())
        .collect();
    unregistered.sort();
    for key in unregistered {
        result.push(GroupCount {
            key: key.clone(),
            label: key.clone(),
            count: tally.count(key),
            color: Some(neutral_color().to_string()),
            distinct_containers: tally.distinct_containers(key),
        });
    }

    if tally.count(NO_STATUS_KEY) > 0 {
        result.push(GroupCount {
            key: NO_STATUS_LABEL.to_string(),
            label: NO_STATUS_LABEL.to_string(),
            count: tally.count(NO_STATUS_KEY),
            color: Some(neutral_color().to_string()),
            distinct_containers: tally.distinct_containers(NO_STATUS_KEY),
        });
    }

    result
}

/// Agrupar por modelo (referencias sin resolver van a `N/A`)
pub fn group_by_model(entries: &[&IngestedEntry], dataset: &InventoryDataset) -> Vec<GroupCount> {
    let mut tally = Tally::default();
    for entry in entries {
        let key = entry
            .model_id()
            .filter(|id| dataset.model(id).is_some())
            .unwrap_or(OVERFLOW_LABEL);
        tally.add(key, entry.container_id());
    }

    ranked(tally, |key| {
        dataset
            .model(key)
            .map(|model| model.name.clone())
            .filter(|name| !name.trim().is_empty())
    })
}

/// Agrupar por container (sin container o sin resolver van a `N/A`)
pub fn group_by_container(entries: &[&IngestedEntry], dataset: &InventoryDataset) -> Vec<GroupCount> {
    let mut tally = Tally::default();
    for entry in entries {
        let key = entry
            .container_id()
            .filter(|id| dataset.container(id).is_some())
            .unwrap_or(OVERFLOW_LABEL);
        tally.add(key, entry.container_id());
    }

    ranked(tally, |key| dataset.container(key).map(|container| container.display_name()))
}

/// Despacho según la dimensión pedida
pub fn group_entries(
    entries: &[&IngestedEntry],
    group_by: GroupBy,
    dataset: &InventoryDataset,
) -> Vec<GroupCount> {
    match group_by {
        GroupBy::Status => group_by_status(entries, dataset),
        GroupBy::Model => group_by_model(entries, dataset),
        GroupBy::Container => group_by_container(entries, dataset),
    }
}

fn ranked<F>(tally: Tally<'_>, label_for: F) -> Vec<GroupCount>
where
    F: Fn(&str) -> Option<String>,
{
    let mut result: Vec<GroupCount> = tally
        .order
        .iter()
        .map(|key| {
            let label = if key == OVERFLOW_LABEL {
                None
            } else {
                label_for(key.as_str())
            };
            GroupCount {
                key: key.clone(),
                label: label.unwrap_or_else(|| OVERFLOW_LABEL.to_string()),
                count: tally.count(key),
                color: None,
                distinct_containers: tally.distinct_containers(key),
            }
        })
        .collect();

    // sort_by es estable: el empate mantiene el orden de aparición
    result.sort_by(|a, b| b.count.cmp(&a.count));

    let mut palette_idx = 0;
    for group in result.iter_mut() {
        if group.key == OVERFLOW_LABEL {
            group.color = Some(neutral_color().to_string());
        } else {
            group.color = Some(palette_color(palette_idx).to_string());
            palette_idx += 1;
        }
    }

    result
}
