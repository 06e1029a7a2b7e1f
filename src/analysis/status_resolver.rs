//! Resolución de status
//!
//! Convierte el texto libre de una entrada en un `TireStatus` registrado y
//! mantiene el registro canónico de status usado por todas las agregaciones.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::analysis::discard::is_discard_label;
use crate::models::TireStatus;

/// Nombre por defecto cuando la entrada no tiene status
pub const DEFAULT_STATUS_NAME: &str = "Novo";

/// Label del bucket de entradas sin status
pub const NO_STATUS_LABEL: &str = "Sem Status";

fn status_key(name: &str) -> String {
    name.trim().to_lowercase()
}

fn find_status<'a>(name: &str, registered: &'a [TireStatus]) -> Option<&'a TireStatus> {
    let key = status_key(name);
    registered.iter().find(|status| status_key(&status.name) == key)
}

/// Resolver un status crudo contra la lista registrada.
///
/// Nunca falla y nunca devuelve un color vacío:
/// 1. match case-insensitive sobre el nombre recortado;
/// 2. entrada vacía o nula → `"Novo"`;
/// 3. sin match → primer status registrado, o un placeholder gris con el
///    nombre original si no hay ninguno registrado.
pub fn resolve_status(input: Option<&str>, registered: &[TireStatus]) -> TireStatus {
    let trimmed = input.map(str::trim).unwrap_or_default();
    let name = if trimmed.is_empty() { DEFAULT_STATUS_NAME } else { trimmed };

    if let Some(found) = find_status(name, registered) {
        return found.clone();
    }

    match registered.first() {
        Some(first) => {
            log::debug!("🔍 Status '{}' no registrado, usando '{}'", name, first.name);
            first.clone()
        }
        None => {
            log::debug!("🔍 Sin status registrados, placeholder para '{}'", name);
            TireStatus::placeholder(name)
        }
    }
}

/// Registro canónico de status.
///
/// Normaliza la identidad de cada status una sola vez: nombres recortados,
/// clave case-insensitive y bandera de descarte fijada al registrar.
#[derive(Debug, Clone, Default)]
pub struct StatusRegistry {
    statuses: Vec<TireStatus>,
    by_key: HashMap<String, usize>,
}

impl StatusRegistry {
    pub fn new(statuses: Vec<TireStatus>) -> Self {
        let mut registry = Self::default();
        for status in statuses {
            registry.register(status);
        }
        registry
    }

    /// Registrar un status; devuelve `false` si ya existía uno con la misma clave
    pub fn register(&mut self, mut status: TireStatus) -> bool {
        status.name = status.name.trim().to_string();
        if status.color.trim().is_empty() {
            status.color = crate::models::NEUTRAL_GRAY.to_string();
        }
        status.is_discard = status.is_discard || is_discard_label(&status.name);

        let key = status_key(&status.name);
        if let Some(&existing) = self.by_key.get(&key) {
            // Dos filas que solo difieren en espacios o mayúsculas: gana la primera
            log::warn!(
                "⚠️ Status duplicado '{}' ignorado (ya registrado como '{}')",
                status.name,
                self.statuses[existing].name
            );
            return false;
        }

        self.by_key.insert(key, self.statuses.len());
        self.statuses.push(status);
        true
    }

    pub fn statuses(&self) -> &[TireStatus] {
        &self.statuses
    }

    pub fn get(&self, name: &str) -> Option<&TireStatus> {
        self.by_key.get(&status_key(name)).map(|&idx| &self.statuses[idx])
    }

    /// Clave canónica de un status crudo.
    ///
    /// `None` para status vacío; el nombre registrado si hay match; el texto
    /// recortado en caso contrario.
    pub fn canonical_name(&self, raw: Option<&str>) -> Option<String> {
        let trimmed = raw.map(str::trim).filter(|s| !s.is_empty())?;
        Some(
            self.get(trimmed)
                .map(|status| status.name.clone())
                .unwrap_or_else(|| trimmed.to_string()),
        )
    }

    /// ¿El status canónico representa un descarte?
    pub fn is_discard(&self, canonical: &str) -> bool {
        match self.get(canonical) {
            Some(status) => status.is_discard,
            None => is_discard_label(canonical),
        }
    }

    pub fn resolve(&self, raw: Option<&str>) -> TireStatus {
        resolve_status(raw, &self.statuses)
    }

    /// Status en orden de exhibición: `display_order` primero, luego nombre
    pub fn ordered(&self) -> Vec<&TireStatus> {
        let mut ordered: Vec<&TireStatus> = self.statuses.iter().collect();
        ordered.sort_by(|a, b| compare_display(a, b));
        ordered
    }
}

fn compare_display(a: &TireStatus, b: &TireStatus) -> Ordering {
    match (a.display_order, b.display_order) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.name.cmp(&b.name)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.name.cmp(&b.name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NEUTRAL_GRAY;

    fn status(id: &str, name: &str, color: &str, order: Option<i32>) -> TireStatus {
        TireStatus {
            id: id.to_string(),
            name: name.to_string(),
            color: color.to_string(),
            display_order: order,
            is_discard: false,
        }
    }

    fn registered() -> Vec<TireStatus> {
        vec![
            status("1", "Novo", "#22C55E", Some(1)),
            status("2", "Em uso", "#3B82F6", Some(2)),
            status("3", "Descarte DSI", "#EF4444", Some(3)),
        ]
    }

    #[test]
    fn test_resolve_padded_case_insensitive() {
        let resolved = resolve_status(Some("  novo "), &registered());
        assert_eq!(resolved.name, "Novo");
        assert_eq!(resolved.color, "#22C55E");
    }

    #[test]
    fn test_resolve_empty_defaults_to_novo() {
        let statuses = vec![status("2", "Em uso", "#3B82F6", None), status("1", "Novo", "#22C55E", None)];
        assert_eq!(resolve_status(None, &statuses).name, "Novo");
        assert_eq!(resolve_status(Some("   "), &statuses).name, "Novo");
    }

    #[test]
    fn test_resolve_unknown_falls_back_to_first() {
        let resolved = resolve_status(Some("Perdido"), &registered());
        assert_eq!(resolved.name, "Novo");
    }

    #[test]
    fn test_resolve_never_without_color() {
        for input in [None, Some(""), Some("Qualquer"), Some("  novo ")] {
            let resolved = resolve_status(input, &[]);
            assert!(!resolved.color.is_empty());
            assert_eq!(resolved.color, NEUTRAL_GRAY);
        }
        assert_eq!(resolve_status(None, &[]).name, "Novo");
        assert_eq!(resolve_status(Some(" Qualquer "), &[]).name, "Qualquer");
    }

    #[test]
    fn test_registry_canonicalizes_once() {
        let registry = StatusRegistry::new(registered());
        assert_eq!(registry.canonical_name(Some("  NOVO")), Some("Novo".to_string()));
        assert_eq!(registry.canonical_name(Some(" Perdido ")), Some("Perdido".to_string()));
        assert_eq!(registry.canonical_name(Some("  ")), None);
        assert_eq!(registry.canonical_name(None), None);
    }

    #[test]
    fn test_registry_discard_flag_set_at_registration() {
        let mut statuses = registered();
        statuses.push(status("4", "Sucata", "#000000", None));
        statuses[3].is_discard = true;
        let registry = StatusRegistry::new(statuses);

        assert!(registry.is_discard("Descarte DSI"));
        assert!(registry.is_discard("Sucata"));
        assert!(!registry.is_discard("Novo"));
        // No registrado: cae en los labels conocidos
        assert!(registry.is_discard("Descartado"));
        assert!(!registry.is_discard("Perdido"));
    }

    #[test]
    fn test_registry_rejects_case_duplicates() {
        let mut registry = StatusRegistry::new(registered());
        assert!(!registry.register(status("9", " novo ", "#000000", None)));
        assert_eq!(registry.statuses().len(), 3);
        assert_eq!(registry.get("NOVO").unwrap().id, "1");
    }

    #[test]
    fn test_registry_order() {
        let registry = StatusRegistry::new(vec![
            status("1", "Zeta", "#111111", None),
            status("2", "Alfa", "#222222", None),
            status("3", "Novo", "#333333", Some(2)),
            status("4", "Em uso", "#444444", Some(1)),
        ]);
        let names: Vec<&str> = registry.ordered().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Em uso", "Novo", "Alfa", "Zeta"]);
    }
}
