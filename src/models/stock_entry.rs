//! Modelo de entrada de estoque (un pneu físico)

use serde::{Deserialize, Serialize};

/// Fila de la tabla de estoque tal como llega del backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockEntry {
    #[serde(deserialize_with = "super::de::id")]
    pub id: String,
    #[serde(default)]
    pub barcode: String,
    #[serde(default, deserialize_with = "super::de::opt_id")]
    pub model_id: Option<String>,
    #[serde(default, deserialize_with = "super::de::opt_id")]
    pub container_id: Option<String>,
    /// Texto libre; se compara contra los status registrados
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub pilot: Option<String>,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    // Se guardan crudos: un timestamp ilegible no debe romper la carga
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Cambios parciales sobre una entrada (PATCH)
#[derive(Debug, Clone, Default, Serialize)]
pub struct StockEntryPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// `Some(None)` limpia la referencia al container
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_id: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl StockEntryPatch {
    pub fn status(status: impl Into<String>) -> Self {
        Self {
            status: Some(status.into()),
            ..Self::default()
        }
    }

    pub fn container(container_id: Option<String>) -> Self {
        Self {
            container_id: Some(container_id),
            ..Self::default()
        }
    }

    /// Marca el patch con la hora actual
    pub fn touched(mut self) -> Self {
        self.updated_at = Some(chrono::Utc::now().to_rfc3339());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_row_with_numeric_ids() {
        let entry: StockEntry = serde_json::from_value(json!({
            "id": 42,
            "barcode": "12345678",
            "model_id": 7,
            "container_id": "",
            "status": " Novo ",
            "created_at": "2024-05-01T10:00:00Z"
        }))
        .unwrap();

        assert_eq!(entry.id, "42");
        assert_eq!(entry.model_id.as_deref(), Some("7"));
        assert_eq!(entry.container_id, None);
        assert_eq!(entry.status.as_deref(), Some(" Novo "));
        assert!(entry.pilot.is_none());
    }

    #[test]
    fn test_patch_serialization_clears_container() {
        let patch = StockEntryPatch {
            status: Some("Descarte DSI".to_string()),
            container_id: Some(None),
            updated_at: None,
        };
        let value = serde_json::to_value(&patch).unwrap();
        assert_eq!(value, json!({ "status": "Descarte DSI", "container_id": null }));

        let value = serde_json::to_value(StockEntryPatch::status("Novo")).unwrap();
        assert_eq!(value, json!({ "status": "Novo" }));
    }
}
