//! Modelo de container (unidad física de armazenamento)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Container {
    #[serde(deserialize_with = "super::de::id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
    /// Capacidad en número de pneus; puede venir en 0
    #[serde(default)]
    pub capacity: i64,
}

impl Container {
    pub fn display_name(&self) -> String {
        match self.location.as_deref().map(str::trim) {
            Some(location) if !location.is_empty() => format!("{} ({})", self.name, location),
            _ => self.name.clone(),
        }
    }
}
