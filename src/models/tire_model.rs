//! Modelo del catálogo de pneus

use serde::{Deserialize, Serialize};

/// Tipo de pneu usado para separar las series del dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TireType {
    Slick,
    Wet,
}

impl TireType {
    pub const ALL: [TireType; 2] = [TireType::Slick, TireType::Wet];

    /// Clave usada en los puntos de las series (`slick` / `wet`)
    pub fn key(&self) -> &'static str {
        match self {
            TireType::Slick => "slick",
            TireType::Wet => "wet",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "slick" => Some(TireType::Slick),
            "wet" => Some(TireType::Wet),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TireModel {
    #[serde(deserialize_with = "super::de::id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub model_type: Option<String>,
}

impl TireModel {
    pub fn tire_type(&self) -> Option<TireType> {
        self.model_type.as_deref().and_then(TireType::parse)
    }
}
