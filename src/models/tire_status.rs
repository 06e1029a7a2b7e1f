//! Status registrados (tabla de lookup)

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::validation::{validate_hex_color, validate_not_empty};

/// Gris neutro para status sin color conocido
pub const NEUTRAL_GRAY: &str = "#9CA3AF";

fn default_color() -> String {
    NEUTRAL_GRAY.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TireStatus {
    #[serde(deserialize_with = "super::de::id")]
    pub id: String,
    pub name: String,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default)]
    pub display_order: Option<i32>,
    /// Se fija al registrar el status (ver `analysis::discard`)
    #[serde(default)]
    pub is_discard: bool,
}

impl TireStatus {
    /// Placeholder para cuando no hay ningún status registrado
    pub fn placeholder(name: &str) -> Self {
        Self {
            id: String::new(),
            name: name.to_string(),
            color: default_color(),
            display_order: None,
            is_discard: false,
        }
    }
}

/// Request para registrar un status nuevo
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewTireStatus {
    #[validate(custom = "validate_not_empty", length(max = 64))]
    pub name: String,
    #[validate(custom = "validate_hex_color")]
    pub color: String,
    pub display_order: Option<i32>,
    #[serde(default)]
    pub is_discard: bool,
}
