//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! y conversión de tipos provenientes del backend.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};
use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    /// Código de barras: exactamente 8 dígitos
    static ref BARCODE_REGEX: Regex = Regex::new(r"^[0-9]{8}$").unwrap();
    /// Color hex (#RGB o #RRGGBB)
    static ref HEX_COLOR_REGEX: Regex = Regex::new(r"^#([0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").unwrap();
}

/// Verificar si un código de barras tiene el formato esperado (8 dígitos)
pub fn is_valid_barcode(value: &str) -> bool {
    BARCODE_REGEX.is_match(value)
}

/// Validar color hex
pub fn validate_hex_color(value: &str) -> Result<(), ValidationError> {
    if !HEX_COLOR_REGEX.is_match(value) {
        let mut error = ValidationError::new("hex_color");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Interpretar un timestamp del backend en la zona horaria local.
///
/// Acepta RFC3339 (`2024-05-01T10:00:00+00:00`), el formato de Postgres sin
/// `T` y timestamps sin zona (se asumen UTC). Devuelve `None` si no se puede
/// interpretar.
pub fn parse_timestamp(value: &str, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&offset));
    }

    // Postgres: "2024-05-01 10:00:00.123+00"
    for format in ["%Y-%m-%d %H:%M:%S%.f%#z", "%Y-%m-%d %H:%M:%S%#z"] {
        if let Ok(dt) = DateTime::parse_from_str(value, format) {
            return Some(dt.with_timezone(&offset));
        }
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc().with_timezone(&offset));
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .and_then(|naive| offset.from_local_datetime(&naive).single())
}

/// Construir un offset fijo a partir de horas (ej: -3 para Brasília)
pub fn offset_from_hours(hours: i32) -> Option<FixedOffset> {
    FixedOffset::east_opt(hours * 3600)
}
