//! Clasificación de status de descarte
//!
//! Un pneu descartado sale del estoque activo: cuenta en los cards de
//! descarte, no cuenta en totales activos ni en la ocupación de containers.

/// Variantes históricas del status de descarte.
///
/// La comparación es exacta; normalizar (trim, mayúsculas) es tarea de quien
/// llama. Solo se usa para fijar `TireStatus::is_discard` al registrar un
/// status y para entradas cuyo status no está registrado.
pub const DISCARD_LABELS: [&str; 4] = ["Descarte DSI", "Descartado DSI", "Descarte", "Descartado"];

/// ¿Es este nombre un label de descarte conocido?
pub fn is_discard_label(status: &str) -> bool {
    DISCARD_LABELS.contains(&status)
}
