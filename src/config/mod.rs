//! Configuración del proyecto
//!
//! Este módulo contiene las variables de entorno y la configuración del
//! acceso al backend.

pub mod environment;

pub use environment::*;
