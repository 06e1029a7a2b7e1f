//! Middleware del sistema
//!
//! Este módulo contiene las capas HTTP compartidas (CORS).

pub mod cors;

pub use cors::*;
