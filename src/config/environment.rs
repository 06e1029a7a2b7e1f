//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.

use std::env;
use std::str::FromStr;

use chrono::FixedOffset;

use crate::cache::CacheConfig;
use crate::utils::errors::{config_error, AppResult};
use crate::utils::validation::offset_from_hours;

/// Nombres de las tablas del backend
#[derive(Debug, Clone)]
pub struct TableNames {
    pub stock_entries: String,
    pub containers: String,
    pub tire_models: String,
    pub tire_statuses: String,
}

impl Default for TableNames {
    fn default() -> Self {
        Self {
            stock_entries: "stock_entries".to_string(),
            containers: "containers".to_string(),
            tire_models: "tire_models".to_string(),
            tire_statuses: "tire_statuses".to_string(),
        }
    }
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub cors_origins: Vec<String>,
    // Backend-as-a-service
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub request_timeout_secs: u64,
    pub fetch_limit: usize,
    pub tables: TableNames,
    // Zona horaria para los buckets del dashboard
    pub timezone_offset_hours: i32,
    pub auto_refresh_secs: Option<u64>,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: 3000,
            host: "0.0.0.0".to_string(),
            cors_origins: Vec::new(),
            supabase_url: "http://localhost:54321".to_string(),
            supabase_anon_key: String::new(),
            request_timeout_secs: 30,
            fetch_limit: 10_000,
            tables: TableNames::default(),
            timezone_offset_hours: -3,
            auto_refresh_secs: None,
        }
    }
}

impl EnvironmentConfig {
    /// Leer configuración desde variables de entorno.
    ///
    /// `SUPABASE_URL` y `SUPABASE_ANON_KEY` son obligatorias; el resto tiene
    /// valores por defecto.
    pub fn from_env() -> AppResult<Self> {
        let defaults = TableNames::default();

        let config = Self {
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            port: parse_or("PORT", 3000)?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            cors_origins: env::var("CORS_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            supabase_url: required("SUPABASE_URL")?.trim_end_matches('/').to_string(),
            supabase_anon_key: required("SUPABASE_ANON_KEY")?,
            request_timeout_secs: parse_or("REQUEST_TIMEOUT_SECS", 30)?,
            fetch_limit: parse_or("FETCH_LIMIT", 10_000)?,
            tables: TableNames {
                stock_entries: env::var("TABLE_STOCK_ENTRIES").unwrap_or(defaults.stock_entries),
                containers: env::var("TABLE_CONTAINERS").unwrap_or(defaults.containers),
                tire_models: env::var("TABLE_TIRE_MODELS").unwrap_or(defaults.tire_models),
                tire_statuses: env::var("TABLE_TIRE_STATUSES").unwrap_or(defaults.tire_statuses),
            },
            timezone_offset_hours: parse_or("TIMEZONE_OFFSET_HOURS", -3)?,
            // 0 o ausente: sin recarga periódica
            auto_refresh_secs: Some(parse_or("AUTO_REFRESH_SECS", 0u64)?).filter(|secs| *secs > 0),
        };

        // Validar offset al arrancar, no durante el cálculo
        config.timezone()?;
        Ok(config)
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Configuración del store en memoria
    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig {
            auto_refresh_secs: self.auto_refresh_secs,
            ..CacheConfig::default()
        }
    }

    /// Offset fijo usado para alinear días y meses
    pub fn timezone(&self) -> AppResult<FixedOffset> {
        offset_from_hours(self.timezone_offset_hours)
            .ok_or_else(|| config_error("TIMEZONE_OFFSET_HOURS", "offset out of range"))
    }
}

fn required(var: &str) -> AppResult<String> {
    match env::var(var) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(config_error(var, "must be set")),
    }
}

fn parse_or<T: FromStr>(var: &str, default: T) -> AppResult<T> {
    match env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| config_error(var, "must be a valid number")),
        Err(_) => Ok(default),
    }
}
