//! Cliente HTTP para el backend (API REST estilo PostgREST)
//!
//! Lecturas con filtro, orden y límite; actualizaciones con `PATCH` e
//! inserciones con `POST`. La autenticación es la clave anónima del
//! proyecto enviada en `apikey` y como bearer.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::clients::InventoryDataSource;
use crate::config::environment::{EnvironmentConfig, TableNames};
use crate::models::{Container, NewTireStatus, StockEntry, StockEntryPatch, TireModel, TireStatus};
use crate::utils::errors::{not_found_error, AppError, AppResult};

/// Consulta de lectura sobre una tabla
#[derive(Debug, Clone)]
pub struct SelectQuery {
    table: String,
    columns: String,
    filters: Vec<(String, String)>,
    order: Option<(String, bool)>,
    limit: Option<usize>,
}

impl SelectQuery {
    pub fn table(table: &str) -> Self {
        Self {
            table: table.to_string(),
            columns: "*".to_string(),
            filters: Vec::new(),
            order: None,
            limit: None,
        }
    }

    pub fn columns(mut self, columns: &str) -> Self {
        self.columns = columns.to_string();
        self
    }

    /// Filtro de igualdad (`col=eq.valor`)
    pub fn eq(mut self, column: &str, value: &str) -> Self {
        self.filters.push((column.to_string(), format!("eq.{}", urlencoding::encode(value))));
        self
    }

    pub fn order(mut self, column: &str, ascending: bool) -> Self {
        self.order = Some((column.to_string(), ascending));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn table_name(&self) -> &str {
        &self.table
    }

    pub fn to_query_string(&self) -> String {
        let mut parts = vec![format!("select={}", urlencoding::encode(&self.columns))];
        for (column, filter) in &self.filters {
            parts.push(format!("{}={}", column, filter));
        }
        if let Some((column, ascending)) = &self.order {
            parts.push(format!("order={}.{}", column, if *ascending { "asc" } else { "desc" }));
        }
        if let Some(limit) = self.limit {
            parts.push(format!("limit={}", limit));
        }
        parts.join("&")
    }
}

/// Cliente del backend-as-a-service
#[derive(Clone)]
pub struct SupabaseClient {
    client: Client,
    base_url: String,
    api_key: String,
    tables: TableNames,
    fetch_limit: usize,
}

impl SupabaseClient {
    pub fn new(config: &EnvironmentConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.supabase_url.trim_end_matches('/').to_string(),
            api_key: config.supabase_anon_key.clone(),
            tables: config.tables.clone(),
            fetch_limit: config.fetch_limit,
        })
    }

    fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.client
            .request(method, url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Accept", "application/json")
    }

    async fn check(response: Response) -> AppResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(AppError::RemoteStatus {
            status: status.as_u16(),
            body,
        })
    }

    /// Ejecutar una consulta de lectura
    pub async fn select<T: DeserializeOwned>(&self, query: &SelectQuery) -> AppResult<Vec<T>> {
        let url = format!("{}?{}", self.rest_url(query.table_name()), query.to_query_string());
        log::debug!("🌐 GET {}", url);

        let response = self.request(Method::GET, &url).send().await?;
        let rows: Vec<T> = Self::check(response).await?.json().await?;

        log::info!("📥 {} filas de '{}'", rows.len(), query.table_name());
        Ok(rows)
    }
}

#[async_trait]
impl InventoryDataSource for SupabaseClient {
    async fn fetch_entries(&self) -> AppResult<Vec<StockEntry>> {
        let query = SelectQuery::table(&self.tables.stock_entries)
            .order("created_at", false)
            .limit(self.fetch_limit);
        self.select(&query).await
    }

    async fn fetch_containers(&self) -> AppResult<Vec<Container>> {
        let query = SelectQuery::table(&self.tables.containers).order("name", true);
        self.select(&query).await
    }

    async fn fetch_models(&self) -> AppResult<Vec<TireModel>> {
        let query = SelectQuery::table(&self.tables.tire_models).order("name", true);
        self.select(&query).await
    }

    async fn fetch_statuses(&self) -> AppResult<Vec<TireStatus>> {
        let query = SelectQuery::table(&self.tables.tire_statuses).order("name", true);
        self.select(&query).await
    }

    async fn update_entry(&self, id: &str, patch: &StockEntryPatch) -> AppResult<()> {
        let url = format!(
            "{}?id=eq.{}",
            self.rest_url(&self.tables.stock_entries),
            urlencoding::encode(id)
        );
        log::debug!("🌐 PATCH {}", url);

        let response = self
            .request(Method::PATCH, &url)
            .header("Prefer", "return=representation")
            .json(patch)
            .send()
            .await?;
        let updated: Vec<serde_json::Value> = Self::check(response).await?.json().await?;

        if updated.is_empty() {
            return Err(not_found_error("StockEntry", id));
        }
        Ok(())
    }

    async fn insert_status(&self, status: &NewTireStatus) -> AppResult<TireStatus> {
        let url = self.rest_url(&self.tables.tire_statuses);
        log::debug!("🌐 POST {}", url);

        let response = self
            .request(Method::POST, &url)
            .header("Prefer", "return=representation")
            .json(status)
            .send()
            .await?;
        let mut inserted: Vec<TireStatus> = Self::check(response).await?.json().await?;

        if inserted.is_empty() {
            return Err(AppError::Internal("insert returned no rows".to_string()));
        }
        Ok(inserted.remove(0))
    }
}
