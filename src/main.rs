use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use tire_inventory::build_app;
use tire_inventory::clients::SupabaseClient;
use tire_inventory::config::environment::EnvironmentConfig;
use tire_inventory::services::RefreshOutcome;
use tire_inventory::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    info!("🛞 Tire Inventory - Dashboard de estoque");
    info!("========================================");

    let config = match EnvironmentConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("❌ Configuración inválida: {}", e);
            return Err(anyhow::anyhow!("Error de configuración: {}", e));
        }
    };

    let source = Arc::new(SupabaseClient::new(&config)?);
    info!("✅ Cliente del backend configurado para {}", config.supabase_url);

    let state = AppState::new(config.clone(), source, config.cache_config())?;

    // Carga inicial; una falla deja el dashboard vacío hasta la próxima recarga
    match state.inventory.refresh().await {
        RefreshOutcome::Loaded { entries, corrupted } => {
            info!("✅ Inventario cargado: {} entradas ({} corruptas descartadas)", entries, corrupted);
        }
        RefreshOutcome::KeptCached { error } => {
            warn!("⚠️ Carga inicial fallida, se arranca sin datos: {}", error);
        }
    }

    let refresher = state.inventory.spawn_refresher();
    if let Some(secs) = config.auto_refresh_secs {
        info!("🔄 Recarga periódica cada {}s", secs);
    }

    let app = build_app(state);
    let addr: SocketAddr = config.server_url().parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("📊 Dashboard:");
    info!("   GET  /api/dashboard - Dashboard completo");
    info!("   GET  /api/dashboard/summary - Cards del topo");
    info!("   GET  /api/dashboard/breakdown - Tabla de detalle");
    info!("   GET  /api/dashboard/occupancy - Ocupación de containers");
    info!("   GET  /api/dashboard/timeline - Series temporales");
    info!("   POST /api/dashboard/refresh - Recargar desde el backend");
    info!("🏷️ Status:");
    info!("   GET  /api/statuses/resolve - Resolver status");
    info!("   POST /api/statuses - Registrar status");
    info!("📦 Estoque:");
    info!("   POST /api/stock/bulk-status - Cambio de status en lote");
    info!("   PUT  /api/stock/:id/container - Reasignar container");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Error del servidor: {}", e);
    }

    refresher.abort();
    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
