use crate::core::routes::{self, AppState};
use crate::core::upstream::HttpUpstream;
use crate::core::{ConfigProvider, Route};
use crate::utils::error::Result;
use axum::{
    http::{header::CONTENT_TYPE, Method},
    routing::get,
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info};

/// Builds the proxy router. Routes are nested under `base_path`; an empty
/// path or `/` mounts them at the root. `/health` always lives at the root.
pub fn router(state: AppState, base_path: &str) -> Router {
    let api = Router::new()
        .route(Route::CalendarEvents.local_path(), get(routes::calendar_events))
        .route(Route::DateConversion.local_path(), get(routes::date_conversion))
        .route(Route::MonthCalendar.local_path(), get(routes::month_calendar))
        .route(Route::Vegetables.local_path(), get(routes::vegetables))
        .route(Route::Metals.local_path(), get(routes::metals))
        .route(Route::Rashifal.local_path(), get(routes::rashifal))
        .route(Route::Forex.local_path(), get(routes::forex));

    let app = if base_path.is_empty() || base_path == "/" {
        api
    } else {
        Router::new().nest(base_path, api)
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    app.route("/health", get(routes::health))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

pub async fn serve<C: ConfigProvider + ?Sized>(config: &C) -> Result<()> {
    let upstream = HttpUpstream::new(config)?;
    info!(upstream = %upstream.base_url(), "Upstream client ready");

    let state = AppState::new(Arc::new(upstream));
    let app = router(state, config.base_path());

    let address = config.bind_address();
    info!("Binding to {address}");
    let listener = TcpListener::bind(address).await?;
    info!(base_path = config.base_path(), "Proxy listening on http://{address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
