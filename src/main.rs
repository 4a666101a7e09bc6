use axum::{extract::DefaultBodyLimit, routing::get};
use axum_prometheus::PrometheusMetricLayer;
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use metascope_server::config::Config;
use metascope_server::routes;
use metascope_server::state::AppState;

// Room for the 2 MB markup limit plus JSON escaping.
const MAX_REQUEST_BODY: usize = 4 * 1024 * 1024;

#[tokio::main]
async fn main() {
    // JSON logs in production, human-readable in dev.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "metascope_server=info,tower_http=info"
            .parse()
            .expect("default log filter is valid")
    });

    if std::env::var("APP_ENV").as_deref() == Ok("production") {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    info!("Metascope server starting...");

    let config = Config::from_env().expect("Failed to load configuration");
    info!(
        timeout_secs = config.fetch_timeout.as_secs(),
        allow_private_hosts = config.allow_private_hosts,
        "Configuration loaded"
    );

    if config.allow_private_hosts {
        tracing::warn!("ALLOW_PRIVATE_HOSTS is set; private and loopback targets will be fetched");
    }

    let cors = if config.is_dev {
        info!("CORS: permissive (dev mode)");
        CorsLayer::permissive()
    } else {
        info!("CORS: restrictive (production mode)");
        CorsLayer::new()
    };

    let app_state = AppState::from_config(&config).expect("Failed to build HTTP client");

    let (prometheus_layer, metric_handle) = PrometheusMetricLayer::pair();

    let app = routes::router(app_state)
        .route(
            "/metrics",
            get(move || async move { metric_handle.render() }),
        )
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY))
        .layer(prometheus_layer)
        .layer(cors);

    let addr = config.server_addr();
    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .await
        .expect("Server failed to start");
}
