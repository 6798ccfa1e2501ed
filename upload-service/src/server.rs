//! HTTP server assembly and lifecycle

use std::sync::Arc;
use std::time::Duration;

use axum::http::{
    header::{ACCESS_CONTROL_ALLOW_HEADERS, CONTENT_TYPE},
    HeaderValue,
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{media_storage::UploadUrlSigner, routes, state::AppState, types::Environment};

/// Builds the application router around the given signer.
///
/// Every response carries `Access-Control-Allow-Origin: *` and
/// `Access-Control-Allow-Headers: Content-Type`, success or failure: the
/// CORS layers sit outside the routes, so validation rejections, signing
/// faults and timeouts all pass through them.
pub fn router(signer: Arc<dyn UploadUrlSigner>) -> axum::Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers([CONTENT_TYPE]);

    routes::routes()
        .with_state(AppState { signer })
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(5)))
        .layer(cors)
        // The CORS layer only emits Allow-Headers on preflight responses;
        // the contract requires it on every response.
        .layer(SetResponseHeaderLayer::if_not_present(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ))
}

/// Starts the server with the given environment and dependencies
///
/// # Errors
///
/// Returns an error if the server fails to start or bind to the port
pub async fn start(
    environment: Environment,
    signer: Arc<dyn UploadUrlSigner>,
) -> anyhow::Result<()> {
    let app = router(signer);

    let addr = std::net::SocketAddr::from((
        [0, 0, 0, 0],
        std::env::var("PORT").map_or(Ok(8001), |p| p.parse())?,
    ));

    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(
        "Upload service started on http://{addr} (bucket: {})",
        environment.bucket_name()
    );

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(anyhow::Error::from)
}

/// Resolves when the process receives ctrl-c or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install ctrl-c handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
