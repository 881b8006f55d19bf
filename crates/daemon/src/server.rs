use crate::api::{self, AppState};
use tower_http::{
    cors::{Any as CorsAny, CorsLayer},
    trace::TraceLayer,
};

/// Serve the query and WebSocket interfaces until shutdown is signaled.
pub async fn run(
    state: AppState,
    listener: tokio::net::TcpListener,
    shutdown_rx: tokio::sync::oneshot::Receiver<()>,
) -> anyhow::Result<()> {
    let app = api::create_router(state)
        .layer(
            CorsLayer::new()
                .allow_origin(CorsAny)
                .allow_methods(CorsAny)
                .allow_headers(CorsAny),
        )
        .layer(TraceLayer::new_for_http());

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(async {
            shutdown_rx.await.ok();
        })
        .await?;

    Ok(())
}
