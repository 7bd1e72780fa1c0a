use axum::{
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;

/// How long `/slow` waits before answering; longer than any timeout the tests use.
pub const SLOW_DELAY: Duration = Duration::from_secs(3);

/// Endpoints with fixed behaviour for end-to-end runs.
pub fn fixture_router() -> Router {
    Router::new()
        .route("/ok", get(|| async { "ok" }))
        .route("/created", get(|| async { (StatusCode::CREATED, "created") }))
        .route(
            "/redirect",
            get(|| async { (StatusCode::FOUND, [(header::LOCATION, "/ok")]).into_response() }),
        )
        .route("/missing", get(|| async { StatusCode::NOT_FOUND }))
        .route("/boom", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }))
        .route(
            "/slow",
            get(|| async {
                tokio::time::sleep(SLOW_DELAY).await;
                "late"
            }),
        )
}

/// Bind the fixture server on an ephemeral local port and serve it in the background.
pub async fn spawn_fixture_server() -> std::io::Result<SocketAddr> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        axum::serve(listener, fixture_router()).await.ok();
    });
    Ok(addr)
}
