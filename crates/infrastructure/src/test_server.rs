use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;

/// Binds an ephemeral local listener for adapter tests.
pub(crate) async fn bind() -> (TcpListener, SocketAddr) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .unwrap_or_else(|error| panic!("failed to bind test listener: {error}"));
    let address = listener
        .local_addr()
        .unwrap_or_else(|error| panic!("failed to read test listener address: {error}"));
    (listener, address)
}

/// Serves `router` on `listener` in the background.
pub(crate) fn serve(listener: TcpListener, router: Router) {
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
}
