//! Local HTTP fixtures for tests that exercise the blocking client.

use axum::Router;
use axum::http::{StatusCode, header};
use axum::routing::get;
use std::sync::mpsc;

pub const SAMPLE: &str = include_str!("../fixtures/usgs_sample.json");

/// Serve canned USGS responses on an ephemeral port and return the base URL.
///
/// The server runs on its own thread with a current-thread runtime, so the
/// blocking client can be driven from the test thread.
pub fn spawn_test_server() -> String {
    let (tx, rx) = mpsc::channel();

    std::thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("runtime should build");
        runtime.block_on(async move {
            let app = Router::new()
                .route(
                    "/query",
                    get(|| async { ([(header::CONTENT_TYPE, "application/json")], SAMPLE) }),
                )
                .route(
                    "/empty",
                    get(|| async {
                        (
                            [(header::CONTENT_TYPE, "application/json")],
                            r#"{"type":"FeatureCollection","features":[]}"#,
                        )
                    }),
                )
                .route("/garbage", get(|| async { "<html>not json</html>" }))
                .route("/error", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }));

            let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                .await
                .expect("listener should bind");
            let address = listener.local_addr().expect("local addr should exist");
            tx.send(address).expect("test should be waiting for address");
            axum::serve(listener, app).await.expect("server should run");
        });
    });

    let address = rx.recv().expect("server should report its address");
    format!("http://{address}")
}

/// A URL on a port nothing listens on.
pub fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("listener should bind");
    let address = listener.local_addr().expect("local addr should exist");
    drop(listener);
    format!("http://{address}/query")
}
