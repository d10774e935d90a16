// src/testing.rs
//! Local HTTP server for exercising the service clients in tests.

use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::Router;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: Method,
    pub uri: String,
    pub authorization: Option<String>,
    pub body: String,
}

pub struct MockServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
    shutdown: Option<oneshot::Sender<()>>,
}

impl MockServer {
    /// Answer every request with `status` and `body`, recording what was sent.
    pub async fn start(status: u16, body: &'static str) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = requests.clone();

        let app = Router::new().fallback(
            move |method: Method, uri: Uri, headers: HeaderMap, request_body: String| {
                let recorded = recorded.clone();
                async move {
                    recorded.lock().unwrap().push(CapturedRequest {
                        method,
                        uri: uri.to_string(),
                        authorization: headers
                            .get("authorization")
                            .and_then(|value| value.to_str().ok())
                            .map(str::to_string),
                        body: request_body,
                    });
                    (StatusCode::from_u16(status).unwrap(), body).into_response()
                }
            },
        );

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .ok();
        });

        Self {
            base_url,
            requests,
            shutdown: Some(shutdown_tx),
        }
    }

    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            tx.send(()).ok();
        }
    }
}
