#![allow(dead_code)]
use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::Router;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

#[derive(Clone)]
struct RelayState {
    status: StatusCode,
    body: Arc<String>,
    requests: Arc<Mutex<Vec<String>>>,
}

/// HTTP relay stand-in serving one fixed status and body for every path.
pub struct MockRelay {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<String>>>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockRelay {
    pub async fn start(status: StatusCode, body: impl Into<String>) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = RelayState {
            status,
            body: Arc::new(body.into()),
            requests: requests.clone(),
        };

        let app = Router::new().fallback(serve).with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
                .ok();
        });

        Self {
            addr,
            requests,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    pub fn remote(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl Drop for MockRelay {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

async fn serve(State(state): State<RelayState>, uri: Uri) -> (StatusCode, String) {
    state.requests.lock().unwrap().push(uri.path().to_string());
    (state.status, state.body.as_ref().clone())
}
