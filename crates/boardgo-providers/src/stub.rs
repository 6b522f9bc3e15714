//! Local HTTP server standing in for a provider API in tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::http::{header::AUTHORIZATION, HeaderMap, Method, StatusCode, Uri};
use axum::{Form, Router};

/// One request received by a [`StubServer`].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    /// Query parameters for GET, form fields for POST.
    pub fields: HashMap<String, String>,
    pub authorization: Option<String>,
}

/// Answers every request with a fixed status and body.
pub struct StubServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl StubServer {
    pub async fn start(status: StatusCode, body: &'static str) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = requests.clone();

        let app = Router::new().fallback(
            move |method: Method,
                  uri: Uri,
                  headers: HeaderMap,
                  Form(fields): Form<HashMap<String, String>>| {
                let recorded = recorded.clone();
                async move {
                    let authorization = headers
                        .get(AUTHORIZATION)
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_string);
                    recorded.lock().unwrap().push(RecordedRequest {
                        method,
                        path: uri.path().to_string(),
                        fields,
                        authorization,
                    });
                    (status, body)
                }
            },
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            requests,
        }
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}
