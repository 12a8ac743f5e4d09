#![allow(dead_code)]

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use axum::{
    Json, Router,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
    routing::post,
};
use doceencomenda_lead::{Ack, Lead, StrategyKind, SubmissionStrategy};
use tokio::sync::{Mutex, Notify};

/// Throwaway lead API answering every create-lead call the same way.
pub struct LeadApi {
    pub url: String,
    pub received: Arc<Mutex<Vec<serde_json::Value>>>,
}

#[derive(Clone)]
struct LeadApiState {
    status: StatusCode,
    body: &'static str,
    received: Arc<Mutex<Vec<serde_json::Value>>>,
}

async fn create_lead(
    State(state): State<LeadApiState>,
    Json(body): Json<serde_json::Value>,
) -> impl IntoResponse {
    state.received.lock().await.push(body);

    (
        state.status,
        [(header::CONTENT_TYPE, "application/json")],
        state.body,
    )
}

pub async fn spawn_lead_api(status: StatusCode, body: &'static str) -> anyhow::Result<LeadApi> {
    let received = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route("/api/leads", post(create_lead))
        .with_state(LeadApiState {
            status,
            body,
            received: received.clone(),
        });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Ok(LeadApi {
        url: format!("http://{addr}/api/leads"),
        received,
    })
}

/// Strategy counting calls, optionally held until released.
#[derive(Default)]
pub struct CountingStrategy {
    pub calls: AtomicUsize,
    pub gate: Option<Arc<Notify>>,
    pub entered: Arc<Notify>,
}

impl CountingStrategy {
    pub fn gated(gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SubmissionStrategy for CountingStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::RemoteApi
    }

    async fn submit(&self, lead: &Lead) -> doceencomenda_shared::Result<Ack> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.entered.notify_one();

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        Ok(Ack::Stored(serde_json::json!({ "email": lead.email })))
    }
}

/// Strategy that always fails with the given error.
pub struct FailingStrategy(pub fn() -> doceencomenda_shared::Error);

#[async_trait]
impl SubmissionStrategy for FailingStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::RemoteApi
    }

    async fn submit(&self, _lead: &Lead) -> doceencomenda_shared::Result<Ack> {
        Err((self.0)())
    }
}
