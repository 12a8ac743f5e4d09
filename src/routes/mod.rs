use std::sync::Arc;

use axum::{
    Router,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use doceencomenda_lead::{DeepLink, LeadForms, SubmissionStrategy};

use crate::template::{NotFoundTemplate, Template};

mod health;
pub mod landing;
pub mod lead;
pub mod whatsapp;

#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub forms: LeadForms,
    pub whatsapp: DeepLink,
}

impl AppState {
    pub fn new(config: crate::config::Config, strategy: Arc<dyn SubmissionStrategy>) -> Self {
        let forms = LeadForms::new(strategy, config.lead.max_tracked_forms);
        let whatsapp = DeepLink::new(&config.lead.whatsapp);

        Self {
            config,
            forms,
            whatsapp,
        }
    }
}

pub async fn fallback(template: Template) -> impl IntoResponse {
    (StatusCode::NOT_FOUND, template.render(NotFoundTemplate))
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/", get(landing::page))
        .route("/leads", post(lead::action))
        .route("/leads/{form_id}/reset", post(lead::reset))
        .route("/whatsapp/{intent}", get(whatsapp::open))
        .nest_service("/static", crate::assets::AssetsService::new())
        .fallback(fallback)
        .with_state(app_state)
}
