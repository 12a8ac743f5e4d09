#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, header},
    response::Response,
};
use doceencomenda::{
    AppState, Config,
    config::{AppConfig, LoggingConfig, ServerConfig},
};
use doceencomenda_lead::{LeadConfig, StrategyKind, SubmissionStrategy};
use http_body_util::BodyExt;
use tower::ServiceExt;

// The lead API stand-in and test strategies live with the lead crate's tests.
#[path = "../../crates/lead/tests/helpers/mod.rs"]
mod lead;

pub use lead::{CountingStrategy, spawn_lead_api};

pub const PHONE: &str = "5511999999999";

pub fn config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_owned(),
            port: 3000,
        },
        lead: LeadConfig::default(),
        app: AppConfig::default(),
        logging: LoggingConfig::default(),
    }
}

pub fn deep_link_config(phone: Option<&str>) -> Config {
    let mut config = config();
    config.lead.strategy = StrategyKind::DeepLink;
    config.lead.whatsapp.phone = phone.map(str::to_owned);
    config
}

pub fn remote_api_config(api_url: &str) -> Config {
    let mut config = config();
    config.lead.strategy = StrategyKind::RemoteApi;
    config.lead.api_url = Some(api_url.to_owned());
    config
}

/// Router wired the way `serve` wires it, strategy taken from the config.
pub fn app(config: Config) -> anyhow::Result<Router> {
    let strategy = doceencomenda_lead::build_strategy(&config.lead)?;

    Ok(app_with(config, strategy))
}

pub fn app_with(config: Config, strategy: Arc<dyn SubmissionStrategy>) -> Router {
    doceencomenda::router(AppState::new(config, strategy))
}

pub fn get(uri: &str) -> anyhow::Result<Request<Body>> {
    Ok(Request::builder().uri(uri).body(Body::empty())?)
}

pub fn get_with_language(uri: &str, accept_language: &str) -> anyhow::Result<Request<Body>> {
    Ok(Request::builder()
        .uri(uri)
        .header(header::ACCEPT_LANGUAGE, accept_language)
        .body(Body::empty())?)
}

pub fn post_form(uri: &str, fields: &[(&str, &str)], fetch: bool) -> anyhow::Result<Request<Body>> {
    let body = serde_urlencoded::to_string(fields)?;
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");

    if fetch {
        builder = builder.header("x-requested-with", "fetch");
    }

    Ok(builder.body(Body::from(body))?)
}

pub async fn send(app: &Router, req: Request<Body>) -> anyhow::Result<Response> {
    Ok(app.clone().oneshot(req).await?)
}

pub async fn body(res: Response) -> anyhow::Result<String> {
    let bytes = res.into_body().collect().await?.to_bytes();

    Ok(String::from_utf8(bytes.to_vec())?)
}

/// Pulls the form id out of a rendered lead form.
pub fn form_id(html: &str) -> Option<String> {
    let marker = r#"name="form_id" value=""#;
    let start = html.find(marker)? + marker.len();
    let end = html[start..].find('"')? + start;

    Some(html[start..end].to_owned())
}
