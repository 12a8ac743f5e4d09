use axum::{
    extract::{Form, Path, State},
    http::{HeaderMap, HeaderValue},
    response::{Html, IntoResponse, Response},
};
use doceencomenda_lead::{Ack, FormView, Notification, Outcome, StrategyKind};
use serde::Deserialize;
use ulid::Ulid;

use crate::{
    routes::{AppState, landing::LandingTemplate},
    template::{Template, ToastErrorTemplate, ToastSuccessTemplate, filters},
};

/// Header sent by the page script; such requests get a fragment back.
pub const FETCH_HEADER: &str = "x-requested-with";
/// Response header telling the page script to keep the current form.
pub const SWAP_HEADER: &str = "x-lead-swap";

#[derive(askama::Template)]
#[template(path = "partials/lead-form.html")]
pub struct LeadFormTemplate {
    pub form_id: String,
    pub name: String,
    pub email: String,
    pub name_error: Option<String>,
    pub email_error: Option<String>,
}

impl LeadFormTemplate {
    pub fn fresh() -> Self {
        Self {
            form_id: Ulid::new().to_string(),
            name: String::new(),
            email: String::new(),
            name_error: None,
            email_error: None,
        }
    }

    fn with_values(form_id: &str, name: &str, email: &str) -> Self {
        Self {
            form_id: form_id.to_owned(),
            name: name.to_owned(),
            email: email.to_owned(),
            name_error: None,
            email_error: None,
        }
    }

    fn from_view(template: &Template, form_id: &str, view: &FormView) -> Self {
        let mut form = Self::with_values(form_id, &view.name, &view.email);

        for (field, key) in view.errors.iter() {
            match field {
                "name" => form.name_error = Some(template.t(key)),
                "email" => form.email_error = Some(template.t(key)),
                _ => {}
            }
        }

        form
    }
}

#[derive(askama::Template)]
#[template(path = "partials/lead-success.html")]
pub struct LeadSuccessTemplate {
    pub form_id: String,
    pub message: String,
    pub deep_link: Option<String>,
    pub signup_url: Option<String>,
}

#[derive(Deserialize)]
pub struct ActionInput {
    #[serde(default)]
    pub form_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

fn wants_fragment(headers: &HeaderMap) -> bool {
    headers
        .get(FETCH_HEADER)
        .is_some_and(|v| v.as_bytes().eq_ignore_ascii_case(b"fetch"))
}

/// Form ids are minted by the server; anything else gets a new one.
fn form_id(raw: &str) -> String {
    match Ulid::from_string(raw.trim()) {
        Ok(id) => id.to_string(),
        Err(_) => Ulid::new().to_string(),
    }
}

fn respond(template: &Template, fragment: bool, form: String, toast: Option<String>) -> Response {
    if fragment {
        return Html(format!("{form}{}", toast.unwrap_or_default())).into_response();
    }

    template.render(LandingTemplate::new(form, toast))
}

fn error_toast(template: &Template, message: &str) -> String {
    template.to_string(ToastErrorTemplate {
        message: &template.t("submission_error"),
        description: Some(message),
    })
}

fn notification_toast(template: &Template, notification: &Notification) -> String {
    match notification {
        Notification::Success(key) => template.to_string(ToastSuccessTemplate {
            message: &template.t(key),
            description: Some(&template.t("submission_succeeded_description")),
        }),
        Notification::Error(notice) => error_toast(template, &template.notice(notice)),
    }
}

fn success_panel(template: &Template, app: &AppState, form_id: String, ack: &Ack) -> String {
    let message = match app.forms.strategy().kind() {
        StrategyKind::RemoteApi => template.t("lead_success_stored"),
        StrategyKind::DeepLink => template.t("lead_success_opened"),
    };

    template.to_string(LeadSuccessTemplate {
        form_id,
        message,
        deep_link: ack.deep_link().map(|url| url.to_string()),
        signup_url: app.config.app.signup_url().map(str::to_owned),
    })
}

pub async fn action(
    template: Template,
    headers: HeaderMap,
    State(app): State<AppState>,
    Form(input): Form<ActionInput>,
) -> impl IntoResponse {
    let fragment = wants_fragment(&headers);
    let form_id = form_id(&input.form_id);
    let form = app.forms.open(&form_id).await;

    let outcome = form
        .submit(input.name.to_owned(), input.email.to_owned())
        .await;

    match outcome {
        Outcome::Submitted(ack) => {
            tracing::info!(form_id = %form_id, "lead form submitted");

            let view = form.view().await;
            let success = success_panel(&template, &app, form_id, &ack);
            let toast = view.notification.as_ref().map(|n| notification_toast(&template, n));

            respond(&template, fragment, success, toast)
        }
        Outcome::AlreadySubmitted(ack) => {
            tracing::debug!(form_id = %form_id, "lead form already submitted");

            let success = success_panel(&template, &app, form_id, &ack);

            respond(&template, fragment, success, None)
        }
        Outcome::Invalid(errors) => {
            tracing::debug!(form_id = %form_id, fields = errors.len(), "lead form rejected");

            let view = form.view().await;
            app.forms.close(&form_id).await;

            let form = template.to_string(LeadFormTemplate::from_view(&template, &form_id, &view));

            respond(&template, fragment, form, None)
        }
        Outcome::Failed(_) => {
            let view = form.view().await;
            app.forms.close(&form_id).await;

            let toast = view.notification.as_ref().map(|n| notification_toast(&template, n));
            let form = template.to_string(LeadFormTemplate::from_view(&template, &form_id, &view));

            respond(&template, fragment, form, toast)
        }
        Outcome::Suppressed => {
            tracing::debug!(form_id = %form_id, "lead form already in flight");

            let toast = error_toast(&template, &template.t("submission_in_progress"));

            if fragment {
                let mut res = Html(toast).into_response();
                res.headers_mut()
                    .insert(SWAP_HEADER, HeaderValue::from_static("skip"));

                return res;
            }

            let form = template.to_string(LeadFormTemplate::with_values(
                &form_id,
                &input.name,
                &input.email,
            ));

            respond(&template, fragment, form, Some(toast))
        }
    }
}

pub async fn reset(
    template: Template,
    headers: HeaderMap,
    State(app): State<AppState>,
    Path(form_id): Path<String>,
) -> impl IntoResponse {
    let fragment = wants_fragment(&headers);

    if let Some(form) = app.forms.get(&form_id).await {
        if !form.reset().await {
            let toast = error_toast(&template, &template.t("submission_in_progress"));
            let mut res = Html(toast).into_response();
            res.headers_mut()
                .insert(SWAP_HEADER, HeaderValue::from_static("skip"));

            return res;
        }

        app.forms.close(&form_id).await;
    }

    let form = template.to_string(LeadFormTemplate::fresh());

    respond(&template, fragment, form, None)
}

