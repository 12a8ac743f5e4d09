use axum::{
    RequestPartsExt,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{Html, IntoResponse, Response},
};
use doceencomenda_shared::Notice;
use std::{collections::HashMap, convert::Infallible};

use crate::language::{DEFAULT_LANGUAGE, UserLanguage};

pub(crate) mod filters {
    #[askama::filter_fn]
    pub fn t(value: &str, values: &dyn askama::Values) -> askama::Result<String> {
        let preferred_language = askama::get_value::<String>(values, "preferred_language")?;

        Ok(rust_i18n::t!(value, locale = preferred_language).to_string())
    }
}

pub struct Template {
    preferred_language: &'static str,
}

impl Template {
    pub fn new(preferred_language: &'static str) -> Self {
        Self { preferred_language }
    }

    pub fn preferred_language(&self) -> &'static str {
        self.preferred_language
    }

    fn render_with_values<T: askama::Template>(
        &self,
        template: T,
    ) -> Result<String, askama::Error> {
        let mut values: HashMap<&str, Box<dyn std::any::Any>> = HashMap::new();
        values.insert(
            "preferred_language",
            Box::new(self.preferred_language.to_owned()),
        );

        template.render_with_values(&values)
    }

    pub fn to_string<T: askama::Template>(&self, template: T) -> String {
        match self.render_with_values(template) {
            Ok(html) => html,
            Err(err) => {
                tracing::error!("Failed to render template: {err}");
                String::new()
            }
        }
    }

    pub fn render<T: askama::Template>(&self, template: T) -> Response {
        match self.render_with_values(template) {
            Ok(html) => Html(html).into_response(),
            Err(err) => {
                tracing::error!("Failed to render template: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to render template. Error: {err}"),
                )
                    .into_response()
            }
        }
    }

    pub fn t(&self, key: &str) -> String {
        rust_i18n::t!(key, locale = self.preferred_language).to_string()
    }

    /// Visitor-facing text for a failure notice.
    pub fn notice(&self, notice: &Notice) -> String {
        match notice {
            Notice::Key(key) => self.t(key),
            Notice::Verbatim(message) => message.to_owned(),
        }
    }
}

impl Default for Template {
    fn default() -> Self {
        Self::new(DEFAULT_LANGUAGE)
    }
}

impl<S: Send + Sync> FromRequestParts<S> for Template {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_language = parts.extract::<UserLanguage>().await?;

        Ok(Template::new(user_language.supported()))
    }
}

#[derive(askama::Template)]
#[template(path = "404.html")]
pub struct NotFoundTemplate;

#[derive(askama::Template)]
#[template(path = "500.html")]
pub struct ServerTemplate {
    pub message: String,
}

#[derive(askama::Template)]
#[template(path = "partials/toast-success.html")]
pub struct ToastSuccessTemplate<'a> {
    pub message: &'a str,
    pub description: Option<&'a str>,
}

#[derive(askama::Template)]
#[template(path = "partials/toast-error.html")]
pub struct ToastErrorTemplate<'a> {
    pub message: &'a str,
    pub description: Option<&'a str>,
}

#[macro_export]
macro_rules! try_page_response {
    ($result:expr, $template:expr) => {
        $crate::try_page_response!(sync: $result.await, $template)
    };

    (sync: $result:expr, $template:expr) => {
        match $result {
            Ok(r) => r,
            Err(err) => {
                let status = match &err {
                    doceencomenda_shared::Error::Configuration(_) => {
                        tracing::error!("{err}");
                        axum::http::StatusCode::SERVICE_UNAVAILABLE
                    }
                    doceencomenda_shared::Error::Unknown(_) => {
                        tracing::error!("{err}");
                        axum::http::StatusCode::INTERNAL_SERVER_ERROR
                    }
                    _ => {
                        tracing::warn!("{err}");
                        axum::http::StatusCode::BAD_GATEWAY
                    }
                };

                let message = $template.notice(&err.notice());

                return (
                    status,
                    $template.render($crate::template::ServerTemplate { message }),
                )
                    .into_response();
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_translation() {
        let pt = Template::new("pt-BR");
        let en = Template::new("en");

        let generic = Notice::Key(doceencomenda_shared::SUBMISSION_FAILED);
        assert_eq!(pt.notice(&generic), "Falha ao registrar interesse");
        assert_eq!(en.notice(&generic), "Could not register your interest");

        let verbatim = Notice::Verbatim("Email já cadastrado".to_owned());
        assert_eq!(en.notice(&verbatim), "Email já cadastrado");
    }

    #[test]
    fn test_validation_fallback_and_success_copy() {
        let pt = Template::new("pt-BR");

        let fallback = Notice::Key(doceencomenda_shared::VALIDATION_FAILED);
        assert_eq!(pt.notice(&fallback), "Erro de validação");
        assert_eq!(pt.t("submission_succeeded"), "Sucesso!");
        assert_eq!(
            pt.t("submission_succeeded_description"),
            "Você entrou na lista de espera. Avisaremos em breve!"
        );
    }

    #[test]
    fn test_toast_renders_message() {
        let html = Template::default().to_string(ToastErrorTemplate {
            message: "Falha ao registrar interesse",
            description: None,
        });

        assert!(html.contains("Falha ao registrar interesse"));
        assert!(html.contains("toast-error"));
    }
}
