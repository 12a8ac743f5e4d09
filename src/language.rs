use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use axum_extra::extract::CookieJar;

pub const DEFAULT_LANGUAGE: &str = "pt-BR";
pub const SUPPORTED_LANGUAGES: [&str; 2] = ["pt-BR", "en"];

/// Languages the visitor accepts, best first, from the `lang` cookie then
/// `Accept-Language`.
#[derive(Debug, Clone, Default)]
pub struct UserLanguage(Vec<String>);

impl UserLanguage {
    pub fn from_header(cookie: Option<&str>, accept_language: Option<&str>) -> Self {
        let mut languages = Vec::new();

        if let Some(lang) = cookie.map(str::trim).filter(|v| !v.is_empty()) {
            languages.push(lang.to_owned());
        }

        let mut weighted = accept_language
            .unwrap_or_default()
            .split(',')
            .filter_map(|part| {
                let mut it = part.trim().split(';');
                let tag = it.next()?.trim();
                if tag.is_empty() || tag == "*" {
                    return None;
                }

                let quality = it
                    .find_map(|p| p.trim().strip_prefix("q="))
                    .and_then(|q| q.parse::<f32>().ok())
                    .unwrap_or(1.0);

                Some((tag.to_owned(), quality))
            })
            .collect::<Vec<_>>();

        // stable: equal weights keep header order
        weighted.sort_by(|a, b| b.1.total_cmp(&a.1));
        languages.extend(weighted.into_iter().map(|(tag, _)| tag));

        Self(languages)
    }

    pub fn preferred_languages(&self) -> &[String] {
        &self.0
    }

    /// First accepted language we have translations for.
    pub fn supported(&self) -> &'static str {
        self.0
            .iter()
            .find_map(|tag| {
                let tag = tag.to_ascii_lowercase();
                if tag.starts_with("pt") {
                    Some("pt-BR")
                } else if tag == "en" || tag.starts_with("en-") {
                    Some("en")
                } else {
                    None
                }
            })
            .unwrap_or(DEFAULT_LANGUAGE)
    }
}

impl<S: Send + Sync> FromRequestParts<S> for UserLanguage {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_request_parts(parts, state).await?;
        let accept_language = parts
            .headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|v| v.to_str().ok());

        Ok(Self::from_header(
            jar.get("lang").map(|c| c.value()),
            accept_language,
        ))
    }
}
