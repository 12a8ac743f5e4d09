use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use strum::{AsRefStr, Display, EnumString};
use url::Url;

use crate::{DeepLink, Lead, RemoteApi};

/// What a strategy reports back once a lead has been handed over.
#[derive(Debug, Clone, PartialEq)]
pub enum Ack {
    /// The lead API accepted the lead, with its JSON response body.
    Stored(serde_json::Value),
    /// A messaging deep link was produced for the visitor to open.
    /// Delivery of the message is never confirmed.
    Opened(Url),
}

impl Ack {
    pub fn deep_link(&self) -> Option<&Url> {
        match self {
            Ack::Opened(url) => Some(url),
            Ack::Stored(_) => None,
        }
    }
}

#[async_trait]
pub trait SubmissionStrategy: Send + Sync {
    fn kind(&self) -> StrategyKind;

    async fn submit(&self, lead: &Lead) -> doceencomenda_shared::Result<Ack>;
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum StrategyKind {
    RemoteApi,
    #[default]
    DeepLink,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WhatsappConfig {
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default = "default_whatsapp_base_url")]
    pub base_url: String,
}

impl Default for WhatsappConfig {
    fn default() -> Self {
        Self {
            phone: None,
            base_url: default_whatsapp_base_url(),
        }
    }
}

fn default_whatsapp_base_url() -> String {
    "https://api.whatsapp.com/send".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct LeadConfig {
    #[serde(default)]
    pub strategy: StrategyKind,
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default = "default_max_tracked_forms")]
    pub max_tracked_forms: usize,
    #[serde(default)]
    pub whatsapp: WhatsappConfig,
}

impl Default for LeadConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::default(),
            api_url: None,
            max_tracked_forms: default_max_tracked_forms(),
            whatsapp: WhatsappConfig::default(),
        }
    }
}

fn default_max_tracked_forms() -> usize {
    10_000
}

/// Picks the submission strategy once, at start-up.
///
/// Missing destination values are not an error here: they surface as a
/// configuration failure on each submission instead.
pub fn build_strategy(config: &LeadConfig) -> anyhow::Result<Arc<dyn SubmissionStrategy>> {
    let strategy: Arc<dyn SubmissionStrategy> = match config.strategy {
        StrategyKind::RemoteApi => {
            let client = reqwest::Client::builder()
                .user_agent(concat!("doceencomenda/", env!("CARGO_PKG_VERSION")))
                .build()?;

            Arc::new(RemoteApi::new(client, config.api_url.as_deref()))
        }
        StrategyKind::DeepLink => Arc::new(DeepLink::new(&config.whatsapp)),
    };

    tracing::info!(strategy = %config.strategy, "lead submission strategy selected");

    Ok(strategy)
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn strategy_kind_parses_snake_case() {
        assert_eq!(
            StrategyKind::from_str("remote_api").unwrap(),
            StrategyKind::RemoteApi
        );
        assert_eq!(StrategyKind::DeepLink.to_string(), "deep_link");
    }

    #[test]
    fn build_strategy_follows_config() {
        let mut config = LeadConfig::default();
        assert_eq!(
            build_strategy(&config).unwrap().kind(),
            StrategyKind::DeepLink
        );

        config.strategy = StrategyKind::RemoteApi;
        assert_eq!(
            build_strategy(&config).unwrap().kind(),
            StrategyKind::RemoteApi
        );
    }
}
