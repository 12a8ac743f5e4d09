use async_trait::async_trait;
use doceencomenda_shared::bail;
use url::Url;

use crate::{Ack, Lead, StrategyKind, SubmissionStrategy, WhatsappConfig};

/// Builds WhatsApp chat links pre-filled with a message.
#[derive(Debug, Clone)]
pub struct DeepLink {
    base_url: String,
    phone: Option<String>,
}

impl DeepLink {
    pub fn new(config: &WhatsappConfig) -> Self {
        // Only digits are meaningful to the messaging app ("+55 (11) 9..." included).
        let phone = config
            .phone
            .as_deref()
            .map(|p| p.chars().filter(char::is_ascii_digit).collect::<String>())
            .filter(|p| !p.is_empty());

        if phone.is_none() {
            tracing::warn!("whatsapp phone not configured, deep links are disabled");
        }

        Self {
            base_url: config.base_url.trim_end_matches(['?', '/']).to_owned(),
            phone,
        }
    }

    /// Deep link opening a chat with `message` typed in.
    pub fn url(&self, message: &str) -> doceencomenda_shared::Result<Url> {
        let Some(phone) = self.phone.as_deref() else {
            tracing::error!("whatsapp phone missing, deep link not generated");
            bail!(config: "whatsapp phone is not configured");
        };

        let raw = format!(
            "{}?phone={phone}&text={}",
            self.base_url,
            urlencoding::encode(message)
        );

        match Url::parse(&raw) {
            Ok(url) => Ok(url),
            Err(err) => bail!(config: "invalid whatsapp base url {}: {err}", self.base_url),
        }
    }
}

pub fn lead_message(lead: &Lead) -> String {
    match lead.name.as_deref() {
        Some(name) => format!(
            "Olá! Meu nome é {name} e quero organizar meus pedidos com o Doce Encomenda. Meu email: {}",
            lead.email
        ),
        None => format!(
            "Olá! Quero organizar meus pedidos com o Doce Encomenda. Meu email: {}",
            lead.email
        ),
    }
}

#[async_trait]
impl SubmissionStrategy for DeepLink {
    fn kind(&self) -> StrategyKind {
        StrategyKind::DeepLink
    }

    async fn submit(&self, lead: &Lead) -> doceencomenda_shared::Result<Ack> {
        let url = self.url(&lead_message(lead))?;

        Ok(Ack::Opened(url))
    }
}
