use async_trait::async_trait;
use doceencomenda_shared::{Error, bail};
use reqwest::StatusCode;
use serde::Deserialize;
use url::Url;

use crate::{Ack, Lead, StrategyKind, SubmissionStrategy};

/// Posts leads as JSON to the create-lead endpoint of the lead API.
pub struct RemoteApi {
    client: reqwest::Client,
    endpoint: Option<Url>,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl RemoteApi {
    pub fn new(client: reqwest::Client, endpoint: Option<&str>) -> Self {
        let endpoint = endpoint
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .and_then(|v| match Url::parse(v) {
                Ok(url) => Some(url),
                Err(err) => {
                    tracing::error!(endpoint = v, "invalid lead api url: {err}");
                    None
                }
            });

        if endpoint.is_none() {
            tracing::warn!("lead api url not configured, submissions will fail");
        }

        Self { client, endpoint }
    }
}

#[async_trait]
impl SubmissionStrategy for RemoteApi {
    fn kind(&self) -> StrategyKind {
        StrategyKind::RemoteApi
    }

    async fn submit(&self, lead: &Lead) -> doceencomenda_shared::Result<Ack> {
        let Some(endpoint) = self.endpoint.as_ref() else {
            tracing::error!("lead api url missing, lead not sent");
            bail!(config: "lead api url is not configured");
        };

        let res = match self.client.post(endpoint.clone()).json(lead).send().await {
            Ok(res) => res,
            Err(err) => bail!(transport: "lead api unreachable: {err}"),
        };

        let status = res.status();

        if status == StatusCode::BAD_REQUEST {
            let message = res
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.message)
                .filter(|m| !m.trim().is_empty());

            return Err(Error::ServerValidation(message));
        }

        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            bail!(transport: "lead api answered {status}: {body}");
        }

        let body = res.bytes().await.map_err(|err| Error::Transport(err.to_string()))?;
        let value = match serde_json::from_slice(&body) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!("lead api success body is not json: {err}");
                serde_json::Value::Null
            }
        };

        Ok(Ack::Stored(value))
    }
}
