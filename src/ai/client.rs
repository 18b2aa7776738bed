use reqwest::{header::ACCEPT, Client};
use url::Url;

use crate::{
    config::ClassifierConfig,
    domain::{OutboundRequest, ProcessedEmail},
};

use super::inference::{decode_body, endpoint_url, ProcessError};

/// Client for the external `/process-email` collaborator. One call, no retries, no timeout.
#[derive(Clone)]
pub struct ClassifierClient {
    http: Client,
    endpoint: Url,
}

impl ClassifierClient {
    pub fn new(http: Client, config: &ClassifierConfig) -> Result<Self, url::ParseError> {
        let endpoint = endpoint_url(&config.base_url)?;
        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub async fn process(&self, request: &OutboundRequest) -> Result<ProcessedEmail, ProcessError> {
        tracing::debug!(
            target: "classifier",
            endpoint = %self.endpoint,
            sender = request.sender(),
            subject = request.subject(),
            "posting email"
        );

        let response = self
            .http
            .post(self.endpoint.clone())
            .header(ACCEPT, "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.bytes().await?;
        decode_body(status, &body)
    }
}
