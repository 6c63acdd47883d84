//! Remote access to the Data Share management API.

use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::config::LookupConfig;
use crate::error::DatashareError;
use crate::model::{ArmErrorResponse, DataSet};

/// Failure of a single "get dataset" call, before lookup context is attached.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("dataset not found")]
    NotFound,

    #[error("unexpected status {status}: {code}: {message}")]
    Status {
        status: u16,
        code: String,
        message: String,
    },

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("failed to decode response: {0}")]
    Decode(String),
}

/// Fetches a single dataset of a share.
pub trait DataSetClient {
    fn get(
        &self,
        resource_group: &str,
        account_name: &str,
        share_name: &str,
        data_set_name: &str,
    ) -> Result<DataSet, ClientError>;
}

/// [`DataSetClient`] backed by the Azure Resource Manager REST API.
pub struct ArmDataSetClient {
    agent: ureq::Agent,
    endpoint: Url,
    api_version: String,
    subscription_id: String,
    token: Option<String>,
    timeout: Duration,
}

impl ArmDataSetClient {
    pub fn new(config: &LookupConfig, subscription_id: &str) -> Result<Self, DatashareError> {
        config.validate()?;
        let endpoint = Url::parse(&config.endpoint).map_err(|source| {
            DatashareError::Config(format!("invalid endpoint '{}': {source}", config.endpoint))
        })?;

        let agent_config = ureq::Agent::config_builder()
            .timeout_global(Some(config.read_timeout))
            .http_status_as_error(false)
            .build();

        Ok(Self {
            agent: agent_config.into(),
            endpoint,
            api_version: config.api_version.clone(),
            subscription_id: subscription_id.to_string(),
            token: config.token.clone(),
            timeout: config.read_timeout,
        })
    }

    /// Build the resource URL of a dataset.
    pub fn data_set_url(
        &self,
        resource_group: &str,
        account_name: &str,
        share_name: &str,
        data_set_name: &str,
    ) -> Result<Url, ClientError> {
        let mut url = self.endpoint.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                ClientError::Transport(format!("endpoint '{}' cannot be a base URL", self.endpoint))
            })?;
            segments.pop_if_empty().extend([
                "subscriptions",
                self.subscription_id.as_str(),
                "resourceGroups",
                resource_group,
                "providers",
                "Microsoft.DataShare",
                "accounts",
                account_name,
                "shares",
                share_name,
                "dataSets",
                data_set_name,
            ]);
        }
        url.query_pairs_mut()
            .append_pair("api-version", &self.api_version);
        Ok(url)
    }

    fn transport_error(&self, source: ureq::Error) -> ClientError {
        match source {
            ureq::Error::Timeout(_) => ClientError::Timeout(self.timeout),
            ureq::Error::Io(err) if err.kind() == std::io::ErrorKind::TimedOut => {
                ClientError::Timeout(self.timeout)
            }
            other => ClientError::Transport(other.to_string()),
        }
    }
}

impl DataSetClient for ArmDataSetClient {
    fn get(
        &self,
        resource_group: &str,
        account_name: &str,
        share_name: &str,
        data_set_name: &str,
    ) -> Result<DataSet, ClientError> {
        let url = self.data_set_url(resource_group, account_name, share_name, data_set_name)?;
        tracing::debug!(url = %url, "requesting data share dataset");

        let mut request = self.agent.get(url.as_str());
        if let Some(token) = self.token.as_deref() {
            request = request.header("Authorization", &format!("Bearer {token}"));
        }

        let mut response = request
            .call()
            .map_err(|source| self.transport_error(source))?;

        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|source| self.transport_error(source))?;
        tracing::debug!(status, bytes = body.len(), "received response");

        decode_response(status, &body)
    }
}

/// Turn a raw HTTP status and body into a dataset or a [`ClientError`].
pub fn decode_response(status: u16, body: &str) -> Result<DataSet, ClientError> {
    match status {
        200..=299 => {
            serde_json::from_str(body).map_err(|source| ClientError::Decode(source.to_string()))
        }
        404 => Err(ClientError::NotFound),
        _ => {
            let detail = serde_json::from_str::<ArmErrorResponse>(body)
                .map(|parsed| parsed.error)
                .unwrap_or_default();
            let message = if detail.message.is_empty() {
                body.trim().to_string()
            } else {
                detail.message
            };
            Err(ClientError::Status {
                status,
                code: detail.code,
                message,
            })
        }
    }
}
