//! Identifier validator for Codewars accounts.
//!
//! A user exists when `GET {base}/users/{identifier}` answers 200 and does not
//! exist when it answers 404. Any other status is inconclusive.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::debug;

use crate::connect::{
    domain::ServiceIdentifier,
    ports::{IdentifierValidationError, IdentifierValidator},
};

/// Public Codewars API root.
pub const CODEWARS_API_URL: &str = "https://www.codewars.com/api/v1";

/// HTTP client for the Codewars users endpoint.
#[derive(Debug, Clone)]
pub struct CodewarsClient {
    http: Client,
    base_url: Url,
}

impl CodewarsClient {
    /// Creates a client for the public API.
    ///
    /// # Errors
    ///
    /// Returns [`IdentifierValidationError::Transport`] when the HTTP client
    /// cannot be built.
    pub fn new(timeout: Duration) -> Result<Self, IdentifierValidationError> {
        Self::with_base_url(CODEWARS_API_URL, timeout)
    }

    /// Creates a client for an alternative API root.
    ///
    /// # Errors
    ///
    /// Returns [`IdentifierValidationError::Transport`] when the URL is
    /// invalid or the HTTP client cannot be built.
    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self, IdentifierValidationError> {
        let parsed = Url::parse(base_url).map_err(IdentifierValidationError::transport)?;
        if parsed.cannot_be_a_base() {
            return Err(IdentifierValidationError::transport(std::io::Error::other(
                format!("{base_url} cannot be used as an API root"),
            )));
        }
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(IdentifierValidationError::transport)?;
        Ok(Self {
            http,
            base_url: parsed,
        })
    }

    fn user_url(&self, identifier: &ServiceIdentifier) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .push("users")
                .push(identifier.as_str());
        }
        url
    }
}

#[async_trait]
impl IdentifierValidator for CodewarsClient {
    async fn is_valid_identifier(
        &self,
        identifier: &ServiceIdentifier,
    ) -> Result<bool, IdentifierValidationError> {
        let url = self.user_url(identifier);
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(IdentifierValidationError::transport)?;

        let status = response.status();
        debug!(%identifier, %status, "checked codewars user");
        match status {
            StatusCode::OK => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            other => Err(IdentifierValidationError::UnexpectedStatus(other.as_u16())),
        }
    }
}
