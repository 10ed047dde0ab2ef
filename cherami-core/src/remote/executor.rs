//! HTTP executor for remote actions.

use log::{debug, warn};
use reqwest::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Url;

use super::classifier::ErrorClassifier;
use super::error::Result;
use super::types::{RemoteOutcome, RemoteRequest};
use crate::config::ClientConfig;

/// Sends [`RemoteRequest`]s to the backend.
///
/// Each call to [`execute`](Self::execute) performs exactly one round trip
/// and always resolves to a [`RemoteOutcome`]. There is no retry, queueing,
/// or deduplication.
#[derive(Debug, Clone)]
pub struct RemoteExecutor {
    http: reqwest::Client,
    base_url: Url,
    classifier: ErrorClassifier,
}

impl RemoteExecutor {
    /// Creates an executor from the client configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self::with_client(http, config.base_url.clone()))
    }

    /// Creates an executor around an existing HTTP client.
    #[must_use]
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url,
            classifier: ErrorClassifier::default(),
        }
    }

    /// Replaces the error classifier.
    #[must_use]
    pub fn with_classifier(mut self, classifier: ErrorClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// The base URL requests are resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Sends `request`, attaching `auth_token` as the raw `Authorization`
    /// header when present.
    ///
    /// A 2xx response yields its body as [`RemoteOutcome::Success`]. Any
    /// other status, a transport failure, or a timeout goes through the
    /// classifier.
    pub async fn execute(
        &self,
        request: &RemoteRequest,
        auth_token: Option<&str>,
    ) -> RemoteOutcome<Vec<u8>> {
        let url = match self.base_url.join(&request.path) {
            Ok(url) => url,
            Err(e) => {
                warn!(
                    "event=request_invalid module=remote status=error path={} error={e}",
                    request.path
                );
                return RemoteOutcome::Failure(format!("invalid path `{}`", request.path));
            }
        };

        let mut builder = self.http.request(request.method.clone(), url);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        match auth_token.map(HeaderValue::from_str) {
            Some(Ok(mut value)) => {
                value.set_sensitive(true);
                builder = builder.header(AUTHORIZATION, value);
            }
            Some(Err(_)) => {
                warn!(
                    "event=token_rejected module=remote status=skipped path={} reason=invalid_header_value",
                    request.path
                );
            }
            None => {}
        }

        if let Some(body) = &request.body {
            builder = builder
                .header(CONTENT_TYPE, "application/json")
                .body(body.clone());
        }

        debug!(
            "event=request_start module=remote method={} path={} authorized={}",
            request.method,
            request.path,
            auth_token.is_some()
        );

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(
                    "event=request_failed module=remote status=transport method={} path={} timeout={} error={e}",
                    request.method,
                    request.path,
                    e.is_timeout()
                );
                return self.classifier.classify(None);
            }
        };

        let status = response.status();
        let body = match response.bytes().await {
            Ok(body) => body.to_vec(),
            Err(e) => {
                warn!(
                    "event=request_failed module=remote status=body method={} path={} error={e}",
                    request.method, request.path
                );
                return self.classifier.classify(None);
            }
        };

        debug!(
            "event=request_done module=remote method={} path={} status={} bytes={}",
            request.method,
            request.path,
            status.as_u16(),
            body.len()
        );

        if status.is_success() {
            RemoteOutcome::Success(body)
        } else {
            self.classifier.classify(Some(&body))
        }
    }
}
