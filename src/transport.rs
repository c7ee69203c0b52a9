//! HTTP transport handle.
//!
//! One [`Transport`] per sink, built exactly once when the worker starts
//! and reused for every delivery. Process-wide default timeouts are
//! applied first, then the compiled options override them, so nothing is
//! reconfigured on the delivery path.

use std::time::Duration;

use bytes::Bytes;
use reqwest::{Body, Client};
use tracing::debug;

use crate::body::MessageBody;
use crate::error::AlarmError;
use crate::options::SinkOptions;

/// Reusable HTTP(S) client bound to one sink's compiled options.
///
/// Owned and used only by the sink's worker; never shared.
pub struct Transport {
    /// The configured client, reused across deliveries.
    client: Client,

    /// Target endpoint. `None` makes every delivery fail, not the build:
    /// a sink with no endpoint stays alive and reports the problem once
    /// per fired alarm.
    url: Option<String>,

    /// Basic-auth credentials, attached per request when present.
    auth_user: Option<String>,
    auth_pass: Option<String>,

    /// Body chunk granularity handed to [`MessageBody`].
    chunk_size: usize,
}

impl Transport {
    /// Build the transport from compiled options over process-wide
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns [`AlarmError::Init`] if the underlying client cannot be
    /// constructed. That is fatal to the one sink.
    pub fn build(
        options: &SinkOptions,
        default_timeout: Duration,
        chunk_size: usize,
    ) -> Result<Self, AlarmError> {
        let mut builder = Client::builder()
            .connect_timeout(options.connect_timeout.unwrap_or(default_timeout))
            .timeout(options.timeout.unwrap_or(default_timeout));

        if options.force_tls {
            builder = builder.https_only(true);
        }

        let client = builder.build().map_err(|e| AlarmError::init(e.to_string()))?;

        debug!(
            url = options.url.as_deref().unwrap_or("<unset>"),
            force_tls = options.force_tls,
            "alarm transport ready"
        );

        Ok(Self {
            client,
            url: options.url.clone(),
            auth_user: options.auth_user.clone(),
            auth_pass: options.auth_pass.clone(),
            chunk_size,
        })
    }

    /// The endpoint this transport delivers to, if one was configured.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Perform one delivery: stream the marker-prefixed message to the
    /// endpoint and wait for the response.
    ///
    /// # Errors
    ///
    /// [`AlarmError::NoEndpoint`] if the option string named no URL;
    /// [`AlarmError::Transport`] for connect errors, timeouts, invalid
    /// URLs and error statuses, as classified by the client itself.
    pub async fn deliver(&self, message: Bytes) -> Result<(), AlarmError> {
        let url = self.url.as_deref().ok_or(AlarmError::NoEndpoint)?;

        let body = Body::wrap_stream(MessageBody::new(message, self.chunk_size));
        let mut request = self.client.post(url).body(body);

        if self.auth_user.is_some() || self.auth_pass.is_some() {
            request = request.basic_auth(
                self.auth_user.as_deref().unwrap_or(""),
                self.auth_pass.as_deref(),
            );
        }

        let response = request.send().await?;
        response.error_for_status()?;
        Ok(())
    }
}

impl std::fmt::Debug for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transport")
            .field("url", &self.url)
            .field("chunk_size", &self.chunk_size)
            .finish()
    }
}

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;
