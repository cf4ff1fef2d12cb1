//! HTTP data source for the branch statistics endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::debug;

use super::{DataSource, FetchError};
use crate::config::ConfigError;
use crate::models::{Route, RouteSnapshot};

/// Fetches snapshots with `GET <endpoint>?route=<route>`.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    endpoint: Url,
}

impl HttpSource {
    /// Creates a source for the given endpoint URL.
    ///
    /// `timeout` bounds each request, including reading the body.
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, ConfigError> {
        let endpoint = Url::parse(endpoint.trim())
            .map_err(|e| ConfigError::InvalidEndpoint(format!("{}: {}", endpoint, e)))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidEndpoint(format!(
                "{}: only http and https are supported",
                endpoint
            )));
        }
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ConfigError::InvalidEndpoint(e.to_string()))?;
        Ok(Self { client, endpoint })
    }

    /// Creates a source around an already configured client.
    pub fn with_client(endpoint: Url, client: Client) -> Self {
        Self { client, endpoint }
    }

    /// Builds the request URL for a route.
    pub fn route_url(&self, route: Route) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("route", route.wire_name());
        url
    }
}

#[async_trait]
impl DataSource for HttpSource {
    async fn fetch(&self, route: Route) -> Result<RouteSnapshot, FetchError> {
        let url = self.route_url(route);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        debug!(route = %route, bytes = body.len(), "response received");

        RouteSnapshot::from_json(&body).map_err(|e| FetchError::Decode(e.to_string()))
    }

    fn describe(&self) -> String {
        match self.endpoint.host_str() {
            Some(host) => host.to_string(),
            None => self.endpoint.to_string(),
        }
    }
}
