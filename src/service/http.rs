//! REST implementation of the gadget service.
//!
//! [`HttpGadgetService`] talks to the catalog backend over HTTP with
//! `reqwest`. Endpoints are resolved against the configured base URL:
//!
//! | Operation | Request                         |
//! |-----------|---------------------------------|
//! | list      | `GET    {base}/get-gadgets`       |
//! | get       | `GET    {base}/get-gadget/{id}`   |
//! | create    | `POST   {base}/post-gadget`       |
//! | update    | `PUT    {base}/put-gadget/{id}`   |
//! | delete    | `DELETE {base}/delete-gadget/{id}`|
//!
//! Bodies are decoded into typed structs and validated before they are
//! returned, so malformed payloads surface as [`CatalogError::Shape`] rather
//! than reaching the store. Every request carries a W3C `traceparent` header
//! when the current span has a valid OpenTelemetry context.

use super::backend::{validate_collection, GadgetService};
use crate::domain::error::{CatalogError, Result};
use crate::domain::{Gadget, GadgetInput};
use crate::observability::TraceContext;
use crate::Config;
use futures_util::future::BoxFuture;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

/// Error body some backends send alongside a non-2xx status.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(alias = "error")]
    message: String,
}

/// HTTP client for the gadget REST backend.
#[derive(Debug, Clone)]
pub struct HttpGadgetService {
    client: reqwest::Client,
    base_url: String,
}

impl HttpGadgetService {
    /// Builds a client for `config.base_url` with the configured timeout and
    /// user agent.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Config`] if the base URL is empty or the user
    /// agent is not a valid header value, and [`CatalogError::Transport`] if
    /// the HTTP client cannot be constructed.
    pub fn new(config: &Config) -> Result<Self> {
        let base_url = config.base_url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(CatalogError::Config("base_url must not be empty".to_string()));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .map_err(|e| CatalogError::Config(format!("invalid user_agent: {e}")))?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| CatalogError::Transport(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    /// Base URL requests are resolved against, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{path}", self.base_url);
        tracing::debug!(method = %method, url = %url, "sending request");

        let builder = self.client.request(method, url);
        match TraceContext::from_current() {
            Some(ctx) => builder.header("traceparent", ctx.traceparent()),
            None => builder,
        }
    }

    /// Sends `builder` and returns the raw body of a 2xx response.
    async fn execute(&self, builder: RequestBuilder) -> Result<String> {
        let response = builder.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let mut message = format!("Request failed with status code {}", status.as_u16());
            if let Ok(ErrorBody { message: detail }) = serde_json::from_str::<ErrorBody>(&body) {
                message.push_str(": ");
                message.push_str(&detail);
            }
            tracing::debug!(status = status.as_u16(), "backend returned error status");
            return Err(CatalogError::Server {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.text().await?)
    }

    async fn fetch<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let body = self.execute(builder).await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn fetch_gadget(&self, builder: RequestBuilder) -> Result<Gadget> {
        let gadget: Gadget = self.fetch(builder).await?;
        gadget.validate()?;
        Ok(gadget)
    }
}

impl GadgetService for HttpGadgetService {
    fn list_gadgets(&self) -> BoxFuture<'_, Result<Vec<Gadget>>> {
        Box::pin(async move {
            let gadgets: Vec<Gadget> = self.fetch(self.request(Method::GET, "get-gadgets")).await?;
            validate_collection(&gadgets)?;
            tracing::debug!(count = gadgets.len(), "gadgets listed");
            Ok(gadgets)
        })
    }

    fn get_gadget<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<Gadget>> {
        Box::pin(async move {
            self.fetch_gadget(self.request(Method::GET, &format!("get-gadget/{id}")))
                .await
        })
    }

    fn create_gadget<'a>(&'a self, input: &'a GadgetInput) -> BoxFuture<'a, Result<Gadget>> {
        Box::pin(async move {
            self.fetch_gadget(self.request(Method::POST, "post-gadget").json(input))
                .await
        })
    }

    fn update_gadget<'a>(
        &'a self,
        id: &'a str,
        input: &'a GadgetInput,
    ) -> BoxFuture<'a, Result<Gadget>> {
        Box::pin(async move {
            self.fetch_gadget(
                self.request(Method::PUT, &format!("put-gadget/{id}"))
                    .json(input),
            )
            .await
        })
    }

    fn delete_gadget<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            self.execute(self.request(Method::DELETE, &format!("delete-gadget/{id}")))
                .await?;
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let config = Config {
            base_url: "http://localhost:3000/api/".to_string(),
            ..Config::default()
        };
        let service = HttpGadgetService::new(&config).unwrap();
        assert_eq!(service.base_url(), "http://localhost:3000/api");
    }

    #[test]
    fn empty_base_url_is_a_config_error() {
        let config = Config {
            base_url: "  ".to_string(),
            ..Config::default()
        };
        assert!(matches!(HttpGadgetService::new(&config), Err(CatalogError::Config(_))));
    }
}
