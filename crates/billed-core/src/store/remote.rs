//! REST backend client
//!
//! Endpoints:
//! - GET    {base}/bills
//! - GET    {base}/bills/{id}
//! - POST   {base}/bills
//! - PATCH  {base}/bills/{id}

use async_trait::async_trait;
use billed_config::StoreConfig;
use reqwest::{Method, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::{BillStore, StoreError};
use crate::models::{Bill, BillUpdate, NewBill};

pub struct RemoteStore {
    client: reqwest::Client,
    base_url: Url,
    token: Option<String>,
}

impl RemoteStore {
    pub fn new(base_url: &str, token: Option<String>, timeout: Duration) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StoreError::Transport { message: e.to_string() })?;

        let base_url = Url::parse(base_url)
            .map_err(|e| StoreError::Transport { message: format!("invalid base URL {}: {}", base_url, e) })?;
        if base_url.cannot_be_a_base() {
            return Err(StoreError::Transport { message: format!("invalid base URL {}", base_url) });
        }

        Ok(Self { client, base_url, token })
    }

    pub fn from_config(config: &StoreConfig) -> Result<Self, StoreError> {
        Self::new(
            &config.base_url,
            config.token.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// Base URL with `segments` appended, each one percent-encoded as a single segment
    fn url(&self, segments: &[&str]) -> Result<Url, StoreError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| StoreError::Transport { message: format!("invalid base URL {}", self.base_url) })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder, StoreError> {
        let builder = self.client.request(method, self.url(segments)?);
        Ok(match self.token {
            Some(ref token) => builder.bearer_auth(token),
            None => builder,
        })
    }

    /// Bill ids are single path segments; dot segments would be dropped from the URL
    fn check_id(id: &str) -> Result<(), StoreError> {
        if matches!(id, "" | "." | "..") {
            return Err(StoreError::NotFound { id: id.to_string() });
        }
        Ok(())
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, StoreError> {
        let response = builder
            .send()
            .await
            .map_err(|e| StoreError::Transport { message: e.to_string() })?;

        let status = response.status();
        if !status.is_success() {
            log::debug!("Store responded {} for {}", status, response.url());
            return Err(StoreError::Status { status: status.as_u16() });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| StoreError::Decode { message: e.to_string() })
    }
}

#[async_trait]
impl BillStore for RemoteStore {
    async fn list(&self) -> Result<Vec<Bill>, StoreError> {
        self.send(self.request(Method::GET, &["bills"])?).await
    }

    async fn get(&self, id: &str) -> Result<Bill, StoreError> {
        Self::check_id(id)?;
        match self.send(self.request(Method::GET, &["bills", id])?).await {
            Err(StoreError::Status { status }) if status == StatusCode::NOT_FOUND.as_u16() => {
                Err(StoreError::NotFound { id: id.to_string() })
            }
            other => other,
        }
    }

    async fn create(&self, bill: NewBill) -> Result<Bill, StoreError> {
        self.send(self.request(Method::POST, &["bills"])?.json(&bill)).await
    }

    async fn update(&self, id: &str, update: BillUpdate) -> Result<Bill, StoreError> {
        Self::check_id(id)?;
        self.send(self.request(Method::PATCH, &["bills", id])?.json(&update)).await
    }
}
