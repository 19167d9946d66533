//! Remote access to the record store
//!
//! [`RecordTransport`] is the seam the client controller talks through.
//! [`HttpTransport`] implements it over the REST surface with `reqwest`.

use crate::config::{ClientConfig, RecordOptions};
use crate::core::error::{ErrorResponse, Result, TransportError};
use crate::core::record::{TrainingDetails, TrainingRecord};
use async_trait::async_trait;
use reqwest::{Client, Response};
use uuid::Uuid;

/// Calls the client makes against the record store
///
/// Every call returns an explicit result; nothing is retried.
#[async_trait]
pub trait RecordTransport: Send + Sync {
    /// Fetch every record, in store order
    async fn fetch_all(&self) -> Result<Vec<TrainingRecord>>;

    /// Create a record; the store assigns the id
    async fn create(&self, details: &TrainingDetails) -> Result<TrainingRecord>;

    /// Replace every field of the record `id`
    async fn update(&self, id: &Uuid, details: &TrainingDetails) -> Result<TrainingRecord>;

    /// Delete the record `id`; deleting an absent id succeeds
    async fn delete(&self, id: &Uuid) -> Result<()>;

    /// Fetch the option lists the store validates against
    async fn options(&self) -> Result<RecordOptions>;
}

/// `RecordTransport` over HTTP/JSON
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: Client,
    base_url: String,
}

impl HttpTransport {
    /// Build a transport with the configured base URL and request timeout
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path)
    }

    fn record_url(&self, id: &Uuid) -> String {
        self.url(&format!("trainings/{}", id))
    }
}

/// Pass 2xx responses through, turn anything else into `TransportError::Status`
///
/// The store's `{code, message}` body is used when it can be decoded.
async fn check(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let (code, message) = match serde_json::from_str::<ErrorResponse>(&body) {
        Ok(error) => (Some(error.code), error.message),
        Err(_) if body.is_empty() => (None, status.to_string()),
        Err(_) => (None, body),
    };

    tracing::debug!(status = status.as_u16(), ?code, "record store rejected request");
    Err(TransportError::Status {
        status: status.as_u16(),
        code,
        message,
    }
    .into())
}

#[async_trait]
impl RecordTransport for HttpTransport {
    async fn fetch_all(&self) -> Result<Vec<TrainingRecord>> {
        let response = self.http.get(self.url("trainings")).send().await?;
        Ok(check(response).await?.json().await?)
    }

    async fn create(&self, details: &TrainingDetails) -> Result<TrainingRecord> {
        let response = self
            .http
            .post(self.url("trainings"))
            .json(details)
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    async fn update(&self, id: &Uuid, details: &TrainingDetails) -> Result<TrainingRecord> {
        let response = self
            .http
            .put(self.record_url(id))
            .json(details)
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    async fn delete(&self, id: &Uuid) -> Result<()> {
        let response = self.http.delete(self.record_url(id)).send().await?;
        check(response).await?;
        Ok(())
    }

    async fn options(&self) -> Result<RecordOptions> {
        let response = self.http.get(self.url("options")).send().await?;
        Ok(check(response).await?.json().await?)
    }
}
