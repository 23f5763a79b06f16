use log::error;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

use super::{BackendError, Resource, TravelBackend};
use crate::config::AppConfig;
use crate::models::ListResponse;

#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: Url,
    api_token: Option<String>,
}

impl HttpBackend {
    pub fn new(
        base_url: Url,
        api_token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, BackendError> {
        if base_url.cannot_be_a_base() {
            return Err(BackendError::InvalidUrl(base_url.to_string()));
        }

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url,
            api_token,
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, BackendError> {
        Self::new(
            config.backend_url.clone(),
            config.backend_token.clone(),
            config.backend_timeout,
        )
    }

    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, BackendError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| BackendError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(
        &self,
        request: RequestBuilder,
        resource: &'static str,
        id: Option<&str>,
    ) -> Result<Response, BackendError> {
        let response = self.authorize(request).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(BackendError::NotFound {
                resource,
                id: id.unwrap_or_default().to_string(),
            });
        }

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!("Backend request to /{} failed with {}: {}", resource, status, body);
            return Err(BackendError::StatusError {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }
}

// Some write endpoints answer with an empty body; the record we sent is then
// the best description of what was stored.
fn decode_or_echo<T: Resource>(body: &str, sent: &T) -> Result<T, BackendError> {
    if body.trim().is_empty() {
        let value = serde_json::to_value(sent)?;
        return Ok(serde_json::from_value(value)?);
    }
    decode(body)
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, BackendError> {
    serde_json::from_str(body).map_err(|e| {
        BackendError::DecodeError(format!("{}. Response: {}", e, body))
    })
}

impl TravelBackend for HttpBackend {
    async fn list<T: Resource>(&self, query: &[(&str, &str)]) -> Result<Vec<T>, BackendError> {
        let url = self.endpoint(&[T::PATH])?;
        let response = self
            .send(self.client.get(url).query(query), T::PATH, None)
            .await?;
        let body = response.text().await?;
        let list: ListResponse<T> = decode(&body)?;
        Ok(list.into_vec())
    }

    async fn get<T: Resource>(&self, id: &str) -> Result<T, BackendError> {
        let url = self.endpoint(&[T::PATH, id])?;
        let response = self.send(self.client.get(url), T::PATH, Some(id)).await?;
        let body = response.text().await?;
        decode(&body)
    }

    async fn create<T: Resource>(&self, record: &T) -> Result<T, BackendError> {
        let url = self.endpoint(&[T::PATH])?;
        let response = self
            .send(self.client.post(url).json(record), T::PATH, None)
            .await?;
        let body = response.text().await?;
        decode_or_echo(&body, record)
    }

    async fn update<T: Resource>(&self, id: &str, record: &T) -> Result<T, BackendError> {
        let url = self.endpoint(&[T::PATH, id])?;
        let response = self
            .send(self.client.put(url).json(record), T::PATH, Some(id))
            .await?;
        let body = response.text().await?;
        decode_or_echo(&body, record)
    }

    async fn delete<T: Resource>(&self, id: &str) -> Result<(), BackendError> {
        let url = self.endpoint(&[T::PATH, id])?;
        self.send(self.client.delete(url), T::PATH, Some(id)).await?;
        Ok(())
    }

    async fn send_demand_email(&self, demand_id: &str) -> Result<(), BackendError> {
        let url = self.endpoint(&["demands", demand_id, "send-email"])?;
        self.send(self.client.post(url), "demands", Some(demand_id))
            .await?;
        Ok(())
    }

    async fn ping(&self) -> Result<(), BackendError> {
        // Any answer at all means the backend is reachable.
        self.authorize(self.client.get(self.base_url.clone()))
            .send()
            .await?;
        Ok(())
    }
}
