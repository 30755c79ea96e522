use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, Request, Response, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{BackendError, CatalogBackend};
use crate::catalog::{BookDraft, Collection, Record, RecordId};
use crate::config::RemoteConfig;

/// Client for a REST catalogue service.
///
/// ```text
/// GET    {base}/{path}         list
/// POST   {base}/{path}         create (server assigns the id)
/// PUT    {base}/{path}/{id}    update
/// DELETE {base}/{path}/{id}    delete
/// ```
///
/// Idempotent requests are retried on connection failures and timeouts;
/// POST never is, so a create cannot be duplicated by a retry.
pub struct RemoteBackend {
    client: Client,
    collection_url: Url,
    max_retries: u32,
    backoff_base: Duration,
}

impl RemoteBackend {
    pub fn new(config: &RemoteConfig) -> Result<Self, BackendError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(BackendError::Client)?;

        Ok(Self {
            client,
            collection_url: collection_url(&config.base_url, &config.path)?,
            max_retries: config.max_retries,
            backoff_base: Duration::from_millis(config.retry_backoff_base_ms),
        })
    }

    pub fn collection_url(&self) -> &Url {
        &self.collection_url
    }

    fn item_url(&self, id: &RecordId) -> Result<Url, BackendError> {
        let mut url = self.collection_url.clone();
        url.path_segments_mut()
            .map_err(|_| BackendError::InvalidUrl {
                url: self.collection_url.to_string(),
                reason: "URL cannot have path segments".to_string(),
            })?
            .pop_if_empty()
            .push(id.as_str());
        Ok(url)
    }

    fn request(
        &self,
        method: Method,
        url: Url,
        body: Option<&impl Serialize>,
    ) -> Result<Request, BackendError> {
        let mut builder = self.client.request(method, url.clone());
        if let Some(body) = body {
            builder = builder.json(body);
        }
        builder.build().map_err(|source| BackendError::Request {
            url: url.to_string(),
            source,
        })
    }

    fn backoff(&self, attempt: u32) -> Duration {
        self.backoff_base.saturating_mul(1u32 << attempt.min(16))
    }

    async fn execute(&self, request: Request) -> Result<Response, BackendError> {
        let url = request.url().to_string();
        let idempotent = request.method() != Method::POST;
        let mut attempt: u32 = 0;
        let mut pending = request;

        loop {
            let retry = if idempotent && attempt < self.max_retries {
                pending.try_clone()
            } else {
                None
            };

            let err = match self.client.execute(pending).await {
                Ok(response) => return check_status(&url, response).await,
                Err(err) => err,
            };

            match retry {
                Some(next) if err.is_connect() || err.is_timeout() => {
                    let delay = self.backoff(attempt);
                    tracing::warn!(
                        url = %url,
                        attempt = attempt + 1,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "Remote request failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                    pending = next;
                }
                _ => return Err(transport_error(url, err)),
            }
        }
    }
}

#[async_trait]
impl CatalogBackend for RemoteBackend {
    fn name(&self) -> &'static str {
        "remote"
    }

    async fn load(&self) -> Result<Collection, BackendError> {
        let url = self.collection_url.clone();
        let request = self.request(Method::GET, url.clone(), None::<&()>)?;
        let response = self.execute(request).await?;
        let records: Vec<Record> = decode(&url, response).await?;
        tracing::debug!(url = %url, records = records.len(), "Fetched remote catalogue");
        Ok(Collection::from(records))
    }

    async fn create(&self, draft: BookDraft) -> Result<Record, BackendError> {
        let url = self.collection_url.clone();
        let request = self.request(Method::POST, url.clone(), Some(&draft))?;
        let response = self.execute(request).await?;
        decode(&url, response).await
    }

    async fn update(&self, record: Record) -> Result<Record, BackendError> {
        let url = self.item_url(&record.id)?;
        let request = self.request(Method::PUT, url.clone(), Some(&record))?;
        let response = self.execute(request).await?;
        let body = read_body(&url, response).await?;
        if body.iter().all(u8::is_ascii_whitespace) {
            // 204 No Content: the service accepted our copy as-is.
            return Ok(record);
        }
        serde_json::from_slice(&body).map_err(|source| BackendError::Decode {
            url: url.to_string(),
            source,
        })
    }

    async fn delete(&self, id: &RecordId) -> Result<(), BackendError> {
        let url = self.item_url(id)?;
        let request = self.request(Method::DELETE, url, None::<&()>)?;
        self.execute(request).await?;
        Ok(())
    }
}

fn collection_url(base_url: &str, path: &str) -> Result<Url, BackendError> {
    let invalid = |reason: String| BackendError::InvalidUrl {
        url: base_url.to_string(),
        reason,
    };

    let mut url = Url::parse(base_url.trim()).map_err(|e| invalid(e.to_string()))?;
    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|_| invalid("URL cannot have path segments".to_string()))?;
        segments.pop_if_empty();
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            segments.push(segment);
        }
    }
    Ok(url)
}

async fn check_status(url: &str, response: Response) -> Result<Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = match response.text().await {
        Ok(body) => body,
        Err(err) => {
            tracing::debug!(
                url,
                status = status.as_u16(),
                error = %err,
                "Failed to read error body"
            );
            format!("<unreadable body: {}>", err)
        }
    };
    Err(BackendError::Status {
        url: url.to_string(),
        status: status.as_u16(),
        body,
    })
}

async fn read_body(url: &Url, response: Response) -> Result<Vec<u8>, BackendError> {
    response
        .bytes()
        .await
        .map(|bytes| bytes.to_vec())
        .map_err(|err| transport_error(url.to_string(), err))
}

async fn decode<T: DeserializeOwned>(url: &Url, response: Response) -> Result<T, BackendError> {
    let body = read_body(url, response).await?;
    serde_json::from_slice(&body).map_err(|source| BackendError::Decode {
        url: url.to_string(),
        source,
    })
}

fn transport_error(url: String, err: reqwest::Error) -> BackendError {
    if err.is_timeout() {
        BackendError::Timeout { url }
    } else {
        BackendError::Connection { url, source: err }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base_url: &str, path: &str) -> RemoteConfig {
        RemoteConfig {
            base_url: base_url.to_string(),
            path: path.to_string(),
            ..RemoteConfig::default()
        }
    }

    #[test]
    fn joins_base_and_path() {
        let backend = RemoteBackend::new(&config("http://localhost:3000/", "/books/")).unwrap();
        assert_eq!(backend.collection_url().as_str(), "http://localhost:3000/books");

        let nested = RemoteBackend::new(&config("http://host/api", "v1/books")).unwrap();
        assert_eq!(nested.collection_url().as_str(), "http://host/api/v1/books");
    }

    #[test]
    fn item_url_escapes_id() {
        let backend = RemoteBackend::new(&config("http://host", "books")).unwrap();
        let url = backend.item_url(&RecordId::new("a b/c")).unwrap();
        assert_eq!(url.as_str(), "http://host/books/a%20b%2Fc");
    }

    #[test]
    fn rejects_unparseable_base() {
        assert!(matches!(
            RemoteBackend::new(&config("not a url", "books")),
            Err(BackendError::InvalidUrl { .. })
        ));
    }

    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S: serde::Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("not representable"))
        }
    }

    #[test]
    fn unbuildable_request_is_request_error() {
        let backend = RemoteBackend::new(&config("http://host", "books")).unwrap();
        let url = backend.collection_url().clone();
        assert!(matches!(
            backend.request(Method::PUT, url, Some(&Unserializable)),
            Err(BackendError::Request { .. })
        ));
    }

    #[test]
    fn backoff_doubles() {
        let backend = RemoteBackend::new(&RemoteConfig {
            retry_backoff_base_ms: 50,
            ..RemoteConfig::default()
        })
        .unwrap();
        assert_eq!(backend.backoff(0), Duration::from_millis(50));
        assert_eq!(backend.backoff(2), Duration::from_millis(200));
    }
}
