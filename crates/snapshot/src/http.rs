//! Network-backed snapshot store.
//!
//! Speaks the snapshot service protocol: `POST /saveMapData` returns a
//! fresh key, `GET /loadMapData?key=…` returns the record or 404. The
//! service allocates keys, so this store does no local key generation.

use serde::Deserialize;

use crate::payload::{SnapshotPayload, SnapshotRecord};
use crate::store::{SnapshotError, SnapshotStore};

#[derive(Debug, Deserialize)]
struct SaveResponse {
    key: String,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: String,
}

/// Client for the shared snapshot service, reachable by any client that
/// holds a key.
#[derive(Debug)]
pub struct HttpStore {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl HttpStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            client: reqwest::blocking::Client::new(),
        }
    }

    fn service_error(response: reqwest::blocking::Response) -> SnapshotError {
        let status = response.status().as_u16();
        let message = response
            .json::<ErrorBody>()
            .map(|body| body.error)
            .unwrap_or_default();
        SnapshotError::Service { status, message }
    }
}

impl SnapshotStore for HttpStore {
    fn store(&mut self, payload: SnapshotPayload) -> Result<String, SnapshotError> {
        let url = format!("{}/saveMapData", self.base_url);
        let response = self
            .client
            .post(url)
            .json(&payload)
            .send()
            .map_err(|e| SnapshotError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::service_error(response));
        }
        let body: SaveResponse = response
            .json()
            .map_err(|e| SnapshotError::Corrupt(e.to_string()))?;
        Ok(body.key)
    }

    fn fetch(&self, key: &str) -> Result<Option<SnapshotRecord>, SnapshotError> {
        let url = format!("{}/loadMapData", self.base_url);
        let response = self
            .client
            .get(url)
            .query(&[("key", key)])
            .send()
            .map_err(|e| SnapshotError::Transport(e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(Self::service_error(response));
        }
        let record: SnapshotRecord = response
            .json()
            .map_err(|e| SnapshotError::Corrupt(e.to_string()))?;
        Ok(Some(record))
    }
}
