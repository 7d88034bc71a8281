//! Blocking HTTP client for a remote barbacoa server
//!
//! Must not be used from inside a tokio runtime; the CLI is synchronous.

use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use tracing::debug;

use crate::error::{BarbacoaError, BarbacoaResult};
use crate::models::{Barbacoa, BarbacoaRecord, Expense, ExpenseRecord, PartnerMap, Transfer};
use crate::services::SettlementBackend;

use super::dto::{SettleRequest, SettleResponse};

/// `SettlementBackend` that forwards every call to a barbacoa server
#[derive(Debug, Clone)]
pub struct RemoteClient {
    http: Client,
    base_url: Url,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

impl RemoteClient {
    pub fn new(base_url: &str) -> BarbacoaResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| BarbacoaError::Config(format!("Invalid backend URL '{}': {}", base_url, e)))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(BarbacoaError::Config(format!(
                "Backend URL must be http or https, got '{}'",
                base_url
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| BarbacoaError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Base URL with `segments` appended, each percent-encoded
    fn endpoint(&self, segments: &[&str]) -> BarbacoaResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| BarbacoaError::Config(format!("Cannot use '{}' as a base URL", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn decode<T: serde::de::DeserializeOwned>(response: Response) -> BarbacoaResult<T> {
        response
            .json()
            .map_err(|e| BarbacoaError::Transport(format!("Malformed response: {}", e)))
    }
}

fn transport(err: reqwest::Error) -> BarbacoaError {
    BarbacoaError::Transport(err.to_string())
}

/// Turns a non-success response into an error, keeping the server's message
fn failure(response: Response) -> BarbacoaError {
    let status = response.status();
    let body = response.text().unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .map(|b| b.error)
        .unwrap_or(body);
    BarbacoaError::Transport(format!("{}: {}", status, message))
}

impl SettlementBackend for RemoteClient {
    fn settle(&self, expenses: &[Expense], partners: &PartnerMap) -> BarbacoaResult<Vec<Transfer>> {
        let url = self.endpoint(&["settle"])?;
        let request = SettleRequest::WithPartners {
            expenses: expenses.iter().map(ExpenseRecord::from).collect(),
            partners: Some(partners.clone()),
        };
        debug!(%url, expenses = expenses.len(), "settling remotely");

        let response = self.http.post(url).json(&request).send().map_err(transport)?;
        if !response.status().is_success() {
            return Err(failure(response));
        }

        let body: SettleResponse = Self::decode(response)?;
        body.transfers.into_iter().map(Transfer::try_from).collect()
    }

    fn save(&self, barbacoa: &Barbacoa) -> BarbacoaResult<()> {
        let url = self.endpoint(&["barbacoas"])?;
        let response = self
            .http
            .post(url)
            .json(&BarbacoaRecord::from(barbacoa))
            .send()
            .map_err(transport)?;

        match response.status() {
            status if status.is_success() => Ok(()),
            StatusCode::CONFLICT => Err(BarbacoaError::DuplicateEventName(barbacoa.name.clone())),
            _ => Err(failure(response)),
        }
    }

    fn list(&self) -> BarbacoaResult<Vec<Barbacoa>> {
        let url = self.endpoint(&["barbacoas"])?;
        let response = self.http.get(url).send().map_err(transport)?;
        if !response.status().is_success() {
            return Err(failure(response));
        }

        let records: Vec<BarbacoaRecord> = Self::decode(response)?;
        records.into_iter().map(Barbacoa::try_from).collect()
    }

    fn find(&self, name: &str) -> BarbacoaResult<Option<Barbacoa>> {
        let url = self.endpoint(&["barbacoas", name.trim()])?;
        let response = self.http.get(url).send().map_err(transport)?;

        match response.status() {
            status if status.is_success() => {
                let record: BarbacoaRecord = Self::decode(response)?;
                Ok(Some(Barbacoa::try_from(record)?))
            }
            StatusCode::NOT_FOUND => Ok(None),
            _ => Err(failure(response)),
        }
    }

    fn delete(&self, name: &str) -> BarbacoaResult<Barbacoa> {
        let url = self.endpoint(&["barbacoas", name.trim()])?;
        let response = self.http.delete(url).send().map_err(transport)?;

        match response.status() {
            status if status.is_success() => {
                let record: BarbacoaRecord = Self::decode(response)?;
                Barbacoa::try_from(record)
            }
            StatusCode::NOT_FOUND => Err(BarbacoaError::barbacoa_not_found(name.trim())),
            _ => Err(failure(response)),
        }
    }
}
