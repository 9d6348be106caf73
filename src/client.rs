//! # Remote Client
//!
//! Blocking JSON-over-HTTP client for the carbon entry service. Every
//! operation maps one REST call; every failure (transport, non-2xx status,
//! undecodable body) surfaces as the same [`FetchError`].

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};
use ureq::Agent;

use crate::models::{CarbonEntry, CarbonSummary, EntryPatch, NewCarbonEntry};

const ENTRIES_PATH: &str = "/carbon-entries";
const SUMMARY_PATH: &str = "/carbon-entries/summary";
const NON_SUCCESS_REASON: &str = "non-success status";

/// Methods that carry a JSON body.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum BodyMethod {
    Post,
    Put,
}

impl BodyMethod {
    fn as_str(self) -> &'static str {
        match self {
            BodyMethod::Post => "POST",
            BodyMethod::Put => "PUT",
        }
    }
}

/// The only error the client reports. The HTTP status is not part of it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("request failed: {operation} ({reason})")]
pub struct FetchError {
    pub operation: &'static str,
    pub reason: String,
}

impl FetchError {
    pub fn new(operation: &'static str, reason: impl Into<String>) -> Self {
        Self {
            operation,
            reason: reason.into(),
        }
    }
}

/// Operations the screens need from the service.
pub trait CarbonApi: Sync {
    fn list_entries(&self) -> Result<Vec<CarbonEntry>, FetchError>;
    fn get_entry(&self, id: u64) -> Result<CarbonEntry, FetchError>;
    fn create_entry(&self, entry: &NewCarbonEntry) -> Result<CarbonEntry, FetchError>;
    fn fetch_summary(&self) -> Result<CarbonSummary, FetchError>;
    fn update_entry(&self, id: u64, patch: &EntryPatch) -> Result<CarbonEntry, FetchError>;
    fn delete_entry(&self, id: u64) -> Result<(), FetchError>;
}

pub struct CarbonClient {
    agent: Agent,
    base_url: String,
}

impl CarbonClient {
    /// `timeout` of `None` leaves requests unbounded.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(timeout)
            .http_status_as_error(false)
            .build()
            .into();
        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn entry_url(&self, id: u64) -> String {
        format!("{}{}/{}", self.base_url, ENTRIES_PATH, id)
    }

    fn get_json<T: DeserializeOwned>(&self, operation: &'static str, url: &str) -> Result<T, FetchError> {
        debug!(operation, method = "GET", url, "request");
        let response = self
            .agent
            .get(url)
            .header("Accept", "application/json")
            .call();
        decode(operation, url, response)
    }

    fn send_json<B, T>(
        &self,
        operation: &'static str,
        method: BodyMethod,
        url: &str,
        body: &B,
    ) -> Result<T, FetchError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        debug!(
            operation,
            method = method.as_str(),
            url,
            body = %serde_json::to_string(body).unwrap_or_default(),
            "request"
        );
        let request = match method {
            BodyMethod::Post => self.agent.post(url),
            BodyMethod::Put => self.agent.put(url),
        };
        let response = request.header("Accept", "application/json").send_json(body);
        decode(operation, url, response)
    }
}

fn check_status(
    operation: &'static str,
    url: &str,
    response: Result<ureq::http::Response<ureq::Body>, ureq::Error>,
) -> Result<ureq::http::Response<ureq::Body>, FetchError> {
    let response = response.map_err(|e| {
        warn!(operation, url, error = %e, "request failed");
        FetchError::new(operation, e.to_string())
    })?;
    let status = response.status();
    if !status.is_success() {
        warn!(operation, url, status = status.as_u16(), "non-success status");
        return Err(FetchError::new(operation, NON_SUCCESS_REASON));
    }
    Ok(response)
}

fn decode<T: DeserializeOwned>(
    operation: &'static str,
    url: &str,
    response: Result<ureq::http::Response<ureq::Body>, ureq::Error>,
) -> Result<T, FetchError> {
    let mut response = check_status(operation, url, response)?;
    let status = response.status().as_u16();
    let text = response.body_mut().read_to_string().map_err(|e| {
        warn!(operation, url, error = %e, "reading body failed");
        FetchError::new(operation, e.to_string())
    })?;
    debug!(operation, status, body = %text, "response");
    serde_json::from_str(&text).map_err(|e| {
        warn!(operation, url, error = %e, "undecodable body");
        FetchError::new(operation, format!("invalid response body: {e}"))
    })
}

impl CarbonApi for CarbonClient {
    fn list_entries(&self) -> Result<Vec<CarbonEntry>, FetchError> {
        self.get_json("list entries", &self.url(ENTRIES_PATH))
    }

    fn get_entry(&self, id: u64) -> Result<CarbonEntry, FetchError> {
        self.get_json("get entry", &self.entry_url(id))
    }

    fn create_entry(&self, entry: &NewCarbonEntry) -> Result<CarbonEntry, FetchError> {
        self.send_json("create entry", BodyMethod::Post, &self.url(ENTRIES_PATH), entry)
    }

    fn fetch_summary(&self) -> Result<CarbonSummary, FetchError> {
        self.get_json("fetch summary", &self.url(SUMMARY_PATH))
    }

    fn update_entry(&self, id: u64, patch: &EntryPatch) -> Result<CarbonEntry, FetchError> {
        self.send_json("update entry", BodyMethod::Put, &self.entry_url(id), patch)
    }

    fn delete_entry(&self, id: u64) -> Result<(), FetchError> {
        let operation = "delete entry";
        let url = self.entry_url(id);
        debug!(operation, method = "DELETE", url = %url, "request");
        let response = self.agent.delete(url.as_str()).call();
        let response = check_status(operation, &url, response)?;
        debug!(operation, status = response.status().as_u16(), "response");
        Ok(())
    }
}
