//! Worker that submits cases to an HTTP endpoint as JSON.

use std::time::Duration;

use autofill_core::{JobItem, Outcome, Worker};
use autofill_model::{CaseRecord, RawRow};
use reqwest::StatusCode;
use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{Result, WorkerError};

/// HTTP request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings for [`HttpFormWorker`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpWorkerConfig {
    /// Endpoint receiving one POST per case.
    pub endpoint: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl HttpWorkerConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("meddra-autofill/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// JSON body posted for one case.
#[derive(Debug, Serialize)]
pub struct CasePayload<'a> {
    pub case_id: &'a str,
    pub reporter_type: Option<&'a str>,
    pub reaction_reported_term: Option<&'a str>,
    pub meddra_level: Option<&'a str>,
    pub meddra_term_text: Option<&'a str>,
    pub meddra_code: Option<&'a str>,
    pub meddra_version: Option<&'a str>,
    /// ISO `YYYY-MM-DD`.
    pub onset_date: Option<String>,
    pub seriousness: Option<&'a str>,
    pub suspect_drug: Option<&'a str>,
    pub dose_text: Option<&'a str>,
    pub outcome: Option<&'a str>,
    pub narrative: Option<&'a str>,
    pub raw_payload: &'a RawRow,
}

impl<'a> From<&'a CaseRecord> for CasePayload<'a> {
    fn from(record: &'a CaseRecord) -> Self {
        Self {
            case_id: &record.case_id,
            reporter_type: record.reporter_type.as_deref(),
            reaction_reported_term: record.reaction_reported_term.as_deref(),
            meddra_level: record.meddra_level.as_deref(),
            meddra_term_text: record.meddra_term_text.as_deref(),
            meddra_code: record.meddra_code.as_deref(),
            meddra_version: record.meddra_version.as_deref(),
            onset_date: record.onset_date.map(|date| date.format("%Y-%m-%d").to_string()),
            seriousness: record.seriousness.as_deref(),
            suspect_drug: record.suspect_drug.as_deref(),
            dose_text: record.dose_text.as_deref(),
            outcome: record.outcome.as_deref(),
            narrative: record.narrative.as_deref(),
            raw_payload: &record.raw_payload,
        }
    }
}

/// Posts each case as JSON and classifies the response.
pub struct HttpFormWorker {
    client: Client,
    config: HttpWorkerConfig,
}

impl HttpFormWorker {
    pub fn new(config: HttpWorkerConfig) -> Result<Self> {
        let endpoint = config.endpoint.trim();
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(WorkerError::InvalidTargetUrl {
                url: config.endpoint.clone(),
            });
        }
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(WorkerError::Client)?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &HttpWorkerConfig {
        &self.config
    }
}

impl Worker for HttpFormWorker {
    fn name(&self) -> &str {
        "http"
    }

    fn process(&mut self, job: &mut JobItem) -> Outcome {
        let payload = CasePayload::from(job.record());
        debug!(endpoint = %self.config.endpoint, "posting case");

        let response = self
            .client
            .post(&self.config.endpoint)
            .header(USER_AGENT, &self.config.user_agent)
            .json(&payload)
            .send();

        match response {
            Ok(response) => {
                let status = response.status();
                let outcome = classify_status(status);
                match &outcome {
                    Outcome::Success => info!(status = status.as_u16(), "case submitted"),
                    Outcome::Retry => {
                        warn!(status = status.as_u16(), "transient HTTP failure");
                        job.note(format!("HTTP {status}"));
                    }
                    Outcome::Fatal(_) => {}
                }
                outcome
            }
            Err(err) if err.is_timeout() || err.is_connect() => {
                warn!(error = %err, "request did not complete");
                job.note(format!("request failed: {err}"));
                Outcome::Retry
            }
            Err(err) => Outcome::Fatal(format!("request failed: {err}")),
        }
    }
}

/// Map a response status to an outcome.
///
/// Timeouts, rate limits and server errors are transient. Any other
/// non-success status means the form rejected the case.
pub fn classify_status(status: StatusCode) -> Outcome {
    if status.is_success() {
        Outcome::Success
    } else if status == StatusCode::REQUEST_TIMEOUT
        || status == StatusCode::TOO_MANY_REQUESTS
        || status.is_server_error()
    {
        Outcome::Retry
    } else {
        Outcome::Fatal(format!("endpoint rejected case: HTTP {status}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_classification() {
        assert_eq!(classify_status(StatusCode::CREATED), Outcome::Success);
        assert_eq!(classify_status(StatusCode::TOO_MANY_REQUESTS), Outcome::Retry);
        assert_eq!(classify_status(StatusCode::REQUEST_TIMEOUT), Outcome::Retry);
        assert_eq!(classify_status(StatusCode::BAD_GATEWAY), Outcome::Retry);
        assert_eq!(
            classify_status(StatusCode::BAD_REQUEST),
            Outcome::Fatal("endpoint rejected case: HTTP 400 Bad Request".to_string())
        );
    }

    #[test]
    fn non_http_endpoint_is_rejected() {
        let err = HttpFormWorker::new(HttpWorkerConfig::new("file:///tmp/form.html"))
            .err()
            .unwrap();
        assert!(matches!(err, WorkerError::InvalidTargetUrl { .. }));
    }

    #[test]
    fn payload_renders_onset_date_as_iso() {
        let record = CaseRecord::from_row(
            [("case_id", "C-1"), ("onset_date", "03/15/2024")]
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        );
        let json = serde_json::to_value(CasePayload::from(&record)).unwrap();
        assert_eq!(json["onset_date"], "2024-03-15");
        assert_eq!(json["raw_payload"]["onset_date"], "03/15/2024");
        assert!(json["narrative"].is_null());
    }
}
