//! Retrieval of sheet text over HTTP with ordered endpoint fallback.

use std::time::Duration;

use async_trait::async_trait;
use attendance_core::error::{AttendanceError, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Per-request timeout for [`HttpFetcher`].
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

// ── TextFetcher ───────────────────────────────────────────────────────────────

/// A response body with its HTTP status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedText {
    pub status: u16,
    pub text: String,
}

/// Anything that can turn a URL into text.
///
/// Implementations report every HTTP response as `Ok`, whatever its status,
/// and reserve `Err` for transport failures (DNS, TLS, timeouts).
#[async_trait]
pub trait TextFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedText>;
}

/// [`TextFetcher`] backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(concat!("attendance-report/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AttendanceError::Config(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl TextFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedText> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AttendanceError::Fetch {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status().as_u16();
        let text = response.text().await.map_err(|e| AttendanceError::Fetch {
            url: url.to_string(),
            reason: format!("failed to read response body: {}", e),
        })?;

        Ok(FetchedText { status, text })
    }
}

// ── Attempt log ───────────────────────────────────────────────────────────────

/// How one candidate URL fared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "value")]
pub enum AttemptOutcome {
    /// Success status with a non-blank body.
    Ok(u16),
    /// Success status but nothing usable in the body.
    EmptyBody(u16),
    /// Non-success HTTP status.
    HttpStatus(u16),
    /// The request never produced a response.
    Transport(String),
}

/// One entry in the retrieval log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchAttempt {
    pub url: String,
    pub outcome: AttemptOutcome,
}

impl FetchAttempt {
    pub fn succeeded(&self) -> bool {
        matches!(self.outcome, AttemptOutcome::Ok(_))
    }
}

/// Text obtained from the first working candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetText {
    /// URL that produced the text.
    pub url: String,
    pub text: String,
    /// Every attempt made, the successful one last.
    pub attempts: Vec<FetchAttempt>,
}

// ── Fallback ──────────────────────────────────────────────────────────────────

/// Try `urls` in order and return the first success-status, non-blank body.
///
/// Fails with [`AttendanceError::SheetNotConfigured`] when `urls` is empty and
/// with [`AttendanceError::AllCandidatesFailed`] when nothing worked. The
/// reported status is that of the most recent failed request, if it got a
/// response.
pub async fn fetch_first_available<F>(fetcher: &F, urls: &[String]) -> Result<SheetText>
where
    F: TextFetcher + ?Sized,
{
    if urls.is_empty() {
        return Err(AttendanceError::SheetNotConfigured);
    }

    let mut attempts: Vec<FetchAttempt> = Vec::with_capacity(urls.len());

    for url in urls {
        debug!(url = %url, "fetching candidate");
        let outcome = match fetcher.fetch(url).await {
            Ok(FetchedText { status, text }) if (200..300).contains(&status) => {
                if text.trim().is_empty() {
                    AttemptOutcome::EmptyBody(status)
                } else {
                    attempts.push(FetchAttempt {
                        url: url.clone(),
                        outcome: AttemptOutcome::Ok(status),
                    });
                    debug!(url = %url, status, bytes = text.len(), "candidate succeeded");
                    return Ok(SheetText {
                        url: url.clone(),
                        text,
                        attempts,
                    });
                }
            }
            Ok(FetchedText { status, .. }) => AttemptOutcome::HttpStatus(status),
            Err(e) => AttemptOutcome::Transport(e.to_string()),
        };

        warn!(url = %url, outcome = ?outcome, "candidate failed");
        attempts.push(FetchAttempt {
            url: url.clone(),
            outcome,
        });
    }

    Err(AttendanceError::AllCandidatesFailed {
        attempts: attempts.len(),
        last_status: last_error_status(&attempts),
    })
}

/// Status of the most recent request that errored, or `None` when that
/// request got no response at all.
fn last_error_status(attempts: &[FetchAttempt]) -> Option<u16> {
    attempts
        .iter()
        .rev()
        .find_map(|a| match &a.outcome {
            AttemptOutcome::HttpStatus(code) => Some(Some(*code)),
            AttemptOutcome::Transport(_) => Some(None),
            _ => None,
        })
        .flatten()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
