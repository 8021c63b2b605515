//! Holds the current ingestion result and decides which loads may replace it.
//!
//! Each load is tagged with a [`FetchTicket`] from a monotonically increasing
//! generation counter. A completion carrying an older ticket than the most
//! recently issued one is stale and is discarded. Accepted results replace
//! the previous one wholesale; nothing is merged.

use std::time::{Duration, Instant};

use attendance_core::error::Result;
use attendance_core::profile::IngestProfile;
use attendance_data::analysis::{ingest, IngestResult};
use chrono::Utc;

use crate::fetch::{fetch_first_available, FetchAttempt, SheetText, TextFetcher};
use crate::source::{read_file, TextSource};

/// Maximum number of passes over the candidate list before giving up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

// ── Types ─────────────────────────────────────────────────────────────────────

/// Generation tag handed out by [`DataManager::begin_fetch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchTicket(u64);

/// Raw text plus where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedText {
    /// URL or file path that produced the text.
    pub origin: String,
    pub text: String,
    /// Candidate attempts made for a remote sheet; empty for files.
    pub attempts: Vec<FetchAttempt>,
}

impl From<SheetText> for LoadedText {
    fn from(sheet: SheetText) -> Self {
        Self {
            origin: sheet.url,
            text: sheet.text,
            attempts: sheet.attempts,
        }
    }
}

/// Result accepted by the manager.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub ticket: FetchTicket,
    pub origin: String,
    pub result: IngestResult,
    pub loaded_at: Instant,
}

/// What happened to a completed load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The result replaced the current snapshot.
    Accepted,
    /// A newer load had started; the result was dropped.
    Stale,
    /// The load failed; the previous snapshot is kept.
    Failed,
}

// ── DataManager ───────────────────────────────────────────────────────────────

/// Loads sheet text, ingests it and keeps the newest accepted result.
///
/// # Example
/// ```no_run
/// use attendance_runtime::data_manager::DataManager;
/// use attendance_runtime::fetch::HttpFetcher;
/// use attendance_runtime::source::{SheetLocator, TextSource};
///
/// # async fn run() -> attendance_core::Result<()> {
/// let mut mgr = DataManager::new(HttpFetcher::new()?, Default::default());
/// let source = TextSource::Sheet(SheetLocator::new("abc123", None));
/// let result = mgr.refresh(&source).await?;
/// println!("{} employees", result.employees.len());
/// # Ok(())
/// # }
/// ```
pub struct DataManager<F: TextFetcher> {
    fetcher: F,
    profile: IngestProfile,
    max_attempts: u32,
    retry_delay: Duration,
    /// Last ticket issued.
    generation: u64,
    current: Option<Snapshot>,
    last_error: Option<String>,
    last_attempts: Vec<FetchAttempt>,
}

impl<F: TextFetcher> DataManager<F> {
    pub fn new(fetcher: F, profile: IngestProfile) -> Self {
        Self {
            fetcher,
            profile,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_delay: Duration::from_millis(100),
            generation: 0,
            current: None,
            last_error: None,
            last_attempts: Vec::new(),
        }
    }

    /// Override the retry schedule. `max_attempts` is clamped to at least 1.
    pub fn with_retry(mut self, max_attempts: u32, retry_delay: Duration) -> Self {
        self.max_attempts = max_attempts.max(1);
        self.retry_delay = retry_delay;
        self
    }

    // ── Public API ────────────────────────────────────────────────────────

    pub fn profile(&self) -> &IngestProfile {
        &self.profile
    }

    /// The accepted result, if any load has succeeded.
    pub fn current(&self) -> Option<&IngestResult> {
        self.current.as_ref().map(|s| &s.result)
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.current.as_ref()
    }

    /// Human-readable description of the last load failure, or `None`.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Candidate attempts from the most recent completed remote load.
    pub fn last_attempts(&self) -> &[FetchAttempt] {
        &self.last_attempts
    }

    /// Start a new load. Any load begun earlier becomes stale.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.generation += 1;
        FetchTicket(self.generation)
    }

    /// `true` when `ticket` is the most recently issued one.
    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        ticket.0 == self.generation
    }

    /// Settle a load started with [`begin_fetch`](Self::begin_fetch).
    pub fn complete(&mut self, ticket: FetchTicket, loaded: Result<LoadedText>) -> Completion {
        if !self.is_current(ticket) {
            tracing::debug!(
                ticket = ticket.0,
                latest = self.generation,
                "discarding stale load"
            );
            return Completion::Stale;
        }

        match loaded {
            Ok(loaded) => {
                self.accept(ticket, loaded);
                Completion::Accepted
            }
            Err(e) => {
                tracing::warn!(error = %e, "load failed; keeping previous snapshot");
                self.last_error = Some(e.to_string());
                Completion::Failed
            }
        }
    }

    /// Load `source`, ingest it and make it current.
    ///
    /// On failure the previous snapshot (if any) is kept and the error is
    /// returned.
    pub async fn refresh(&mut self, source: &TextSource) -> Result<&IngestResult> {
        let ticket = self.begin_fetch();
        match self.load_with_retry(source).await {
            Ok(loaded) => Ok(self.accept(ticket, loaded)),
            Err(e) => {
                tracing::warn!(error = %e, source = %source, "load failed; keeping previous snapshot");
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    // ── Private helpers ───────────────────────────────────────────────────

    /// Ingest `loaded` and replace the current snapshot with it.
    fn accept(&mut self, ticket: FetchTicket, loaded: LoadedText) -> &IngestResult {
        let mut result = ingest(&loaded.text, &self.profile);
        result.metadata.generated_at = Some(Utc::now().to_rfc3339());
        tracing::debug!(
            origin = %loaded.origin,
            employees = result.employees.len(),
            "snapshot replaced"
        );
        self.last_attempts = loaded.attempts;
        self.last_error = None;
        let snapshot = self.current.insert(Snapshot {
            ticket,
            origin: loaded.origin,
            result,
            loaded_at: Instant::now(),
        });
        &snapshot.result
    }

    /// Up to `max_attempts` loads with linear back-off between them.
    async fn load_with_retry(&self, source: &TextSource) -> Result<LoadedText> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.load_once(source).await {
                Ok(loaded) => return Ok(loaded),
                Err(e) if attempt >= self.max_attempts || !is_retryable(source) => return Err(e),
                Err(e) => {
                    let sleep = self.retry_delay * attempt;
                    tracing::warn!(attempt, error = %e, sleep_ms = sleep.as_millis() as u64, "load attempt failed; retrying");
                    tokio::time::sleep(sleep).await;
                }
            }
        }
    }

    async fn load_once(&self, source: &TextSource) -> Result<LoadedText> {
        match source {
            TextSource::File(path) => Ok(LoadedText {
                origin: path.display().to_string(),
                text: read_file(path).await?,
                attempts: Vec::new(),
            }),
            TextSource::Sheet(locator) => {
                let urls = locator.candidate_urls();
                fetch_first_available(&self.fetcher, &urls)
                    .await
                    .map(LoadedText::from)
            }
        }
    }
}

/// Local reads and unconfigured sheets fail the same way every time.
fn is_retryable(source: &TextSource) -> bool {
    match source {
        TextSource::File(_) => false,
        TextSource::Sheet(locator) => locator.is_configured(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
