//! BatchRunner - sequential extract-then-merge over a set of attachments.
//!
//! State machine: Idle -> Extracting(i/N) -> Merging -> Done | Failed.
//! Extraction retries each unit up to a configured number of additional
//! attempts with a fixed delay; a unit that still fails is recorded and
//! the batch continues - one bad document must not block merging the
//! others. The merge has no retry: its failure fails the batch while the
//! per-document successes stay in the report for a retry.
//!
//! The inter-document delay is throttling against upstream rate limits,
//! not a scheduling guarantee.

use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::application::handlers::{ExtractDocumentHandler, MergeDocumentsHandler};
use crate::config::ExtractionConfig;
use crate::domain::applicant::Provenance;
use crate::domain::extraction::{DocumentExtractionUnit, MergeOutput};
use crate::domain::foundation::{DomainError, ErrorCode};

use super::ExtractDocumentCommand;

/// One attachment to process.
#[derive(Debug, Clone)]
pub struct BatchInput {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub provenance: Provenance,
}

/// Where a batch run ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchPhase {
    Idle,
    Extracting { done: usize, total: usize },
    Merging,
    Done,
    Failed,
    Cancelled,
}

/// A unit that failed all its attempts.
#[derive(Debug, Clone)]
pub struct UnitFailure {
    pub filename: String,
    pub error: DomainError,
}

/// Outcome of a batch run. Extracted units survive a merge failure so the
/// user can retry the merge without re-extracting.
#[derive(Debug)]
pub struct BatchReport {
    pub phase: BatchPhase,
    pub units: Vec<DocumentExtractionUnit>,
    pub failures: Vec<UnitFailure>,
    pub merge: Option<MergeOutput>,
    pub error: Option<DomainError>,
}

/// Drives the per-document extraction loop and the final merge.
pub struct BatchRunner {
    extract: ExtractDocumentHandler,
    merge: MergeDocumentsHandler,
    config: ExtractionConfig,
}

impl BatchRunner {
    pub fn new(
        extract: ExtractDocumentHandler,
        merge: MergeDocumentsHandler,
        config: ExtractionConfig,
    ) -> Self {
        Self {
            extract,
            merge,
            config,
        }
    }

    pub async fn run(&self, inputs: Vec<BatchInput>, cancel: CancellationToken) -> BatchReport {
        let total = inputs.len();
        let mut report = BatchReport {
            phase: BatchPhase::Idle,
            units: Vec::new(),
            failures: Vec::new(),
            merge: None,
            error: None,
        };

        for (i, input) in inputs.into_iter().enumerate() {
            if cancel.is_cancelled() {
                info!(done = i, total, "batch cancelled between documents");
                report.phase = BatchPhase::Cancelled;
                return report;
            }
            report.phase = BatchPhase::Extracting { done: i, total };

            match self.extract_with_retry(&input).await {
                Ok(unit) => report.units.push(unit),
                Err(error) => {
                    warn!(filename = %input.filename, %error, "document failed all attempts, continuing batch");
                    report.failures.push(UnitFailure {
                        filename: input.filename,
                        error,
                    });
                }
            }

            if i + 1 < total {
                sleep(self.config.throttle_delay()).await;
            }
        }

        if report.units.iter().all(|u| u.text.trim().is_empty()) {
            report.phase = BatchPhase::Failed;
            report.error = Some(DomainError::new(
                ErrorCode::ValidationFailed,
                "No document in the batch produced any text",
            ));
            return report;
        }

        if cancel.is_cancelled() {
            report.phase = BatchPhase::Cancelled;
            return report;
        }

        // Pause before the heavier merge call, same throttle as between
        // documents.
        sleep(self.config.throttle_delay()).await;
        report.phase = BatchPhase::Merging;

        match self.merge.handle(&report.units).await {
            Ok(output) => {
                report.phase = BatchPhase::Done;
                report.merge = Some(output);
            }
            Err(error) => {
                warn!(%error, "merge failed; extracted units retained for retry");
                report.phase = BatchPhase::Failed;
                report.error = Some(error);
            }
        }
        report
    }

    async fn extract_with_retry(
        &self,
        input: &BatchInput,
    ) -> Result<DocumentExtractionUnit, DomainError> {
        let mut attempt = 0;
        loop {
            let cmd = ExtractDocumentCommand {
                filename: input.filename.clone(),
                bytes: input.bytes.clone(),
                provenance: input.provenance.clone(),
            };
            match self.extract.handle(cmd).await {
                Ok(unit) => return Ok(unit),
                Err(error) if attempt < self.config.max_retries => {
                    attempt += 1;
                    warn!(
                        filename = %input.filename,
                        attempt,
                        %error,
                        "extraction attempt failed, retrying after delay"
                    );
                    sleep(self.config.retry_delay()).await;
                }
                Err(error) => return Err(error),
            }
        }
    }
}
