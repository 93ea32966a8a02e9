//! Concurrent acquisition of every configured origin

use crate::acquirer::OriginAcquirer;
use crate::fetch::{Fetcher, SourceFetcher};
use crate::translate::{PassthroughTranslator, Translator};
use crate::{AcquireError, Result};
use origin_sync_common::StandardDataSource;
use origin_sync_config::StandardOriginConfig;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{error, info};

/// An origin that produced no data source
#[derive(Debug)]
pub struct OriginFailure {
    /// Origin name; empty for the implicit origin
    pub origin: String,
    pub error: AcquireError,
}

/// Outcome of one pipeline run
///
/// Both lists follow the order of the origin configs.
#[derive(Debug, Default)]
pub struct PipelineReport {
    pub sources: Vec<StandardDataSource>,
    pub failures: Vec<OriginFailure>,
}

impl PipelineReport {
    /// True when there were origins and none of them succeeded
    pub fn all_failed(&self) -> bool {
        self.sources.is_empty() && !self.failures.is_empty()
    }
}

/// Runs one [`OriginAcquirer`] per origin on the tokio runtime
///
/// Origins are independent: one failing, panicking or aborted origin is
/// reported in [`PipelineReport::failures`] and the rest carry on.
#[derive(Clone)]
pub struct PipelineDriver {
    fetcher: Arc<dyn Fetcher>,
    translator: Arc<dyn Translator>,
}

impl Default for PipelineDriver {
    fn default() -> Self {
        Self::new(Arc::new(SourceFetcher::new()), Arc::new(PassthroughTranslator))
    }
}

impl PipelineDriver {
    pub fn new(fetcher: Arc<dyn Fetcher>, translator: Arc<dyn Translator>) -> Self {
        Self {
            fetcher,
            translator,
        }
    }

    pub async fn run(&self, origins: &[StandardOriginConfig]) -> PipelineReport {
        let mut tasks = JoinSet::new();

        for (index, origin) in origins.iter().cloned().enumerate() {
            let mut acquirer = OriginAcquirer::new(self.fetcher.clone(), self.translator.clone());
            tasks.spawn(async move {
                acquirer.set_config(origin);
                (index, acquirer.acquire().await)
            });
        }

        let mut outcomes: Vec<Option<Result<StandardDataSource>>> =
            origins.iter().map(|_| None).collect();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, outcome)) => outcomes[index] = Some(outcome),
                Err(join_error) => error!(error = %join_error, "origin task did not complete"),
            }
        }

        let mut report = PipelineReport::default();
        for (origin, outcome) in origins.iter().zip(outcomes) {
            let outcome = outcome.unwrap_or_else(|| {
                Err(AcquireError::Aborted(origin.display_name().to_string()))
            });
            match outcome {
                Ok(source) => report.sources.push(source),
                Err(error) => {
                    error!(origin = %origin.display_name(), error = %error, "origin failed");
                    report.failures.push(OriginFailure {
                        origin: origin.name.clone(),
                        error,
                    });
                }
            }
        }

        info!(
            succeeded = report.sources.len(),
            failed = report.failures.len(),
            "pipeline finished"
        );

        report
    }
}
