//! Origin acquisition for origin-sync
//!
//! Turns normalized origin configs into standard data sources:
//! fetch the origin document, translate it, then normalize it with the
//! dialect named by the origin's `originType`.
//!
//! ## Components
//! - [`OriginAcquirer`]: the per-origin fetch / translate / transform steps
//! - [`Fetcher`] and [`Translator`]: injected collaborators
//! - [`PipelineDriver`]: runs one acquirer per origin concurrently

mod acquirer;
mod fetch;
mod pipeline;
mod translate;

pub use acquirer::OriginAcquirer;
pub use fetch::{Fetcher, HttpFetcher, SourceFetcher};
pub use pipeline::{OriginFailure, PipelineDriver, PipelineReport};
pub use translate::{PassthroughTranslator, TranslateContext, Translator};

use origin_sync_common::SourceError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while acquiring an origin
#[derive(Error, Debug)]
pub enum AcquireError {
    #[error("HTTP request failed: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("{url} responded with status {status}")]
    Status { url: String, status: u16 },

    #[error("Failed to read origin document {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Translation failed: {0}")]
    Translate(String),

    #[error("Transform failed: {0}")]
    Transform(#[from] SourceError),

    #[error("Origin acquirer used before set_config")]
    NotConfigured,

    #[error("Origin '{0}' has no originUrl")]
    MissingOriginUrl(String),

    #[error("Origin task aborted: {0}")]
    Aborted(String),
}

/// Result type for acquisition operations
pub type Result<T> = std::result::Result<T, AcquireError>;
