//! # chatx-genie
//!
//! Genie domain layer: the [`GenieResult`] query-result model and its
//! formatting into chat activities, plus the [`GenieClient`] for the Genie
//! conversation REST API. Production code talks to Genie over HTTP; tests and
//! the webhook dispatcher depend only on the [`GenieBackend`] trait.

pub mod client;
pub mod format;
pub mod result;

pub use client::{GenieBackend, GenieClient};
pub use result::{
    ColumnInfo, GenieResult, GenieResultMetadata, ResultData, ResultManifest, ResultSchema,
    StatementResponse,
};
