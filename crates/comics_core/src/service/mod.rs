//! Catalog use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Emit metadata-only log events for every write.
//!
//! # Invariants
//! - Services never bypass repository validation/persistence contracts.
//! - Log lines carry ids, counts and error codes, never names or titles.

use crate::repo::{DeleteOutcome, RepoResult};
use log::{debug, log, warn, Level};
use std::fmt::Display;

pub mod comic_service;
pub mod owner_service;

fn log_outcome<T>(event: &'static str, result: RepoResult<T>) -> RepoResult<T> {
    match &result {
        Ok(_) => debug!("event={event} module=service status=ok"),
        Err(err) => warn!(
            "event={event} module=service status=error error_code={}",
            err.code()
        ),
    }
    result
}

/// One event per owner delete; success carries the cascade count.
fn log_delete_outcome(
    event: &'static str,
    id_field: &'static str,
    id: impl Display,
    result: RepoResult<DeleteOutcome>,
) -> RepoResult<DeleteOutcome> {
    let (level, line) = delete_event(event, id_field, &id, &result);
    log!(level, "{line}");
    result
}

fn delete_event(
    event: &str,
    id_field: &str,
    id: &dyn Display,
    result: &RepoResult<DeleteOutcome>,
) -> (Level, String) {
    match result {
        Ok(outcome) => (
            Level::Info,
            format!(
                "event={event} module=service status=ok {id_field}={id} cascaded_comics={}",
                outcome.cascaded_comics
            ),
        ),
        Err(err) => (
            Level::Warn,
            format!(
                "event={event} module=service status=error {id_field}={id} error_code={}",
                err.code()
            ),
        ),
    }
}
