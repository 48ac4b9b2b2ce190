//! Core of the shiftsync pipeline.
//!
//! This crate turns scraped schedule fragments into typed shifts and
//! reconciles them into a remote calendar:
//! - `classify` / `parse` / `collect` / `aggregate` for extraction
//! - `reconcile` for the idempotent insert/update pass
//! - `source` and `remote` for the traits implemented by external collaborators

pub mod aggregate;
pub mod classify;
pub mod collect;
pub mod constants;
pub mod error;
pub mod parse;
pub mod poll;
pub mod reconcile;
pub mod remote;
pub mod shift;
pub mod source;
pub mod view;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{CalendarError, SourceError};
pub use shift::{ShiftColor, ShiftEntity, ShiftKey};
pub use view::ViewMonth;
