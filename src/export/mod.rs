//! Export module for delimited report files
//!
//! This module handles:
//! - Rendering reports as `;`-delimited rows
//! - Creating, appending to and reading export files by opaque id
//! - The scheduled sweep that empties the uploads directory

mod cleanup;
mod format;
mod store;

pub use cleanup::{run_sweep, start_cleanup_scheduler};
pub use format::{format_rows, HEADER};
pub use store::{ExportStore, WriteOutcome};
