//! Report generation
//!
//! This module drives a complete run and formats its output lines.

mod driver;
mod format;

pub use driver::{ReportDriver, ReportSummary};
pub use format::{format_record_line, hours_minutes};
