/*!
 * Process Module
 * Process specifications and per-run process control blocks
 */

pub mod record;
pub mod types;

pub use record::ProcessRecord;
pub use types::{ProcessSpec, ProcessState, ProcessSummary};
