//! Headless view state for the upload → query → results flow.
//!
//! Each view owns its state exclusively and changes only on explicit
//! user actions (`&mut self` methods). Nothing here performs I/O except
//! `Session::analyze`, which awaits a single analysis request.

pub mod query;
pub mod results;
pub mod session;
pub mod upload;

pub use query::{CaseSummary, QueryCollector, SUGGESTED_QUERIES};
pub use results::{DiagnosisRow, ResultsView, DISCLAIMER};
pub use session::{ActiveView, Notice, NoticeLevel, Session};
pub use upload::UploadCollector;

use thiserror::Error;

/// Rejected local submissions. These never reach the network.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UserInputError {
    #[error("Please upload at least one image or add clinical notes")]
    EmptyCase,
}
