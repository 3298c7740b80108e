use std::sync::Arc;

use crate::client::{AnalysisClient, ClientError};
use crate::models::{AnalysisResult, Case};

use super::query::QueryCollector;
use super::results::ResultsView;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Home,
    Upload,
    Query,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

/// Transient, dismissable user message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

/// Page-level state: which view is shown, the active case, and the
/// latest analysis. Lives for one browser session; nothing persists.
#[derive(Debug, Default)]
pub struct Session {
    view: ActiveView,
    case: Option<Arc<Case>>,
    query: Option<QueryCollector>,
    result: Option<AnalysisResult>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> ActiveView {
        self.view
    }

    pub fn case(&self) -> Option<&Case> {
        self.case.as_deref()
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    pub fn results_view(&self) -> Option<ResultsView> {
        self.result.as_ref().map(ResultsView::from)
    }

    pub fn query_collector(&mut self) -> Option<&mut QueryCollector> {
        self.query.as_mut()
    }

    /// Switch views. The query view stays disabled until a case exists.
    pub fn navigate(&mut self, view: ActiveView) -> bool {
        if view == ActiveView::Query && self.case.is_none() {
            return false;
        }
        self.view = view;
        true
    }

    /// Replace the active case wholesale and move on to querying.
    pub fn accept_case(&mut self, case: Case) -> Notice {
        let case = Arc::new(case);
        self.query = Some(QueryCollector::new(Arc::clone(&case)));
        self.case = Some(case);
        self.view = ActiveView::Query;
        Notice::new(NoticeLevel::Success, "Case uploaded successfully")
    }

    pub fn begin_analysis(&self) -> Notice {
        Notice::new(NoticeLevel::Info, "Analyzing your query with AI...")
    }

    /// Success replaces the previous result; failure keeps it.
    pub fn apply_outcome(&mut self, outcome: Result<AnalysisResult, ClientError>) -> Notice {
        match outcome {
            Ok(result) => {
                self.result = Some(result);
                Notice::new(NoticeLevel::Success, "AI analysis complete")
            }
            Err(err) => {
                tracing::warn!(error = %err, "Analysis failed");
                Notice::new(NoticeLevel::Error, err.user_message())
            }
        }
    }

    /// Submit one query for the active case. Returns the notices in the
    /// order they would be shown.
    pub async fn analyze(&mut self, client: &AnalysisClient, query: &str) -> Vec<Notice> {
        let started = self.begin_analysis();
        let case = self.case.clone();
        let outcome = client.analyze(query, case.as_deref()).await;
        vec![started, self.apply_outcome(outcome)]
    }
}
