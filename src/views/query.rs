use std::sync::Arc;

use crate::models::Case;

/// Canned questions offered under the query box. Choosing one fills the
/// input; it does not submit.
pub const SUGGESTED_QUERIES: [&str; 5] = [
    "What conditions should I consider based on the X-ray and symptoms?",
    "What are the recommended diagnostic tests for this case?",
    "Explain the radiological findings in detail",
    "What treatment options would you suggest?",
    "Are there any red flags I should be aware of?",
];

/// "Active Case" badges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaseSummary {
    pub image_count: usize,
    pub has_notes: bool,
}

#[derive(Debug, Clone)]
pub struct QueryCollector {
    case: Arc<Case>,
    query: String,
}

impl QueryCollector {
    pub fn new(case: Arc<Case>) -> Self {
        Self {
            case,
            query: String::new(),
        }
    }

    pub fn case(&self) -> &Case {
        &self.case
    }

    pub fn case_summary(&self) -> CaseSummary {
        CaseSummary {
            image_count: self.case.images.len(),
            has_notes: self.case.has_notes(),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, text: impl Into<String>) {
        self.query = text.into();
    }

    pub fn choose_suggestion(&mut self, index: usize) -> bool {
        match SUGGESTED_QUERIES.get(index) {
            Some(suggestion) => {
                self.query = (*suggestion).to_string();
                true
            }
            None => false,
        }
    }

    pub fn can_submit(&self) -> bool {
        !self.query.trim().is_empty()
    }

    /// Emit the query as typed and clear the input. Blank input is a no-op.
    pub fn submit(&mut self) -> Option<String> {
        if !self.can_submit() {
            return None;
        }
        Some(std::mem::take(&mut self.query))
    }
}
