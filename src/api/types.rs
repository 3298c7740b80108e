//! Shared state for the analysis API.

use std::sync::Arc;

use crate::analysis::CaseAnalyzer;

/// Router state. Cloned per request; the analyzer itself is shared.
pub struct ApiContext<G> {
    pub analyzer: Arc<CaseAnalyzer<G>>,
}

impl<G> ApiContext<G> {
    pub fn new(analyzer: Arc<CaseAnalyzer<G>>) -> Self {
        Self { analyzer }
    }
}

// Manual impl: `G` itself need not be `Clone`.
impl<G> Clone for ApiContext<G> {
    fn clone(&self) -> Self {
        Self {
            analyzer: Arc::clone(&self.analyzer),
        }
    }
}
