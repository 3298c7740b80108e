use chrono::Utc;

use super::UserInputError;
use crate::models::{Case, CaseImage};

/// Collects images and notes for a new case.
#[derive(Debug, Default, Clone)]
pub struct UploadCollector {
    images: Vec<CaseImage>,
    notes: String,
}

impl UploadCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn images(&self) -> &[CaseImage] {
        &self.images
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// Append files in picker order. Returns how many were added.
    pub fn add_images<I>(&mut self, files: I) -> usize
    where
        I: IntoIterator<Item = CaseImage>,
    {
        let before = self.images.len();
        self.images.extend(files);
        self.images.len() - before
    }

    pub fn remove_image(&mut self, index: usize) -> Option<CaseImage> {
        if index < self.images.len() {
            Some(self.images.remove(index))
        } else {
            None
        }
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
    }

    pub fn clear(&mut self) {
        self.images.clear();
        self.notes.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty() && self.notes.trim().is_empty()
    }

    /// Produce a case stamped with the current time.
    ///
    /// Notes are kept exactly as typed; whitespace only matters for the
    /// emptiness check.
    pub fn submit(&self) -> Result<Case, UserInputError> {
        if self.is_empty() {
            return Err(UserInputError::EmptyCase);
        }
        Ok(Case::new(self.images.clone(), self.notes.clone(), Utc::now()))
    }
}
