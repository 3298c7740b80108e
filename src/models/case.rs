use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// One uploaded image. Bytes stay on the client side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseImage {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl CaseImage {
    /// Content type is guessed from the file name; unknown extensions map to
    /// `application/octet-stream`.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = mime_guess::from_path(&file_name)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        Self {
            file_name,
            content_type,
            bytes,
        }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    pub fn summary(&self) -> ImageSummary {
        ImageSummary {
            name: self.file_name.clone(),
            size: self.bytes.len() as u64,
            content_type: Some(self.content_type.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Case {
    pub images: Vec<CaseImage>,
    pub notes: String,
    /// RFC 3339 capture time (UTC).
    pub timestamp: String,
}

impl Case {
    pub fn new(images: Vec<CaseImage>, notes: String, captured_at: DateTime<Utc>) -> Self {
        Self {
            images,
            notes,
            timestamp: captured_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    pub fn has_notes(&self) -> bool {
        !self.notes.is_empty()
    }

    /// Wire form sent to the analysis endpoint: image summaries only.
    pub fn to_case_data(&self) -> CaseData {
        CaseData {
            images: self
                .images
                .iter()
                .map(|img| serde_json::to_value(img.summary()).unwrap_or_default())
                .collect(),
            notes: Some(self.notes.clone()),
            timestamp: Some(self.timestamp.clone()),
        }
    }
}

pub type SharedCase = Arc<Case>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSummary {
    pub name: String,
    pub size: u64,
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "type")]
    pub content_type: Option<String>,
}

/// Case context as carried in an analysis request.
///
/// `images` accepts any JSON element (browsers serialize `File` objects as
/// `{}`); only the count is ever used server-side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaseData {
    #[serde(default)]
    pub images: Vec<serde_json::Value>,
    #[serde(default, alias = "clinicalNotes", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl CaseData {
    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref().filter(|n| !n.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    pub query: String,
    #[serde(default)]
    pub case_data: Option<CaseData>,
}

impl AnalysisRequest {
    pub fn new(query: impl Into<String>, case: Option<&Case>) -> Self {
        Self {
            query: query.into(),
            case_data: case.map(Case::to_case_data),
        }
    }
}
