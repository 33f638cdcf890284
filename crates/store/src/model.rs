use chrono::{DateTime, Utc};
use metarisk_core::AssessmentResult;
use metarisk_types::CustomerId;
use metarisk_uuid::RecordId;
use serde::{Deserialize, Serialize};

/// Template name recorded on generated guides.
pub const HEALTH_GUIDE_TEMPLATE: &str = "health-guide-v1";

/// One assessment as persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredAssessment {
    pub assessment_id: RecordId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<CustomerId>,
    pub assessed_at: DateTime<Utc>,
    pub output_data: AssessmentResult,
}

/// Rendered health guide for one assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthGuide {
    pub guide_id: RecordId,
    pub assessment_id: RecordId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<CustomerId>,
    pub title: String,
    /// Markdown.
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub template_name: String,
}

/// A page of a customer's assessments, newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentPage {
    pub items: Vec<StoredAssessment>,
    /// Number of assessments for the customer before paging.
    pub total: usize,
    pub limit: usize,
    pub skip: usize,
}
