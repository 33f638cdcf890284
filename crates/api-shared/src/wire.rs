//! Request and response bodies for the REST adapter.
//!
//! Field names are camelCase on the wire. Engine output is embedded verbatim under
//! `outputData`, so its schema is published as a free-form object.

use chrono::{DateTime, Utc};
use metarisk_core::{AssessmentResult, RawPatientInput};
use metarisk_store::{AssessmentPage, CustomerId, HealthGuide, RecordId, StoredAssessment};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Largest page a client may request from the customer listing.
pub const MAX_PAGE_LIMIT: usize = 100;

/// Body of `POST /assessments`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAssessmentReq {
    /// Optional owner; validated as a non-empty id of at most 64 characters.
    #[serde(default)]
    pub customer_id: Option<String>,
    #[schema(value_type = Object)]
    pub input_data: RawPatientInput,
}

/// Body of `POST /assessments/calculate`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CalculateAssessmentReq {
    #[schema(value_type = Object)]
    pub input_data: RawPatientInput,
}

/// A persisted assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentRes {
    #[schema(value_type = String, example = "550e8400e29b41d4a716446655440000")]
    pub assessment_id: RecordId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub customer_id: Option<CustomerId>,
    #[schema(value_type = String, format = DateTime)]
    pub assessed_at: DateTime<Utc>,
    #[schema(value_type = Object)]
    pub output_data: AssessmentResult,
}

impl From<StoredAssessment> for AssessmentRes {
    fn from(stored: StoredAssessment) -> Self {
        Self {
            assessment_id: stored.assessment_id,
            customer_id: stored.customer_id,
            assessed_at: stored.assessed_at,
            output_data: stored.output_data,
        }
    }
}

/// Query string of the customer listing.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListAssessmentsQuery {
    /// Page size, 1-100. Defaults to 10.
    pub limit: Option<usize>,
    /// Number of newer assessments to skip. Defaults to 0.
    pub skip: Option<usize>,
}

impl ListAssessmentsQuery {
    /// Resolved `(limit, skip)`, with the limit clamped to `1..=MAX_PAGE_LIMIT`.
    pub fn resolve(&self, default_limit: usize) -> (usize, usize) {
        let limit = self.limit.unwrap_or(default_limit).clamp(1, MAX_PAGE_LIMIT);
        (limit, self.skip.unwrap_or(0))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Pagination {
    pub total: usize,
    pub limit: usize,
    pub skip: usize,
}

/// A page of a customer's assessments, newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ListAssessmentsRes {
    pub items: Vec<AssessmentRes>,
    pub pagination: Pagination,
}

impl From<AssessmentPage> for ListAssessmentsRes {
    fn from(page: AssessmentPage) -> Self {
        Self {
            items: page.items.into_iter().map(AssessmentRes::from).collect(),
            pagination: Pagination {
                total: page.total,
                limit: page.limit,
                skip: page.skip,
            },
        }
    }
}

/// A rendered health guide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthGuideRes {
    #[schema(value_type = String)]
    pub guide_id: RecordId,
    #[schema(value_type = String)]
    pub assessment_id: RecordId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub customer_id: Option<CustomerId>,
    pub title: String,
    /// Markdown.
    pub content: String,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
    pub template_name: String,
}

impl From<HealthGuide> for HealthGuideRes {
    fn from(guide: HealthGuide) -> Self {
        Self {
            guide_id: guide.guide_id,
            assessment_id: guide.assessment_id,
            customer_id: guide.customer_id,
            title: guide.title,
            content: guide.content,
            created_at: guide.created_at,
            template_name: guide.template_name,
        }
    }
}
