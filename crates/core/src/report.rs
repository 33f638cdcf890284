//! Markdown health guide rendered from an assessment.
//!
//! Pure text generation: the caller supplies the assessment id and timestamp and decides where
//! the document goes.

use crate::assessment::AssessmentResult;
use crate::diseases::DiseaseRiskResult;
use crate::metabolic::MetabolicSyndromeStatus;
use chrono::{DateTime, Utc};

/// Title used for every generated guide.
pub const HEALTH_GUIDE_TITLE: &str = "Personal Health Management Guide";

/// Renders the guide for one assessment.
///
/// Layout:
/// ```markdown
/// # Personal Health Management Guide
///
/// **Assessment ID:** <id>
/// **Assessed at:** <rfc3339>
/// **Calculation version:** v4.0.0
///
/// ## Overall risk
/// ...
/// ## <Disease>          (five sections, report order)
/// ## Metabolic syndrome
/// ## General recommendations
/// ## Lifestyle modifications
/// ## Medical follow-up
/// ```
pub fn render_health_guide(
    result: &AssessmentResult,
    assessment_id: &str,
    assessed_at: DateTime<Utc>,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("# {HEALTH_GUIDE_TITLE}\n\n"));
    output.push_str(&format!("**Assessment ID:** {assessment_id}\n"));
    output.push_str(&format!(
        "**Assessed at:** {}\n",
        assessed_at.to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
    ));
    output.push_str(&format!(
        "**Calculation version:** {}\n\n",
        result.calculation_version
    ));

    output.push_str("## Overall risk\n\n");
    output.push_str(&format!(
        "**Level:** {} ({})\n",
        result.overall_level.label(),
        result.overall_level
    ));
    output.push_str(&format!("**Score:** {}/100\n\n", result.overall_score));

    for disease in result.disease_results() {
        render_disease(&mut output, disease);
    }

    render_metabolic(&mut output, &result.metabolic_syndrome);

    render_list(
        &mut output,
        "General recommendations",
        &result.general_recommendations,
    );
    render_list(
        &mut output,
        "Lifestyle modifications",
        &result.lifestyle_modifications,
    );
    render_list(&mut output, "Medical follow-up", &result.medical_follow_up);

    output.push_str(
        "_This guide is generated from a rule-based screening model and is not a diagnosis._\n",
    );
    output
}

fn render_disease(output: &mut String, result: &DiseaseRiskResult) {
    output.push_str(&format!("## {}\n\n", result.disease.label()));
    output.push_str(&format!(
        "**Level:** {} ({})\n",
        result.level.label(),
        result.level
    ));
    output.push_str(&format!("**Score:** {}/100\n", result.score));
    if let Some(risk) = result.ten_year_risk {
        output.push_str(&format!("**Ten-year risk:** {risk:.1}%\n"));
    }
    output.push('\n');

    if result.factors.is_empty() {
        output.push_str("No contributing factors identified.\n\n");
    } else {
        output.push_str("### Contributing factors\n\n");
        for factor in &result.factors {
            output.push_str(&format!(
                "- {}: {} - {}\n",
                factor.name, factor.value, factor.description
            ));
        }
        output.push('\n');
    }

    if !result.recommendations.is_empty() {
        output.push_str("### Recommendations\n\n");
        for item in &result.recommendations {
            output.push_str(&format!("- {item}\n"));
        }
        output.push('\n');
    }
}

fn render_metabolic(output: &mut String, status: &MetabolicSyndromeStatus) {
    output.push_str("## Metabolic syndrome\n\n");
    let verdict = if status.is_metabolic_syndrome {
        "Criteria met"
    } else {
        "Criteria not met"
    };
    output.push_str(&format!("**Verdict:** {verdict}\n"));
    output.push_str(&format!(
        "**Criteria met:** {}/5\n\n",
        status.criteria_met
    ));

    if !status.missing_values.is_empty() {
        output.push_str(&format!(
            "Not evaluated because data is missing: {}. These criteria are counted as not met, \
             so the verdict may understate the true status.\n\n",
            status.missing_labels().join(", ")
        ));
    }
}

fn render_list(output: &mut String, heading: &str, items: &[String]) {
    output.push_str(&format!("## {heading}\n\n"));
    for item in items {
        output.push_str(&format!("- {item}\n"));
    }
    output.push('\n');
}
