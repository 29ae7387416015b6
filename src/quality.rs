use crate::models::FinalReport;

/// Outcome of the post-generation quality check. A quality signal, not a
/// gate: callers log the issues and still return the report.
#[derive(Debug, Clone)]
pub struct QualityCheck {
    pub passed: bool,
    pub issues: Vec<String>,
}

/// Check a completed report for completeness and shape.
///
/// Never fails the pipeline; every threshold violation becomes one issue
/// string.
pub fn check_report_quality(report: &FinalReport) -> QualityCheck {
    let mut issues = Vec::new();

    if report.candidate_summary.headline.len() < 20 {
        issues.push("Headline is too short/generic".to_string());
    }
    if report.candidate_summary.overall_impression.len() < 50 {
        issues.push("Overall impression lacks detail".to_string());
    }
    if report.insights.strengths.is_empty() {
        issues.push("No strengths identified".to_string());
    }
    if report.insights.weaknesses.is_empty() {
        issues.push("No weaknesses identified".to_string());
    }
    if report.development_plan.priority_topics.is_empty() {
        issues.push("No priority topics defined".to_string());
    }
    if report.development_plan.roadmap.len() < 2 {
        issues.push("Development roadmap insufficiently detailed".to_string());
    }
    if report.development_plan.recommended_resources.is_empty() {
        issues.push("No learning resources provided".to_string());
    }

    for resource in &report.development_plan.recommended_resources {
        if resource.link.trim().is_empty() {
            issues.push(format!("Resource '{}' has empty link", resource.topic));
        } else if !is_absolute_http_url(&resource.link) {
            issues.push(format!(
                "Resource '{}' has invalid link format",
                resource.topic
            ));
        }
    }

    QualityCheck {
        passed: issues.is_empty(),
        issues,
    }
}

fn is_absolute_http_url(link: &str) -> bool {
    link.starts_with("http://") || link.starts_with("https://")
}
