use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::FinalReport;

/// Machine-readable report document written by the CLI.
#[derive(Debug, Clone, Serialize)]
pub struct ReportDocument<'a> {
    /// When the report was produced
    pub generated_at: DateTime<Utc>,
    /// Model that produced it
    pub model: &'a str,
    pub report: &'a FinalReport,
}

impl<'a> ReportDocument<'a> {
    pub fn new(report: &'a FinalReport, model: &'a str) -> Self {
        Self {
            generated_at: Utc::now(),
            model,
            report,
        }
    }

    /// Write to a JSON file
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create file: {:?}", path))?;
        serde_json::to_writer_pretty(file, self).context("Failed to write JSON")?;
        Ok(())
    }
}

/// Human-readable report rendering.
pub struct HumanReport<'a> {
    report: &'a FinalReport,
}

impl<'a> HumanReport<'a> {
    pub fn new(report: &'a FinalReport) -> Self {
        Self { report }
    }

    /// Format the report as readable markdown-style text
    pub fn format(&self) -> String {
        let report = self.report;
        let mut output = String::new();

        output.push_str("# Candidate Development Report\n\n");
        output.push_str(&format!("**{}**\n\n", report.candidate_summary.headline));
        output.push_str(&report.candidate_summary.overall_impression);
        output.push_str("\n\n## Strengths\n\n");
        for strength in &report.insights.strengths {
            output.push_str(&format!("- {}: {}\n", strength.skill, strength.evidence));
        }

        output.push_str("\n## Areas for Development\n\n");
        for weakness in &report.insights.weaknesses {
            output.push_str(&format!(
                "- {} ({:?} priority): {}\n",
                weakness.skill, weakness.priority, weakness.evidence
            ));
        }

        output.push_str("\n## Priority Topics\n\n");
        for topic in &report.development_plan.priority_topics {
            output.push_str(&format!("- {topic}\n"));
        }

        output.push_str("\n## Roadmap\n\n");
        for step in &report.development_plan.roadmap {
            output.push_str(&format!("### {} - {}\n", step.timespan, step.focus));
            for activity in &step.activities {
                output.push_str(&format!("- {activity}\n"));
            }
            output.push('\n');
        }

        output.push_str("## Recommended Resources\n\n");
        for resource in &report.development_plan.recommended_resources {
            output.push_str(&format!(
                "- [{}]({}) - {}\n",
                resource.topic, resource.link, resource.reason
            ));
        }

        output
    }

    /// Write to a text file
    pub fn write_file(&self, path: &Path) -> Result<()> {
        let mut file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create file: {:?}", path))?;
        write!(file, "{}", self.format())?;
        Ok(())
    }
}
