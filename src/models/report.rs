use serde::{Deserialize, Serialize};

/// Sentiment tag for an extracted performance snippet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

/// A single factual observation extracted from the transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceSnippet {
    /// The specific technical or behavioral topic
    pub topic: String,
    /// A brief, verbatim quote from the candidate
    pub quote: String,
    /// A concise, neutral assessment of the response
    pub assessment: String,
    pub sentiment: Sentiment,
}

/// Extraction stage output: 3-7 snippets, no holistic judgment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub snippets: Vec<PerformanceSnippet>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateSummary {
    /// A single, impactful sentence summarizing the candidate
    pub headline: String,
    /// A 2-3 sentence paragraph with the overall impression
    pub overall_impression: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrengthInsight {
    /// The high-level skill or competency identified
    pub skill: String,
    /// Evidence from the transcript supporting this strength
    pub evidence: String,
}

/// Priority for addressing a development area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaknessInsight {
    /// The high-level area for development
    pub skill: String,
    /// Evidence from the transcript supporting this weakness
    pub evidence: String,
    pub priority: Priority,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insights {
    pub strengths: Vec<StrengthInsight>,
    pub weaknesses: Vec<WeaknessInsight>,
}

/// One step of the development roadmap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadmapStep {
    /// Timeframe for this step, e.g. "Day 1-5"
    pub timespan: String,
    /// Primary theme or goal for this period
    pub focus: String,
    /// Concrete, actionable tasks
    pub activities: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendedResource {
    /// The topic this resource relates to
    pub topic: String,
    /// Direct URL to the resource; must be absolute http/https
    pub link: String,
    /// Why this specific resource is recommended
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DevelopmentPlan {
    /// Most critical topics to focus on
    pub priority_topics: Vec<String>,
    pub roadmap: Vec<RoadmapStep>,
    pub recommended_resources: Vec<RecommendedResource>,
}

/// Synthesis stage output and the unit the pipeline returns and caches.
/// Never stored partially populated: it only exists after both stages
/// succeed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalReport {
    pub candidate_summary: CandidateSummary,
    pub insights: Insights,
    pub development_plan: DevelopmentPlan,
}
