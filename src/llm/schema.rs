use serde_json::{Value, json};

/// Response schema for the extraction stage (AnalysisReport).
pub fn analysis_report_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "snippets": {
                "type": "array",
                "description": "Extracted performance snippets",
                "items": {
                    "type": "object",
                    "properties": {
                        "topic": {
                            "type": "string",
                            "description": "The specific technical or behavioral topic"
                        },
                        "quote": {
                            "type": "string",
                            "description": "A brief, verbatim quote from the candidate"
                        },
                        "assessment": {
                            "type": "string",
                            "description": "A concise, neutral assessment of the response"
                        },
                        "sentiment": {
                            "type": "string",
                            "enum": ["positive", "negative", "neutral"]
                        }
                    },
                    "required": ["topic", "quote", "assessment", "sentiment"]
                }
            }
        },
        "required": ["snippets"]
    })
}

/// Response schema for the synthesis stage (FinalReport).
pub fn final_report_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "candidate_summary": {
                "type": "object",
                "properties": {
                    "headline": {
                        "type": "string",
                        "description": "A single, impactful sentence summarizing the candidate"
                    },
                    "overall_impression": {
                        "type": "string",
                        "description": "A 2-3 sentence paragraph with the overall impression"
                    }
                },
                "required": ["headline", "overall_impression"]
            },
            "insights": {
                "type": "object",
                "properties": {
                    "strengths": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "skill": {"type": "string"},
                                "evidence": {"type": "string"}
                            },
                            "required": ["skill", "evidence"]
                        }
                    },
                    "weaknesses": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "skill": {"type": "string"},
                                "evidence": {"type": "string"},
                                "priority": {
                                    "type": "string",
                                    "enum": ["High", "Medium", "Low"]
                                }
                            },
                            "required": ["skill", "evidence", "priority"]
                        }
                    }
                },
                "required": ["strengths", "weaknesses"]
            },
            "development_plan": {
                "type": "object",
                "properties": {
                    "priority_topics": {
                        "type": "array",
                        "items": {"type": "string"}
                    },
                    "roadmap": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "timespan": {
                                    "type": "string",
                                    "description": "Timeframe for this step, e.g. 'Day 1-5'"
                                },
                                "focus": {"type": "string"},
                                "activities": {
                                    "type": "array",
                                    "items": {"type": "string"}
                                }
                            },
                            "required": ["timespan", "focus", "activities"]
                        }
                    },
                    "recommended_resources": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "topic": {"type": "string"},
                                "link": {
                                    "type": "string",
                                    "description": "Absolute http/https URL"
                                },
                                "reason": {"type": "string"}
                            },
                            "required": ["topic", "link", "reason"]
                        }
                    }
                },
                "required": ["priority_topics", "roadmap", "recommended_resources"]
            }
        },
        "required": ["candidate_summary", "insights", "development_plan"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schemas_are_objects() {
        assert_eq!(analysis_report_schema()["type"], "object");
        assert_eq!(final_report_schema()["type"], "object");
    }

    #[test]
    fn test_sentiment_enum_matches_model() {
        let schema = analysis_report_schema();
        let tags = &schema["properties"]["snippets"]["items"]["properties"]["sentiment"]["enum"];
        assert_eq!(*tags, json!(["positive", "negative", "neutral"]));
    }
}
