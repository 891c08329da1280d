//! Learning roadmap and its recovery from free-form model text.
//!
//! The model is asked for strict JSON but routinely wraps it in prose or
//! code fences. Parsing takes the outermost `{ ... }` span and deserializes
//! it leniently; anything unusable degrades to a single-stage roadmap that
//! carries the raw text.

use serde::{Deserialize, Serialize};

/// A learning roadmap for one topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roadmap {
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub roadmap: Vec<RoadmapStage>,
}

/// One stage of a roadmap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadmapStage {
    #[serde(default)]
    pub stage: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub estimated_time: String,
    #[serde(default)]
    pub resources: Vec<RoadmapResource>,
}

/// A resource recommended for a stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadmapResource {
    #[serde(default)]
    pub title: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub url: String,
}

/// Prompt asking the model for a roadmap in the exact JSON shape above.
pub fn roadmap_prompt(topic: &str) -> String {
    format!(
        r#"Generate a detailed learning roadmap for "{topic}".
Respond ONLY with valid JSON in this exact structure, with no markdown and no commentary:
{{
  "topic": "{topic}",
  "overview": "short overview of the learning path",
  "roadmap": [
    {{
      "stage": "Stage name",
      "description": "What to learn in this stage",
      "estimated_time": "e.g. 2 weeks",
      "resources": [
        {{ "title": "Resource title", "type": "video | article | course | docs", "url": "https://..." }}
      ]
    }}
  ]
}}"#
    )
}

impl Roadmap {
    /// Builds a roadmap from model output, falling back when it is unusable.
    pub fn from_ai_text(topic: &str, text: &str) -> Self {
        match Self::parse(text) {
            Some(mut roadmap) => {
                if roadmap.topic.trim().is_empty() {
                    roadmap.topic = topic.to_string();
                }
                roadmap
            }
            None => Self::fallback(topic, text),
        }
    }

    /// Roadmap carrying the raw text when no structured data was returned.
    pub fn fallback(topic: &str, text: &str) -> Self {
        let description = if text.trim().is_empty() {
            "Error parsing roadmap.".to_string()
        } else {
            text.to_string()
        };

        Self {
            topic: topic.to_string(),
            overview: "No structured data returned.".to_string(),
            roadmap: vec![RoadmapStage {
                stage: "AI Response".to_string(),
                description,
                estimated_time: "N/A".to_string(),
                resources: Vec::new(),
            }],
        }
    }

    fn parse(text: &str) -> Option<Self> {
        let start = text.find('{')?;
        let end = text.rfind('}')?;
        if end <= start {
            return None;
        }
        serde_json::from_str(&text[start..=end]).ok()
    }
}
