use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

use healthplex_core::schema::RESERVED_QUESTION;
use healthplex_core::OrderedMap;

/// Defines the valid range for a single question score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoreRange {
    pub min: i64,
    pub max: i64,
}

impl ScoreRange {
    pub fn contains(&self, value: i64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// A scored category covering an inclusive range of question ids.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub first_question: u16,
    pub last_question: u16,
}

impl Category {
    /// Question ids in the category, skipping the reserved item.
    pub fn question_ids(&self) -> impl Iterator<Item = u16> + '_ {
        (self.first_question..=self.last_question).filter(|id| *id != RESERVED_QUESTION)
    }
}

/// Questions only scored when the respondent's recorded sex matches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenderBlock {
    /// Exact value of the `sex` field that enables this block.
    pub sex: String,
    pub category_name: String,
    pub questions: Vec<u16>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct QuestionResponse {
    pub text: String,
    pub score: i64,
}

/// Scored responses of one category. The id is the key it is filed under.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryScore {
    #[serde(skip)]
    pub id: String,
    pub name: String,
    pub responses: OrderedMap<QuestionResponse>,
    pub subtotal: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenderScore {
    pub sex: String,
    pub responses: OrderedMap<QuestionResponse>,
    pub subtotal: i64,
    pub category_name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum SeverityLevel {
    Low,
    Moderate,
    Elevated,
    High,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct Interpretation {
    pub level: SeverityLevel,
    pub description: String,
}

impl Interpretation {
    /// Threshold ladder; each band's upper edge is inclusive.
    pub fn for_total(total: i64) -> Self {
        let (level, description) = match total {
            t if t <= 20 => (SeverityLevel::Low, "Minimal metabolic dysfunction indicated"),
            t if t <= 50 => (
                SeverityLevel::Moderate,
                "Some areas of concern that may benefit from attention",
            ),
            t if t <= 100 => (SeverityLevel::Elevated, "Multiple areas showing dysfunction"),
            _ => (
                SeverityLevel::High,
                "Significant metabolic dysfunction across multiple systems",
            ),
        };
        Self {
            level,
            description: description.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct RankedCategory {
    pub id: String,
    pub name: String,
    pub subtotal: i64,
}

/// Everything the scoring engine computes for one questionnaire.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSummary {
    pub categories: Vec<CategoryScore>,
    pub gender_specific: GenderScore,
    pub grand_total: i64,
    pub interpretation: Interpretation,
    pub rankings: Vec<RankedCategory>,
    pub top_concerns: Vec<String>,
}

/// Rank categories by subtotal, highest first. Equal subtotals keep table
/// order.
pub fn rank_categories(categories: &[CategoryScore]) -> Vec<RankedCategory> {
    let mut ranked: Vec<RankedCategory> = categories
        .iter()
        .map(|c| RankedCategory {
            id: c.id.clone(),
            name: c.name.clone(),
            subtotal: c.subtotal,
        })
        .collect();
    ranked.sort_by(|a, b| b.subtotal.cmp(&a.subtotal));
    ranked
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, Error)]
#[ts(export)]
#[error("{message}")]
pub struct ValidationError {
    pub question_id: String,
    pub value: i64,
    pub expected_range: ScoreRange,
    pub message: String,
}
