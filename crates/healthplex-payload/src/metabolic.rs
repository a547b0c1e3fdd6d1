use serde::Serialize;

use healthplex_core::{FlatFormData, OrderedMap};
use healthplex_instruments::scoring::{CategoryScore, GenderScore, Interpretation, RankedCategory};
use healthplex_instruments::Instrument;
use healthplex_instruments::instruments::metabolic::MetabolicAssessment;

use crate::error::PayloadError;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetabolicSection {
    pub patient: Patient,
    /// Keyed by category id (`cat-1` .. `cat-14`), in table order.
    pub categories: OrderedMap<CategoryScore>,
    pub gender_specific: GenderScore,
    pub gallbladder_removed: bool,
    pub grand_total: i64,
    pub score_interpretation: Interpretation,
    pub category_rankings: Vec<RankedCategory>,
    pub top_concerns: Vec<String>,
}

/// Name and date are only collected by the standalone questionnaire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Patient {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// `None` when blank, unparseable or 0.
    pub age: Option<i64>,
    pub sex: String,
}

pub fn build(data: &FlatFormData, standalone: bool) -> Result<MetabolicSection, PayloadError> {
    let summary = MetabolicAssessment.score(data)?;

    let patient = Patient {
        name: standalone
            .then(|| data.text_or_empty("name").map(str::to_string))
            .transpose()?,
        date: standalone
            .then(|| data.text_or_empty("date").map(str::to_string))
            .transpose()?,
        age: data.int("age")?.filter(|&age| age != 0),
        sex: data.text_or_empty("sex")?.to_string(),
    };

    let categories = summary
        .categories
        .into_iter()
        .map(|c| (c.id.clone(), c))
        .collect();

    tracing::debug!(
        grand_total = summary.grand_total,
        level = ?summary.interpretation.level,
        "built metabolic section"
    );

    Ok(MetabolicSection {
        patient,
        categories,
        gender_specific: summary.gender_specific,
        gallbladder_removed: data.text_or_empty("gallbladder_removed")? == "yes",
        grand_total: summary.grand_total,
        score_interpretation: summary.interpretation,
        category_rankings: summary.rankings,
        top_concerns: summary.top_concerns,
    })
}
