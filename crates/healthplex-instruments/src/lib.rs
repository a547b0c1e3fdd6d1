//! healthplex-instruments
//!
//! Scored questionnaire definitions. Pure data and arithmetic, no I/O.
//! Defines the categories, question texts, and scoring rules of each
//! supported instrument.

pub mod error;
pub mod instruments;
pub mod scoring;

use healthplex_core::schema::question_field;
use healthplex_core::{FlatFormData, OrderedMap};

use error::InstrumentError;
use scoring::{
    rank_categories, Category, CategoryScore, GenderBlock, GenderScore, Interpretation,
    QuestionResponse, ScoreRange, ScoreSummary, ValidationError,
};

/// Number of categories reported as top concerns.
pub const TOP_CONCERNS: usize = 3;

/// Trait implemented by each scored questionnaire.
pub trait Instrument: Send + Sync {
    /// Unique identifier for this instrument (e.g., "metabolic").
    fn id(&self) -> &str;

    /// Human-readable name.
    fn name(&self) -> &str;

    /// Categories in table order.
    fn categories(&self) -> &[Category];

    /// Sex-specific blocks; at most one applies to a respondent.
    fn gender_blocks(&self) -> &[GenderBlock];

    /// Valid range of a single question score.
    fn score_range(&self) -> ScoreRange;

    /// Printed text of a question.
    fn question_text(&self, id: u16) -> Option<&str>;

    /// Every question id the instrument scores, categories first.
    fn question_ids(&self) -> Vec<u16> {
        let mut ids: Vec<u16> = self
            .categories()
            .iter()
            .flat_map(|c| c.question_ids())
            .collect();
        for block in self.gender_blocks() {
            ids.extend(block.questions.iter().copied());
        }
        ids
    }

    /// Check entered scores against the instrument's range.
    ///
    /// Blank and non-numeric answers are not errors; they score 0.
    fn validate_scores(
        &self,
        data: &FlatFormData,
    ) -> Result<Vec<ValidationError>, InstrumentError> {
        let range = self.score_range();
        let mut errors = Vec::new();
        for id in self.question_ids() {
            let field = question_field(id);
            if let Some(value) = data.int(&field)?
                && !range.contains(value)
            {
                errors.push(ValidationError {
                    question_id: field,
                    value,
                    expected_range: range,
                    message: format!(
                        "{}: question {} score {} is outside range [{}, {}]",
                        self.name(),
                        id,
                        value,
                        range.min,
                        range.max,
                    ),
                });
            }
        }
        Ok(errors)
    }

    /// Score a questionnaire.
    ///
    /// Out-of-range scores are logged and still summed, saturating at the
    /// `i64` bounds. Each category subtotal is the sum of its question
    /// scores; the grand total adds every subtotal plus the subtotal of the
    /// gender block matching `sex`, if any.
    fn score(&self, data: &FlatFormData) -> Result<ScoreSummary, InstrumentError> {
        for err in self.validate_scores(data)? {
            tracing::warn!(question = %err.question_id, value = err.value, "{err}");
        }

        let mut categories = Vec::with_capacity(self.categories().len());
        let mut grand_total: i64 = 0;

        for category in self.categories() {
            let mut responses = OrderedMap::new();
            let mut subtotal: i64 = 0;
            for id in category.question_ids() {
                let response = question_response(self, data, id)?;
                subtotal = subtotal.saturating_add(response.score);
                responses.insert(question_field(id), response);
            }
            grand_total = grand_total.saturating_add(subtotal);
            categories.push(CategoryScore {
                id: category.id.clone(),
                name: category.name.clone(),
                responses,
                subtotal,
            });
        }

        let sex = data.text_or_empty("sex")?;
        let mut gender_specific = GenderScore {
            sex: sex.to_string(),
            responses: OrderedMap::new(),
            subtotal: 0,
            category_name: None,
        };
        if let Some(block) = self.gender_blocks().iter().find(|b| b.sex == sex) {
            for id in &block.questions {
                let response = question_response(self, data, *id)?;
                gender_specific.subtotal = gender_specific.subtotal.saturating_add(response.score);
                gender_specific.responses.insert(question_field(*id), response);
            }
            gender_specific.category_name = Some(block.category_name.clone());
            grand_total = grand_total.saturating_add(gender_specific.subtotal);
        }

        let rankings = rank_categories(&categories);
        let top_concerns = rankings
            .iter()
            .take(TOP_CONCERNS)
            .map(|r| r.name.clone())
            .collect();

        tracing::debug!(
            instrument = self.id(),
            grand_total,
            sex,
            "scored questionnaire"
        );

        Ok(ScoreSummary {
            categories,
            gender_specific,
            grand_total,
            interpretation: Interpretation::for_total(grand_total),
            rankings,
            top_concerns,
        })
    }
}

fn question_response<I: Instrument + ?Sized>(
    instrument: &I,
    data: &FlatFormData,
    id: u16,
) -> Result<QuestionResponse, InstrumentError> {
    let score = data.int(&question_field(id))?.unwrap_or(0);
    let text = instrument
        .question_text(id)
        .map(str::to_string)
        .unwrap_or_else(|| format!("Question {id}"));
    Ok(QuestionResponse { text, score })
}

/// Return all registered instruments.
pub fn all_instruments() -> Vec<Box<dyn Instrument>> {
    vec![Box::new(instruments::metabolic::MetabolicAssessment)]
}

/// Look up an instrument by ID.
pub fn get_instrument(id: &str) -> Result<Box<dyn Instrument>, InstrumentError> {
    all_instruments()
        .into_iter()
        .find(|i| i.id() == id)
        .ok_or_else(|| InstrumentError::UnknownInstrument(id.to_string()))
}
