use serde::Serialize;

use healthplex_core::FlatFormData;

use crate::error::PayloadError;

/// Stress rating assumed when the question is left blank or rated 0.
pub const DEFAULT_STRESS_LEVEL: i64 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Lifestyle {
    pub alcohol_per_week: i64,
    pub caffeine_per_day: i64,
    pub eat_out_per_week: i64,
    pub workout_per_week: i64,
    pub smokes: bool,
    pub stress_level: i64,
    pub worst_foods: Vec<String>,
    pub healthiest_foods: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Medications {
    pub current: String,
    pub supplements: String,
}

pub fn build(data: &FlatFormData) -> Result<Lifestyle, PayloadError> {
    Ok(Lifestyle {
        alcohol_per_week: data.int("alcohol_per_week")?.unwrap_or(0),
        caffeine_per_day: data.int("caffeine_per_day")?.unwrap_or(0),
        eat_out_per_week: data.int("eat_out_per_week")?.unwrap_or(0),
        workout_per_week: data.int("workout_per_week")?.unwrap_or(0),
        smokes: data.text_or_empty("smoke")? == "yes",
        stress_level: data
            .int("stress_level")?
            .filter(|&level| level != 0)
            .unwrap_or(DEFAULT_STRESS_LEVEL),
        worst_foods: filled(data, &["worst_food_1", "worst_food_2", "worst_food_3"])?,
        healthiest_foods: filled(data, &["healthy_food_1", "healthy_food_2", "healthy_food_3"])?,
    })
}

pub fn build_medications(data: &FlatFormData) -> Result<Medications, PayloadError> {
    Ok(Medications {
        current: data.text_or_empty("medications")?.to_string(),
        supplements: data.text_or_empty("supplements")?.to_string(),
    })
}

fn filled(data: &FlatFormData, fields: &[&str]) -> Result<Vec<String>, PayloadError> {
    let mut values = Vec::new();
    for field in fields {
        if let Some(v) = data.non_empty_text(field)? {
            values.push(v.to_string());
        }
    }
    Ok(values)
}
