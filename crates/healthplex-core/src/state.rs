//! Live form state with the linked-field rules the form enforces while the
//! user types: a relative's age and age at death exclude each other, and
//! "other" text boxes are only enabled while their checkbox or radio option
//! is selected.

use std::collections::BTreeSet;

use crate::choices;
use crate::collect::{collect_with_schema, Control, ControlKind, ControlSource};
use crate::error::CoreError;
use crate::family::{FamilySlot, VitalStatus};
use crate::field::{FieldValue, FlatFormData};
use crate::schema::FormSchema;

#[derive(Debug, Clone)]
pub struct FormState {
    schema: FormSchema,
    values: FlatFormData,
    disabled: BTreeSet<String>,
}

impl FormState {
    /// A blank form. "Other" text boxes start disabled.
    pub fn new(schema: FormSchema) -> Self {
        let mut state = Self {
            schema,
            values: FlatFormData::new(),
            disabled: BTreeSet::new(),
        };
        state.refresh_disabled();
        state
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub fn is_disabled(&self, name: &str) -> bool {
        self.disabled.contains(name)
    }

    /// Set a text-like control or pick a radio option.
    pub fn set_value(&mut self, name: &str, value: impl Into<String>) -> Result<(), CoreError> {
        let kind = self.kind_of(name)?;
        if kind == ControlKind::Checkbox {
            return Err(CoreError::FieldType {
                field: name.to_string(),
                expected: "flag",
                found: "text",
            });
        }
        if self.is_disabled(name) {
            return Err(CoreError::FieldDisabled {
                field: name.to_string(),
            });
        }
        self.values.insert(name, FieldValue::Text(value.into()));
        self.apply_links(name);
        Ok(())
    }

    pub fn set_checked(&mut self, name: &str, checked: bool) -> Result<(), CoreError> {
        let kind = self.kind_of(name)?;
        if kind != ControlKind::Checkbox {
            return Err(CoreError::FieldType {
                field: name.to_string(),
                expected: kind_label(kind),
                found: "flag",
            });
        }
        self.values.insert(name, FieldValue::Flag(checked));
        self.apply_links(name);
        Ok(())
    }

    /// Load previously saved values, bypassing the per-keystroke rules.
    ///
    /// Unknown keys are dropped, checkbox values saved as `"on"`/`"true"`
    /// are read as checked, and a relative with both ages filled keeps only
    /// the age at death.
    pub fn restore(&mut self, saved: &FlatFormData) {
        let mut skipped = 0usize;
        for (name, value) in saved.iter() {
            let Some(spec) = self.schema.field(name) else {
                skipped += 1;
                continue;
            };
            let value = match (spec.kind, value) {
                (ControlKind::Checkbox, FieldValue::Text(s)) => {
                    FieldValue::Flag(s == "on" || s == "true")
                }
                _ => value.clone(),
            };
            self.values.insert(name, value);
        }

        for slot in FamilySlot::ALL {
            let age_field = slot.age_field();
            let death_field = slot.death_age_field();
            let age = self.values.text(&age_field).ok().flatten();
            let death = self.values.text(&death_field).ok().flatten();
            if let VitalStatus::Deceased { .. } = VitalStatus::resolve(age, death)
                && age.is_some_and(|a| !a.trim().is_empty())
            {
                tracing::warn!(slot = slot.key(), "draft had both ages set, keeping age at death");
                self.values.insert(age_field, FieldValue::Text(String::new()));
            }
        }

        self.refresh_disabled();
        tracing::debug!(restored = saved.len() - skipped, skipped, "restored form values");
    }

    /// Reset every control to its blank state.
    pub fn reset(&mut self) {
        self.values = FlatFormData::new();
        self.refresh_disabled();
    }

    /// Collect the current state into flat form data.
    pub fn collect(&self) -> FlatFormData {
        collect_with_schema(self, &self.schema)
    }

    fn kind_of(&self, name: &str) -> Result<ControlKind, CoreError> {
        self.schema
            .field(name)
            .map(|spec| spec.kind)
            .ok_or_else(|| CoreError::UnknownField(name.to_string()))
    }

    fn filled(&self, name: &str) -> bool {
        self.values.get(name).is_some_and(FieldValue::is_filled)
    }

    fn clear(&mut self, name: &str) {
        if self.values.contains_key(name) {
            self.values.insert(name, FieldValue::Text(String::new()));
        }
    }

    fn apply_links(&mut self, name: &str) {
        if let Some(slot) = name.strip_prefix("age_").and_then(FamilySlot::from_key) {
            self.exclude_pair(&slot.age_field(), &slot.death_age_field());
        } else if let Some(slot) = name.strip_prefix("death_").and_then(FamilySlot::from_key) {
            self.exclude_pair(&slot.death_age_field(), &slot.age_field());
        } else if name == choices::PAST_CARE_OTHER {
            self.toggle_other(choices::PAST_CARE_OTHER_TEXT, self.filled(name));
        } else if name == choices::FEAR_CONDITION_OTHER {
            self.toggle_other(choices::FEAR_CONDITION_OTHER_TEXT, self.filled(name));
        } else if name == choices::VISIT_PURPOSE {
            let other = matches!(self.values.get(name), Some(FieldValue::Text(v)) if v == "other");
            self.toggle_other(choices::VISIT_PURPOSE_OTHER_TEXT, other);
        }
    }

    /// `source` was just edited: when it holds a value, `target` is cleared
    /// and disabled; when it was emptied, `target` is enabled again.
    fn exclude_pair(&mut self, source: &str, target: &str) {
        if self.filled(source) {
            self.clear(target);
            self.disabled.insert(target.to_string());
        } else {
            self.disabled.remove(target);
        }
    }

    fn toggle_other(&mut self, text_field: &str, enabled: bool) {
        if enabled {
            self.disabled.remove(text_field);
        } else {
            self.clear(text_field);
            self.disabled.insert(text_field.to_string());
        }
    }

    fn refresh_disabled(&mut self) {
        self.disabled.clear();
        for slot in FamilySlot::ALL {
            let age_field = slot.age_field();
            let death_field = slot.death_age_field();
            if self.schema.field(&age_field).is_none() {
                continue;
            }
            if self.filled(&age_field) {
                self.disabled.insert(death_field);
            } else if self.filled(&death_field) {
                self.disabled.insert(age_field);
            }
        }
        let links = [
            (choices::PAST_CARE_OTHER, choices::PAST_CARE_OTHER_TEXT),
            (choices::FEAR_CONDITION_OTHER, choices::FEAR_CONDITION_OTHER_TEXT),
        ];
        for (flag, text) in links {
            if self.schema.field(text).is_some() && !self.filled(flag) {
                self.disabled.insert(text.to_string());
            }
        }
        let visit_other =
            matches!(self.values.get(choices::VISIT_PURPOSE), Some(FieldValue::Text(v)) if v == "other");
        if self.schema.field(choices::VISIT_PURPOSE_OTHER_TEXT).is_some() && !visit_other {
            self.disabled.insert(choices::VISIT_PURPOSE_OTHER_TEXT.to_string());
        }
    }
}

impl ControlSource for FormState {
    fn controls(&self) -> Vec<Control> {
        let mut controls = Vec::with_capacity(self.schema.fields().len());
        for spec in self.schema.fields() {
            let value = self.values.get(&spec.name);
            match spec.kind {
                ControlKind::Checkbox => {
                    let checked = matches!(value, Some(FieldValue::Flag(true)));
                    controls.push(Control::checkbox(spec.name.clone(), checked));
                }
                ControlKind::Radio => {
                    if let Some(FieldValue::Text(v)) = value
                        && !v.is_empty()
                    {
                        controls.push(Control::radio(spec.name.clone(), v.clone(), true));
                    }
                }
                kind => {
                    let text = match value {
                        Some(FieldValue::Text(v)) => v.clone(),
                        _ => String::new(),
                    };
                    controls.push(Control::new(spec.name.clone(), kind, text));
                }
            }
        }
        controls
    }
}

fn kind_label(kind: ControlKind) -> &'static str {
    match kind {
        ControlKind::Radio => "option",
        ControlKind::Checkbox => "flag",
        _ => "text",
    }
}
