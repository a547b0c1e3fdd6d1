//! Field collector: reads the current state of a form's controls into a
//! [`FlatFormData`] map.
//!
//! The form itself is reached through [`ControlSource`], so the collector can
//! run against a live form binding, a restored draft, or a plain vector of
//! controls in tests.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::field::{sanitize_string, FieldValue, FlatFormData};
use crate::schema::FormSchema;

/// The input type of a form control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ControlKind {
    Text,
    TextArea,
    Email,
    Tel,
    Date,
    Number,
    Select,
    Hidden,
    Radio,
    Checkbox,
}

impl ControlKind {
    /// Controls whose value is free text typed or picked by the user.
    pub fn is_textual(self) -> bool {
        !matches!(self, ControlKind::Radio | ControlKind::Checkbox)
    }
}

/// The state of one control at collection time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Control {
    pub name: String,
    pub kind: ControlKind,
    /// The control's value attribute (typed text, or the option value of a
    /// radio / checkbox).
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub checked: bool,
}

impl Control {
    pub fn new(name: impl Into<String>, kind: ControlKind, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            value: value.into(),
            checked: false,
        }
    }

    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, ControlKind::Text, value)
    }

    pub fn checkbox(name: impl Into<String>, checked: bool) -> Self {
        Self {
            checked,
            ..Self::new(name, ControlKind::Checkbox, "on")
        }
    }

    pub fn radio(name: impl Into<String>, value: impl Into<String>, checked: bool) -> Self {
        Self {
            checked,
            ..Self::new(name, ControlKind::Radio, value)
        }
    }

    /// A checkbox that is one option of a same-named multi-select group.
    pub fn option(name: impl Into<String>, value: impl Into<String>, checked: bool) -> Self {
        Self {
            checked,
            ..Self::new(name, ControlKind::Checkbox, value)
        }
    }
}

/// Access to a form's controls in document order.
pub trait ControlSource {
    fn controls(&self) -> Vec<Control>;
}

impl ControlSource for Vec<Control> {
    fn controls(&self) -> Vec<Control> {
        self.clone()
    }
}

impl ControlSource for [Control] {
    fn controls(&self) -> Vec<Control> {
        self.to_vec()
    }
}

/// Collect every named control into a flat map.
///
/// - Text-like controls contribute their value verbatim; repeated names
///   aggregate into a list.
/// - A radio group contributes the value of its checked option and is
///   absent when nothing is checked.
/// - A checkbox whose name is unique resolves to an explicit flag. Several
///   checkboxes sharing a name form a multi-select and resolve to the list
///   of checked values, empty when none is checked.
///
/// All strings are sanitized on the way in.
pub fn collect(source: &dyn ControlSource) -> FlatFormData {
    let controls = source.controls();

    let mut checkbox_counts: HashMap<&str, usize> = HashMap::new();
    for control in controls.iter().filter(|c| c.kind == ControlKind::Checkbox) {
        *checkbox_counts.entry(control.name.as_str()).or_default() += 1;
    }

    let mut data = FlatFormData::new();
    let mut checked = 0usize;
    let mut total = 0usize;

    for control in controls.iter().filter(|c| !c.name.is_empty()) {
        let name = control.name.as_str();
        match control.kind {
            ControlKind::Checkbox => {
                total += 1;
                if control.checked {
                    checked += 1;
                }
                if checkbox_counts.get(name).copied().unwrap_or(0) > 1 {
                    if !matches!(data.get(name), Some(FieldValue::List(_))) {
                        data.insert(name, FieldValue::List(Vec::new()));
                    }
                    if control.checked
                        && let Some(FieldValue::List(items)) = data.get_mut(name)
                    {
                        items.push(sanitize_string(&control.value));
                    }
                } else {
                    data.insert(name, FieldValue::Flag(control.checked));
                }
            }
            ControlKind::Radio => {
                if control.checked {
                    data.insert(name, FieldValue::Text(sanitize_string(&control.value)));
                }
            }
            _ => append_text(&mut data, name, sanitize_string(&control.value)),
        }
    }

    tracing::debug!(checked, total, fields = data.len(), "collected form controls");
    data
}

/// Collect, then make sure every checkbox the schema knows about is present
/// as an explicit `false` even if the source did not render it.
pub fn collect_with_schema(source: &dyn ControlSource, schema: &FormSchema) -> FlatFormData {
    let mut data = collect(source);
    for spec in schema.checkboxes() {
        if !data.contains_key(&spec.name) {
            data.insert(spec.name.clone(), FieldValue::Flag(false));
        }
    }
    data
}

fn append_text(data: &mut FlatFormData, name: &str, value: String) {
    let merged = match data.remove(name) {
        Some(FieldValue::List(mut items)) => {
            items.push(value);
            FieldValue::List(items)
        }
        Some(FieldValue::Text(first)) => FieldValue::List(vec![first, value]),
        _ => FieldValue::Text(value),
    };
    data.insert(name, merged);
}
