use serde::Serialize;

use healthplex_core::family::{
    custom_condition_member_field, custom_condition_name_field, FamilyCondition, FamilySlot,
    VitalStatus, MAX_CUSTOM_CONDITIONS,
};
use healthplex_core::{FlatFormData, OrderedMap};

use crate::consultation::LIST_SEPARATOR;
use crate::error::PayloadError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilySection {
    /// Keyed by slot, in slot order.
    pub family_members: OrderedMap<FamilyMember>,
    pub other_conditions: Vec<OtherCondition>,
    /// Only conditions reported for at least one relative.
    pub condition_summary: OrderedMap<ConditionSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyMember {
    pub display_name: String,
    pub age: Option<String>,
    pub death_age: Option<String>,
    pub is_deceased: bool,
    pub conditions: OrderedMap<bool>,
    pub conditions_list: Vec<String>,
    pub conditions_text: String,
    pub has_conditions: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OtherCondition {
    pub name: String,
    pub affected_members: Vec<String>,
    pub affected_members_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionSummary {
    pub display_name: String,
    pub affected_members: Vec<String>,
    pub affected_members_text: String,
    pub count: usize,
}

pub fn build(data: &FlatFormData) -> Result<FamilySection, PayloadError> {
    let mut family_members = OrderedMap::new();
    for slot in FamilySlot::ALL {
        let status = VitalStatus::resolve(
            data.text(&slot.age_field())?,
            data.text(&slot.death_age_field())?,
        );
        let mut conditions = OrderedMap::new();
        let mut conditions_list = Vec::new();
        for condition in FamilyCondition::ALL {
            let has = data.flag(&condition.field(slot))?;
            conditions.insert(condition.key(), has);
            if has {
                conditions_list.push(condition.display_name().to_string());
            }
        }
        family_members.insert(
            slot.key(),
            FamilyMember {
                display_name: slot.display_name().to_string(),
                age: status.age().map(str::to_string),
                death_age: status.death_age().map(str::to_string),
                is_deceased: status.is_deceased(),
                conditions,
                conditions_text: conditions_list.join(LIST_SEPARATOR),
                has_conditions: !conditions_list.is_empty(),
                conditions_list,
            },
        );
    }

    let mut other_conditions = Vec::new();
    for index in 1..=MAX_CUSTOM_CONDITIONS {
        let Some(name) = data.non_empty_text(&custom_condition_name_field(index))? else {
            continue;
        };
        let mut affected = Vec::new();
        for slot in FamilySlot::ALL {
            if data.flag(&custom_condition_member_field(index, slot))? {
                affected.push(slot.display_name().to_string());
            }
        }
        other_conditions.push(OtherCondition {
            name: name.to_string(),
            affected_members_text: affected.join(LIST_SEPARATOR),
            affected_members: affected,
        });
    }

    let mut condition_summary = OrderedMap::new();
    for condition in FamilyCondition::ALL {
        let mut affected = Vec::new();
        for slot in FamilySlot::ALL {
            if data.flag(&condition.field(slot))? {
                affected.push(slot.display_name().to_string());
            }
        }
        if affected.is_empty() {
            continue;
        }
        condition_summary.insert(
            condition.key(),
            ConditionSummary {
                display_name: condition.display_name().to_string(),
                affected_members_text: affected.join(LIST_SEPARATOR),
                count: affected.len(),
                affected_members: affected,
            },
        );
    }

    tracing::debug!(
        custom_conditions = other_conditions.len(),
        summarized_conditions = condition_summary.len(),
        "built family history section"
    );

    Ok(FamilySection {
        family_members,
        other_conditions,
        condition_summary,
    })
}
