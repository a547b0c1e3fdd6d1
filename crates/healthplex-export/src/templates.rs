//! Built-in Tera templates. Output uses the Markdown-ish subset understood
//! by [`crate::docx::generate_docx`].

pub const REVIEW_SUMMARY_NAME: &str = "review_summary.md";

/// Step 8 summary shown before the wizard is submitted.
pub const REVIEW_SUMMARY: &str = r#"## Patient Information
**Name:** {{ first_name }} {{ last_name }}
**Email:** {{ email }}
**Phone:** {{ phone }}

## Primary Health Concerns
**Main Complaint:** {{ complaint }}

**Ready to submit?** Please review your information above. By clicking Submit, your intake forms will be securely sent to The Healthplex team for review before your appointment.
"#;

pub const SNAPSHOT_NAME: &str = "snapshot.md";

/// Full copy of a submission, attached to the webhook payload.
pub const SNAPSHOT: &str = r#"# {{ meta.formName }}

**Patient:** {{ contact.fullName }}
**Email:** {{ contact.email }}
**Phone:** {{ contact.phone }}
**Submitted:** {{ meta.submittedAt }}
{%- if consultation %}

## Health Concerns
{%- for complaint in consultation.complaints.allComplaints %}
- {{ complaint }}
{%- endfor %}
{%- if consultation.complaints.allComplaints | length == 0 %}
Not specified
{%- endif %}
**Duration:** {{ consultation.complaints.duration }}
**Visit purpose:** {{ consultation.visitPurpose.label }}
**Past care:** {{ consultation.pastCare.text }}
**Desired improvements:** {{ consultation.improvements.text }}
**Fears:** {{ consultation.fears.areasText }}
**Commitment (average):** {{ consultation.commitment.average }}
{%- endif %}
{%- if familyHistory %}

## Family History
{%- for key, summary in familyHistory.conditionSummary %}
- **{{ summary.displayName }}:** {{ summary.affectedMembersText }}
{%- endfor %}
{%- for other in familyHistory.otherConditions %}
- **{{ other.name }}:** {{ other.affectedMembersText }}
{%- endfor %}
{%- endif %}
{%- if metabolicAssessment %}

## Metabolic Assessment
**Total score:** {{ metabolicAssessment.grandTotal }} ({{ metabolicAssessment.scoreInterpretation.level }})
{{ metabolicAssessment.scoreInterpretation.description }}
**Top concerns:** {{ metabolicAssessment.topConcerns | join(sep=", ") }}

| Category | Score |
{%- for ranked in metabolicAssessment.categoryRankings %}
| {{ ranked.name }} | {{ ranked.subtotal }} |
{%- endfor %}
{%- if metabolicAssessment.genderSpecific.categoryName %}
| {{ metabolicAssessment.genderSpecific.categoryName }} | {{ metabolicAssessment.genderSpecific.subtotal }} |
{%- endif %}
{%- endif %}
{%- if lifestyle %}

## Lifestyle
**Stress level:** {{ lifestyle.stressLevel }}
**Smokes:** {% if lifestyle.smokes %}Yes{% else %}No{% endif %}
**Medications:** {{ medications.current }}
**Supplements:** {{ medications.supplements }}
{%- endif %}
"#;
