use healthplex_core::collect::{collect, collect_with_schema, Control, ControlKind};
use healthplex_core::schema::FormSchema;
use healthplex_core::{FieldValue, FlatFormData, FormType};

#[test]
fn checkboxes_always_resolve_to_flags() {
    let controls = vec![
        Control::checkbox("pastCare_diet", true),
        Control::checkbox("pastCare_vitamins", false),
        Control::text("firstName", "Ada"),
    ];

    let data = collect(&controls);
    assert_eq!(data.get("pastCare_diet"), Some(&FieldValue::Flag(true)));
    assert_eq!(data.get("pastCare_vitamins"), Some(&FieldValue::Flag(false)));
    assert_eq!(data.get("firstName"), Some(&FieldValue::Text("Ada".to_string())));
}

#[test]
fn blank_text_is_empty_string_not_absent() {
    let controls = vec![Control::text("middleName", "")];
    let data = collect(&controls);
    assert_eq!(data.text("middleName").unwrap(), Some(""));
}

#[test]
fn double_quotes_are_replaced() {
    let controls = vec![Control::text("height", "6'2\"")];
    let data = collect(&controls);
    assert_eq!(data.text("height").unwrap(), Some("6'2'"));
}

#[test]
fn radio_contributes_only_checked_option() {
    let controls = vec![
        Control::radio("sex", "male", false),
        Control::radio("sex", "female", true),
        Control::radio("smoke", "yes", false),
        Control::radio("smoke", "no", false),
    ];
    let data = collect(&controls);
    assert_eq!(data.text("sex").unwrap(), Some("female"));
    assert!(!data.contains_key("smoke"));
}

#[test]
fn shared_checkbox_name_becomes_multi_select() {
    let controls = vec![
        Control::option("days", "mon", true),
        Control::option("days", "tue", false),
        Control::option("days", "wed", true),
        Control::option("colors", "red", false),
        Control::option("colors", "blue", false),
    ];
    let data = collect(&controls);
    assert_eq!(
        data.get("days"),
        Some(&FieldValue::List(vec!["mon".to_string(), "wed".to_string()]))
    );
    assert_eq!(data.get("colors"), Some(&FieldValue::List(Vec::new())));
}

#[test]
fn repeated_text_names_aggregate() {
    let controls = vec![
        Control::new("allergy", ControlKind::Text, "pollen"),
        Control::new("allergy", ControlKind::Text, "dust"),
    ];
    let data = collect(&controls);
    assert_eq!(
        data.get("allergy"),
        Some(&FieldValue::List(vec!["pollen".to_string(), "dust".to_string()]))
    );
}

#[test]
fn unnamed_controls_are_ignored() {
    let controls = vec![Control::text("", "stray"), Control::checkbox("", true)];
    assert!(collect(&controls).is_empty());
}

#[test]
fn schema_fills_every_known_checkbox() {
    let schema = FormSchema::for_form(FormType::FamilyHistory);
    let controls = vec![Control::checkbox("cancer_mother", true)];

    let data = collect_with_schema(&controls, &schema);
    for spec in schema.checkboxes() {
        assert!(
            matches!(data.get(&spec.name), Some(FieldValue::Flag(_))),
            "checkbox {} missing",
            spec.name
        );
    }
    assert!(data.flag("cancer_mother").unwrap());
    assert!(!data.flag("cancer_father").unwrap());
}

#[test]
fn flat_data_round_trips_through_json() {
    let mut data = FlatFormData::new();
    data.insert("firstName", "Ada");
    data.insert("pastCare_diet", true);
    data.insert("days", FieldValue::List(vec!["mon".to_string()]));

    let json = serde_json::to_string(&data).unwrap();
    assert_eq!(json, r#"{"days":["mon"],"firstName":"Ada","pastCare_diet":true}"#);
    let back: FlatFormData = serde_json::from_str(&json).unwrap();
    assert_eq!(back, data);
}
